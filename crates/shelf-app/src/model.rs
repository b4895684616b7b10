// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub category: String,
    pub name: String,
    /// Already formatted for display, e.g. `"$1"`.
    pub price: String,
    pub stocked: bool,
}

impl Product {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        stocked: bool,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            price: price.into(),
            stocked,
        }
    }
}

/// One line of the product table body. Rows borrow from the product list they
/// were computed from and are rebuilt on every filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRow<'a> {
    CategoryHeader(&'a str),
    Product(&'a Product),
}

impl<'a> DisplayRow<'a> {
    pub const fn is_header(self) -> bool {
        matches!(self, Self::CategoryHeader(_))
    }

    pub const fn product(self) -> Option<&'a Product> {
        match self {
            Self::Product(product) => Some(product),
            Self::CategoryHeader(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Price,
}

impl Column {
    pub const ALL: [Self; 2] = [Self::Name, Self::Price];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Price => "Price",
        }
    }

    pub fn cell(self, product: &Product) -> &str {
        match self {
            Self::Name => &product.name,
            Self::Price => &product.price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    StockToggle,
}

impl Focus {
    pub const ALL: [Self; 2] = [Self::Search, Self::StockToggle];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::StockToggle => "stock",
        }
    }
}

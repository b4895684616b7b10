// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::Product;

pub const SEARCH_PLACEHOLDER: &str = "...search";
pub const STOCK_TOGGLE_LABEL: &str = "Only show products in stock";

const CATALOG: [(&str, &str, &str, bool); 6] = [
    ("Fruits", "$1", "Apple", true),
    ("Fruits", "$1", "Dragonfruit", true),
    ("Fruits", "$2", "Passionfruit", false),
    ("Vegetables", "$2", "Spinach", true),
    ("Vegetables", "$4", "Pumpkin", false),
    ("Vegetables", "$1", "Peas", true),
];

/// The fixed product list, in display order.
pub fn catalog() -> Vec<Product> {
    CATALOG
        .iter()
        .map(|(category, price, name, stocked)| Product::new(*category, *name, *price, *stocked))
        .collect()
}

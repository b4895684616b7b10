// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use shelf_app::{FilterState, Product};

/// Serves a fixed product list to the view.
pub struct CatalogRuntime {
    products: Vec<Product>,
    filter_changes: usize,
}

impl CatalogRuntime {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            filter_changes: 0,
        }
    }

    pub fn builtin() -> Self {
        Self::new(shelf_app::catalog())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filter_changes(&self) -> usize {
        self.filter_changes
    }
}

impl shelf_tui::AppRuntime for CatalogRuntime {
    fn load_products(&mut self) -> Result<Vec<Product>> {
        tracing::info!(products = self.products.len(), "catalog loaded");
        Ok(self.products.clone())
    }

    fn filter_changed(&mut self, filter: &FilterState, visible_products: usize) -> Result<()> {
        self.filter_changes += 1;
        tracing::info!(
            filter_text = %filter.filter_text,
            in_stock_only = filter.in_stock_only,
            visible_products,
            "filter applied"
        );
        Ok(())
    }
}

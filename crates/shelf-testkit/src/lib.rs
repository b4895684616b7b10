// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use shelf_app::Product;
use std::path::PathBuf;

const CATEGORIES: [&str; 6] = [
    "Fruits",
    "Vegetables",
    "Dairy",
    "Bakery",
    "Pantry",
    "Frozen",
];

const NAME_STEMS: [&str; 16] = [
    "Apple", "Banana", "Kiwi", "Mango", "Dragonfruit", "Passionfruit", "Spinach", "Pumpkin",
    "Peas", "Carrot", "Cheddar", "Yogurt", "Sourdough", "Bagel", "Oats", "Sorbet",
];

const NAME_SUFFIXES: [&str; 6] = ["", " Jr", " Deluxe", " Mini", " XL", " Organic"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator for product lists. The same seed always yields the same
/// products, so failures in property-style tests are reproducible.
#[derive(Debug, Clone)]
pub struct ProductFaker {
    rng: DeterministicRng,
    serial: usize,
}

impl ProductFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            serial: 0,
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn product(&mut self) -> Product {
        let category = self.pick(&CATEGORIES);
        self.product_in(category)
    }

    pub fn product_in(&mut self, category: &str) -> Product {
        self.serial += 1;
        let stem = self.pick(&NAME_STEMS);
        let suffix = self.pick(&NAME_SUFFIXES);
        let name = if self.rng.bool() {
            format!("{stem}{suffix} {}", self.serial)
        } else {
            format!("{}{suffix} {}", stem.to_uppercase(), self.serial)
        };
        let price = format!("${}", 1 + self.rng.int_n(9));
        Product::new(category, name, price, self.rng.bool())
    }

    /// A list where categories come in runs, and a category may come back
    /// after another one interrupted it.
    pub fn catalog(&mut self, len: usize) -> Vec<Product> {
        let mut products = Vec::with_capacity(len);
        let mut category = self.pick(&CATEGORIES);
        for _ in 0..len {
            if self.rng.int_n(3) == 0 {
                category = self.pick(&CATEGORIES);
            }
            products.push(self.product_in(category));
        }
        products
    }

    /// A filter string that is a slice of a name in `products`, or a random
    /// stem when there is no name to slice.
    pub fn filter_text(&mut self, products: &[Product]) -> String {
        if products.is_empty() || self.rng.int_n(4) == 0 {
            return self.pick(&NAME_STEMS).to_lowercase();
        }
        let name = &products[self.rng.int_n(products.len())].name;
        let chars = name.chars().collect::<Vec<_>>();
        if chars.is_empty() {
            return self.pick(&NAME_STEMS).to_lowercase();
        }
        let start = self.rng.int_n(chars.len());
        let len = 1 + self.rng.int_n((chars.len() - start).min(4));
        let slice = chars[start..start + len].iter().collect::<String>();
        if self.rng.bool() {
            slice.to_uppercase()
        } else {
            slice
        }
    }

    fn pick<'a>(&mut self, values: &[&'a str]) -> &'a str {
        values[self.rng.int_n(values.len())]
    }
}

/// Same category label in two separated runs.
pub fn split_category_products() -> Vec<Product> {
    vec![
        Product::new("Fruits", "Apple", "$1", true),
        Product::new("Fruits", "Kiwi", "$2", false),
        Product::new("Vegetables", "Peas", "$1", false),
        Product::new("Fruits", "Mango", "$3", true),
    ]
}

pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("config.toml");
    Ok((dir, path))
}

pub fn write_temp_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let (dir, path) = temp_config_path()?;
    std::fs::write(&path, content)
        .with_context(|| format!("write temp config {}", path.display()))?;
    Ok((dir, path))
}

#[cfg(test)]
mod tests {
    use super::{CATEGORIES, ProductFaker, split_category_products, write_temp_config};
    use shelf_app::Product;
    use anyhow::Result;
    use std::collections::BTreeSet;

    #[test]
    fn new_deterministic_seed() {
        let mut left = ProductFaker::new(42);
        let mut right = ProductFaker::new(42);
        assert_eq!(left.catalog(12), right.catalog(12));
    }

    #[test]
    fn zero_seed_is_normalized() {
        let mut zero = ProductFaker::new(0);
        let mut one = ProductFaker::new(1);
        assert_eq!(zero.product(), one.product());
    }

    #[test]
    fn generated_names_are_unique() {
        let mut faker = ProductFaker::new(7);
        let products = faker.catalog(200);
        let names = products
            .iter()
            .map(|product| product.name.as_str())
            .collect::<BTreeSet<_>>();
        assert_eq!(names.len(), products.len());
    }

    #[test]
    fn generated_fields_are_populated() {
        let mut faker = ProductFaker::new(3);
        for product in faker.catalog(50) {
            assert!(CATEGORIES.contains(&product.category.as_str()));
            assert!(!product.name.is_empty());
            assert!(product.price.starts_with('$'));
        }
    }

    #[test]
    fn filter_text_is_never_empty() {
        let mut faker = ProductFaker::new(11);
        let products = faker.catalog(10);
        for _ in 0..50 {
            assert!(!faker.filter_text(&products).is_empty());
        }
        assert!(!faker.filter_text(&[]).is_empty());
    }

    #[test]
    fn filter_text_falls_back_to_a_stem_for_unnamed_products() {
        let mut faker = ProductFaker::new(5);
        let unnamed = vec![Product::new("Fruits", "", "$1", true)];
        for _ in 0..50 {
            assert!(!faker.filter_text(&unnamed).is_empty());
        }
    }

    #[test]
    fn split_fixture_repeats_a_category() {
        let categories = split_category_products()
            .into_iter()
            .map(|product| product.category)
            .collect::<Vec<_>>();
        assert_eq!(categories, vec!["Fruits", "Fruits", "Vegetables", "Fruits"]);
    }

    #[test]
    fn temp_config_is_written() -> Result<()> {
        let (_dir, path) = write_temp_config("version = 1\n")?;
        assert_eq!(std::fs::read_to_string(path)?, "version = 1\n");
        Ok(())
    }
}

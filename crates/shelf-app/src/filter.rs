// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{DisplayRow, Product};

/// Filter `products` by name and stock, inserting a category header wherever
/// the category changes between consecutive visible products.
///
/// Grouping is by adjacency only: a category that shows up in two separate
/// runs of the input gets two headers. Input order is preserved.
pub fn compute_rows<'a>(
    products: &'a [Product],
    filter_text: &str,
    in_stock_only: bool,
) -> Vec<DisplayRow<'a>> {
    let needle = filter_text.to_lowercase();
    let mut rows = Vec::new();
    // Starts empty, so a product with an empty category opens no header.
    let mut last_category = "";

    for product in products {
        if !matches_name(product, &needle) {
            continue;
        }
        if in_stock_only && !product.stocked {
            continue;
        }
        if product.category != last_category {
            rows.push(DisplayRow::CategoryHeader(&product.category));
        }
        rows.push(DisplayRow::Product(product));
        last_category = &product.category;
    }

    rows
}

/// `needle_lower` must already be lower-cased. An empty needle matches every
/// product.
pub fn matches_name(product: &Product, needle_lower: &str) -> bool {
    needle_lower.is_empty() || product.name.to_lowercase().contains(needle_lower)
}

pub fn product_count(rows: &[DisplayRow<'_>]) -> usize {
    rows.iter().filter(|row| !row.is_header()).count()
}

pub fn header_count(rows: &[DisplayRow<'_>]) -> usize {
    rows.iter().filter(|row| row.is_header()).count()
}

#[cfg(test)]
mod tests {
    use super::{compute_rows, header_count, matches_name, product_count};
    use crate::{DisplayRow, Product, catalog};

    fn labels(rows: &[DisplayRow<'_>]) -> Vec<String> {
        rows.iter()
            .map(|row| match row {
                DisplayRow::CategoryHeader(category) => format!("# {category}"),
                DisplayRow::Product(product) => product.name.clone(),
            })
            .collect()
    }

    #[test]
    fn empty_filter_lists_every_product_under_two_headers() {
        let products = catalog();
        let rows = compute_rows(&products, "", false);
        assert_eq!(
            labels(&rows),
            vec![
                "# Fruits",
                "Apple",
                "Dragonfruit",
                "Passionfruit",
                "# Vegetables",
                "Spinach",
                "Pumpkin",
                "Peas",
            ]
        );
        assert_eq!(rows.len(), 8);
        assert_eq!(product_count(&rows), 6);
        assert_eq!(header_count(&rows), 2);
    }

    #[test]
    fn substring_filter_keeps_only_matching_names() {
        let products = catalog();
        let rows = compute_rows(&products, "fruit", false);
        assert_eq!(
            labels(&rows),
            vec!["# Fruits", "Dragonfruit", "Passionfruit"]
        );
    }

    #[test]
    fn filter_is_case_insensitive() {
        let products = catalog();
        let lower = compute_rows(&products, "fruit", false);
        let mixed = compute_rows(&products, "FrUiT", false);
        assert_eq!(lower, mixed);
    }

    #[test]
    fn stock_only_drops_unstocked_products_and_keeps_headers() {
        let products = catalog();
        let rows = compute_rows(&products, "", true);
        assert_eq!(
            labels(&rows),
            vec![
                "# Fruits",
                "Apple",
                "Dragonfruit",
                "# Vegetables",
                "Spinach",
                "Peas",
            ]
        );
    }

    #[test]
    fn no_match_yields_no_rows() {
        let products = catalog();
        assert!(compute_rows(&products, "zzz", false).is_empty());
    }

    #[test]
    fn stock_only_with_only_unstocked_matches_yields_no_rows() {
        let products = catalog();
        assert!(compute_rows(&products, "pumpkin", true).is_empty());
    }

    #[test]
    fn header_is_dropped_when_category_has_no_visible_products() {
        let products = catalog();
        let rows = compute_rows(&products, "p", false);
        assert_eq!(
            labels(&rows),
            vec![
                "# Fruits",
                "Apple",
                "Passionfruit",
                "# Vegetables",
                "Spinach",
                "Pumpkin",
                "Peas",
            ]
        );

        let rows = compute_rows(&products, "pea", false);
        assert_eq!(labels(&rows), vec!["# Vegetables", "Peas"]);
    }

    #[test]
    fn non_adjacent_runs_of_a_category_get_separate_headers() {
        let products = vec![
            Product::new("Fruits", "Apple", "$1", true),
            Product::new("Vegetables", "Peas", "$1", true),
            Product::new("Fruits", "Kiwi", "$3", true),
        ];
        let rows = compute_rows(&products, "", false);
        assert_eq!(
            labels(&rows),
            vec!["# Fruits", "Apple", "# Vegetables", "Peas", "# Fruits", "Kiwi"]
        );
    }

    #[test]
    fn hidden_product_between_same_category_does_not_split_the_run() {
        let products = vec![
            Product::new("Fruits", "Apple", "$1", true),
            Product::new("Vegetables", "Pumpkin", "$4", false),
            Product::new("Fruits", "Kiwi", "$3", true),
        ];
        let rows = compute_rows(&products, "", true);
        assert_eq!(labels(&rows), vec!["# Fruits", "Apple", "Kiwi"]);
    }

    #[test]
    fn leading_empty_category_opens_no_header() {
        let products = vec![
            Product::new("", "Mystery", "$9", true),
            Product::new("Fruits", "Apple", "$1", true),
            Product::new("", "Riddle", "$2", true),
        ];
        let rows = compute_rows(&products, "", false);
        assert_eq!(
            labels(&rows),
            vec!["Mystery", "# Fruits", "Apple", "# ", "Riddle"]
        );
    }

    #[test]
    fn repeated_calls_produce_identical_rows() {
        let products = catalog();
        let first = compute_rows(&products, "a", true);
        let second = compute_rows(&products, "a", true);
        assert_eq!(first, second);
    }

    #[test]
    fn matches_name_treats_empty_needle_as_wildcard() {
        let product = Product::new("Fruits", "Apple", "$1", true);
        assert!(matches_name(&product, ""));
        assert!(matches_name(&product, "ppl"));
        assert!(!matches_name(&product, "pear"));
    }
}

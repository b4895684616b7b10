// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Column, DisplayRow, Product};
use std::fmt::Write;

pub const IN_STOCK_CLASS: &str = "in-stock";
pub const OUT_OF_STOCK_CLASS: &str = "out-of-stock";

/// Render rows as a two-column HTML table. Category headers span both columns;
/// unstocked products are marked with a style class only.
pub fn render_table_html(rows: &[DisplayRow<'_>]) -> String {
    let mut html = String::from("<table>\n  <thead>\n    <tr>");
    for column in Column::ALL {
        let _ = write!(html, "<th>{}</th>", escape_html(column.label()));
    }
    html.push_str("</tr>\n  </thead>\n  <tbody>");

    if rows.is_empty() {
        html.push_str("</tbody>\n</table>\n");
        return html;
    }

    html.push('\n');
    for row in rows {
        match row {
            DisplayRow::CategoryHeader(category) => {
                let _ = writeln!(
                    html,
                    "    <tr><th colspan=\"{}\">{}</th></tr>",
                    Column::ALL.len(),
                    escape_html(category)
                );
            }
            DisplayRow::Product(product) => {
                html.push_str("    <tr>");
                let class = stock_class(product);
                for column in Column::ALL {
                    let _ = write!(
                        html,
                        "<td class=\"{class}\">{}</td>",
                        escape_html(column.cell(product))
                    );
                }
                html.push_str("</tr>\n");
            }
        }
    }
    html.push_str("  </tbody>\n</table>\n");
    html
}

pub fn stock_class(product: &Product) -> &'static str {
    if product.stocked {
        IN_STOCK_CLASS
    } else {
        OUT_OF_STOCK_CLASS
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

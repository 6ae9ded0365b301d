//! Plain-text rendering of the product table.

use crate::domains::catalog::list::ProductRow;

/// Render rows under the standard headings, columns padded to fit.
pub fn render(rows: &[ProductRow]) -> String {
    let mut widths = ProductRow::HEADERS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, ProductRow::HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        push_line(&mut out, row.cells(), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl IntoIterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .into_iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::table::Table;

/// Renders a table as aligned plain text: column names, column types, a
/// dashed rule, then one line per row.
pub fn render_table(table: &Table) -> String {
    let schema = table.schema();
    let names = schema.headers();
    let types = schema
        .columns
        .iter()
        .map(|c| c.datatype.to_string())
        .collect::<Vec<_>>();
    let rows = table.display_rows();

    let mut widths = names
        .iter()
        .zip(&types)
        .map(|(name, ty)| display_width(name).max(display_width(ty)).max(3))
        .collect::<Vec<_>>();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(&sanitize_cell(cell)));
        }
    }

    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    let mut output = String::new();
    for line in [&names, &types, &rule].into_iter().chain(rows.iter()) {
        let _ = writeln!(output, "{}", format_row(line, &widths));
    }
    output
}

pub fn print_table(table: &Table) {
    print!("{}", render_table(table));
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let sanitized = sanitize_cell(value);
            let padding = width.saturating_sub(display_width(&sanitized));
            format!("{sanitized}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

fn display_width(value: &str) -> usize {
    let mut width = 0usize;
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            // ANSI escape, e.g. \x1b[31m
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}

use std::cmp;

use serde_json::Value;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const MIN_LAST_COLUMN_WIDTH: usize = 12;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(120);
    cmp::max(from_env, 40)
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Column-aligned table. Only the last column wraps, at word boundaries,
/// when the row would overflow `max_width`.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>], max_width: usize) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let mut widths = columns
        .iter()
        .map(|column| column.name.chars().count())
        .collect::<Vec<usize>>();
    for row in rows {
        for (slot, value) in widths.iter_mut().zip(row) {
            *slot = cmp::max(*slot, value.chars().count());
        }
    }

    let last = columns.len() - 1;
    let leading = INDENT + widths[..last].iter().map(|width| width + COLUMN_GAP).sum::<usize>();
    let available = max_width.saturating_sub(leading);
    if widths[last] > available {
        widths[last] = cmp::max(available, MIN_LAST_COLUMN_WIDTH);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];

    for row in rows {
        let tail = row.get(last).map(String::as_str).unwrap_or("");
        for (index, chunk) in wrap_words(tail, widths[last]).into_iter().enumerate() {
            let mut cells = if index == 0 {
                row.iter().take(last).cloned().collect::<Vec<String>>()
            } else {
                vec![String::new(); last]
            };
            cells.push(chunk);
            output.push(format_row(columns, &cells, &widths));
        }
    }

    output
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let rendered = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, width))| {
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => format!("{value:<width$}"),
                Align::Right => format!("{value:>width$}"),
            }
        })
        .collect::<Vec<String>>()
        .join(&" ".repeat(COLUMN_GAP));
    format!("{}{}", " ".repeat(INDENT), rendered.trim_end())
}

fn wrap_words(value: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in value.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Sales figures keep full precision in data; text shows cents.
pub fn format_amount(value: Option<f64>) -> String {
    match value {
        Some(amount) => format!("{amount:.2}"),
        None => "-".to_string(),
    }
}

pub fn text_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

pub fn count_field(value: &Value, key: &str) -> u64 {
    value.get(key).and_then(Value::as_u64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Align, Column, count_field, format_amount, key_value_rows, render_table, wrap_words};

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Rows read:", "100".to_string()),
                ("Rows skipped:", "0".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Rows read:     100");
        assert_eq!(rows[1], "  Rows skipped:  0");
    }

    #[test]
    fn table_aligns_columns() {
        let columns = [
            Column {
                name: "Date",
                align: Align::Left,
            },
            Column {
                name: "Sales",
                align: Align::Right,
            },
        ];
        let rows = vec![
            vec!["2021-01-10".to_string(), "15.00".to_string()],
            vec!["2021-01-11".to_string(), "1234.50".to_string()],
        ];

        let rendered = render_table(&columns, &rows, 80);
        assert_eq!(rendered[0], "  Date          Sales");
        assert_eq!(rendered[1], "  2021-01-10    15.00");
        assert_eq!(rendered[2], "  2021-01-11  1234.50");
    }

    #[test]
    fn last_column_wraps_without_truncating() {
        let columns = [
            Column {
                name: "Line",
                align: Align::Right,
            },
            Column {
                name: "Problem",
                align: Align::Left,
            },
        ];
        let rows = vec![vec![
            "3".to_string(),
            "price must be numeric (e.g. $3.00); got \"$abc\"".to_string(),
        ]];

        let rendered = render_table(&columns, &rows, 30);
        assert!(rendered.len() > 2);
        assert!(rendered[1].starts_with("     3  price"));
        assert!(rendered.iter().any(|line| line.contains("\"$abc\"")));
    }

    #[test]
    fn wrapping_keeps_long_words_whole() {
        assert_eq!(wrap_words("", 5), vec![String::new()]);
        assert_eq!(wrap_words("abcdefgh ij", 5), vec!["abcdefgh", "ij"]);
    }

    #[test]
    fn amounts_show_cents_and_dash_for_missing() {
        assert_eq!(format_amount(Some(6.0)), "6.00");
        assert_eq!(format_amount(Some(0.30000000000000004)), "0.30");
        assert_eq!(format_amount(None), "-");
    }

    #[test]
    fn count_field_defaults_to_zero() {
        let value = json!({ "rows_read": 7 });
        assert_eq!(count_field(&value, "rows_read"), 7);
        assert_eq!(count_field(&value, "rows_kept"), 0);
    }
}

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::derive::derive_sales;
use super::load::{RawRow, RowSet};
use crate::contracts::types::RowIssue;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '£', '€', '¥'];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%b %d, %Y",
];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// A filtered row with typed fields and the derived sales value.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub product: String,
    pub price: f64,
    pub quantity: Option<i64>,
    pub date: NaiveDate,
    pub region: String,
    pub sales: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct CleanedRows {
    pub records: Vec<CleanRecord>,
    pub issues: Vec<RowIssue>,
    pub rows_skipped: usize,
    pub quantity_missing: usize,
}

struct Columns {
    product: Option<usize>,
    price: Option<usize>,
    quantity: Option<usize>,
    date: Option<usize>,
    region: Option<usize>,
}

pub fn clean_rows(rows: &RowSet) -> CleanedRows {
    let columns = Columns {
        product: rows.column_index("product"),
        price: rows.column_index("price"),
        quantity: rows.column_index("quantity"),
        date: rows.column_index("date"),
        region: rows.column_index("region"),
    };

    let mut cleaned = CleanedRows::default();
    let mut skipped_rows = HashSet::new();

    for row in &rows.rows {
        match clean_row(row, &columns) {
            Ok(record) => {
                if record.quantity.is_none() {
                    cleaned.quantity_missing += 1;
                }
                cleaned.records.push(record);
            }
            Err(row_issues) => {
                skipped_rows.insert((row.file.as_str(), row.line));
                cleaned.issues.extend(row_issues);
            }
        }
    }

    cleaned.rows_skipped = skipped_rows.len();
    cleaned
}

fn clean_row(row: &RawRow, columns: &Columns) -> Result<CleanRecord, Vec<RowIssue>> {
    let mut issues = Vec::new();

    let raw_price = cell(row, columns.price);
    let price = match parse_price(raw_price) {
        Ok(value) => Some(value),
        Err(description) => {
            issues.push(issue(row, "price", "invalid_price", description, raw_price));
            None
        }
    };

    let raw_date = cell(row, columns.date);
    let date = match parse_date(raw_date) {
        Ok(value) => Some(value),
        Err(description) => {
            issues.push(issue(row, "date", "invalid_date", description, raw_date));
            None
        }
    };

    let (Some(price), Some(date)) = (price, date) else {
        return Err(issues);
    };

    let quantity = parse_quantity(cell(row, columns.quantity));
    Ok(CleanRecord {
        product: cell(row, columns.product).trim().to_string(),
        price,
        quantity,
        date,
        region: cell(row, columns.region).trim().to_string(),
        sales: derive_sales(Some(price), quantity),
    })
}

fn cell(row: &RawRow, index: Option<usize>) -> &str {
    index
        .and_then(|position| row.values.get(position))
        .map(String::as_str)
        .unwrap_or("")
}

fn issue(row: &RawRow, field: &str, code: &str, description: String, received: &str) -> RowIssue {
    RowIssue {
        file: row.file.clone(),
        line: row.line,
        field: field.to_string(),
        code: code.to_string(),
        description,
        received: Some(received.to_string()),
    }
}

/// Strips one leading currency symbol and parses a non-negative decimal.
pub fn parse_price(value: &str) -> Result<f64, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("price must be present and non-empty.".to_string());
    }
    let digits = trimmed
        .strip_prefix(CURRENCY_SYMBOLS)
        .unwrap_or(trimmed)
        .trim_start();

    match digits.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        Ok(_) => Err(format!(
            "price must be a finite, non-negative amount; got \"{trimmed}\""
        )),
        Err(_) => Err(format!("price must be numeric (e.g. $3.00); got \"{trimmed}\"")),
    }
}

/// Whole-number quantities; anything else is treated as missing.
pub fn parse_quantity(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(quantity) = trimmed.parse::<i64>() {
        return Some(quantity);
    }
    let decimal = trimmed.parse::<f64>().ok()?;
    if decimal.is_finite() && decimal.fract() == 0.0 && decimal.abs() < i64::MAX as f64 {
        return Some(decimal as i64);
    }
    None
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(timestamp.date());
        }
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }
    Err(format!(
        "date must be a calendar date (e.g. 2021-01-15 or 01/15/2021); got \"{trimmed}\""
    ))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{clean_rows, parse_date, parse_price, parse_quantity};
    use crate::pipeline::load::{RawRow, RowSet};

    fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn rows(values: &[[&str; 5]]) -> RowSet {
        RowSet {
            columns: ["product", "price", "quantity", "date", "region"]
                .iter()
                .map(|value| value.to_string())
                .collect(),
            rows: values
                .iter()
                .enumerate()
                .map(|(index, row)| RawRow {
                    file: "daily_sales_data_0.csv".to_string(),
                    line: index as u64 + 2,
                    values: row.iter().map(|value| value.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn price_strips_currency_symbol() {
        assert_eq!(parse_price("$3.00").ok(), Some(3.0));
        assert_eq!(parse_price(" $ 4.5 ").ok(), Some(4.5));
        assert_eq!(parse_price("£2.25").ok(), Some(2.25));
        assert_eq!(parse_price("7").ok(), Some(7.0));
    }

    #[test]
    fn price_rejects_text_negative_and_empty() {
        assert!(parse_price("$abc").is_err());
        assert!(parse_price("-$1.00").is_err());
        assert!(parse_price("$-1.00").is_err());
        assert!(parse_price("").is_err());
        assert!(parse_price("$inf").is_err());
    }

    #[test]
    fn quantity_invalid_becomes_missing() {
        assert_eq!(parse_quantity("2"), Some(2));
        assert_eq!(parse_quantity(" 3.0 "), Some(3));
        assert_eq!(parse_quantity("-1"), Some(-1));
        assert_eq!(parse_quantity("2.5"), None);
        assert_eq!(parse_quantity("two"), None);
        assert_eq!(parse_quantity(""), None);
    }

    #[test]
    fn dates_accept_common_layouts() {
        assert_eq!(parse_date("2021-01-10").ok(), ymd(2021, 1, 10));
        assert_eq!(parse_date("2021/01/10").ok(), ymd(2021, 1, 10));
        assert_eq!(parse_date("01/10/2021").ok(), ymd(2021, 1, 10));
        assert_eq!(parse_date("10 January 2021").ok(), ymd(2021, 1, 10));
        assert_eq!(parse_date("Jan 10, 2021").ok(), ymd(2021, 1, 10));
        assert_eq!(parse_date("2021-01-10 13:45:00").ok(), ymd(2021, 1, 10));
        assert_eq!(parse_date("2021-01-10T08:00:00+02:00").ok(), ymd(2021, 1, 10));
        assert!(parse_date("2021-13-40").is_err());
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn bad_price_or_date_skips_only_that_row() {
        let cleaned = clean_rows(&rows(&[
            ["pink morsel", "$3.00", "2", "2021-01-10", "north"],
            ["pink morsel", "$x", "2", "2021-01-10", "north"],
            ["pink morsel", "$3.00", "1", "not a date", "south"],
            ["pink morsel", "oops", "1", "never", "east"],
        ]));

        assert_eq!(cleaned.records.len(), 1);
        assert_eq!(cleaned.rows_skipped, 3);
        assert_eq!(cleaned.issues.len(), 4);
        assert_eq!(cleaned.issues[0].line, 3);
        assert_eq!(cleaned.issues[0].code, "invalid_price");
        assert_eq!(cleaned.issues[1].code, "invalid_date");
        assert_eq!(cleaned.issues[1].received.as_deref(), Some("not a date"));
    }

    #[test]
    fn missing_quantity_keeps_row_with_null_sales() {
        let cleaned = clean_rows(&rows(&[
            ["pink morsel", "$3.00", "n/a", "2021-01-10", "north"],
            ["pink morsel", "$3.00", "3", "2021-01-10", "south"],
        ]));

        assert_eq!(cleaned.records.len(), 2);
        assert_eq!(cleaned.quantity_missing, 1);
        assert_eq!(cleaned.records[0].quantity, None);
        assert_eq!(cleaned.records[0].sales, None);
        assert_eq!(cleaned.records[1].sales, Some(9.0));
    }
}

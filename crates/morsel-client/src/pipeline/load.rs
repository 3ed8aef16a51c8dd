use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use tracing::{debug, warn};

use crate::contracts::types::{FileReport, RowIssue};

pub const REQUIRED_COLUMNS: [&str; 5] = ["product", "price", "quantity", "date", "region"];

/// Rows from one or more CSV files, keyed by (normalized) column name.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// One source row with its provenance. `values` lines up with `RowSet::columns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub file: String,
    pub line: u64,
    pub values: Vec<String>,
}

impl RowSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Concatenates row sets in order. Columns are the ordered union; absent cells read as "".
    pub fn concat(sets: Vec<RowSet>) -> RowSet {
        let mut columns: Vec<String> = Vec::new();
        for set in &sets {
            for column in &set.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }
        let position_by_name = columns
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect::<HashMap<String, usize>>();

        let mut rows = Vec::with_capacity(sets.iter().map(RowSet::len).sum());
        for set in sets {
            let targets = set
                .columns
                .iter()
                .map(|name| position_by_name.get(name).copied())
                .collect::<Vec<Option<usize>>>();
            for row in set.rows {
                let mut values = vec![String::new(); columns.len()];
                for (value, target) in row.values.into_iter().zip(&targets) {
                    if let Some(index) = target {
                        values[*index] = value;
                    }
                }
                rows.push(RawRow {
                    file: row.file,
                    line: row.line,
                    values,
                });
            }
        }

        RowSet { columns, rows }
    }
}

/// Rows from one file plus the records that could not be lined up with its header.
#[derive(Debug, Clone, Default)]
pub struct LoadedFile {
    pub rows: RowSet,
    pub issues: Vec<RowIssue>,
}

/// Everything the load stage produced across all located files.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub sets: Vec<RowSet>,
    pub files: Vec<FileReport>,
    pub issues: Vec<RowIssue>,
}

/// Loads every file independently; a failing file is reported and skipped.
pub(crate) fn load_all(paths: &[impl AsRef<Path>]) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();

    for path in paths {
        let path = path.as_ref();
        let shown = path.display().to_string();
        match load_file(path) {
            Ok(loaded) => {
                debug!(
                    file = %shown,
                    rows = loaded.rows.len(),
                    ragged = loaded.issues.len(),
                    "loaded input file"
                );
                if !loaded.issues.is_empty() {
                    warn!(file = %shown, skipped = loaded.issues.len(), "skipping ragged rows");
                }
                outcome.files.push(FileReport {
                    path: shown,
                    status: "loaded".to_string(),
                    rows: loaded.rows.len(),
                    reason: None,
                });
                outcome.sets.push(loaded.rows);
                outcome.issues.extend(loaded.issues);
            }
            Err(reason) => {
                warn!(file = %shown, %reason, "skipping unreadable input file");
                outcome.files.push(FileReport {
                    path: shown,
                    status: "failed".to_string(),
                    rows: 0,
                    reason: Some(reason),
                });
            }
        }
    }

    outcome
}

pub fn load_file(path: &Path) -> Result<LoadedFile, String> {
    let file = File::open(path).map_err(|error| format!("could not open file: {error}"))?;
    let label = path.display().to_string();
    parse_rows(file, &label)
}

/// Header problems fail the whole file. A record whose field count differs
/// from the header is reported as a `ragged_row` issue and left out.
pub(crate) fn parse_rows<R: std::io::Read>(reader: R, label: &str) -> Result<LoadedFile, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = csv_reader
        .headers()
        .map_err(|error| format!("CSV header row is missing or unreadable: {error}"))?
        .iter()
        .map(normalize_column_name)
        .collect::<Vec<String>>();

    let missing = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !columns.iter().any(|column| column == *name))
        .copied()
        .collect::<Vec<&str>>();
    if !missing.is_empty() {
        return Err(format!("missing required column(s): {}", missing.join(", ")));
    }

    let mut loaded = LoadedFile::default();
    for result in csv_reader.records() {
        let record = result.map_err(|error| format!("malformed CSV: {error}"))?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);
        if record.len() != columns.len() {
            loaded.issues.push(RowIssue {
                file: label.to_string(),
                line,
                field: "row".to_string(),
                code: "ragged_row".to_string(),
                description: format!(
                    "row has {} fields but the header has {}",
                    record.len(),
                    columns.len()
                ),
                received: Some(record.iter().collect::<Vec<&str>>().join(",")),
            });
            continue;
        }
        loaded.rows.rows.push(RawRow {
            file: label.to_string(),
            line,
            values: record.iter().map(str::to_string).collect(),
        });
    }
    loaded.rows.columns = columns;

    Ok(loaded)
}

fn normalize_column_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{RawRow, RowSet, load_all, parse_rows};

    fn set(columns: &[&str], rows: &[&[&str]], file: &str) -> RowSet {
        RowSet {
            columns: columns.iter().map(|value| value.to_string()).collect(),
            rows: rows
                .iter()
                .enumerate()
                .map(|(index, values)| RawRow {
                    file: file.to_string(),
                    line: index as u64 + 2,
                    values: values.iter().map(|value| value.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn headers_are_normalized_and_rows_keep_line_numbers() {
        let body = "\u{feff}Product, Price ,quantity,date,REGION\npink morsel,$3.00,2,2021-01-10,north\n";
        let parsed = parse_rows(body.as_bytes(), "a.csv");
        assert!(parsed.is_ok());
        if let Ok(loaded) = parsed {
            let rows = loaded.rows;
            assert!(loaded.issues.is_empty());
            assert_eq!(
                rows.columns,
                vec!["product", "price", "quantity", "date", "region"]
            );
            assert_eq!(rows.rows[0].line, 2);
            assert_eq!(rows.rows[0].values[1], "$3.00");
        }
    }

    #[test]
    fn missing_required_column_fails_the_file() {
        let parsed = parse_rows("product,price\npink morsel,$1\n".as_bytes(), "a.csv");
        assert!(matches!(parsed, Err(reason) if reason.contains("quantity, date, region")));
    }

    #[test]
    fn ragged_rows_are_reported_and_the_rest_kept() {
        let body = "product,price,quantity,date,region\n\
                    pink morsel,$3.00,2,2021-01-10,north\n\
                    pink morsel,$3.00,2,2021-01-11\n\
                    pink morsel,$3.00,2,2021-01-12,south,extra\n\
                    pink morsel,$4.00,1,2021-01-13,east\n";
        let parsed = parse_rows(body.as_bytes(), "a.csv");
        assert!(parsed.is_ok());
        if let Ok(loaded) = parsed {
            let lines = loaded.rows.rows.iter().map(|row| row.line).collect::<Vec<u64>>();
            assert_eq!(lines, vec![2, 5]);
            assert_eq!(loaded.issues.len(), 2);
            assert_eq!(loaded.issues[0].code, "ragged_row");
            assert_eq!(loaded.issues[0].line, 3);
            assert_eq!(
                loaded.issues[0].received.as_deref(),
                Some("pink morsel,$3.00,2,2021-01-11")
            );
            assert_eq!(loaded.issues[1].line, 4);
        }
    }

    #[test]
    fn load_all_reports_each_file() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let good = dir.path().join("daily_sales_data_0.csv");
            let missing = dir.path().join("daily_sales_data_1.csv");
            assert!(
                fs::write(
                    &good,
                    "product,price,quantity,date,region\npink morsel,$1.00,1,2021-01-10,north\n\
                     pink morsel,$1.00\n"
                )
                .is_ok()
            );

            let outcome = load_all(&[&good, &missing]);
            assert_eq!(outcome.sets.len(), 1);
            assert_eq!(outcome.files.len(), 2);
            assert_eq!(outcome.files[0].status, "loaded");
            assert_eq!(outcome.files[0].rows, 1);
            assert_eq!(outcome.files[1].status, "failed");
            assert!(
                outcome.files[1]
                    .reason
                    .as_deref()
                    .is_some_and(|reason| reason.starts_with("could not open file"))
            );
            assert_eq!(outcome.issues.len(), 1);
        }
    }

    #[test]
    fn concat_keeps_every_row_and_unions_columns() {
        let first = set(&["product", "price"], &[&["a", "$1"], &["a", "$1"]], "one.csv");
        let second = set(&["price", "product", "note"], &[&["$2", "b", "x"]], "two.csv");

        let combined = RowSet::concat(vec![first, second]);
        assert_eq!(combined.columns, vec!["product", "price", "note"]);
        assert_eq!(combined.len(), 3);
        assert_eq!(combined.rows[0].values, vec!["a", "$1", ""]);
        assert_eq!(combined.rows[1].values, vec!["a", "$1", ""]);
        assert_eq!(combined.rows[2].values, vec!["b", "$2", "x"]);
        assert_eq!(combined.rows[2].file, "two.csv");
    }
}

use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::{RowIssue, RunSummary};

pub(crate) const PREPARE_HELP_COMMAND: &str = "morsel prepare --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `morsel {cmd} --help` for usage."),
            None => "Run `morsel --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn no_input_files(data_dir: &Path, pattern: &str) -> Self {
        let location = data_dir.display().to_string();
        Self::new(
            "empty_input",
            &format!("No CSV files found in `{location}` matching `{pattern}`."),
            vec![
                format!("Place daily sales CSV files in `{location}`."),
                "Or pass `--data-dir <dir>` / `--pattern <glob>` to point at them.".to_string(),
            ],
        )
        .with_data(json!({
            "data_dir": location,
            "pattern": pattern,
            "help_command": PREPARE_HELP_COMMAND,
        }))
    }

    pub fn no_files_loaded(files_failed: Vec<Value>) -> Self {
        Self::new(
            "empty_input",
            "No input files could be loaded. Nothing was written.",
            vec![
                "Fix the per-file problems listed in the error details.".to_string(),
                "Every file needs the columns product, price, quantity, date, region.".to_string(),
            ],
        )
        .with_data(json!({
            "files": files_failed,
            "help_command": PREPARE_HELP_COMMAND,
        }))
    }

    pub fn no_matching_rows(product: &str, rows_read: usize) -> Self {
        Self::new(
            "no_matching_rows",
            &format!("No `{product}` rows found among {rows_read} input rows. Nothing was written."),
            vec![
                "Check the product name with `--product <name>` (matching ignores case).".to_string(),
                "Confirm the input files contain that product.".to_string(),
            ],
        )
        .with_data(json!({
            "product": product,
            "rows_read": rows_read,
        }))
    }

    pub fn field_parse_failure(summary: RunSummary, issues: Vec<RowIssue>) -> Self {
        let matched = summary.rows_matched;
        Self::new(
            "field_parse_failure",
            &format!(
                "All {matched} matching rows failed price/date parsing. Nothing was written."
            ),
            vec![
                "Fix the listed price and date values in your source files.".to_string(),
                "Rerun morsel prepare.".to_string(),
            ],
        )
        .with_data(json!({
            "summary": summary,
            "issues": issues,
        }))
    }

    pub fn output_not_found(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "output_not_found",
            &format!("Data file not found at `{location}`. Please generate it first."),
            vec![
                "Run `morsel prepare` to build the sales file.".to_string(),
                "Or pass `--input <path>` to read a different file.".to_string(),
            ],
        )
    }

    pub fn output_empty(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "output_empty",
            &format!("Data file `{location}` is empty."),
            vec!["Rerun `morsel prepare` and check its summary for skipped rows.".to_string()],
        )
    }

    pub fn output_malformed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "output_malformed",
            &format!("Data file `{location}` could not be read: {detail}"),
            vec![
                "The file must have the columns Sales,Date,Region.".to_string(),
                "Rerun `morsel prepare` to regenerate it.".to_string(),
            ],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::contracts::types::OutputStatus;
use crate::dataset::{SalesRecord, write_records_to_path};

/// Creates `output_dir` if needed and writes the records. Failure is reported, never raised.
pub fn write_output(output_dir: &Path, file_name: &str, records: &[SalesRecord]) -> OutputStatus {
    let path = output_dir.join(file_name);
    let shown = path.display().to_string();

    let written = fs::create_dir_all(output_dir)
        .map_err(|error| {
            format!(
                "could not create output directory `{}`: {error}",
                output_dir.display()
            )
        })
        .and_then(|()| {
            write_records_to_path(&path, records)
                .map_err(|error| format!("could not write `{shown}`: {error}"))
        });

    match written {
        Ok(()) => {
            info!(path = %shown, rows = records.len(), "wrote sales file");
            OutputStatus {
                path: shown,
                written: true,
                rows_written: records.len(),
                error: None,
            }
        }
        Err(message) => {
            warn!(path = %shown, error = %message, "sales file was not written");
            OutputStatus {
                path: shown,
                written: false,
                rows_written: 0,
                error: Some(message),
            }
        }
    }
}

//! Daily sales CSVs in, one `Sales,Date,Region` file out.
//!
//! Stages run in order and each hands an explicit value to the next:
//! locate -> load/combine -> filter -> clean (+ derive) -> project -> write.
//! File-level and row-level problems are collected into the run summary;
//! only "nothing left to write" conditions stop the run.

pub mod clean;
pub mod derive;
pub mod filter;
pub mod load;
pub mod locate;
pub mod project;
pub mod write;

use serde_json::json;
use tracing::{info, warn};
use ulid::Ulid;

use crate::config::PipelineConfig;
use crate::contracts::types::{FileReport, OutputStatus, RowIssue, RunSummary, RunWarning};
use crate::dataset::SalesRecord;
use crate::{ClientError, ClientResult};

use self::load::RowSet;

/// Everything one run produced, whether or not the file write succeeded.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub run_id: String,
    pub summary: RunSummary,
    pub files: Vec<FileReport>,
    pub issues: Vec<RowIssue>,
    pub records: Vec<SalesRecord>,
    pub output: OutputStatus,
    pub warnings: Vec<RunWarning>,
}

pub fn run(config: &PipelineConfig) -> ClientResult<PipelineRun> {
    let run_id = format!("run_{}", Ulid::new());
    let span = tracing::info_span!("prepare", run_id = %run_id);
    let _entered = span.enter();

    let paths = locate::locate_files(&config.data_dir, &config.pattern)?;
    info!(files = paths.len(), "located input files");

    let loaded = load::load_all(&paths);
    let files = loaded.files;
    let mut issues = loaded.issues;
    let mut summary = RunSummary {
        files_found: paths.len(),
        files_loaded: loaded.sets.len(),
        files_failed: paths.len() - loaded.sets.len(),
        ..RunSummary::default()
    };
    if loaded.sets.is_empty() {
        let failed = files
            .iter()
            .map(|report| json!({ "path": report.path, "reason": report.reason }))
            .collect();
        return Err(ClientError::no_files_loaded(failed));
    }

    let ragged = issues.len();
    let combined = RowSet::concat(loaded.sets);
    summary.rows_read = combined.len() + ragged;
    info!(rows = summary.rows_read, "combined input rows");

    let matched = filter::retain_product(combined, &config.product);
    summary.rows_matched = matched.len();
    if matched.is_empty() {
        return Err(ClientError::no_matching_rows(
            &config.product,
            summary.rows_read,
        ));
    }
    info!(rows = summary.rows_matched, product = %config.product, "filtered rows");

    let cleaned = clean::clean_rows(&matched);
    summary.rows_kept = cleaned.records.len();
    summary.rows_skipped = ragged + cleaned.rows_skipped;
    summary.quantity_missing = cleaned.quantity_missing;
    issues.extend(cleaned.issues);
    if cleaned.rows_skipped > 0 {
        warn!(skipped = cleaned.rows_skipped, "rows skipped for bad price or date");
    }
    if cleaned.records.is_empty() {
        return Err(ClientError::field_parse_failure(summary, issues));
    }

    let records = project::project(&cleaned.records);
    let output = write::write_output(&config.output_dir, &config.output_file, &records);

    let mut warnings = Vec::new();
    if summary.files_failed > 0 {
        warnings.push(RunWarning {
            code: "files_skipped".to_string(),
            message: format!(
                "{} of {} input files could not be loaded and were skipped.",
                summary.files_failed, summary.files_found
            ),
        });
    }
    if summary.rows_skipped > 0 {
        warnings.push(RunWarning {
            code: "rows_skipped".to_string(),
            message: format!(
                "{} rows were skipped because they could not be parsed; see issues.",
                summary.rows_skipped
            ),
        });
    }
    if summary.quantity_missing > 0 {
        warnings.push(RunWarning {
            code: "quantity_missing".to_string(),
            message: format!(
                "{} rows have no usable quantity; their Sales value is empty.",
                summary.quantity_missing
            ),
        });
    }
    if let Some(error) = &output.error {
        warnings.push(RunWarning {
            code: "write_failed".to_string(),
            message: error.clone(),
        });
    }

    Ok(PipelineRun {
        run_id,
        summary,
        files,
        issues,
        records,
        output,
        warnings,
    })
}

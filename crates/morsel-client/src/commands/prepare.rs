use std::path::PathBuf;

use crate::ClientResult;
use crate::config::{
    DEFAULT_OUTPUT_FILE, DEFAULT_PATTERN, DEFAULT_PRODUCT, PipelineConfig, resolve_data_dir,
    resolve_output_dir,
};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::PrepareData;
use crate::pipeline;

const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Default)]
pub struct PrepareOptions {
    pub data_dir: Option<PathBuf>,
    pub pattern: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub output_file: Option<String>,
    pub product: Option<String>,
}

impl PrepareOptions {
    pub fn resolve(self) -> PipelineConfig {
        PipelineConfig {
            data_dir: resolve_data_dir(self.data_dir.as_deref()),
            pattern: self.pattern.unwrap_or_else(|| DEFAULT_PATTERN.to_string()),
            output_dir: resolve_output_dir(self.output_dir.as_deref()),
            output_file: self
                .output_file
                .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string()),
            product: self.product.unwrap_or_else(|| DEFAULT_PRODUCT.to_string()),
        }
    }
}

pub fn run() -> ClientResult<SuccessEnvelope> {
    run_with_options(PrepareOptions::default())
}

#[doc(hidden)]
pub fn run_with_options(options: PrepareOptions) -> ClientResult<SuccessEnvelope> {
    let config = options.resolve();
    let outcome = pipeline::run(&config)?;

    let message = if outcome.output.written {
        format!(
            "Wrote {} {} rows to {}.",
            outcome.output.rows_written, config.product, outcome.output.path
        )
    } else {
        format!(
            "Prepared {} {} rows but could not write {}.",
            outcome.records.len(),
            config.product,
            outcome.output.path
        )
    };

    let data = PrepareData {
        run_id: outcome.run_id,
        product: config.product,
        data_dir: config.data_dir.display().to_string(),
        pattern: config.pattern,
        message,
        summary: outcome.summary,
        files: outcome.files,
        issues: outcome.issues,
        output: outcome.output,
        warnings: outcome.warnings,
        preview: outcome.records.into_iter().take(PREVIEW_ROWS).collect(),
    };

    success("prepare", data)
}

use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_PATTERN: &str = "daily_sales_data_*.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_OUTPUT_FILE: &str = "soul_foods_pink_morsel_sales.csv";
pub const DEFAULT_PRODUCT: &str = "pink morsel";

pub const DATA_DIR_ENV: &str = "MORSEL_DATA_DIR";
pub const OUTPUT_DIR_ENV: &str = "MORSEL_OUTPUT_DIR";

/// Resolved inputs for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub pattern: String,
    pub output_dir: PathBuf,
    pub output_file: String,
    pub product: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            pattern: DEFAULT_PATTERN.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            product: DEFAULT_PRODUCT.to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }
}

/// Explicit override first, then the environment variable, then the built-in default.
pub fn resolve_data_dir(override_path: Option<&Path>) -> PathBuf {
    resolve_dir(override_path, DATA_DIR_ENV, DEFAULT_DATA_DIR)
}

pub fn resolve_output_dir(override_path: Option<&Path>) -> PathBuf {
    resolve_dir(override_path, OUTPUT_DIR_ENV, DEFAULT_OUTPUT_DIR)
}

/// Location of the persisted sales file the read-side commands consume.
pub fn resolve_output_path(override_path: Option<&Path>) -> PathBuf {
    match override_path {
        Some(path) => path.to_path_buf(),
        None => resolve_output_dir(None).join(DEFAULT_OUTPUT_FILE),
    }
}

fn resolve_dir(override_path: Option<&Path>, env_key: &str, default: &str) -> PathBuf {
    if let Some(path) = override_path {
        return path.to_path_buf();
    }
    match std::env::var_os(env_key) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(default),
    }
}

use serde::Serialize;

use crate::dataset::SalesRecord;

#[derive(Debug, Clone, Serialize)]
pub struct PrepareData {
    pub run_id: String,
    pub product: String,
    pub data_dir: String,
    pub pattern: String,
    pub message: String,
    pub summary: RunSummary,
    pub files: Vec<FileReport>,
    pub issues: Vec<RowIssue>,
    pub output: OutputStatus,
    pub warnings: Vec<RunWarning>,
    pub preview: Vec<SalesRecord>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub files_found: usize,
    pub files_loaded: usize,
    pub files_failed: usize,
    pub rows_read: usize,
    pub rows_matched: usize,
    pub rows_kept: usize,
    pub rows_skipped: usize,
    pub quantity_missing: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub status: String,
    pub rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowIssue {
    pub file: String,
    pub line: u64,
    pub field: String,
    pub code: String,
    pub description: String,
    pub received: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputStatus {
    pub path: String,
    pub written: bool,
    pub rows_written: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunWarning {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesSeriesData {
    pub input: String,
    pub region: String,
    pub region_label: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub outcome: String,
    pub points: Vec<DailyPoint>,
    pub total_sales: f64,
    pub chart: ChartView,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub sales: f64,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub marker: MarkerView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerView {
    pub date: String,
    pub label: String,
    pub y_position: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionsData {
    pub input: String,
    pub default: String,
    pub options: Vec<RegionOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionOption {
    pub value: String,
    pub label: String,
}

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::debug;

use crate::commands::common::{format_iso_date, parse_optional_date};
use crate::config::resolve_output_path;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{DailyPoint, SalesSeriesData};
use crate::dataset::{SalesRecord, read_records};
use crate::series::chart::{chart_view, display_label, placeholder_chart};
use crate::series::{RegionFilter, SeriesFilter, aggregate};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct SalesOptions {
    pub input: Option<PathBuf>,
    pub region: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

pub fn run(region: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(SalesOptions {
        region: region.map(ToString::to_string),
        ..SalesOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: SalesOptions) -> ClientResult<SuccessEnvelope> {
    let region = match options.region.as_deref() {
        Some(value) => RegionFilter::parse(value)?,
        None => RegionFilter::All,
    };
    let from = parse_optional_date(options.from.as_deref(), "from", "sales")?;
    let to = parse_optional_date(options.to.as_deref(), "to", "sales")?;
    let filter = SeriesFilter::new(region, from, to)?;

    let input = resolve_output_path(options.input.as_deref());
    let records = load_for_chart(&input)?;
    let outcome = aggregate(&records, &filter);
    debug!(outcome = outcome.as_str(), records = records.len(), "aggregated sales series");

    let points = outcome
        .points()
        .iter()
        .map(|total| DailyPoint {
            date: format_iso_date(&total.date),
            sales: total.sales,
            rows: total.rows,
        })
        .collect::<Vec<DailyPoint>>();
    let total_sales: f64 = points.iter().map(|point| point.sales).sum();

    let data = SalesSeriesData {
        input: input.display().to_string(),
        region: filter.region.as_value().to_string(),
        region_label: display_label(filter.region.as_value()),
        from: filter.from.as_ref().map(format_iso_date),
        to: filter.to.as_ref().map(format_iso_date),
        outcome: outcome.as_str().to_string(),
        chart: chart_view(&filter.region, &outcome),
        points,
        total_sales,
    };

    success("sales", data)
}

/// Read failures still carry a chart so a viewer can show the message in place.
fn load_for_chart(input: &Path) -> ClientResult<Vec<SalesRecord>> {
    read_records(input).map_err(attach_error_chart)
}

fn attach_error_chart(error: ClientError) -> ClientError {
    let chart = placeholder_chart(&error.message);
    let mut data = error.data.clone().unwrap_or_else(|| json!({}));
    if let Some(fields) = data.as_object_mut() {
        fields.insert("chart".to_string(), json!(chart));
    }
    error.with_data(data)
}

//! What a chart of the series needs to show: titles, axis labels, the
//! price-increase marker and the region picker. No rendering happens here.

use crate::contracts::types::{ChartView, MarkerView, RegionOption};
use crate::dataset::SalesRecord;

use super::{ALL_REGIONS, DailyTotal, RegionFilter, SeriesOutcome, distinct_regions};

pub const CHART_TITLE: &str = "Pink Morsel Sales Over Time";
pub const X_AXIS_LABEL: &str = "Date of Sale";
pub const Y_AXIS_LABEL: &str = "Total Sales ($)";
pub const PRICE_INCREASE_DATE: &str = "2021-01-15";
pub const PRICE_INCREASE_LABEL: &str = "Price Increase";

const MARKER_HEIGHT_RATIO: f64 = 0.85;
const MARKER_FALLBACK_HEIGHT: f64 = 10.0;

/// `north` -> `North`, `all` -> `All`.
pub fn display_label(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    let mut characters = lowered.chars();
    match characters.next() {
        Some(first) => first.to_uppercase().chain(characters).collect(),
        None => String::new(),
    }
}

/// `all` first, then each observed region.
pub fn region_options(records: &[SalesRecord]) -> Vec<RegionOption> {
    let mut options = vec![RegionOption {
        value: ALL_REGIONS.to_string(),
        label: display_label(ALL_REGIONS),
    }];
    options.extend(
        distinct_regions(records)
            .into_iter()
            .map(|region| RegionOption {
                label: display_label(&region),
                value: region,
            }),
    );
    options
}

pub fn chart_view(region: &RegionFilter, outcome: &SeriesOutcome) -> ChartView {
    match placeholder_for(region, outcome) {
        Some(message) => placeholder_chart(&message),
        None => ChartView {
            title: title_for(region),
            x_axis_label: X_AXIS_LABEL.to_string(),
            y_axis_label: Y_AXIS_LABEL.to_string(),
            marker: marker_for(outcome.points()),
            placeholder: None,
        },
    }
}

/// A chart whose title carries `message` instead of data.
pub fn placeholder_chart(message: &str) -> ChartView {
    ChartView {
        title: message.to_string(),
        x_axis_label: X_AXIS_LABEL.to_string(),
        y_axis_label: Y_AXIS_LABEL.to_string(),
        marker: marker_for(&[]),
        placeholder: Some(message.to_string()),
    }
}

fn title_for(region: &RegionFilter) -> String {
    match region {
        RegionFilter::All => CHART_TITLE.to_string(),
        RegionFilter::Region(name) => {
            format!("Pink Morsel Sales - Region: {}", display_label(name))
        }
    }
}

fn placeholder_for(region: &RegionFilter, outcome: &SeriesOutcome) -> Option<String> {
    match outcome {
        SeriesOutcome::Series(_) => None,
        SeriesOutcome::NoRecords => Some("No sales data available.".to_string()),
        SeriesOutcome::UnknownRegion(name) => {
            Some(format!("No sales data for region '{}'.", display_label(name)))
        }
        SeriesOutcome::NoRowsInRange => Some(format!(
            "No sales for {} in the selected date range.",
            match region {
                RegionFilter::All => "any region".to_string(),
                RegionFilter::Region(name) => display_label(name),
            }
        )),
    }
}

fn marker_for(points: &[DailyTotal]) -> MarkerView {
    let y_position = points
        .iter()
        .map(|point| point.sales)
        .filter(|sales| sales.is_finite())
        .reduce(f64::max)
        .map(|max| max * MARKER_HEIGHT_RATIO)
        .unwrap_or(MARKER_FALLBACK_HEIGHT);

    MarkerView {
        date: PRICE_INCREASE_DATE.to_string(),
        label: PRICE_INCREASE_LABEL.to_string(),
        y_position,
    }
}

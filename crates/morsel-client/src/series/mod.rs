//! Date-keyed sales totals over the persisted records.
//!
//! Nothing here keeps state: every region selection recomputes the series
//! from the records it is handed.

pub mod chart;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::dataset::SalesRecord;
use crate::{ClientError, ClientResult};

pub const ALL_REGIONS: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RegionFilter {
    #[default]
    All,
    Region(String),
}

impl RegionFilter {
    /// `all` (any case) selects every region; anything else names one region.
    pub fn parse(value: &str) -> ClientResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ClientError::invalid_argument_for_command(
                "Region must be `all` or a region name.",
                Some("sales"),
            ));
        }
        if trimmed.eq_ignore_ascii_case(ALL_REGIONS) {
            return Ok(Self::All);
        }
        Ok(Self::Region(trimmed.to_string()))
    }

    pub fn as_value(&self) -> &str {
        match self {
            Self::All => ALL_REGIONS,
            Self::Region(name) => name,
        }
    }

    pub fn matches(&self, region: &str) -> bool {
        match self {
            Self::All => true,
            Self::Region(name) => region.trim().to_lowercase() == name.trim().to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesFilter {
    pub region: RegionFilter,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl SeriesFilter {
    pub fn new(
        region: RegionFilter,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> ClientResult<Self> {
        if let (Some(start), Some(end)) = (from, to)
            && start > end
        {
            return Err(ClientError::invalid_argument_for_command(
                "Invalid date range: `from` must be on or before `to`.",
                Some("sales"),
            ));
        }
        Ok(Self { region, from, to })
    }

    fn admits(&self, record: &SalesRecord) -> bool {
        self.region.matches(&record.region)
            && self.from.is_none_or(|start| record.date >= start)
            && self.to.is_none_or(|end| record.date <= end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub sales: f64,
    pub rows: usize,
}

/// Result of one aggregation. The empty cases stay distinct so callers can explain them.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesOutcome {
    Series(Vec<DailyTotal>),
    NoRecords,
    UnknownRegion(String),
    NoRowsInRange,
}

impl SeriesOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Series(_) => "series",
            Self::NoRecords => "no_records",
            Self::UnknownRegion(_) => "unknown_region",
            Self::NoRowsInRange => "no_rows_in_range",
        }
    }

    pub fn points(&self) -> &[DailyTotal] {
        match self {
            Self::Series(points) => points,
            _ => &[],
        }
    }
}

/// Sums `Sales` per date for the records the filter admits, ascending by date.
/// Missing sales values add nothing but still count as rows.
pub fn aggregate(records: &[SalesRecord], filter: &SeriesFilter) -> SeriesOutcome {
    if records.is_empty() {
        return SeriesOutcome::NoRecords;
    }
    if let RegionFilter::Region(name) = &filter.region
        && !records.iter().any(|record| filter.region.matches(&record.region))
    {
        return SeriesOutcome::UnknownRegion(name.clone());
    }

    let mut totals: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for record in records.iter().filter(|record| filter.admits(record)) {
        let slot = totals.entry(record.date).or_insert((0.0, 0));
        slot.0 += record.sales.unwrap_or(0.0);
        slot.1 += 1;
    }

    if totals.is_empty() {
        return SeriesOutcome::NoRowsInRange;
    }

    SeriesOutcome::Series(
        totals
            .into_iter()
            .map(|(date, (sales, rows))| DailyTotal { date, sales, rows })
            .collect(),
    )
}

/// Distinct regions in first-seen spelling, compared without case, sorted.
pub fn distinct_regions(records: &[SalesRecord]) -> Vec<String> {
    let mut by_key: BTreeMap<String, String> = BTreeMap::new();
    for record in records {
        let name = record.region.trim();
        if name.is_empty() {
            continue;
        }
        by_key
            .entry(name.to_lowercase())
            .or_insert_with(|| name.to_string());
    }
    by_key.into_values().collect()
}

use super::clean::CleanRecord;
use crate::dataset::SalesRecord;

/// Keeps `sales`, `date` and `region`; one output row per cleaned row.
pub fn project(records: &[CleanRecord]) -> Vec<SalesRecord> {
    records
        .iter()
        .map(|record| SalesRecord {
            sales: record.sales,
            date: record.date,
            region: record.region.clone(),
        })
        .collect()
}

//! The persisted `Sales,Date,Region` file: its record type, writer and reader.

use std::fs::File;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ClientError, ClientResult};

pub const OUTPUT_HEADERS: [&str; 3] = ["Sales", "Date", "Region"];

/// One filtered transaction. Field order is the column order on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Sales")]
    pub sales: Option<f64>,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Region")]
    pub region: String,
}

pub fn write_records<W: io::Write>(writer: W, records: &[SalesRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    // Written explicitly so a run with zero rows still produces the header line.
    csv_writer.write_record(OUTPUT_HEADERS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_records_to_path(path: &Path, records: &[SalesRecord]) -> Result<(), csv::Error> {
    let file = File::create(path)?;
    write_records(file, records)
}

pub fn read_records(path: &Path) -> ClientResult<Vec<SalesRecord>> {
    let file = File::open(path).map_err(|error| match error.kind() {
        io::ErrorKind::NotFound => ClientError::output_not_found(path),
        _ => ClientError::output_malformed(path, &error.to_string()),
    })?;
    read_records_from(file, path)
}

pub(crate) fn read_records_from<R: io::Read>(
    reader: R,
    path: &Path,
) -> ClientResult<Vec<SalesRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|error| ClientError::output_malformed(path, &error.to_string()))?
        .iter()
        .map(|value| value.trim_start_matches('\u{feff}').to_string())
        .collect::<Vec<String>>();

    if headers.iter().all(String::is_empty) {
        return Err(ClientError::output_empty(path));
    }

    let missing = OUTPUT_HEADERS
        .iter()
        .filter(|name| !headers.iter().any(|header| header == *name))
        .copied()
        .collect::<Vec<&str>>();
    if !missing.is_empty() {
        return Err(ClientError::output_malformed(
            path,
            &format!("missing column(s) {}", missing.join(", ")),
        ));
    }
    csv_reader.set_headers(csv::StringRecord::from(headers));

    let mut records = Vec::new();
    for (index, result) in csv_reader.deserialize::<SalesRecord>().enumerate() {
        let record = result.map_err(|error| {
            ClientError::output_malformed(path, &format!("line {}: {error}", index + 2))
        })?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(ClientError::output_empty(path));
    }

    Ok(records)
}

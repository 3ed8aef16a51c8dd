use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0usize, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|index| bytes[*index].is_ascii_digit());
    if !shaped {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

fn parse_non_empty(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("value must not be empty".to_string());
    }
    Ok(trimmed.to_string())
}

/// Extended help shown after `morsel prepare --help`.
pub const PREPARE_AFTER_HELP: &str = "\
How prepare works:
  1. Finds every file in the data directory matching the pattern.
  2. Reads each one; a file missing any of the columns
     product, price, quantity, date, region is reported and skipped.
  3. Keeps rows whose product matches (case-insensitive).
  4. Parses price (a leading $ is fine) and date; rows that fail are
     listed as issues and skipped.
  5. Computes Sales = price * quantity. A missing quantity leaves Sales empty.
  6. Writes Sales,Date,Region to the output file.

Defaults:
  data directory   data                (or MORSEL_DATA_DIR)
  pattern          daily_sales_data_*.csv
  output directory output              (or MORSEL_OUTPUT_DIR)
  output file      soul_foods_pink_morsel_sales.csv
  product          pink morsel

What to do next:
  Run `morsel regions` to list the regions in the output file.
  Run `morsel sales --region <name>` to see daily totals.
";

#[derive(Debug, Parser)]
#[command(
    name = "morsel",
    version,
    about = "Pink Morsel sales preparation and daily series",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Log progress to stderr (MORSEL_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Combine daily sales CSVs into the Pink Morsel sales file
    #[command(after_long_help = PREPARE_AFTER_HELP)]
    Prepare {
        /// Directory holding the daily sales CSVs
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Glob for input file names inside the data directory
        #[arg(long, value_parser = parse_non_empty)]
        pattern: Option<String>,
        /// Directory the sales file is written to
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// File name of the sales file
        #[arg(long, value_parser = parse_non_empty)]
        output_file: Option<String>,
        /// Product to keep (case-insensitive)
        #[arg(long, value_parser = parse_non_empty)]
        product: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Daily sales totals for one region or all regions
    Sales {
        /// Sales file to read (defaults to the prepare output)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Region name, or `all`
        #[arg(long)]
        region: Option<String>,
        /// Start date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        /// End date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        #[arg(long)]
        json: bool,
    },
    /// List the regions available in the sales file
    Regions {
        /// Sales file to read (defaults to the prepare output)
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

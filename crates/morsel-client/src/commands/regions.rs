use std::path::PathBuf;

use crate::ClientResult;
use crate::config::resolve_output_path;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::RegionsData;
use crate::dataset::read_records;
use crate::series::ALL_REGIONS;
use crate::series::chart::region_options;

#[derive(Debug, Default)]
pub struct RegionsOptions {
    pub input: Option<PathBuf>,
}

pub fn run() -> ClientResult<SuccessEnvelope> {
    run_with_options(RegionsOptions::default())
}

#[doc(hidden)]
pub fn run_with_options(options: RegionsOptions) -> ClientResult<SuccessEnvelope> {
    let input = resolve_output_path(options.input.as_deref());
    let records = read_records(&input)?;

    let data = RegionsData {
        input: input.display().to_string(),
        default: ALL_REGIONS.to_string(),
        options: region_options(&records),
    };

    success("regions", data)
}

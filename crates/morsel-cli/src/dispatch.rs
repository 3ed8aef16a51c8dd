use morsel_client::commands;
use morsel_client::commands::prepare::PrepareOptions;
use morsel_client::commands::regions::RegionsOptions;
use morsel_client::commands::sales::SalesOptions;
use morsel_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Prepare {
            data_dir,
            pattern,
            output_dir,
            output_file,
            product,
            json: _,
        } => commands::prepare::run_with_options(PrepareOptions {
            data_dir: data_dir.clone(),
            pattern: pattern.clone(),
            output_dir: output_dir.clone(),
            output_file: output_file.clone(),
            product: product.clone(),
        }),
        Commands::Sales {
            input,
            region,
            from,
            to,
            ..
        } => commands::sales::run_with_options(SalesOptions {
            input: input.clone(),
            region: region.clone(),
            from: from.as_ref().map(|value| value.as_str().to_string()),
            to: to.as_ref().map(|value| value.as_str().to_string()),
        }),
        Commands::Regions { input, .. } => {
            commands::regions::run_with_options(RegionsOptions {
                input: input.clone(),
            })
        }
    }
}

#![warn(clippy::all)]
#![warn(clippy::missing_const_for_fn)]

use clap::Parser;

use crate::dataset::Dataset;
use crate::opts::{EstimateOpts, LogEstimateOpts, ModelOpts, Opts, Subcommand, SummaryOpts};
use crate::prelude::*;
use crate::valuation::{ValuationError, Valuator};

mod dataset;
mod helpers;
mod math;
mod opts;
mod prelude;
mod property;
mod valuation;

fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = helpers::tracing::init(opts.sentry_dsn)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting…");

    let valuator = fit(&opts.model)?;
    match opts.subcommand {
        Subcommand::Estimate(opts) => estimate(&valuator, &opts),
        Subcommand::LogEstimate(opts) => log_estimate(&valuator, &opts),
        Subcommand::Summary(opts) => summary(&valuator, &opts),
    }
}

fn fit(opts: &ModelOpts) -> Result<Valuator> {
    let dataset = match &opts.dataset {
        Some(path) => Dataset::from_path(path)?,
        None => Dataset::load_embedded()?,
    };
    Valuator::fit(&dataset, opts.reference_median_price)
}

fn estimate(valuator: &Valuator, opts: &EstimateOpts) -> Result {
    match valuator.estimate(&opts.property.query(), opts.property.confidence) {
        Ok(valuation) if opts.json => println!("{}", serde_json::to_string_pretty(&valuation)?),
        Ok(valuation) => println!("{}", valuation),
        Err(error @ ValuationError::InvalidInput { .. }) => {
            warn!(%error, "no valuation");
            println!("This is unrealistic. Try again.");
        }
    }
    Ok(())
}

fn log_estimate(valuator: &Valuator, opts: &LogEstimateOpts) -> Result {
    let estimate = valuator.log_estimate(&opts.property.query(), opts.property.confidence);
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        println!("{}", estimate);
    }
    Ok(())
}

fn summary(valuator: &Valuator, opts: &SummaryOpts) -> Result {
    let summary = valuator.summary();
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}

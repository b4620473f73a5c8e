//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::property::PropertyQuery;
use crate::valuation::{Confidence, DEFAULT_REFERENCE_MEDIAN_PRICE};

pub mod parsers;

#[derive(Parser)]
#[command(author, version, about)]
pub struct Opts {
    /// Sentry DSN
    #[arg(long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    #[command(flatten)]
    pub model: ModelOpts,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

/// Fitting options shared by all the subcommands.
#[derive(Args)]
pub struct ModelOpts {
    /// CSV file with the historical records, the bundled Boston table by default
    #[arg(long, env = "BOSTON_VALUATION_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Present-day median property price, in thousands of dollars
    #[arg(
        long,
        env = "BOSTON_VALUATION_REFERENCE_MEDIAN_PRICE",
        default_value_t = DEFAULT_REFERENCE_MEDIAN_PRICE,
        value_parser = parsers::positive_f64,
    )]
    pub reference_median_price: f64,
}

#[derive(clap::Subcommand)]
pub enum Subcommand {
    /// Estimates the property price in present-day dollars
    Estimate(EstimateOpts),

    /// Prints the raw model output in log-thousands of 1970s dollars
    LogEstimate(LogEstimateOpts),

    /// Prints the fitted model
    Summary(SummaryOpts),
}

#[derive(Args)]
pub struct EstimateOpts {
    #[command(flatten)]
    pub property: PropertyOpts,

    /// Print the valuation as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct LogEstimateOpts {
    #[command(flatten)]
    pub property: PropertyOpts,

    /// Print the estimate as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SummaryOpts {
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PropertyOpts {
    /// Number of rooms in the property
    #[arg(long)]
    pub rooms: f64,

    /// Number of students per teacher in the local schools
    #[arg(long = "ptratio", alias = "student-teacher-ratio")]
    pub student_teacher_ratio: f64,

    /// The property is next to the Charles River
    #[arg(long)]
    pub near_river: bool,

    /// Valuation range width: `high` for 95%, `low` for 68%
    #[arg(long, value_enum, default_value_t)]
    pub confidence: Confidence,
}

impl PropertyOpts {
    pub const fn query(&self) -> PropertyQuery {
        PropertyQuery {
            rooms: self.rooms,
            student_teacher_ratio: self.student_teacher_ratio,
            near_river: self.near_river,
        }
    }
}

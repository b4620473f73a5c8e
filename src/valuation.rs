//! Property valuation in present-day dollars.
//!
//! The model is fitted on log-prices, so the interval is symmetric in log space
//! and skewed upwards once converted back to dollars.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::dataset::Dataset;
use crate::math::regression::LinearRegression;
use crate::math::statistics::{r_squared, root_mean_squared_error};
use crate::prelude::*;
use crate::property::{PropertyFeatures, PropertyQuery, FEATURE_NAMES};

/// Present-day median price, in thousands of dollars.
pub const DEFAULT_REFERENCE_MEDIAN_PRICE: f64 = 583.3;

/// The dataset prices are in thousands of dollars.
const DATASET_PRICE_UNIT: f64 = 1000.0;

/// Width of the valuation range.
///
/// The bounds are the estimate ± 1 or 2 in-sample RMSE, which approximates
/// the 68% and 95% intervals of a normal distribution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    High,

    Low,
}

impl Confidence {
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::High => 2.0,
            Self::Low => 1.0,
        }
    }

    /// Interval label in percent.
    pub const fn level(self) -> u8 {
        match self {
            Self::High => 95,
            Self::Low => 68,
        }
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValuationError {
    #[error(
        "unrealistic property with {rooms} rooms and {student_teacher_ratio} students per teacher, \
         both must be at least 1"
    )]
    InvalidInput {
        rooms: f64,
        student_teacher_ratio: f64,
    },
}

/// Model output in log-thousands of 1970s dollars.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LogEstimate {
    pub estimate: f64,
    pub low: f64,
    pub high: f64,
    pub confidence: Confidence,
}

impl Display for LogEstimate {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(formatter, "The estimated log price is {:.6}.", self.estimate)?;
        write!(
            formatter,
            "At {}% confidence the log range is {:.6} to {:.6}.",
            self.confidence.level(),
            self.low,
            self.high,
        )
    }
}

/// Rounded valuation in present-day dollars.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Valuation {
    pub estimate: f64,
    pub low: f64,
    pub high: f64,
    pub confidence_level: u8,
}

impl Display for Valuation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(formatter, "The estimated property value is {:.0}.", self.estimate)?;
        writeln!(
            formatter,
            "At {}% confidence the valuation range is",
            self.confidence_level,
        )?;
        write!(
            formatter,
            "USD {:.0} at the lower end to USD {:.0} at the high end.",
            self.low, self.high,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedCoefficient {
    pub feature: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub n_samples: usize,
    pub intercept: f64,
    pub coefficients: Vec<NamedCoefficient>,
    pub rmse: f64,
    pub r_squared: f64,
    pub median_price: f64,
    pub scale_factor: f64,
    pub baseline: PropertyFeatures,
}

impl Display for ModelSummary {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(formatter, "samples:      {}", self.n_samples)?;
        writeln!(formatter, "intercept:    {:>12.6}", self.intercept)?;
        for coefficient in &self.coefficients {
            writeln!(formatter, "{:<13} {:>12.6}", coefficient.feature, coefficient.value)?;
        }
        writeln!(formatter, "RMSE:         {:>12.6}", self.rmse)?;
        writeln!(formatter, "R²:           {:>12.6}", self.r_squared)?;
        writeln!(formatter, "median price: {:>12.3}", self.median_price)?;
        write!(formatter, "scale factor: {:>12.6}", self.scale_factor)
    }
}

/// Fitted log-price model together with everything needed to answer queries.
///
/// Immutable once built: each query copies the baseline and overrides the
/// caller-controlled fields, so concurrent calls cannot observe each other.
pub struct Valuator {
    model: LinearRegression,
    rmse: f64,
    r_squared: f64,
    baseline: PropertyFeatures,
    median_price: f64,
    scale_factor: f64,
    n_samples: usize,
}

impl Valuator {
    /// Fits the model on the whole dataset.
    ///
    /// `reference_median_price` is the present-day median price in thousands of dollars,
    /// used to rebase the 1970s prices.
    #[instrument(level = "info", skip(dataset), fields(n_samples = dataset.len()))]
    pub fn fit(dataset: &Dataset, reference_median_price: f64) -> Result<Self> {
        if !(reference_median_price.is_finite() && reference_median_price > 0.0) {
            bail!("invalid reference median price {}", reference_median_price);
        }

        let features = dataset.features();
        let baseline =
            PropertyFeatures::mean(&features).ok_or_else(|| anyhow!("the dataset is empty"))?;
        let features: Vec<Vec<f64>> = features.iter().map(PropertyFeatures::to_vec).collect();
        let log_prices = dataset.log_prices();

        let model = LinearRegression::fit(&features, &log_prices)
            .context("failed to fit the log-price regression")?;
        let fitted = model.predict_many(&features);
        let rmse = root_mean_squared_error(&fitted, &log_prices);
        let r_squared = r_squared(&fitted, &log_prices);

        let median_price = dataset.median_price();
        let scale_factor = reference_median_price / median_price;
        info!(rmse, r_squared, median_price, scale_factor, "fitted");

        Ok(Self {
            model,
            rmse,
            r_squared,
            baseline,
            median_price,
            scale_factor,
            n_samples: dataset.len(),
        })
    }

    /// Runs the model without validating the query.
    #[must_use]
    #[instrument(level = "debug", skip(self))]
    pub fn log_estimate(&self, query: &PropertyQuery, confidence: Confidence) -> LogEstimate {
        let features = self.baseline.with_query(query);
        let estimate = self.model.predict(&features.to_vec());
        let standard_deviation = self.rmse * confidence.multiplier();
        LogEstimate {
            estimate,
            low: estimate - standard_deviation,
            high: estimate + standard_deviation,
            confidence,
        }
    }

    /// Estimates the present-day price, rounded to the nearest thousand dollars.
    #[instrument(level = "debug", skip(self))]
    pub fn estimate(
        &self,
        query: &PropertyQuery,
        confidence: Confidence,
    ) -> StdResult<Valuation, ValuationError> {
        if query.rooms < 1.0 || query.student_teacher_ratio < 1.0 {
            return Err(ValuationError::InvalidInput {
                rooms: query.rooms,
                student_teacher_ratio: query.student_teacher_ratio,
            });
        }

        let log_estimate = self.log_estimate(query, confidence);
        let valuation = Valuation {
            estimate: self.to_dollars(log_estimate.estimate),
            low: self.to_dollars(log_estimate.low),
            high: self.to_dollars(log_estimate.high),
            confidence_level: confidence.level(),
        };
        debug!(?valuation, "estimated");
        Ok(valuation)
    }

    #[must_use]
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            n_samples: self.n_samples,
            intercept: self.model.intercept,
            coefficients: FEATURE_NAMES
                .iter()
                .zip(&self.model.coefficients)
                .map(|(&feature, &value)| NamedCoefficient { feature, value })
                .collect(),
            rmse: self.rmse,
            r_squared: self.r_squared,
            median_price: self.median_price,
            scale_factor: self.scale_factor,
            baseline: self.baseline,
        }
    }

    fn to_dollars(&self, log_price: f64) -> f64 {
        round_to_thousands(log_price.exp() * DATASET_PRICE_UNIT * self.scale_factor)
    }
}

/// Halfway cases go to the even thousand.
fn round_to_thousands(dollars: f64) -> f64 {
    (dollars / 1000.0).round_ties_even() * 1000.0
}

use statrs::statistics::{Data, Median, Statistics};

/// `NaN` for an empty input.
#[must_use]
pub fn median(values: Vec<f64>) -> f64 {
    Data::new(values).median()
}

/// Square root of the mean squared residual.
#[must_use]
pub fn root_mean_squared_error(predicted: &[f64], actual: &[f64]) -> f64 {
    debug_assert_eq!(predicted.len(), actual.len());
    predicted
        .iter()
        .zip(actual)
        .map(|(predicted, actual)| (predicted - actual).powi(2))
        .mean()
        .sqrt()
}

/// Coefficient of determination.
#[must_use]
pub fn r_squared(predicted: &[f64], actual: &[f64]) -> f64 {
    debug_assert_eq!(predicted.len(), actual.len());
    let mean = actual.mean();
    let total: f64 = actual.iter().map(|actual| (actual - mean).powi(2)).sum();
    let residual: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(predicted, actual)| (actual - predicted).powi(2))
        .sum();
    1.0 - residual / total
}

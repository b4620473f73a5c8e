//! Ordinary least squares.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::math::dot;
use crate::prelude::*;

#[derive(Debug, Clone, Serialize)]
pub struct LinearRegression {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearRegression {
    /// Fits `targets ≈ intercept + features · coefficients` by minimising the squared residuals.
    ///
    /// Solved through a thin SVD of the design matrix, so a rank-deficient system
    /// falls back to the minimum-norm solution instead of failing.
    #[instrument(level = "debug", skip_all, fields(n_samples = features.len()))]
    pub fn fit(features: &[Vec<f64>], targets: &[f64]) -> Result<Self> {
        let n_samples = features.len();
        if n_samples == 0 {
            bail!("cannot fit with zero samples");
        }
        if n_samples != targets.len() {
            bail!("{} feature rows but {} targets", n_samples, targets.len());
        }
        let n_features = features[0].len();
        if let Some(row) = features.iter().position(|row| row.len() != n_features) {
            bail!(
                "row #{} has {} features, expected {}",
                row + 1,
                features[row].len(),
                n_features,
            );
        }
        if n_samples < n_features + 1 {
            bail!(
                "{} samples are not enough to fit {} features and an intercept",
                n_samples,
                n_features,
            );
        }

        let design = DMatrix::from_fn(n_samples, n_features + 1, |i, j| match j {
            0 => 1.0,
            j => features[i][j - 1],
        });
        let targets = DVector::from_column_slice(targets);

        let svd = design.svd(true, true);
        let max_singular_value = svd.singular_values.max();
        let eps = max_singular_value * f64::EPSILON * (n_samples as f64);
        let rank = svd.singular_values.iter().filter(|&&value| value > eps).count();
        if rank < n_features + 1 {
            warn!(rank, n_columns = n_features + 1, "the design matrix is rank-deficient");
        }
        let solution = svd.solve(&targets, eps).map_err(|error| anyhow!(error))?;

        let intercept = solution[0];
        let coefficients = solution.iter().skip(1).copied().collect();
        debug!(intercept, "fitted");
        Ok(Self {
            intercept,
            coefficients,
        })
    }

    #[must_use]
    pub fn predict(&self, features: &[f64]) -> f64 {
        debug_assert_eq!(features.len(), self.coefficients.len());
        self.intercept + dot(&self.coefficients, features)
    }

    #[must_use]
    pub fn predict_many(&self, features: &[Vec<f64>]) -> Vec<f64> {
        features.iter().map(|row| self.predict(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_exact_relation_ok() -> crate::Result {
        let features: Vec<Vec<f64>> = (0..20)
            .map(|i| {
                let i = i as f64;
                vec![i, (i * 0.7).sin(), i * i / 10.0]
            })
            .collect();
        let targets: Vec<f64> = features
            .iter()
            .map(|row| 1.5 + 2.0 * row[0] - 3.0 * row[1] + 0.25 * row[2])
            .collect();

        let model = LinearRegression::fit(&features, &targets)?;
        assert!((model.intercept - 1.5).abs() < 1e-9);
        assert!((model.coefficients[0] - 2.0).abs() < 1e-9);
        assert!((model.coefficients[1] + 3.0).abs() < 1e-9);
        assert!((model.coefficients[2] - 0.25).abs() < 1e-9);
        assert!((model.predict(&[1.0, 0.0, 4.0]) - 4.5).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn fit_minimises_squared_residuals() -> crate::Result {
        // Least-squares line through (0, 0), (1, 1), (2, 1) is `y = 1/6 + x / 2`.
        let features = vec![vec![0.0], vec![1.0], vec![2.0]];
        let model = LinearRegression::fit(&features, &[0.0, 1.0, 1.0])?;
        assert!((model.intercept - 1.0 / 6.0).abs() < 1e-12);
        assert!((model.coefficients[0] - 0.5).abs() < 1e-12);

        let predicted = model.predict_many(&features);
        let residual_sum: f64 = predicted.iter().zip([0.0, 1.0, 1.0]).map(|(p, a)| p - a).sum();
        assert!(residual_sum.abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn fit_empty_fails() {
        assert!(LinearRegression::fit(&[], &[]).is_err());
    }

    #[test]
    fn fit_mismatched_lengths_fails() {
        assert!(LinearRegression::fit(&[vec![1.0], vec![2.0], vec![3.0]], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn fit_ragged_rows_fails() {
        let features = vec![vec![1.0, 2.0], vec![2.0], vec![3.0, 4.0], vec![5.0, 1.0]];
        assert!(LinearRegression::fit(&features, &[1.0, 2.0, 3.0, 4.0]).is_err());
    }

    #[test]
    fn fit_underdetermined_fails() {
        assert!(LinearRegression::fit(&[vec![1.0, 2.0], vec![2.0, 1.0]], &[1.0, 2.0]).is_err());
    }
}

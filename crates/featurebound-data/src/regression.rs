//! Ordinary-least-squares R² evaluator.

use featurebound_core::{Evaluator, FitnessScore};
use nalgebra::{DMatrix, DVector};
use thiserror::Error;
use tracing::debug;

use crate::table::TrainingTable;

/// Iteration cap for the SVD; a fit that does not converge scores worst.
const SVD_MAX_ITERATIONS: usize = 10_000;

/// Reasons a single fit can fail. Never leaves this module: every variant
/// is reported to the search as [`FitnessScore::WORST`].
#[derive(Debug, Error)]
enum FitError {
    #[error("feature {0} is not a column of the training table")]
    UnknownFeature(String),

    #[error("least-squares solve failed: {0}")]
    Solve(&'static str),

    #[error("SVD did not converge")]
    NoConvergence,

    #[error("input values overflow to non-finite")]
    NonFiniteInput,

    #[error("target has zero variance")]
    ConstantTarget,

    #[error("R² is not finite")]
    NonFinite,
}

/// Scores a subset by the in-sample R² of a linear regression with intercept.
///
/// Columns and target are centred, which absorbs the intercept. The fit is
/// an SVD least-squares solve that treats singular values below
/// `EPSILON * max(rows, cols) * sigma_max` as zero, so collinear feature
/// sets give the minimum-norm solution instead of failing.
///
/// # Examples
///
/// ```
/// use featurebound_core::Evaluator;
/// use featurebound_data::{LinearRegressionEvaluator, TrainingTable};
///
/// let table = TrainingTable::from_columns(
///     ["x", "noise"],
///     vec![vec![1.0, 2.0, 3.0, 4.0], vec![0.3, -0.1, 0.2, 0.0]],
///     "y",
///     vec![3.0, 5.0, 7.0, 9.0],
/// ).unwrap();
/// let evaluator = LinearRegressionEvaluator::new(table);
///
/// let r2 = evaluator.evaluate(&["x".to_string()]).value();
/// assert!((r2 - 1.0).abs() < 1e-9);
/// assert!(evaluator.evaluate(&[]).is_worst());
/// ```
#[derive(Debug, Clone)]
pub struct LinearRegressionEvaluator {
    table: TrainingTable,
}

impl LinearRegressionEvaluator {
    /// Creates an evaluator over a training table.
    pub fn new(table: TrainingTable) -> Self {
        Self { table }
    }

    /// Returns the training table.
    pub fn table(&self) -> &TrainingTable {
        &self.table
    }

    fn fit_r_squared(&self, features: &[String]) -> Result<f64, FitError> {
        let columns = features
            .iter()
            .map(|name| {
                self.table
                    .column(name)
                    .ok_or_else(|| FitError::UnknownFeature(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let rows = self.table.row_count();
        let y = centered(self.table.target());
        let ss_tot = y.norm_squared();
        if !ss_tot.is_finite() {
            return Err(FitError::NonFiniteInput);
        }
        if ss_tot <= 0.0 {
            return Err(FitError::ConstantTarget);
        }

        let centered_columns: Vec<DVector<f64>> = columns.iter().map(|c| centered(c)).collect();
        let design = DMatrix::from_columns(&centered_columns);
        if !design.iter().all(|v| v.is_finite()) {
            return Err(FitError::NonFiniteInput);
        }

        // Unordered: sorting panics on NaN singular values.
        let svd = design
            .clone()
            .try_svd_unordered(true, true, f64::EPSILON, SVD_MAX_ITERATIONS)
            .ok_or(FitError::NoConvergence)?;
        if !svd.singular_values.iter().all(|s| s.is_finite()) {
            return Err(FitError::NonFiniteInput);
        }
        let tolerance =
            f64::EPSILON * rows.max(columns.len()) as f64 * svd.singular_values.max();
        let coefficients = svd.solve(&y, tolerance).map_err(FitError::Solve)?;
        let ss_res = (&y - &design * coefficients).norm_squared();

        let r_squared = 1.0 - ss_res / ss_tot;
        if r_squared.is_finite() {
            Ok(r_squared)
        } else {
            Err(FitError::NonFinite)
        }
    }
}

/// Subtracts the mean. Overflow in the sum shows up as non-finite values.
fn centered(values: &[f64]) -> DVector<f64> {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    DVector::from_iterator(values.len(), values.iter().map(|v| v - mean))
}

impl Evaluator for LinearRegressionEvaluator {
    fn evaluate(&self, features: &[String]) -> FitnessScore {
        if features.is_empty() {
            return FitnessScore::WORST;
        }

        match self.fit_r_squared(features) {
            Ok(r_squared) => FitnessScore::of(r_squared),
            Err(e) => {
                debug!(
                    event = "evaluation_failed",
                    features = ?features,
                    error = %e,
                );
                FitnessScore::WORST
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator(columns: Vec<(&str, Vec<f64>)>, target: Vec<f64>) -> LinearRegressionEvaluator {
        let (names, data): (Vec<&str>, Vec<Vec<f64>>) = columns.into_iter().unzip();
        LinearRegressionEvaluator::new(TrainingTable::from_columns(names, data, "y", target).unwrap())
    }

    fn subset(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_perfect_fit() {
        let eval = evaluator(vec![("x", vec![0.0, 1.0, 2.0, 3.0])], vec![1.0, 3.0, 5.0, 7.0]);
        let r2 = eval.evaluate(&subset(&["x"])).value();
        assert!((r2 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_fit_matches_closed_form() {
        // y = x + e with e = [1, -1, -1, 1] orthogonal to x and the intercept.
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![2.0, 1.0, 2.0, 5.0];
        let eval = evaluator(vec![("x", x)], y);

        // ss_res = 4, ss_tot = 9 => r2 = 5 / 9
        let r2 = eval.evaluate(&subset(&["x"])).value();
        assert!((r2 - 5.0 / 9.0).abs() < 1e-9, "r2 = {r2}");
    }

    #[test]
    fn test_more_features_never_lower_r2() {
        let eval = evaluator(
            vec![
                ("x", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
                ("z", vec![0.5, -0.2, 0.9, 0.1, -0.4]),
            ],
            vec![1.2, 1.9, 3.4, 3.8, 5.1],
        );
        let one = eval.evaluate(&subset(&["x"]));
        let two = eval.evaluate(&subset(&["x", "z"]));
        assert!(two.value() >= one.value() - 1e-12);
    }

    #[test]
    fn test_collinear_large_magnitude_never_lowers_r2() {
        // Wine-sized table with unscaled columns and an exact multiple.
        let x: Vec<f64> = (0..1599).map(|i| 1000.0 + ((i * 37) % 291) as f64).collect();
        let x2: Vec<f64> = x.iter().map(|v| 0.1 * v).collect();
        let near: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, v)| 0.1 * v + 1e-6 * (i % 7) as f64)
            .collect();
        let y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, v)| 0.01 * v + ((i % 11) as f64 - 5.0) * 0.8)
            .collect();
        let eval = evaluator(vec![("x", x), ("x2", x2), ("near", near)], y);

        let alone = eval.evaluate(&subset(&["x"])).value();
        assert!(alone > 0.0 && alone < 1.0, "r2 = {alone}");
        for pair in [["x", "x2"], ["x", "near"]] {
            let r2 = eval.evaluate(&subset(&pair)).value();
            assert!(r2 >= alone - 1e-9, "{pair:?}: {r2} < {alone}");
        }
        let all = eval.evaluate(&subset(&["x", "x2", "near"])).value();
        assert!(all >= alone - 1e-9, "all: {all} < {alone}");
    }

    #[test]
    fn test_overflowing_values_score_worst() {
        let eval = evaluator(
            vec![
                ("huge", vec![1e308, 1e308, -1e308, 1e308]),
                ("x", vec![1.0, 2.0, 3.0, 4.0]),
            ],
            vec![1.0, 2.0, 4.0, 3.0],
        );
        assert!(eval.evaluate(&subset(&["huge"])).is_worst());
        assert!(eval.evaluate(&subset(&["huge", "x"])).is_worst());
        // The evaluator stays usable after a failed fit.
        assert!(!eval.evaluate(&subset(&["x"])).is_worst());
    }

    #[test]
    fn test_overflowing_target_scores_worst() {
        let eval = evaluator(
            vec![("x", vec![1.0, 2.0, 3.0])],
            vec![1e308, 1e308, -1e308],
        );
        assert!(eval.evaluate(&subset(&["x"])).is_worst());
    }

    #[test]
    fn test_collinear_features_do_not_fail() {
        let eval = evaluator(
            vec![
                ("x", vec![1.0, 2.0, 3.0, 4.0]),
                ("x2", vec![2.0, 4.0, 6.0, 8.0]),
            ],
            vec![3.0, 5.0, 7.0, 9.0],
        );
        let r2 = eval.evaluate(&subset(&["x", "x2"])).value();
        assert!((r2 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_target_is_worst() {
        let eval = evaluator(vec![("x", vec![1.0, 2.0, 3.0])], vec![4.0, 4.0, 4.0]);
        assert!(eval.evaluate(&subset(&["x"])).is_worst());
    }

    #[test]
    fn test_unknown_feature_is_worst() {
        let eval = evaluator(vec![("x", vec![1.0, 2.0, 3.0])], vec![1.0, 2.0, 4.0]);
        assert!(eval.evaluate(&subset(&["missing"])).is_worst());
    }

    #[test]
    fn test_empty_subset_is_worst() {
        let eval = evaluator(vec![("x", vec![1.0, 2.0, 3.0])], vec![1.0, 2.0, 4.0]);
        assert!(eval.evaluate(&[]).is_worst());
    }

    #[test]
    fn test_deterministic() {
        let eval = evaluator(
            vec![("x", vec![1.0, 2.0, 3.0, 4.0]), ("z", vec![4.0, 1.0, 3.0, 2.0])],
            vec![1.0, 2.5, 2.0, 4.5],
        );
        let features = subset(&["x", "z"]);
        assert_eq!(eval.evaluate(&features), eval.evaluate(&features));
    }
}

// ABOUTME: Regression evaluation metrics for held-out predictions
// ABOUTME: Uniform-average MSE plus per-target MSE, MAE, and R-squared
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModelError, ModelResult};
use crate::forest::DenseMatrix;

/// Metrics for one output column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetMetrics {
    /// Output column name
    pub target: String,
    /// Mean squared error
    pub mse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Coefficient of determination
    pub r2: f64,
}

/// Evaluation of a multi-output regressor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionReport {
    /// Rows evaluated
    pub n_samples: usize,
    /// Per-target MSE averaged with equal weight per target
    pub mse: f64,
    /// Per-target breakdown
    pub targets: Vec<TargetMetrics>,
}

impl fmt::Display for RegressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mean Squared Error: {:.4}", self.mse)?;
        for target in &self.targets {
            write!(
                f,
                "\n  {:<10} mse={:.4} mae={:.4} r2={:.4}",
                target.target, target.mse, target.mae, target.r2
            )?;
        }
        Ok(())
    }
}

/// Compare predictions against ground truth
///
/// # Errors
///
/// Returns `ShapeMismatch` when shapes or target names disagree and
/// `EmptyDataset` when there are no rows
pub fn evaluate(
    predicted: &DenseMatrix,
    actual: &DenseMatrix,
    target_names: &[&str],
) -> ModelResult<RegressionReport> {
    if predicted.n_rows() != actual.n_rows() {
        return Err(ModelError::ShapeMismatch {
            expected: actual.n_rows(),
            actual: predicted.n_rows(),
        });
    }
    if predicted.n_cols() != actual.n_cols() || target_names.len() != actual.n_cols() {
        return Err(ModelError::ShapeMismatch {
            expected: actual.n_cols(),
            actual: predicted.n_cols(),
        });
    }
    let n = actual.n_rows();
    if n == 0 {
        return Err(ModelError::EmptyDataset);
    }

    let targets: Vec<TargetMetrics> = target_names
        .iter()
        .enumerate()
        .map(|(col, name)| {
            let predicted: Vec<f64> = predicted.column(col).collect();
            let actual: Vec<f64> = actual.column(col).collect();
            target_metrics(name, &predicted, &actual)
        })
        .collect();
    let mse = targets.iter().map(|t| t.mse).sum::<f64>() / targets.len() as f64;

    Ok(RegressionReport {
        n_samples: n,
        mse,
        targets,
    })
}

fn target_metrics(name: &str, predicted: &[f64], actual: &[f64]) -> TargetMetrics {
    let count = actual.len() as f64;
    let mean = actual.iter().sum::<f64>() / count;

    let (mut sse, mut sae, mut sst) = (0.0, 0.0, 0.0);
    for (&p, &a) in predicted.iter().zip(actual) {
        let residual = a - p;
        sse += residual * residual;
        sae += residual.abs();
        sst += (a - mean) * (a - mean);
    }

    // Constant ground truth: perfect predictions score 1, anything else 0
    let r2 = if sst > 0.0 {
        1.0 - sse / sst
    } else if sse <= 0.0 {
        1.0
    } else {
        0.0
    };

    TargetMetrics {
        target: name.to_owned(),
        mse: sse / count,
        mae: sae / count,
        r2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions() -> ModelResult<()> {
        let y = DenseMatrix::from_rows(&[[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]])?;
        let report = evaluate(&y, &y, &["a", "b"])?;
        assert!(report.mse.abs() < f64::EPSILON);
        assert!(report.targets.iter().all(|t| (t.r2 - 1.0).abs() < f64::EPSILON));
        Ok(())
    }

    #[test]
    fn test_mse_is_uniform_average_over_targets() -> ModelResult<()> {
        let actual = DenseMatrix::from_rows(&[[0.0, 0.0], [0.0, 0.0]])?;
        let predicted = DenseMatrix::from_rows(&[[1.0, 2.0], [1.0, 4.0]])?;
        let report = evaluate(&predicted, &actual, &["a", "b"])?;

        assert!((report.targets[0].mse - 1.0).abs() < f64::EPSILON);
        assert!((report.targets[1].mse - 10.0).abs() < f64::EPSILON);
        assert!((report.targets[1].mae - 3.0).abs() < f64::EPSILON);
        assert!((report.mse - 5.5).abs() < f64::EPSILON);
        // Constant truth with imperfect predictions
        assert!(report.targets[0].r2.abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn test_mean_prediction_has_zero_r2() -> ModelResult<()> {
        let actual = DenseMatrix::from_rows(&[[1.0], [3.0]])?;
        let predicted = DenseMatrix::from_rows(&[[2.0], [2.0]])?;
        let report = evaluate(&predicted, &actual, &["a"])?;
        assert!(report.targets[0].r2.abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn test_shape_mismatch_rejected() -> ModelResult<()> {
        let a = DenseMatrix::from_rows(&[[1.0], [2.0]])?;
        let b = DenseMatrix::from_rows(&[[1.0]])?;
        assert!(evaluate(&a, &b, &["a"]).is_err());
        assert!(evaluate(&a, &a, &["a", "b"]).is_err());
        Ok(())
    }
}

//! Regression quality metrics.
//!
//! Helpers for judging a fitted inversion on held-out data. All metrics
//! take aligned target/prediction views and fail with a shape error on
//! mismatched lengths.

use ndarray::ArrayView1;

use crate::error::InversionError;

fn check_aligned(
    targets: ArrayView1<'_, f64>,
    predictions: ArrayView1<'_, f64>,
) -> Result<(), InversionError> {
    if targets.len() != predictions.len() {
        return Err(InversionError::Shape {
            reason: "predictions must align with targets",
            expected: targets.len(),
            actual: predictions.len(),
        });
    }
    Ok(())
}

/// Coefficient of determination.
///
/// `1 - Σ(y - ŷ)² / Σ(y - mean(y))²`. Equals 1 for a perfect fit, 0 for
/// a fit no better than the target mean, negative for worse. Returns NaN
/// when the targets are constant (the denominator vanishes).
pub fn r2(
    targets: ArrayView1<'_, f64>,
    predictions: ArrayView1<'_, f64>,
) -> Result<f64, InversionError> {
    check_aligned(targets, predictions)?;
    let mean = targets.mean().unwrap_or(0.0);
    let ss_res: f64 = targets
        .iter()
        .zip(predictions.iter())
        .map(|(y, p)| (y - p) * (y - p))
        .sum();
    let ss_tot: f64 = targets.iter().map(|y| (y - mean) * (y - mean)).sum();
    if ss_tot == 0.0 {
        return Ok(f64::NAN);
    }
    Ok(1.0 - ss_res / ss_tot)
}

/// Root mean squared error: `sqrt(mean((y - ŷ)²))`.
pub fn rmse(
    targets: ArrayView1<'_, f64>,
    predictions: ArrayView1<'_, f64>,
) -> Result<f64, InversionError> {
    check_aligned(targets, predictions)?;
    if targets.is_empty() {
        return Ok(0.0);
    }
    let sum_sq: f64 = targets
        .iter()
        .zip(predictions.iter())
        .map(|(y, p)| (y - p) * (y - p))
        .sum();
    Ok((sum_sq / targets.len() as f64).sqrt())
}

/// Mean absolute error: `mean(|y - ŷ|)`. More robust to outliers than
/// [`rmse`].
pub fn mae(
    targets: ArrayView1<'_, f64>,
    predictions: ArrayView1<'_, f64>,
) -> Result<f64, InversionError> {
    check_aligned(targets, predictions)?;
    if targets.is_empty() {
        return Ok(0.0);
    }
    let sum_abs: f64 = targets
        .iter()
        .zip(predictions.iter())
        .map(|(y, p)| (y - p).abs())
        .sum();
    Ok(sum_abs / targets.len() as f64)
}

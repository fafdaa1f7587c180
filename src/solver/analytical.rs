//! Closed-form least-squares solvers.
//!
//! The L2 problem `min ||A w - y||²` is solved through the SVD
//! pseudo-inverse, which returns the minimum-norm solution on
//! rank-deficient kernels instead of failing. A truncated-SVD variant
//! with a caller-chosen relative cutoff is also provided for noisy,
//! ill-conditioned kernels.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::InversionError;

/// Minimum-norm least-squares solution of `A w = y`.
///
/// Exact for well-conditioned full-rank kernels. Rank-deficient kernels
/// do not fail: singular values below the machine-precision cutoff are
/// dropped, which yields the minimum-norm solution.
///
/// # Errors
///
/// Returns `SingularInput` if the kernel has no rows or no columns.
pub fn least_squares(
    kernel: ArrayView2<'_, f64>,
    targets: ArrayView1<'_, f64>,
) -> Result<Array1<f64>, InversionError> {
    // numpy-style rcond: eps scaled by the larger kernel dimension
    let rcond = f64::EPSILON * kernel.nrows().max(kernel.ncols()) as f64;
    solve_svd(kernel, targets, rcond)
}

/// Least-squares solution through a truncated SVD.
///
/// Singular values below `tol * max_singular_value` are discarded before
/// inverting, damping directions that are dominated by noise. `tol` of
/// `0.01` is a reasonable starting point for ill-conditioned kernels.
pub fn svd_least_squares(
    kernel: ArrayView2<'_, f64>,
    targets: ArrayView1<'_, f64>,
    tol: f64,
) -> Result<Array1<f64>, InversionError> {
    solve_svd(kernel, targets, tol)
}

fn solve_svd(
    kernel: ArrayView2<'_, f64>,
    targets: ArrayView1<'_, f64>,
    relative_cutoff: f64,
) -> Result<Array1<f64>, InversionError> {
    let (n_samples, n_features) = kernel.dim();
    if n_features == 0 {
        return Err(InversionError::SingularInput("kernel has no columns"));
    }
    if n_samples == 0 {
        return Err(InversionError::SingularInput("kernel has no rows"));
    }
    if targets.len() != n_samples {
        return Err(InversionError::Shape {
            reason: "targets must align with kernel rows",
            expected: n_samples,
            actual: targets.len(),
        });
    }

    let a = DMatrix::from_fn(n_samples, n_features, |i, j| kernel[[i, j]]);
    let b = DVector::from_iterator(n_samples, targets.iter().copied());

    let svd = a.svd(true, true);
    let max_singular = svd.singular_values.iter().copied().fold(0.0, f64::max);
    let cutoff = max_singular * relative_cutoff;

    let solution = svd
        .solve(&b, cutoff)
        .map_err(|_| InversionError::SingularInput("SVD solve failed"))?;

    Ok(Array1::from_iter(solution.iter().copied()))
}

//! Full-batch gradient-descent solver.
//!
//! "SGD" by convention; the gradient here is computed over all samples
//! each step, so the solve is deterministic: zero initialization, no
//! shuffling, exactly `iterations` updates.

use ndarray::{Array1, ArrayView1, ArrayView2};

use super::logger::{TrainingLogger, Verbosity};
use super::ErrorNorm;
use crate::error::{ConfigError, InversionError};

/// Iterative inversion of `A w ≈ y` by gradient descent on the chosen loss.
///
/// Update rule: `w ← w - learning_rate * gradient`, with
///
/// - L2 gradient: `(2/n) · Aᵀ (A w - y)`
/// - L1 subgradient: `(1/n) · Aᵀ · sign(A w - y)`, `sign(0) = 0`
///
/// A learning rate too large for the feature scale makes the iteration
/// diverge; the resulting non-finite coefficients are returned as-is
/// rather than intercepted, so callers should check `is_finite` when the
/// step size is uncertain.
///
/// # Errors
///
/// `ConfigError` for a non-positive learning rate or zero iterations;
/// `Shape` if `targets` does not align with the kernel rows.
pub fn sgd_inversion(
    kernel: ArrayView2<'_, f64>,
    targets: ArrayView1<'_, f64>,
    norm: ErrorNorm,
    learning_rate: f64,
    iterations: usize,
    verbosity: Verbosity,
) -> Result<Array1<f64>, InversionError> {
    if learning_rate <= 0.0 || learning_rate.is_nan() {
        return Err(ConfigError::InvalidLearningRate(learning_rate).into());
    }
    if iterations == 0 {
        return Err(ConfigError::InvalidIterations.into());
    }
    let (n_samples, n_features) = kernel.dim();
    if targets.len() != n_samples {
        return Err(InversionError::Shape {
            reason: "targets must align with kernel rows",
            expected: n_samples,
            actual: targets.len(),
        });
    }
    if n_samples == 0 {
        return Err(InversionError::SingularInput("kernel has no rows"));
    }

    let n = n_samples as f64;
    let mut coefficients: Array1<f64> = Array1::zeros(n_features);
    let mut logger = TrainingLogger::new(verbosity);
    logger.start(norm, iterations);

    for step in 0..iterations {
        let residuals = kernel.dot(&coefficients) - &targets;
        let gradient = match norm {
            ErrorNorm::L2 => kernel.t().dot(&residuals) * (2.0 / n),
            ErrorNorm::L1 => kernel.t().dot(&residuals.mapv(sign)) / n,
        };
        coefficients.scaled_add(-learning_rate, &gradient);

        if logger.wants_loss() {
            let loss = match norm {
                ErrorNorm::L2 => residuals.mapv(|r| r * r).mean().unwrap_or(0.0),
                ErrorNorm::L1 => residuals.mapv(f64::abs).mean().unwrap_or(0.0),
            };
            logger.log_step(step, loss);
        }
    }

    logger.finish();
    Ok(coefficients)
}

/// Subgradient convention: `sign(0) = 0`.
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

//! Error taxonomy for the inversion engine.
//!
//! All errors are raised synchronously at the point of detection and
//! propagate directly to the caller. There are no internal retries and no
//! silent fallback between solver types.

use thiserror::Error;

/// Errors from configuration validation.
///
/// Raised at config build time and when per-call overrides carry invalid
/// values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `error_type` string was not one of `"l1"`, `"l2"`.
    #[error("error_type must be one of \"l1\", \"l2\", got {0:?}")]
    UnknownErrorType(String),

    /// SGD learning rate must be positive.
    #[error("sgd_lr must be positive, got {0}")]
    InvalidLearningRate(f64),

    /// SGD iteration count must be at least 1.
    #[error("sgd_iter must be at least 1")]
    InvalidIterations,

    /// Per-sample standard deviations must be positive.
    #[error("sd entries must be positive, got {value} at index {index}")]
    InvalidStdDev { index: usize, value: f64 },
}

/// Errors raised by kernel construction, fitting and prediction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InversionError {
    /// Invalid configuration value.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Dimensionality or length mismatch between kernel, targets or
    /// stored coefficients.
    #[error("shape mismatch: {reason} (expected {expected}, got {actual})")]
    Shape {
        reason: &'static str,
        expected: usize,
        actual: usize,
    },

    /// `predict` was called before any successful `fit`.
    #[error("model has no coefficients; call fit() before predict()")]
    NotFitted,

    /// Degenerate input: the linear program is infeasible or the kernel
    /// has no usable columns or rows.
    #[error("singular input: {0}")]
    SingularInput(&'static str),

    /// The LP solver did not reach optimality within its internal limits.
    #[error("solver did not converge: {0}")]
    Convergence(&'static str),
}

//! Inversion configuration with builder pattern.
//!
//! [`InversionConfig`] is immutable once stored in a model; per-call
//! overrides travel in [`FitOptions`] and never touch the stored record.
//!
//! # Example
//!
//! ```
//! use linear_inversion::{ErrorNorm, InversionConfig};
//!
//! // All defaults: analytical L2, polynomial order 1
//! let config = InversionConfig::builder().build().unwrap();
//! assert_eq!(config.polynomial_order, 1);
//!
//! // Robust fit via the SGD solver
//! let config = InversionConfig::builder()
//!     .error_type(ErrorNorm::L1)
//!     .use_sgd(true)
//!     .sgd_lr(0.005)
//!     .sgd_iter(5_000)
//!     .build()
//!     .unwrap();
//! assert!(config.use_sgd);
//! ```

use bon::Builder;
use ndarray::ArrayView1;

use crate::error::ConfigError;
use crate::solver::{ErrorNorm, Verbosity};

/// Configuration for a [`LinearInversion`](super::LinearInversion) model.
///
/// Built via the validating builder; `build()` returns a [`ConfigError`]
/// for out-of-range values. Field types make negative polynomial orders
/// and iteration counts unrepresentable.
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct InversionConfig {
    /// Loss minimized by the fit. Default: [`ErrorNorm::L2`].
    #[builder(default)]
    pub error_type: ErrorNorm,

    /// Polynomial order of the kernel built from 1-D features.
    /// `y = mx` has order 1, `y = mx² + nx` has order 2. Default: 1.
    #[builder(default = 1)]
    pub polynomial_order: usize,

    /// Use the iterative SGD solver instead of the analytical ones.
    /// Default: false.
    #[builder(default = false)]
    pub use_sgd: bool,

    /// SGD learning rate. Default: 0.01.
    #[builder(default = 0.01)]
    pub sgd_lr: f64,

    /// SGD iteration count. Default: 100.
    #[builder(default = 100)]
    pub sgd_iter: usize,

    /// Progress reporting for the SGD solver. Default: silent.
    #[builder(default)]
    pub verbosity: Verbosity,
}

/// Custom finishing function that validates the config.
impl<S: inversion_config_builder::IsComplete> InversionConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `sgd_lr <= 0` or `sgd_iter == 0`.
    pub fn build(self) -> Result<InversionConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl InversionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.sgd_lr <= 0.0 || self.sgd_lr.is_nan() {
            return Err(ConfigError::InvalidLearningRate(self.sgd_lr));
        }
        if self.sgd_iter == 0 {
            return Err(ConfigError::InvalidIterations);
        }
        Ok(())
    }
}

impl Default for InversionConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}

/// Per-call overrides for [`fit_with`](super::LinearInversion::fit_with).
///
/// Non-absent fields take precedence over the stored configuration for
/// that call only; the stored configuration is never mutated.
#[derive(Debug, Clone, Copy, Default)]
pub struct FitOptions<'a> {
    /// Per-sample standard deviations of the targets. Used to weight the
    /// L1 linear-programming objective; accepted (and currently ignored)
    /// by the other solvers for forward-compatible weighting.
    pub sd: Option<ArrayView1<'a, f64>>,

    /// Polynomial order for this call's kernel.
    pub polynomial_order: Option<usize>,

    /// SGD learning rate for this call.
    pub sgd_lr: Option<f64>,

    /// SGD iteration count for this call.
    pub sgd_iter: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = InversionConfig::default();
        assert_eq!(config.error_type, ErrorNorm::L2);
        assert_eq!(config.polynomial_order, 1);
        assert!(!config.use_sgd);
        assert!((config.sgd_lr - 0.01).abs() < 1e-12);
        assert_eq!(config.sgd_iter, 100);
        assert_eq!(config.verbosity, Verbosity::Silent);
    }

    #[test]
    fn invalid_learning_rate_is_rejected() {
        let result = InversionConfig::builder().sgd_lr(0.0).build();
        assert!(matches!(result, Err(ConfigError::InvalidLearningRate(_))));

        let result = InversionConfig::builder().sgd_lr(-0.5).build();
        assert!(matches!(result, Err(ConfigError::InvalidLearningRate(_))));
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let result = InversionConfig::builder().sgd_iter(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidIterations)));
    }

    #[test]
    fn string_error_type_parses_into_builder() {
        let config = InversionConfig::builder()
            .error_type("l1".parse().unwrap())
            .build()
            .unwrap();
        assert_eq!(config.error_type, ErrorNorm::L1);
    }

    #[test]
    fn order_zero_is_a_valid_configuration() {
        let config = InversionConfig::builder().polynomial_order(0).build();
        assert!(config.is_ok());
    }
}

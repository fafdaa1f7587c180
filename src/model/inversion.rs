//! Linear inversion model facade.
//!
//! [`LinearInversion`] ties the pieces together: it builds the data
//! kernel, dispatches to the solver selected by the configuration, owns
//! the fitted coefficient vector, and exposes prediction.

use ndarray::{Array1, Array2, ArrayView1};

use crate::error::InversionError;
use crate::kernel::{self, Features};
use crate::solver::{self, Strategy};

use super::config::{FitOptions, InversionConfig};

/// Linear (or polynomial-expanded linear) inversion model.
///
/// The model is unfitted until the first successful [`fit`](Self::fit);
/// each successful fit overwrites the stored coefficients. Instances own
/// their configuration and coefficients exclusively; fitting and
/// prediction are synchronous and run to completion on the calling
/// thread.
///
/// # Example
///
/// ```
/// use linear_inversion::LinearInversion;
/// use ndarray::array;
///
/// let x = array![0.0, 1.0, 2.0, 3.0];
/// let y = array![2.0, 5.0, 8.0, 11.0]; // y = 3x + 2
///
/// let mut model = LinearInversion::with_defaults();
/// let coefficients = model.fit(&x, y.view()).unwrap();
/// assert!((coefficients[0] - 3.0).abs() < 1e-10);
/// assert!((coefficients[1] - 2.0).abs() < 1e-10);
///
/// let predictions = model.predict(&x).unwrap();
/// assert!((predictions[3] - 11.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInversion {
    config: InversionConfig,
    coefficients: Option<Array1<f64>>,
}

impl LinearInversion {
    /// Create an unfitted model with the given configuration.
    pub fn new(config: InversionConfig) -> Self {
        Self {
            config,
            coefficients: None,
        }
    }

    /// Create an unfitted model with the default configuration
    /// (analytical L2, polynomial order 1).
    pub fn with_defaults() -> Self {
        Self::new(InversionConfig::default())
    }

    /// The stored configuration. Never mutated by fit or predict.
    pub fn config(&self) -> &InversionConfig {
        &self.config
    }

    /// Fitted coefficients, or `None` before the first successful fit.
    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.coefficients.as_ref()
    }

    /// Install externally computed coefficients, entering the fitted
    /// state without solving.
    pub fn set_coefficients(&mut self, coefficients: Array1<f64>) {
        self.coefficients = Some(coefficients);
    }

    /// Build the design matrix for `features`, using the configured
    /// polynomial order unless overridden for this call.
    pub fn make_data_kernel<'a>(
        &self,
        features: impl Into<Features<'a>>,
        polynomial_order: Option<usize>,
    ) -> Array2<f64> {
        let order = polynomial_order.unwrap_or(self.config.polynomial_order);
        kernel::make_data_kernel(features.into(), order)
    }

    /// Fit the model on `(features, targets)` with the stored
    /// configuration. See [`fit_with`](Self::fit_with).
    pub fn fit<'a>(
        &mut self,
        features: impl Into<Features<'a>>,
        targets: ArrayView1<'_, f64>,
    ) -> Result<&Array1<f64>, InversionError> {
        self.fit_with(features, targets, FitOptions::default())
    }

    /// Fit the model, with per-call overrides.
    ///
    /// Builds the kernel, validates alignment with `targets`, dispatches
    /// on `(error_type, use_sgd)` to one of the four solver strategies,
    /// stores and returns the coefficients. A failed fit leaves the model
    /// unfitted.
    ///
    /// # Errors
    ///
    /// - `Shape` if `targets` does not align with the kernel rows
    /// - `Config` for invalid override values
    /// - `SingularInput` / `Convergence` from the selected solver
    pub fn fit_with<'a>(
        &mut self,
        features: impl Into<Features<'a>>,
        targets: ArrayView1<'_, f64>,
        options: FitOptions<'_>,
    ) -> Result<&Array1<f64>, InversionError> {
        let order = options
            .polynomial_order
            .unwrap_or(self.config.polynomial_order);
        let kernel = kernel::build(features.into(), order);

        // Stale coefficients must not survive any failed fit, including
        // the validation below.
        self.coefficients = None;

        if kernel.nrows() != targets.len() {
            return Err(InversionError::Shape {
                reason: "targets must align with kernel rows",
                expected: kernel.nrows(),
                actual: targets.len(),
            });
        }

        let coefficients = match Strategy::select(self.config.error_type, self.config.use_sgd) {
            Strategy::AnalyticalL2 => solver::least_squares(kernel.view(), targets)?,
            Strategy::LinearProgramL1 => {
                solver::l1_inversion(kernel.view(), targets, options.sd)?
            }
            Strategy::SgdL2 | Strategy::SgdL1 => {
                let learning_rate = options.sgd_lr.unwrap_or(self.config.sgd_lr);
                let iterations = options.sgd_iter.unwrap_or(self.config.sgd_iter);
                solver::sgd_inversion(
                    kernel.view(),
                    targets,
                    self.config.error_type,
                    learning_rate,
                    iterations,
                    self.config.verbosity,
                )?
            }
        };

        Ok(self.coefficients.insert(coefficients))
    }

    /// Predict targets for new features with the stored configuration.
    pub fn predict<'a>(
        &self,
        features: impl Into<Features<'a>>,
    ) -> Result<Array1<f64>, InversionError> {
        self.predict_with(features, None)
    }

    /// Predict targets, optionally overriding the polynomial order for
    /// this call's kernel.
    ///
    /// # Errors
    ///
    /// - `NotFitted` before any successful fit
    /// - `Shape` if the kernel width differs from the coefficient length
    pub fn predict_with<'a>(
        &self,
        features: impl Into<Features<'a>>,
        polynomial_order: Option<usize>,
    ) -> Result<Array1<f64>, InversionError> {
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or(InversionError::NotFitted)?;

        let order = polynomial_order.unwrap_or(self.config.polynomial_order);
        let kernel = kernel::build(features.into(), order);

        if kernel.ncols() != coefficients.len() {
            return Err(InversionError::Shape {
                reason: "kernel width must match coefficient length",
                expected: coefficients.len(),
                actual: kernel.ncols(),
            });
        }

        Ok(kernel.dot(coefficients))
    }
}

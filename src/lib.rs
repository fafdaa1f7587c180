//! linear-inversion: linear and polynomial inversion for Rust.
//!
//! Solves `y ≈ A w` for the coefficient vector `w`, where the data kernel
//! `A` is either supplied directly or expanded from 1-D features into a
//! polynomial design matrix.
//!
//! # Key Types
//!
//! - [`LinearInversion`] - High-level model with fit/predict
//! - [`InversionConfig`] - Configuration builder
//! - [`ErrorNorm`] - Loss minimized by the fit (L2 or L1)
//! - [`Features`] - 1-D or 2-D feature input to the kernel builder
//!
//! # Fitting
//!
//! Use `InversionConfig::builder()` to configure, then
//! [`LinearInversion::fit`]. The solver is picked from the configuration:
//! analytical least squares for L2, a linear program for L1, or gradient
//! descent for either when `use_sgd` is set. See the [`model`] module for
//! details.

// Re-export approx traits for users who want to compare coefficients
pub use approx;

pub mod error;
pub mod kernel;
pub mod metrics;
pub mod model;
pub mod solver;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// High-level model types
pub use model::{FitOptions, InversionConfig, InversionConfigBuilder, LinearInversion};

// Solver selection and direct solver entry points
pub use solver::{l1_inversion, least_squares, sgd_inversion, svd_least_squares};
pub use solver::{ErrorNorm, Verbosity};

// Kernel building
pub use kernel::{make_data_kernel, Features};

// Errors
pub use error::{ConfigError, InversionError};

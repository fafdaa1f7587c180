//! Inversion model: configuration and the fit/predict facade.

mod config;
mod inversion;

pub use config::{FitOptions, InversionConfig, InversionConfigBuilder};
pub use inversion::LinearInversion;

//! Solver strategies for the inversion problem.
//!
//! Four concrete strategies cover the `(error_type, use_sgd)` grid:
//!
//! - [`least_squares`]: analytical L2 via SVD pseudo-inverse
//! - [`l1_inversion`]: analytical L1 via a linear-programming formulation
//! - [`sgd_inversion`]: iterative full-batch gradient descent, both losses
//!
//! [`Strategy::select`] picks the strategy once per fit call; there is no
//! open-ended runtime dispatch and no fallback between solvers.

mod analytical;
mod linprog;
mod logger;
mod sgd;

pub use analytical::{least_squares, svd_least_squares};
pub use linprog::l1_inversion;
pub use logger::{TrainingLogger, Verbosity};
pub use sgd::sgd_inversion;

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Loss minimized when fitting coefficients.
///
/// L2 is the squared-error (least-squares) objective; L1 is the
/// absolute-error objective, more robust to outliers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorNorm {
    /// Squared-error loss `Σ (y - Aw)²`.
    #[default]
    L2,
    /// Absolute-error loss `Σ |y - Aw|`.
    L1,
}

impl ErrorNorm {
    /// Canonical string form, matching the configuration surface.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L2 => "l2",
            Self::L1 => "l1",
        }
    }
}

impl fmt::Display for ErrorNorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorNorm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "l2" => Ok(Self::L2),
            "l1" => Ok(Self::L1),
            other => Err(ConfigError::UnknownErrorType(other.to_owned())),
        }
    }
}

/// Concrete solver strategy for one fit call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Closed-form least squares (pseudo-inverse).
    AnalyticalL2,
    /// L1 minimization as a linear program.
    LinearProgramL1,
    /// Gradient descent on the L2 loss.
    SgdL2,
    /// Subgradient descent on the L1 loss.
    SgdL1,
}

impl Strategy {
    /// Select the strategy for an `(error_type, use_sgd)` pair.
    pub fn select(error_type: ErrorNorm, use_sgd: bool) -> Self {
        match (error_type, use_sgd) {
            (ErrorNorm::L2, false) => Self::AnalyticalL2,
            (ErrorNorm::L1, false) => Self::LinearProgramL1,
            (ErrorNorm::L2, true) => Self::SgdL2,
            (ErrorNorm::L1, true) => Self::SgdL1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_round_trips_through_strings() {
        assert_eq!("l2".parse::<ErrorNorm>().unwrap(), ErrorNorm::L2);
        assert_eq!("l1".parse::<ErrorNorm>().unwrap(), ErrorNorm::L1);
        assert_eq!(ErrorNorm::L1.to_string(), "l1");
    }

    #[test]
    fn unknown_norm_is_config_error() {
        let err = "huber".parse::<ErrorNorm>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownErrorType("huber".into()));
    }

    #[test]
    fn strategy_covers_the_grid() {
        assert_eq!(
            Strategy::select(ErrorNorm::L2, false),
            Strategy::AnalyticalL2
        );
        assert_eq!(
            Strategy::select(ErrorNorm::L1, false),
            Strategy::LinearProgramL1
        );
        assert_eq!(Strategy::select(ErrorNorm::L2, true), Strategy::SgdL2);
        assert_eq!(Strategy::select(ErrorNorm::L1, true), Strategy::SgdL1);
    }
}

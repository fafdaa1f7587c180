//! Verbosity-gated progress reporting for the SGD solver.

use super::ErrorNorm;

/// Verbosity level for solver output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Start/finish summary with the final loss.
    Info,
    /// Per-iteration loss values.
    Debug,
}

/// Progress logger for iterative solves.
///
/// Writes to stderr so solver output never mixes with program output.
#[derive(Debug)]
pub struct TrainingLogger {
    verbosity: Verbosity,
    last_loss: Option<f64>,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            last_loss: None,
        }
    }

    /// Whether the solver should spend time computing per-iteration loss.
    pub fn wants_loss(&self) -> bool {
        self.verbosity >= Verbosity::Info
    }

    pub fn start(&self, norm: ErrorNorm, iterations: usize) {
        if self.verbosity >= Verbosity::Info {
            eprintln!("sgd: {} loss, {} iterations", norm, iterations);
        }
    }

    pub fn log_step(&mut self, step: usize, loss: f64) {
        self.last_loss = Some(loss);
        if self.verbosity >= Verbosity::Debug {
            eprintln!("sgd: step {:>6}  loss {:.6e}", step, loss);
        }
    }

    pub fn finish(&self) {
        if self.verbosity >= Verbosity::Info {
            match self.last_loss {
                Some(loss) => eprintln!("sgd: done, final loss {:.6e}", loss),
                None => eprintln!("sgd: done"),
            }
        }
    }
}

//! Interpreter error types

use thiserror::Error;

/// Errors raised while setting up an interpreter
///
/// Interpretation itself never fails; only configuration can be rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpreterError {
    /// Threshold outside [0, 1] or not a number
    #[error("Invalid threshold {name}: {value} is outside [0.0, 1.0]")]
    InvalidThreshold {
        /// Name of the offending field
        name: &'static str,
        /// Value supplied
        value: f64,
    },
}

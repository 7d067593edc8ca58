//! ClaimGuard Fraud-Signal Interpreter
//!
//! Turns the tag probabilities returned by the image classifier into a
//! fraud-risk [`Verdict`](claimguard_domain::Verdict).
//!
//! The interpreter provides:
//! - Signal derivation (no-damage confidence, per-location damage)
//! - An ordered decision policy where the first matching rule wins
//! - Deterministic, human-readable explanations
//!
//! It is a pure function of its input: no I/O, no shared state, safe to call
//! from any number of tasks at once.
//!
//! # Examples
//!
//! ```
//! use claimguard_domain::{ClassificationResult, Prediction};
//! use claimguard_interpreter::FraudInterpreter;
//!
//! let interpreter = FraudInterpreter::default_config();
//! let result = ClassificationResult::new(vec![
//!     Prediction::new("NOT_demaged", 0.8),
//!     Prediction::new("front", 0.1),
//! ]);
//!
//! let verdict = interpreter.interpret(&result);
//! assert!(verdict.is_potential_fraud);
//! assert!(verdict.message.contains("80.0%"));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod interpreter;
pub mod rules;
mod signals;

pub use config::InterpreterConfig;
pub use error::InterpreterError;
pub use interpreter::{interpret, FraudInterpreter};
pub use rules::Rule;
pub use signals::Signals;

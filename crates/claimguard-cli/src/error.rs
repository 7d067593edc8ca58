//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote API error
    #[error("API error: {0}")]
    Sdk(#[from] claimguard_sdk::SdkError),

    /// Classifier could not be set up
    #[error("Classifier error: {0}")]
    Vision(#[from] claimguard_vision::VisionError),

    /// Interpreter thresholds rejected
    #[error("Interpreter error: {0}")]
    Interpreter(#[from] claimguard_interpreter::InterpreterError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No stored session
    #[error("Not signed in. Use the 'login' command first.")]
    NotSignedIn,
}

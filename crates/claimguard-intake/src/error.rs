//! Error types for claim intake

use thiserror::Error;

/// Errors that abort a claim submission
///
/// Classifier failures are not errors here: they degrade to a skipped
/// assessment and the claim is still filed.
#[derive(Error, Debug)]
pub enum IntakeError {
    /// Empty or oversize image, rejected before any remote call
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Claims service rejected or failed to store the claim
    #[error("Repository error: {0}")]
    Repository(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

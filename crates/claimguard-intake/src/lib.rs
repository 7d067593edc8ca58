//! ClaimGuard Claim Intake
//!
//! Validates the photo attached to a claim and files the claim.
//!
//! # Architecture
//!
//! ```text
//! Image → ImageClassifier → FraudInterpreter → Verdict ─┐
//!                                                        ├→ ClaimRepository
//! NewClaim ──────────────────────────────────────────────┘
//! ```
//!
//! A failing or slow classifier never blocks a submission: the claim is filed
//! unflagged and the submitter is told validation was skipped.
//!
//! # Example Usage
//!
//! ```
//! use claimguard_domain::{AuthToken, NewClaim, Prediction};
//! use claimguard_intake::{ClaimIntake, IntakeConfig};
//! use claimguard_interpreter::FraudInterpreter;
//! use claimguard_sdk::MockBackend;
//! use claimguard_vision::MockClassifier;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = MockClassifier::new(vec![Prediction::new("NOT_demaged", 0.9)]);
//! let intake = ClaimIntake::new(
//!     Arc::new(classifier),
//!     Arc::new(MockBackend::new()),
//!     FraudInterpreter::default_config(),
//!     IntakeConfig::default(),
//! )?;
//!
//! let claim = NewClaim {
//!     user_id: "u1".to_string(),
//!     claim_type: "collision".to_string(),
//!     description: None,
//!     date_of_claim: "2024-05-01".to_string(),
//!     is_potential_fraud: false,
//! };
//!
//! let outcome = intake.submit(&AuthToken::new("token"), claim, Some(b"jpeg")).await?;
//! assert!(outcome.claim.is_potential_fraud);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod intake;
mod types;

pub use config::{IntakeConfig, DEFAULT_MAX_IMAGE_BYTES};
pub use error::IntakeError;
pub use intake::ClaimIntake;
pub use types::{Assessment, IntakeOutcome, Notification, NotificationVariant};

//! ClaimGuard Domain Layer
//!
//! Core value types and trait seams shared by every ClaimGuard crate.
//!
//! ## Key Concepts
//!
//! - **Prediction**: one `(tag, probability)` pair produced by the image classifier
//! - **ClassificationResult**: all predictions for one submitted image
//! - **Verdict**: the fraud-risk conclusion drawn from a classification
//! - **Claim**: an insurance claim record held by the remote claims service
//! - **User**: an account held by the remote accounts service
//!
//! ## Architecture
//!
//! This crate holds no I/O. Remote services are reached through the traits in
//! [`traits`], implemented by `claimguard-vision` and `claimguard-sdk`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod claim;
pub mod location;
pub mod prediction;
pub mod traits;
pub mod user;
pub mod verdict;

// Re-exports for convenience
pub use auth::AuthToken;
pub use claim::{claims_for_user, Claim, ClaimId, ClaimSummary, FraudStatus, NewClaim};
pub use location::{DamageLocation, SignalTag, NOT_DAMAGED_TAG, TAG_TABLE};
pub use prediction::{ClassificationResult, Prediction};
pub use user::{ProfileUpdate, User, UserFilter, UserProfile, UserStats, UserStatus};
pub use verdict::{DecisionRule, Verdict};

//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and the remote
//! services. Implementations live in `claimguard-vision` (image
//! classification) and `claimguard-sdk` (accounts and claims).

use crate::{AuthToken, ClassificationResult, Claim, NewClaim, ProfileUpdate, User, UserProfile};
use async_trait::async_trait;

/// Remote image classifier
///
/// Implemented by `claimguard-vision`
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Error type for classification calls
    type Error: std::error::Error + Send + Sync + 'static;

    /// Classify raw image bytes
    async fn classify(&self, image: &[u8]) -> Result<ClassificationResult, Self::Error>;
}

/// Claim persistence service
///
/// Implemented by `claimguard-sdk`
#[async_trait]
pub trait ClaimRepository: Send + Sync {
    /// Error type for claim operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// List every claim visible to the caller
    async fn list_claims(&self, auth: &AuthToken) -> Result<Vec<Claim>, Self::Error>;

    /// Persist a new claim and return the created record
    async fn create_claim(&self, auth: &AuthToken, claim: &NewClaim) -> Result<Claim, Self::Error>;
}

/// User account service
///
/// Implemented by `claimguard-sdk`
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Error type for user operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// List every user account
    async fn list_users(&self, auth: &AuthToken) -> Result<Vec<User>, Self::Error>;

    /// Fetch the profile of one user
    async fn get_user(&self, auth: &AuthToken, id: &str) -> Result<UserProfile, Self::Error>;

    /// Update editable profile fields
    async fn update_profile(
        &self,
        auth: &AuthToken,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, Self::Error>;

    /// Approve a pending user
    async fn approve_user(&self, auth: &AuthToken, id: &str) -> Result<(), Self::Error>;
}

/// Credential exchange
///
/// Implemented by `claimguard-sdk`
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Error type for sign-in
    type Error: std::error::Error + Send + Sync + 'static;

    /// Exchange email and password for a token
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, Self::Error>;
}

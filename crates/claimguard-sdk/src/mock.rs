//! In-memory backend with the same contract as the remote API.

use crate::error::SdkError;
use async_trait::async_trait;
use claimguard_domain::traits::{AccountService, ClaimRepository, UserDirectory};
use claimguard_domain::{
    AuthToken, Claim, ClaimId, NewClaim, ProfileUpdate, User, UserProfile, UserStatus,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    profiles: HashMap<String, UserProfile>,
    claims: Vec<Claim>,
    accounts: HashMap<String, (String, AuthToken)>,
    revoked: HashSet<String>,
}

/// In-memory accounts and claims service
///
/// Any non-empty token is accepted unless it has been revoked; anonymous and
/// revoked tokens get [`SdkError::Unauthorized`], like a 401 from the API.
/// Rejected credentials get the same error, as the login endpoint answers
/// them with a 401.
/// Clones share the same data.
///
/// # Examples
///
/// ```
/// use claimguard_domain::traits::{AccountService, ClaimRepository};
/// use claimguard_domain::NewClaim;
/// use claimguard_sdk::MockBackend;
///
/// # #[tokio::main]
/// # async fn main() {
/// let backend = MockBackend::new().with_account("agent@example.com", "pw", "tok");
/// let token = backend.login("agent@example.com", "pw").await.unwrap();
///
/// let claim = NewClaim {
///     user_id: "u1".to_string(),
///     claim_type: "collision".to_string(),
///     description: None,
///     date_of_claim: "2024-05-01".to_string(),
///     is_potential_fraud: false,
/// };
/// backend.create_claim(&token, &claim).await.unwrap();
/// assert_eq!(backend.list_claims(&token).await.unwrap().len(), 1);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<State>>,
}

impl MockBackend {
    /// Empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Register sign-in credentials and the token they yield
    pub fn with_account(self, email: &str, password: &str, token: &str) -> Self {
        self.state()
            .accounts
            .insert(email.to_string(), (password.to_string(), AuthToken::new(token)));
        self
    }

    /// Add a user to the directory
    pub fn with_user(self, user: User) -> Self {
        self.state().users.push(user);
        self
    }

    /// Add a profile
    pub fn with_profile(self, profile: UserProfile) -> Self {
        self.state().profiles.insert(profile.id.clone(), profile);
        self
    }

    /// Add an existing claim
    pub fn with_claim(self, claim: Claim) -> Self {
        self.state().claims.push(claim);
        self
    }

    /// Reject `token` from now on
    pub fn revoke(&self, token: &str) {
        self.state().revoked.insert(token.to_string());
    }

    /// Snapshot of stored claims
    pub fn claims(&self) -> Vec<Claim> {
        self.state().claims.clone()
    }

    /// Snapshot of stored users
    pub fn users(&self) -> Vec<User> {
        self.state().users.clone()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn authorize(&self, auth: &AuthToken) -> Result<MutexGuard<'_, State>, SdkError> {
        let state = self.state();
        if auth.is_empty() || state.revoked.contains(auth.as_str()) {
            return Err(SdkError::Unauthorized);
        }
        Ok(state)
    }
}

#[async_trait]
impl AccountService for MockBackend {
    type Error = SdkError;

    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, Self::Error> {
        match self.state().accounts.get(email) {
            Some((expected, token)) if expected == password => Ok(token.clone()),
            _ => Err(SdkError::Unauthorized),
        }
    }
}

#[async_trait]
impl UserDirectory for MockBackend {
    type Error = SdkError;

    async fn list_users(&self, auth: &AuthToken) -> Result<Vec<User>, Self::Error> {
        Ok(self.authorize(auth)?.users.clone())
    }

    async fn get_user(&self, auth: &AuthToken, id: &str) -> Result<UserProfile, Self::Error> {
        self.authorize(auth)?
            .profiles
            .get(id)
            .cloned()
            .ok_or_else(|| SdkError::NotFound(format!("user {}", id)))
    }

    async fn update_profile(
        &self,
        auth: &AuthToken,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, Self::Error> {
        let mut state = self.authorize(auth)?;
        let profile = state
            .profiles
            .get_mut(&update.id)
            .ok_or_else(|| SdkError::NotFound(format!("user {}", update.id)))?;

        profile.first_name = update.first_name.clone();
        profile.last_name = update.last_name.clone();
        profile.phone_number = Some(update.phone_number.clone()).filter(|s| !s.is_empty());
        profile.address = Some(update.address.clone()).filter(|s| !s.is_empty());

        Ok(profile.clone())
    }

    async fn approve_user(&self, auth: &AuthToken, id: &str) -> Result<(), Self::Error> {
        let mut state = self.authorize(auth)?;
        let user = state
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| SdkError::NotFound(format!("user {}", id)))?;

        user.status = UserStatus::Active;
        Ok(())
    }
}

#[async_trait]
impl ClaimRepository for MockBackend {
    type Error = SdkError;

    async fn list_claims(&self, auth: &AuthToken) -> Result<Vec<Claim>, Self::Error> {
        Ok(self.authorize(auth)?.claims.clone())
    }

    async fn create_claim(&self, auth: &AuthToken, claim: &NewClaim) -> Result<Claim, Self::Error> {
        let mut state = self.authorize(auth)?;

        // No clock here; the event date stands in for record timestamps.
        let created = Claim {
            id: ClaimId::new(),
            user_id: Some(claim.user_id.clone()),
            claim_type: claim.claim_type.clone(),
            is_potential_fraud: claim.is_potential_fraud,
            is_confirmed_fraud: false,
            fraud_subtype: None,
            description: claim.description.clone(),
            date_of_claim: claim.date_of_claim.clone(),
            claim_status: Some("pending".to_string()),
            created_at: claim.date_of_claim.clone(),
            updated_at: claim.date_of_claim.clone(),
        };

        state.claims.push(created.clone());
        if let Some(user) = state.users.iter_mut().find(|u| u.id == claim.user_id) {
            user.insurance_claims_ids.push(created.id.to_string());
        }

        Ok(created)
    }
}

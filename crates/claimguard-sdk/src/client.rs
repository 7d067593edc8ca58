//! REST client for the accounts and claims services.

use crate::error::SdkError;
use crate::session::establish_session;
use async_trait::async_trait;
use claimguard_domain::traits::{AccountService, ClaimRepository, UserDirectory};
use claimguard_domain::{AuthToken, Claim, NewClaim, ProfileUpdate, User, UserProfile, UserStatus};
use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Default timeout for API requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Body of an approval request
#[derive(Serialize)]
struct StatusChange {
    status: UserStatus,
}

/// ClaimGuard API client
///
/// Every call carries the caller's token as a bearer credential when one is
/// present. A 401 from any endpoint becomes [`SdkError::Unauthorized`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    api_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the API at `api_url`
    pub fn new(api_url: &str) -> Result<Self, SdkError> {
        Self::with_timeout(api_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(api_url: &str, timeout: Duration) -> Result<Self, SdkError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::Connection(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Base URL of the API
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    fn authorized(&self, request: RequestBuilder, auth: &AuthToken) -> RequestBuilder {
        match auth.bearer() {
            Some(bearer) => request.header(AUTHORIZATION, bearer),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, auth: &AuthToken, path: &str) -> Result<T, SdkError> {
        debug!(path, "GET");
        let request = self.authorized(self.http.get(self.url(path)), auth);
        let response = check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        auth: &AuthToken,
        path: &str,
        body: &B,
    ) -> Result<Response, SdkError> {
        debug!(path, "POST");
        let request = self.authorized(self.http.post(self.url(path)).json(body), auth);
        check(request.send().await?).await
    }
}

/// Map non-success statuses to errors
async fn check(response: Response) -> Result<Response, SdkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status.as_u16() == 401 {
        return Err(SdkError::Unauthorized);
    }

    let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
    Err(SdkError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl AccountService for ApiClient {
    type Error = SdkError;

    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, Self::Error> {
        establish_session(&self.http, &self.api_url, email, password).await
    }
}

#[async_trait]
impl UserDirectory for ApiClient {
    type Error = SdkError;

    async fn list_users(&self, auth: &AuthToken) -> Result<Vec<User>, Self::Error> {
        self.get(auth, "Accounts/get-all").await
    }

    async fn get_user(&self, auth: &AuthToken, id: &str) -> Result<UserProfile, Self::Error> {
        self.get(auth, &format!("Accounts/get/{}", id)).await
    }

    async fn update_profile(
        &self,
        auth: &AuthToken,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, Self::Error> {
        let response = self.post(auth, "Users/update", update).await?;
        Ok(response.json().await?)
    }

    async fn approve_user(&self, auth: &AuthToken, id: &str) -> Result<(), Self::Error> {
        let body = StatusChange {
            status: UserStatus::Active,
        };
        self.post(auth, &format!("Accounts/approve/{}", id), &body).await?;
        Ok(())
    }
}

#[async_trait]
impl ClaimRepository for ApiClient {
    type Error = SdkError;

    async fn list_claims(&self, auth: &AuthToken) -> Result<Vec<Claim>, Self::Error> {
        self.get(auth, "Claims/get-all").await
    }

    async fn create_claim(&self, auth: &AuthToken, claim: &NewClaim) -> Result<Claim, Self::Error> {
        let response = self.post(auth, "Claims/create", claim).await?;
        Ok(response.json().await?)
    }
}

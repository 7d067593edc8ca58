//! Sign-in against the accounts service.

use crate::error::SdkError;
use claimguard_domain::AuthToken;
use serde::{Deserialize, Serialize};

/// Sign-in request
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    /// Login email
    pub email: &'a str,
    /// Plain password, sent over TLS only
    pub password: &'a str,
}

/// Sign-in response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// JWT identifying the user
    pub token: String,
}

/// Exchange credentials for a token
pub async fn establish_session(
    http_client: &reqwest::Client,
    api_url: &str,
    email: &str,
    password: &str,
) -> Result<AuthToken, SdkError> {
    let url = format!("{}/api/Accounts/login", api_url);

    let response = http_client
        .post(&url)
        .json(&LoginRequest { email, password })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        return Err(match status.as_u16() {
            401 => SdkError::Unauthorized,
            code => SdkError::Api {
                status: code,
                message,
            },
        });
    }

    let body: LoginResponse = response.json().await?;
    if body.token.is_empty() {
        return Err(SdkError::InvalidResponse("Login response has an empty token".to_string()));
    }

    Ok(AuthToken::new(body.token))
}

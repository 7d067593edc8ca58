//! Session cookie and token claims.
//!
//! The session token is the JWT issued by the accounts service, stored in
//! the `token` cookie. The gateway only reads it: role and user id come from
//! its claims, and the signature is checked only when a shared secret is
//! configured.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::response::Redirect;
use claimguard_domain::AuthToken;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use thiserror::Error;

/// Name of the session cookie
pub const TOKEN_COOKIE: &str = "token";

/// Session cookie lifetime: 1 day
pub const TOKEN_MAX_AGE_SECS: u64 = 86_400;

/// Claims that may carry the role, in lookup order
pub const ROLE_CLAIMS: [&str; 3] = [
    "Role",
    "role",
    "http://schemas.microsoft.com/ws/2008/06/identity/claims/role",
];

/// Claim carrying the user id
pub const USER_ID_CLAIM: &str = "nameid";

/// Token decoding error
#[derive(Debug, Error)]
pub enum SessionError {
    /// Token expired
    #[error("Session token expired")]
    TokenExpired,

    /// Malformed token or bad signature
    #[error("Invalid session token: {0}")]
    InvalidToken(String),
}

/// Reads claims out of session tokens
#[derive(Clone)]
pub struct TokenDecoder {
    key: DecodingKey,
    validation: Validation,
}

impl TokenDecoder {
    /// Decoder that verifies HMAC signatures (HS256/384/512) with `secret`
    pub fn verifying(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Decoder that trusts the payload without checking the signature
    ///
    /// Suitable only where the remote API verifies every token it receives.
    pub fn unverified() -> Self {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_aud = false;
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(&[]),
            validation,
        }
    }

    /// Verifying when a secret is given, decode-only otherwise
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret {
            Some(secret) => Self::verifying(secret),
            None => Self::unverified(),
        }
    }

    /// Decode the token's claims
    pub fn decode(&self, token: &str) -> Result<Map<String, Value>, SessionError> {
        decode::<Map<String, Value>>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::TokenExpired,
                _ => SessionError::InvalidToken(e.to_string()),
            })
    }
}

/// The caller's session, available to every handler behind the gate
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    /// Token forwarded to the remote API
    pub token: AuthToken,

    /// Lowercased role, empty when the token names none
    pub role: String,

    /// User id from the `nameid` claim
    pub user_id: Option<String>,
}

impl SessionContext {
    /// Build a session from decoded claims
    pub fn from_claims(token: &str, claims: &Map<String, Value>) -> Self {
        Self {
            token: AuthToken::new(token),
            role: role_of(claims),
            user_id: claims
                .get(USER_ID_CLAIM)
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Session for a token whose claims could not be read
    pub fn opaque(token: &str) -> Self {
        Self {
            token: AuthToken::new(token),
            role: String::new(),
            user_id: None,
        }
    }

    /// Whether the caller may use administrator pages
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .ok_or_else(|| Redirect::temporary("/login"))
    }
}

/// First non-empty string among the role claims, lowercased
pub fn role_of(claims: &Map<String, Value>) -> String {
    ROLE_CLAIMS
        .iter()
        .filter_map(|name| claims.get(*name).and_then(Value::as_str))
        .find(|role| !role.is_empty())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// Session token from the request cookies, if present and non-empty
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value storing the session token
pub fn session_cookie(token: &AuthToken) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        TOKEN_COOKIE,
        token.as_str(),
        TOKEN_MAX_AGE_SECS
    )
}

/// `Set-Cookie` value clearing the session token
pub fn expired_cookie() -> String {
    format!("{}=; Path=/; Max-Age=0", TOKEN_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn token(claims: Value, secret: &str) -> String {
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn now() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[test]
    fn test_role_lookup_order() {
        let claims = json!({ "role": "User", "Role": "Admin" });
        assert_eq!(role_of(claims.as_object().unwrap()), "admin");

        let claims = json!({
            "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": "ADMIN"
        });
        assert_eq!(role_of(claims.as_object().unwrap()), "admin");
    }

    #[test]
    fn test_empty_role_falls_through() {
        let claims = json!({ "Role": "", "role": "agent" });
        assert_eq!(role_of(claims.as_object().unwrap()), "agent");
    }

    #[test]
    fn test_non_string_role_is_ignored() {
        let claims = json!({ "Role": ["Admin"] });
        assert_eq!(role_of(claims.as_object().unwrap()), "");
    }

    #[test]
    fn test_unverified_decoder_reads_any_signature() {
        let jwt = token(json!({ "nameid": "u1", "role": "Admin" }), "server-only-secret");
        let claims = TokenDecoder::unverified().decode(&jwt).unwrap();

        let session = SessionContext::from_claims(&jwt, &claims);
        assert_eq!(session.user_id.as_deref(), Some("u1"));
        assert!(session.is_admin());
    }

    #[test]
    fn test_verifying_decoder_rejects_wrong_secret() {
        let jwt = token(json!({ "nameid": "u1", "exp": now() + 600 }), "secret1");
        let result = TokenDecoder::verifying("secret2").decode(&jwt);
        assert!(matches!(result, Err(SessionError::InvalidToken(_))));
    }

    #[test]
    fn test_verifying_decoder_rejects_expired() {
        let jwt = token(json!({ "nameid": "u1", "exp": now() - 600 }), "secret");
        let result = TokenDecoder::verifying("secret").decode(&jwt);
        assert!(matches!(result, Err(SessionError::TokenExpired)));
    }

    #[test]
    fn test_garbage_token() {
        assert!(TokenDecoder::unverified().decode("not-a-jwt").is_err());
    }

    #[test]
    fn test_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; token=abc.def.ghi; lang=en"));
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_empty_token_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("token="));
        assert!(token_from_headers(&headers).is_none());
        assert!(token_from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_cookie_values() {
        let cookie = session_cookie(&AuthToken::new("abc"));
        assert!(cookie.starts_with("token=abc; Path=/"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(expired_cookie().contains("Max-Age=0"));
    }
}

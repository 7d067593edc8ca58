//! Bearer token identifying the signed-in user

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authentication token issued by the accounts service
///
/// The token is a JWT passed to every remote call as a bearer credential.
/// `Debug` output never shows the token itself.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// A token carrying no credentials (anonymous calls)
    pub fn anonymous() -> Self {
        Self(String::new())
    }

    /// Borrow the raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token carries no credentials
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value for an `Authorization` header, `None` when anonymous
    pub fn bearer(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(format!("Bearer {}", self.0))
        }
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("AuthToken(anonymous)")
        } else {
            f.write_str("AuthToken(***)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer() {
        assert_eq!(AuthToken::new("abc").bearer().as_deref(), Some("Bearer abc"));
        assert!(AuthToken::anonymous().bearer().is_none());
    }

    #[test]
    fn test_debug_hides_token() {
        let token = AuthToken::new("secret-value");
        assert!(!format!("{:?}", token).contains("secret-value"));
    }
}

//! Route gate in front of the dashboard.
//!
//! [`evaluate`] is the whole decision and does no I/O; [`route_gate`] wraps
//! it as axum middleware.

use crate::session::{token_from_headers, SessionContext, TokenDecoder};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;
use tracing::debug;

/// Sign-in page
pub const LOGIN_PATH: &str = "/login";

/// Sign-up page
pub const SIGNUP_PATH: &str = "/signup";

/// Dashboard home
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Prefixes that require a session
pub const PROTECTED_PREFIXES: [&str; 1] = ["/dashboard"];

/// Prefixes that require the admin role
pub const ADMIN_PREFIXES: [&str; 2] = ["/dashboard/users", "/dashboard/settings"];

/// What to do with a request
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Let the request through, with the caller's session if they have one
    Proceed(Option<SessionContext>),

    /// Send the caller elsewhere
    Redirect(&'static str),
}

/// Whether `path` needs a session
pub fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Whether `path` needs the admin role
pub fn is_admin_only(path: &str) -> bool {
    ADMIN_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Decide how to route a request for `path` carrying `token`
///
/// Checks run in order:
/// 1. Protected path without a token goes to sign-in
/// 2. Sign-in or sign-up with a token goes to the dashboard
/// 3. Admin path with an unreadable token goes to sign-in
/// 4. Admin path with a non-admin role goes to the dashboard
///
/// Anything else proceeds. Outside admin paths an unreadable token is passed
/// through as-is; the remote API rejects it if it is bad.
pub fn evaluate(path: &str, token: Option<&str>, decoder: &TokenDecoder) -> GateDecision {
    let Some(token) = token else {
        return if is_protected(path) {
            GateDecision::Redirect(LOGIN_PATH)
        } else {
            GateDecision::Proceed(None)
        };
    };

    if path == LOGIN_PATH || path == SIGNUP_PATH {
        return GateDecision::Redirect(DASHBOARD_PATH);
    }

    let session = match decoder.decode(token) {
        Ok(claims) => SessionContext::from_claims(token, &claims),
        Err(e) if is_admin_only(path) => {
            debug!("Unreadable token on admin path {}: {}", path, e);
            return GateDecision::Redirect(LOGIN_PATH);
        }
        Err(_) => SessionContext::opaque(token),
    };

    if is_admin_only(path) && !session.is_admin() {
        return GateDecision::Redirect(DASHBOARD_PATH);
    }

    GateDecision::Proceed(Some(session))
}

/// Middleware applying [`evaluate`] to every request
///
/// Proceeding requests get their [`SessionContext`] in the request
/// extensions.
pub async fn route_gate(
    State(decoder): State<Arc<TokenDecoder>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = token_from_headers(request.headers());
    let path = request.uri().path().to_string();

    match evaluate(&path, token.as_deref(), &decoder) {
        GateDecision::Proceed(session) => {
            if let Some(session) = session {
                request.extensions_mut().insert(session);
            }
            next.run(request).await
        }
        GateDecision::Redirect(to) => {
            debug!("Gate redirect {} -> {}", path, to);
            Redirect::temporary(to).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn jwt(role: &str) -> String {
        encode(
            &Header::default(),
            &json!({ "nameid": "u1", "role": role }),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap()
    }

    fn decoder() -> TokenDecoder {
        TokenDecoder::unverified()
    }

    #[test]
    fn test_protected_without_token() {
        for path in ["/dashboard", "/dashboard/claims", "/dashboard/users"] {
            assert_eq!(evaluate(path, None, &decoder()), GateDecision::Redirect(LOGIN_PATH));
        }
    }

    #[test]
    fn test_public_without_token() {
        assert_eq!(evaluate("/login", None, &decoder()), GateDecision::Proceed(None));
        assert_eq!(evaluate("/", None, &decoder()), GateDecision::Proceed(None));
    }

    #[test]
    fn test_login_with_token() {
        let token = jwt("User");
        assert_eq!(
            evaluate("/login", Some(&token), &decoder()),
            GateDecision::Redirect(DASHBOARD_PATH)
        );
        assert_eq!(
            evaluate("/signup", Some("opaque"), &decoder()),
            GateDecision::Redirect(DASHBOARD_PATH)
        );
    }

    #[test]
    fn test_admin_path_with_user_role() {
        let token = jwt("User");
        assert_eq!(
            evaluate("/dashboard/users", Some(&token), &decoder()),
            GateDecision::Redirect(DASHBOARD_PATH)
        );
    }

    #[test]
    fn test_admin_path_with_admin_role() {
        let token = jwt("Admin");
        match evaluate("/dashboard/settings", Some(&token), &decoder()) {
            GateDecision::Proceed(Some(session)) => assert!(session.is_admin()),
            other => panic!("Expected proceed, got {:?}", other),
        }
    }

    #[test]
    fn test_admin_path_with_garbage_token() {
        assert_eq!(
            evaluate("/dashboard/users", Some("garbage"), &decoder()),
            GateDecision::Redirect(LOGIN_PATH)
        );
    }

    #[test]
    fn test_plain_dashboard_with_garbage_token() {
        match evaluate("/dashboard/claims", Some("garbage"), &decoder()) {
            GateDecision::Proceed(Some(session)) => {
                assert_eq!(session.token.as_str(), "garbage");
                assert_eq!(session.user_id, None);
            }
            other => panic!("Expected proceed, got {:?}", other),
        }
    }

    #[test]
    fn test_verifying_decoder_on_admin_path() {
        let token = jwt("Admin");
        assert_eq!(
            evaluate("/dashboard/users", Some(&token), &TokenDecoder::verifying("other")),
            GateDecision::Redirect(LOGIN_PATH)
        );
    }
}

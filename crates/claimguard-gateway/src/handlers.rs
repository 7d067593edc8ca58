//! HTTP request handlers for the gateway.
//!
//! Every `/dashboard` handler runs behind the route gate and receives the
//! caller's [`SessionContext`]. Remote calls forward the session token; a
//! 401 from the remote API sends the caller back to `/login`, except on
//! sign-in itself, where it is answered as a JSON error.

use crate::gate::route_gate;
use crate::session::{expired_cookie, session_cookie, SessionContext, TokenDecoder};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{header::SET_COOKIE, StatusCode},
    middleware,
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use base64::Engine;
use claimguard_domain::traits::{AccountService, ClaimRepository, ImageClassifier, UserDirectory};
use claimguard_domain::{
    claims_for_user, Claim, ClaimSummary, FraudStatus, NewClaim, ProfileUpdate, User, UserFilter,
    UserProfile, UserStats, UserStatus,
};
use claimguard_intake::{Assessment, ClaimIntake, IntakeError, IntakeOutcome};
use claimguard_sdk::SdkError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Number of claims shown on the overview
pub const RECENT_CLAIMS: usize = 5;

/// Remote services the gateway needs
pub trait Backend:
    AccountService<Error = SdkError>
    + UserDirectory<Error = SdkError>
    + ClaimRepository<Error = SdkError>
    + 'static
{
}

impl<T> Backend for T where
    T: AccountService<Error = SdkError>
        + UserDirectory<Error = SdkError>
        + ClaimRepository<Error = SdkError>
        + 'static
{
}

/// Shared application state
pub struct AppState<C, B>
where
    C: ImageClassifier + 'static,
    B: Backend,
{
    /// Accounts and claims service
    pub backend: Arc<B>,
    /// Claim submission workflow
    pub intake: ClaimIntake<C, B>,
    /// Session token reader used by the route gate
    pub decoder: Arc<TokenDecoder>,
    /// Whether a real classifier is configured
    pub classifier_enabled: bool,
}

impl<C, B> Clone for AppState<C, B>
where
    C: ImageClassifier + 'static,
    B: Backend,
{
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            intake: self.intake.clone(),
            decoder: Arc::clone(&self.decoder),
            classifier_enabled: self.classifier_enabled,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests
    pub status: String,
    /// Whether images are validated
    pub classifier: bool,
}

/// Page descriptor for the public pages
#[derive(Debug, Serialize, Deserialize)]
pub struct PageResponse {
    /// Page name
    pub page: String,
}

/// Sign-in form
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Password
    pub password: String,
}

/// Dashboard overview
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    /// Users with status `active`
    pub active_users: usize,
    /// Users awaiting approval
    pub pending_users: usize,
    /// Number of claims
    pub total_claims: usize,
    /// Most recently created claims, newest first
    pub recent_claims: Vec<Claim>,
}

/// A claim with its display status
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRow {
    /// The claim record
    #[serde(flatten)]
    pub claim: Claim,
    /// Fraud status derived from the flags
    pub fraud_status: FraudStatus,
}

/// Claim list
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimsResponse {
    /// Fraud counts over the listed claims
    pub summary: ClaimSummary,
    /// Listed claims
    pub claims: Vec<ClaimRow>,
}

/// Claim list query
#[derive(Debug, Default, Deserialize)]
pub struct ClaimsQuery {
    /// Only claims of this user
    pub user: Option<String>,
}

/// New claim as posted by the dashboard
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitClaimRequest {
    /// Kind of claim
    pub claim_type: String,
    /// Submitter's description
    #[serde(default)]
    pub description: Option<String>,
    /// When the insured event happened (ISO 8601)
    pub date_of_claim: String,
    /// Photo of the damage, base64 or a base64 data URL
    #[serde(default)]
    pub image_base64: Option<String>,
}

/// User list query
#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    /// `active`, `pending`, `inactive` or `all`
    pub status: Option<String>,
    /// Text matched against names and email
    pub q: Option<String>,
}

/// User list with statistics over all users
#[derive(Debug, Serialize, Deserialize)]
pub struct UsersResponse {
    /// Users passing the filter
    pub users: Vec<User>,
    /// Statistics over every user
    pub stats: UserStats,
}

/// Approval result
#[derive(Debug, Serialize, Deserialize)]
pub struct ApproveResponse {
    /// Approved user
    pub id: String,
    /// New status
    pub status: UserStatus,
}

/// Editable profile fields
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact phone number
    #[serde(default)]
    pub phone_number: String,
    /// Postal address
    #[serde(default)]
    pub address: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Session rejected by the remote API
    Unauthorized,
    /// Malformed request
    BadRequest(String),
    /// Record missing
    NotFound(String),
    /// Remote API refused the request
    Remote {
        /// Status returned by the remote API
        status: u16,
        /// Its message
        message: String,
    },
    /// Remote API unreachable or answering nonsense
    BadGateway(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized => return Redirect::temporary("/login").into_response(),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Remote { status, message } => (
                StatusCode::from_u16(status)
                    .ok()
                    .filter(StatusCode::is_client_error)
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            ),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<&SdkError> for AppError {
    fn from(e: &SdkError) -> Self {
        match e {
            SdkError::Unauthorized => AppError::Unauthorized,
            SdkError::Api { status, message } => AppError::Remote {
                status: *status,
                message: message.clone(),
            },
            SdkError::NotFound(what) => AppError::NotFound(what.clone()),
            SdkError::Connection(_) | SdkError::InvalidResponse(_) => {
                AppError::BadGateway(e.to_string())
            }
        }
    }
}

impl From<SdkError> for AppError {
    fn from(e: SdkError) -> Self {
        AppError::from(&e)
    }
}

impl From<IntakeError> for AppError {
    fn from(e: IntakeError) -> Self {
        match e {
            IntakeError::InvalidImage(msg) => AppError::BadRequest(msg),
            IntakeError::Repository(source) => match source.downcast_ref::<SdkError>() {
                Some(sdk) => AppError::from(sdk),
                None => AppError::BadGateway(source.to_string()),
            },
            IntakeError::Config(msg) => AppError::Internal(msg),
        }
    }
}

fn require_user_id(session: &SessionContext) -> Result<&str, AppError> {
    session
        .user_id
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Session token does not name a user".to_string()))
}

/// Decode a base64 image, accepting `data:` URLs
fn decode_image(encoded: &str) -> Result<Vec<u8>, AppError> {
    let data = match encoded.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(rest, |(_, data)| data),
        None => encoded,
    };

    base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .map_err(|e| AppError::BadRequest(format!("Image is not valid base64: {}", e)))
}

/// Request body limit leaving room for a base64-encoded image
fn body_limit(max_image_bytes: usize) -> usize {
    max_image_bytes / 3 * 4 + 64 * 1024
}

/// GET /health - Liveness and classifier availability
async fn health<C, B>(State(state): State<AppState<C, B>>) -> Json<HealthResponse>
where
    C: ImageClassifier + 'static,
    B: Backend,
{
    Json(HealthResponse {
        status: "ok".to_string(),
        classifier: state.classifier_enabled,
    })
}

/// GET /login
async fn login_page() -> Json<PageResponse> {
    Json(PageResponse {
        page: "login".to_string(),
    })
}

/// GET /signup
async fn signup_page() -> Json<PageResponse> {
    Json(PageResponse {
        page: "signup".to_string(),
    })
}

/// POST /login - Exchange credentials for the session cookie
async fn login<C, B>(
    State(state): State<AppState<C, B>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AppError>
where
    C: ImageClassifier + 'static,
    B: Backend,
{
    let token = state
        .backend
        .login(&request.email, &request.password)
        .await
        .map_err(|e| match e {
            // Not a redirect: a 307 would replay the rejected credentials
            SdkError::Unauthorized => AppError::Remote {
                status: 401,
                message: "Invalid email or password".to_string(),
            },
            other => AppError::from(other),
        })?;
    info!("User signed in");

    Ok(([(SET_COOKIE, session_cookie(&token))], Redirect::to("/dashboard")).into_response())
}

/// POST /logout - Clear the session cookie
async fn logout() -> Response {
    ([(SET_COOKIE, expired_cookie())], Redirect::to("/login")).into_response()
}

/// GET /dashboard - Overview figures
async fn overview<C, B>(
    State(state): State<AppState<C, B>>,
    session: SessionContext,
) -> Result<Json<OverviewResponse>, AppError>
where
    C: ImageClassifier + 'static,
    B: Backend,
{
    let (users, mut claims) = tokio::try_join!(
        state.backend.list_users(&session.token),
        state.backend.list_claims(&session.token)
    )?;

    let stats = UserStats::compute(&users, claims.len());

    claims.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    claims.truncate(RECENT_CLAIMS);

    Ok(Json(OverviewResponse {
        active_users: stats.active_users,
        pending_users: stats.pending_users,
        total_claims: stats.total_claims,
        recent_claims: claims,
    }))
}

/// GET /dashboard/claims - Claims with fraud status
async fn list_claims<C, B>(
    State(state): State<AppState<C, B>>,
    session: SessionContext,
    Query(query): Query<ClaimsQuery>,
) -> Result<Json<ClaimsResponse>, AppError>
where
    C: ImageClassifier + 'static,
    B: Backend,
{
    let all = state.backend.list_claims(&session.token).await?;

    let claims: Vec<Claim> = match query.user.as_deref() {
        Some(user_id) => claims_for_user(&all, user_id).into_iter().cloned().collect(),
        None => all,
    };

    Ok(Json(claims_response(claims)))
}

fn claims_response(claims: Vec<Claim>) -> ClaimsResponse {
    let summary = ClaimSummary::from_claims(&claims);
    let claims = claims
        .into_iter()
        .map(|claim| ClaimRow {
            fraud_status: claim.fraud_status(),
            claim,
        })
        .collect();

    ClaimsResponse { summary, claims }
}

/// POST /dashboard/claims - File a claim, validating its image if attached
async fn submit_claim<C, B>(
    State(state): State<AppState<C, B>>,
    session: SessionContext,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<IntakeOutcome>), AppError>
where
    C: ImageClassifier + 'static,
    B: Backend,
{
    let user_id = require_user_id(&session)?.to_string();

    let image = request
        .image_base64
        .as_deref()
        .filter(|encoded| !encoded.trim().is_empty())
        .map(decode_image)
        .transpose()?;

    let claim = NewClaim {
        user_id,
        claim_type: request.claim_type,
        description: request.description,
        date_of_claim: request.date_of_claim,
        is_potential_fraud: false,
    };

    let outcome = state
        .intake
        .submit(&session.token, claim, image.as_deref())
        .await?;

    if outcome.claim.is_potential_fraud {
        warn!(claim_id = %outcome.claim.id, "Claim flagged as potential fraud");
    }

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// POST /dashboard/claims/validate-image - Assess a raw image
async fn validate_image<C, B>(
    State(state): State<AppState<C, B>>,
    _session: SessionContext,
    body: Bytes,
) -> Result<Json<Assessment>, AppError>
where
    C: ImageClassifier + 'static,
    B: Backend,
{
    Ok(Json(state.intake.assess_image(&body).await?))
}

/// GET /dashboard/users - Filtered users with statistics (admin)
async fn list_users<C, B>(
    State(state): State<AppState<C, B>>,
    session: SessionContext,
    Query(query): Query<UsersQuery>,
) -> Result<Json<UsersResponse>, AppError>
where
    C: ImageClassifier + 'static,
    B: Backend,
{
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(s) => Some(
            UserStatus::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown user status '{}'", s)))?,
        ),
    };
    let filter = UserFilter { status, query: query.q };

    let (users, claims) = tokio::try_join!(
        state.backend.list_users(&session.token),
        state.backend.list_claims(&session.token)
    )?;

    let stats = UserStats::compute(&users, claims.len());
    let users = filter.apply(&users).into_iter().cloned().collect();

    Ok(Json(UsersResponse { users, stats }))
}

/// GET /dashboard/users/:id/claims - Claims of one user (admin)
async fn user_claims<C, B>(
    State(state): State<AppState<C, B>>,
    session: SessionContext,
    Path(id): Path<String>,
) -> Result<Json<ClaimsResponse>, AppError>
where
    C: ImageClassifier + 'static,
    B: Backend,
{
    let all = state.backend.list_claims(&session.token).await?;
    let claims = claims_for_user(&all, &id).into_iter().cloned().collect();
    Ok(Json(claims_response(claims)))
}

/// POST /dashboard/users/:id/approve - Approve a pending user (admin)
async fn approve_user<C, B>(
    State(state): State<AppState<C, B>>,
    session: SessionContext,
    Path(id): Path<String>,
) -> Result<Json<ApproveResponse>, AppError>
where
    C: ImageClassifier + 'static,
    B: Backend,
{
    state.backend.approve_user(&session.token, &id).await?;
    info!("Approved user {}", id);

    Ok(Json(ApproveResponse {
        id,
        status: UserStatus::Active,
    }))
}

/// GET /dashboard/profile - Profile of the signed-in user
async fn get_profile<C, B>(
    State(state): State<AppState<C, B>>,
    session: SessionContext,
) -> Result<Json<UserProfile>, AppError>
where
    C: ImageClassifier + 'static,
    B: Backend,
{
    let user_id = require_user_id(&session)?;
    Ok(Json(state.backend.get_user(&session.token, user_id).await?))
}

/// POST /dashboard/profile - Update the signed-in user's profile
async fn update_profile<C, B>(
    State(state): State<AppState<C, B>>,
    session: SessionContext,
    Json(form): Json<ProfileForm>,
) -> Result<Json<UserProfile>, AppError>
where
    C: ImageClassifier + 'static,
    B: Backend,
{
    let update = ProfileUpdate {
        id: require_user_id(&session)?.to_string(),
        first_name: form.first_name,
        last_name: form.last_name,
        phone_number: form.phone_number,
        address: form.address,
    };

    Ok(Json(state.backend.update_profile(&session.token, &update).await?))
}

/// Create the axum router with all routes
pub fn create_router<C, B>(state: AppState<C, B>) -> Router
where
    C: ImageClassifier + 'static,
    B: Backend,
{
    let limit = body_limit(state.intake.config().max_image_bytes);
    let decoder = Arc::clone(&state.decoder);

    Router::new()
        .route("/health", get(health::<C, B>))
        .route("/login", get(login_page).post(login::<C, B>))
        .route("/signup", get(signup_page))
        .route("/logout", post(logout))
        .route("/dashboard", get(overview::<C, B>))
        .route(
            "/dashboard/claims",
            get(list_claims::<C, B>).post(submit_claim::<C, B>),
        )
        .route("/dashboard/claims/validate-image", post(validate_image::<C, B>))
        .route("/dashboard/users", get(list_users::<C, B>))
        .route("/dashboard/users/:id/claims", get(user_claims::<C, B>))
        .route("/dashboard/users/:id/approve", post(approve_user::<C, B>))
        .route(
            "/dashboard/profile",
            get(get_profile::<C, B>).post(update_profile::<C, B>),
        )
        .layer(middleware::from_fn_with_state(decoder, route_gate))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_base64() {
        assert_eq!(decode_image("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_data_url() {
        assert_eq!(decode_image("data:image/jpeg;base64,aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_invalid_base64() {
        assert!(matches!(decode_image("!!!"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_body_limit_covers_encoded_image() {
        let max = 4 * 1024 * 1024;
        assert!(body_limit(max) > max / 3 * 4);
    }

    #[test]
    fn test_sdk_error_mapping() {
        assert!(matches!(AppError::from(SdkError::Unauthorized), AppError::Unauthorized));
        assert!(matches!(
            AppError::from(SdkError::Connection("refused".to_string())),
            AppError::BadGateway(_)
        ));
    }

    #[test]
    fn test_unauthorized_redirects_to_login() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()["location"], "/login");
    }

    #[test]
    fn test_remote_server_error_becomes_bad_gateway() {
        let response = AppError::Remote {
            status: 500,
            message: "boom".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}

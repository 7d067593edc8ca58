//! Integration tests for the ClaimGuard SDK
//!
//! Each test serves a small stand-in for the remote API on a local port and
//! drives `ApiClient` against it.

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use claimguard_domain::traits::{AccountService, ClaimRepository, UserDirectory};
use claimguard_domain::{AuthToken, NewClaim, UserStatus};
use claimguard_sdk::{ApiClient, SdkError};
use serde_json::{json, Value};

async fn serve(app: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    ApiClient::new(&format!("http://{}", addr)).unwrap()
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers.get("authorization").and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn test_login_returns_token() {
    let app = Router::new().route(
        "/api/Accounts/login",
        post(|Json(body): Json<Value>| async move {
            if body["email"] == "agent@example.com" && body["password"] == "pw" {
                (StatusCode::OK, Json(json!({ "token": "jwt-token" })))
            } else {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": "Invalid credentials" })))
            }
        }),
    );
    let client = serve(app).await;

    let token = client.login("agent@example.com", "pw").await.unwrap();
    assert_eq!(token.as_str(), "jwt-token");

    let err = client.login("agent@example.com", "nope").await.unwrap_err();
    assert!(matches!(err, SdkError::Api { status: 400, .. }));
}

#[tokio::test]
async fn test_list_claims_sends_bearer_token() {
    let app = Router::new().route(
        "/Claims/get-all",
        get(|headers: HeaderMap| async move {
            if bearer(&headers) != Some("Bearer jwt-token") {
                return (StatusCode::UNAUTHORIZED, Json(json!([])));
            }
            (
                StatusCode::OK,
                Json(json!([
                    { "id": "c1", "userId": "u1", "claimType": "collision",
                      "isPotentialFraud": true, "isConfirmedFraud": false,
                      "dateOfClaim": "2024-05-01" },
                    { "id": "c2", "claimType": "theft", "dateOfClaim": "2024-05-03" }
                ])),
            )
        }),
    );
    let client = serve(app).await;

    let claims = client.list_claims(&AuthToken::new("jwt-token")).await.unwrap();
    assert_eq!(claims.len(), 2);
    assert!(claims[0].is_potential_fraud);
    assert_eq!(claims[1].user_id, None);
}

#[tokio::test]
async fn test_unauthorized_status() {
    let app = Router::new().route(
        "/Accounts/get-all",
        get(|| async { StatusCode::UNAUTHORIZED }),
    );
    let client = serve(app).await;

    let err = client.list_users(&AuthToken::anonymous()).await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_server_error_keeps_body() {
    let app = Router::new().route(
        "/Accounts/get/:id",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database offline") }),
    );
    let client = serve(app).await;

    match client.get_user(&AuthToken::new("t"), "u1").await {
        Err(SdkError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database offline");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_approve_user_posts_active_status() {
    let app = Router::new().route(
        "/Accounts/approve/:id",
        post(|Path(id): Path<String>, Json(body): Json<Value>| async move {
            if id == "u7" && body == json!({ "status": "active" }) {
                StatusCode::OK
            } else {
                StatusCode::BAD_REQUEST
            }
        }),
    );
    let client = serve(app).await;

    client.approve_user(&AuthToken::new("t"), "u7").await.unwrap();
}

#[tokio::test]
async fn test_create_claim_returns_record() {
    let app = Router::new().route(
        "/Claims/create",
        post(|Json(body): Json<Value>| async move {
            Json(json!({
                "id": "c9",
                "userId": body["userId"],
                "claimType": body["claimType"],
                "isPotentialFraud": body["isPotentialFraud"],
                "dateOfClaim": body["dateOfClaim"],
                "claimStatus": "pending"
            }))
        }),
    );
    let client = serve(app).await;

    let claim = NewClaim {
        user_id: "u1".to_string(),
        claim_type: "collision".to_string(),
        description: None,
        date_of_claim: "2024-05-01".to_string(),
        is_potential_fraud: true,
    };

    let created = client.create_claim(&AuthToken::new("t"), &claim).await.unwrap();
    assert_eq!(created.id.as_str(), "c9");
    assert!(created.is_potential_fraud);
    assert_eq!(created.claim_status.as_deref(), Some("pending"));
}

#[tokio::test]
async fn test_list_users_parses_status() {
    let app = Router::new().route(
        "/Accounts/get-all",
        get(|| async {
            Json(json!([{
                "id": "u1", "firstName": "Dana", "lastName": "Reyes",
                "email": "dana@example.com", "role": "Admin",
                "status": "pending", "insuranceClaimsIds": ["c1", "c2"]
            }]))
        }),
    );
    let client = serve(app).await;

    let users = client.list_users(&AuthToken::new("t")).await.unwrap();
    assert_eq!(users[0].status, UserStatus::Pending);
    assert_eq!(users[0].insurance_claims_ids.len(), 2);
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let app = Router::new().route("/Claims/get-all", get(|| async { "not json" }));
    let client = serve(app).await;

    let err = client.list_claims(&AuthToken::new("t")).await.unwrap_err();
    assert!(matches!(err, SdkError::InvalidResponse(_)));
}

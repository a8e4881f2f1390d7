use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use services::AdminSession;

use crate::auth::{AuthUser, generate_jwt, session_ttl};
use crate::response::ApiResponse;
use crate::routes::common::flow_error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub expires_at: String,
}

/// POST /auth/login
///
/// Authenticates an admin and opens a new session for them.
///
/// ### Request Body
/// ```json
/// { "email": "admin@example.com", "password": "secret" }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ token, email, expires_at }` and message `Welcome {email}!`
/// - `400 Bad Request` when either field is empty
/// - `401 Unauthorized` for unknown emails or wrong passwords
/// - `500 Internal Server Error` when the session cannot be signed
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let mut session = AdminSession::new();
    if let Err(e) = session
        .login(state.credentials(), &req.email, &req.password)
        .await
    {
        return flow_error_response::<LoginResponse>(e);
    }

    let ttl = match session_ttl() {
        Ok(ttl) => ttl,
        Err(e) => {
            tracing::error!(error = %e, "Invalid session duration");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Could not start a session")),
            );
        }
    };

    let now = Utc::now();
    let expiry = now + ttl;
    let sid = state.sessions().open(session, ttl, now).await;

    match generate_jwt(&req.email, &sid, expiry) {
        Ok(token) => {
            tracing::info!(email = %req.email, "Admin logged in");
            let message = format!("Welcome {}!", req.email);
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    LoginResponse {
                        token,
                        email: req.email,
                        expires_at: expiry.to_rfc3339(),
                    },
                    message,
                )),
            )
        }
        Err(e) => {
            state.sessions().close(&sid).await;
            tracing::error!(error = %e, "Failed to sign session token");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Could not start a session")),
            )
        }
    }
}

/// POST /auth/logout
///
/// Ends the session behind the bearer token. Logging out of a session that has
/// already ended still succeeds.
///
/// ### Responses
/// - `200 OK`
/// - `401 Unauthorized` when no valid token is supplied
pub async fn logout(State(state): State<AppState>, AuthUser(claims): AuthUser) -> impl IntoResponse {
    if state.sessions().close(&claims.sid).await {
        tracing::info!(email = %claims.sub, "Admin logged out");
    }
    state.sessions().prune(Utc::now()).await;
    (
        StatusCode::OK,
        Json(ApiResponse::<()>::success((), "Logged out")),
    )
}

use crate::auth::claims::{AuthUser, CurrentAdmin};
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

#[derive(serde::Serialize, Default)]
pub struct Empty;

fn unauthorized(message: &str) -> (StatusCode, Json<ApiResponse<Empty>>) {
    (StatusCode::UNAUTHORIZED, Json(ApiResponse::error(message)))
}

/// Admits requests whose token maps to an open admin session.
///
/// The session must still be in the registry (not logged out, not expired) and
/// belong to the email the token was issued for. On success a [`CurrentAdmin`]
/// is inserted into the request extensions.
pub async fn require_admin_session(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();

    let AuthUser(claims) = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| unauthorized("Authentication required"))?;

    let session = state
        .sessions()
        .get(&claims.sid, Utc::now())
        .await
        .filter(|s| s.email() == Some(claims.sub.as_str()))
        .ok_or_else(|| unauthorized("Session has ended. Please log in again."))?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentAdmin {
        session_id: claims.sid,
        session,
    });
    Ok(next.run(req).await)
}

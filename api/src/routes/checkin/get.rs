use axum::{
    Json,
    extract::{RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use services::payload::extract_token;

use super::common::ViewResponse;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /checkin?data=<token>
///
/// What the check-in page should show for this link. Always `200 OK`; the
/// `state` field says which of `scan_prompt`, `invalid_code`, `expired_code` or
/// `awaiting_email` applies, and `awaiting_email` carries the decoded payload.
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "state": "awaiting_email",
///     "payload": { "scan_date": "10-01-2024", "scan_time": "09:00:00", "admin_id": "ADM-1", "admin_location": "Hall A" },
///     "notice": { "severity": "info", "message": "You can only check in once per day" }
///   },
///   "message": "You can only check in once per day"
/// }
/// ```
pub async fn view(State(state): State<AppState>, RawQuery(query): RawQuery) -> impl IntoResponse {
    let view = state
        .check_in()
        .view(extract_token(query.as_deref()), Utc::now());
    let response = ViewResponse::from(view);
    let message = response.notice.message.clone();

    (
        StatusCode::OK,
        Json(ApiResponse::success(response, message)),
    )
}

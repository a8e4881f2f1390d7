use axum::{
    Json,
    extract::{RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use db::store::AttendanceRecord;
use services::check_in::MSG_CHECKED_IN;
use services::payload::extract_token;

use super::common::CheckInRequest;
use crate::response::ApiResponse;
use crate::routes::common::flow_error_response;
use crate::state::AppState;

/// POST /checkin?data=<token>
///
/// Records the check-in for the code in `data`. Only the first submission per
/// code is kept, whoever sends it.
///
/// ### Request Body
/// ```json
/// { "email": "student@example.com" }
/// ```
///
/// ### Responses
/// - `201 Created` with the stored record
/// - `400 Bad Request` for a missing, invalid or expired code, or an empty email
/// - `409 Conflict` with `You have already checked in`
/// - `500 Internal Server Error` if the store fails
pub async fn submit(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    Json(req): Json<CheckInRequest>,
) -> impl IntoResponse {
    let token = extract_token(query.as_deref());

    match state
        .check_in()
        .submit(state.attendance(), token, &req.email, Utc::now())
        .await
    {
        Ok(record) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(Some(record), MSG_CHECKED_IN)),
        ),
        Err(e) => flow_error_response::<Option<AttendanceRecord>>(e),
    }
}

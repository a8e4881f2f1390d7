use axum::{Json, http::StatusCode};
use serde::Serialize;
use services::FlowError;

use crate::response::ApiResponse;

/// HTTP status for a flow failure.
pub fn flow_error_status(err: &FlowError) -> StatusCode {
    match err {
        FlowError::Validation(_)
        | FlowError::MissingCode
        | FlowError::Decode(_)
        | FlowError::Expired => StatusCode::BAD_REQUEST,
        FlowError::Auth => StatusCode::UNAUTHORIZED,
        FlowError::Conflict => StatusCode::CONFLICT,
        FlowError::Store(_) | FlowError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a flow failure onto the response envelope, using the failure's notice
/// as the message. Server-side failures are logged with their cause.
pub fn flow_error_response<T>(err: FlowError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    let status = flow_error_status(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    }
    (status, Json(ApiResponse::error(err.notice().message)))
}

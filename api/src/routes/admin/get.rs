use axum::{
    Extension, Json,
    extract::{RawQuery, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use db::store::AttendanceRecord;
use services::payload::{self, DEFAULT_ADMIN_ID};
use services::{FlowError, qr};
use util::config;

use crate::auth::CurrentAdmin;
use crate::response::ApiResponse;
use crate::routes::common::flow_error_response;
use crate::state::AppState;

/// GET /admin/codes/qr.png[?data=<token>]
///
/// Renders the check-in link for `data` as a PNG. Without `data` a fresh code
/// is minted, exactly as `POST /admin/codes` would.
///
/// ### Responses
/// - `200 OK` with `Content-Type: image/png`
/// - `400 Bad Request` if `data` does not decode
/// - `401 Unauthorized` without an open session
pub async fn get_qr_png(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    RawQuery(query): RawQuery,
) -> Response {
    let base_url = config::checkin_base_url();

    let png = match payload::extract_token(query.as_deref()) {
        Some(token) => payload::decode(token)
            .map_err(FlowError::from)
            .and_then(|_| qr::render_png(&payload::deep_link(&base_url, token))),
        None => admin
            .session
            .generate_code(state.credentials(), Utc::now(), &base_url)
            .await
            .map(|code| code.png),
    };

    match png {
        Ok(png) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "image/png"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            png,
        )
            .into_response(),
        Err(e) => flow_error_response::<Option<()>>(e).into_response(),
    }
}

/// GET /admin/records
///
/// Check-ins recorded against codes carrying the logged-in admin's id, newest
/// first. Admins without an id see the records filed under the placeholder id.
///
/// ### Responses
/// - `200 OK` with a list of records
/// - `401 Unauthorized` without an open session
pub async fn list_records(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> impl IntoResponse {
    let admin_id = match state.credentials().find_admin(admin.email()).await {
        Ok(account) => account
            .and_then(|a| a.admin_id)
            .unwrap_or_else(|| DEFAULT_ADMIN_ID.into()),
        Err(e) => return flow_error_response::<Vec<AttendanceRecord>>(FlowError::Store(e)),
    };

    match state.attendance().list_for_admin(&admin_id).await {
        Ok(records) => {
            let message = format!("{} record(s) found", records.len());
            (
                StatusCode::OK,
                Json(ApiResponse::success(records, message)),
            )
        }
        Err(e) => flow_error_response(FlowError::Store(e)),
    }
}

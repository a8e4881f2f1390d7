use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use util::config;

use super::common::CodeResponse;
use crate::auth::CurrentAdmin;
use crate::response::ApiResponse;
use crate::routes::common::flow_error_response;
use crate::state::AppState;

/// POST /admin/codes
///
/// Mints a code stamped with the current Lagos date and time for the logged-in
/// admin. Nothing is stored; the code is self-describing.
///
/// ### Responses
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "scan_date": "10-01-2024",
///     "scan_time": "09:00:00",
///     "admin_id": "ADM-1",
///     "admin_location": "Hall A",
///     "token": "%7B%22scan_date%22...",
///     "link": "https://testrepo.streamlit.app/?data=%7B...",
///     "qr_url": "/api/admin/codes/qr.png?data=%7B..."
///   },
///   "message": "QR code generated"
/// }
/// ```
/// - `401 Unauthorized` without an open session
pub async fn create_code(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> impl IntoResponse {
    match admin
        .session
        .generate_code(state.credentials(), Utc::now(), &config::checkin_base_url())
        .await
    {
        Ok(code) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                CodeResponse::from(code),
                "QR code generated",
            )),
        ),
        Err(e) => flow_error_response(e),
    }
}

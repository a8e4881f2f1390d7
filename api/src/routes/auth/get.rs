use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use services::payload::{DEFAULT_ADMIN_ID, DEFAULT_ADMIN_LOCATION};
use services::FlowError;

use crate::auth::CurrentAdmin;
use crate::response::ApiResponse;
use crate::routes::common::flow_error_response;
use crate::state::AppState;

#[derive(Debug, Serialize, Default)]
pub struct MeResponse {
    pub email: String,
    pub admin_id: String,
    pub admin_location: String,
}

/// GET /auth/me
///
/// The logged-in admin with the id and location their codes will carry.
///
/// ### Responses
/// - `200 OK` with `{ email, admin_id, admin_location }`
/// - `401 Unauthorized` without an open session
pub async fn get_me(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> impl IntoResponse {
    let account = match state.credentials().find_admin(admin.email()).await {
        Ok(account) => account,
        Err(e) => return flow_error_response::<MeResponse>(FlowError::Store(e)),
    };

    let (admin_id, admin_location) = account
        .map(|a| (a.admin_id, a.admin_location))
        .unwrap_or_default();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            MeResponse {
                email: admin.email().to_owned(),
                admin_id: admin_id.unwrap_or_else(|| DEFAULT_ADMIN_ID.into()),
                admin_location: admin_location.unwrap_or_else(|| DEFAULT_ADMIN_LOCATION.into()),
            },
            "Admin fetched successfully",
        )),
    )
}

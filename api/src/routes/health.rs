use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{Json, Router, response::IntoResponse, routing::get};

/// `GET /health`
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Returns `200 OK` with `data: "OK"` while the process is serving requests.
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK", "Health check passed"))
}

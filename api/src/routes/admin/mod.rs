//! `/admin` routes. Every route here sits behind `require_admin_session`.
//!
//! - `POST /admin/codes` → [`post::create_code`]
//! - `GET /admin/codes/qr.png` → [`get::get_qr_png`]
//! - `GET /admin/records` → [`get::list_records`]

pub mod common;
pub mod get;
pub mod post;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use get::{get_qr_png, list_records};
use post::create_code;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/codes", post(create_code))
        .route("/codes/qr.png", get(get_qr_png))
        .route("/records", get(list_records))
}

//! `/checkin` routes. Public: the scanned code is the only credential.
//!
//! - `GET /checkin?data=<token>` → [`get::view`]
//! - `POST /checkin?data=<token>` → [`post::submit`]

pub mod common;
pub mod get;
pub mod post;

use crate::state::AppState;
use axum::{Router, routing::get};

pub fn checkin_routes() -> Router<AppState> {
    Router::new().route("/", get(get::view).post(post::submit))
}

//! `/auth` routes.
//!
//! - `POST /auth/login` → [`post::login`]
//! - `POST /auth/logout` → [`post::logout`]
//! - `GET /auth/me` → [`get::get_me`] (open admin session required)

pub mod get;
pub mod post;

use crate::auth::guards::require_admin_session;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use get::get_me;
use post::{login, logout};

pub fn auth_routes(app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(get_me))
        .route_layer(from_fn_with_state(app_state, require_admin_session));

    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .merge(protected)
}

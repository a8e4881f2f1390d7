//! HTTP routes under `/api`.
//!
//! - `/health` → liveness probe (public)
//! - `/auth` → admin login/logout and the current admin
//! - `/admin` → code generation and the admin's records (open admin session required)
//! - `/checkin` → the student check-in page state and submission (public)

use crate::auth::guards::require_admin_session;
use crate::routes::{
    admin::admin_routes, auth::auth_routes, checkin::checkin_routes, health::health_routes,
};
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state};

pub mod admin;
pub mod auth;
pub mod checkin;
pub mod common;
pub mod health;

/// Builds the router for every HTTP endpoint, with `app_state` applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes(app_state.clone()))
        .nest(
            "/admin",
            admin_routes().route_layer(from_fn_with_state(
                app_state.clone(),
                require_admin_session,
            )),
        )
        .nest("/checkin", checkin_routes())
        .with_state(app_state)
}

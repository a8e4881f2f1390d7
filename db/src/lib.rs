//! Persistence for the attendance service.
//!
//! - [`models`] holds the sea-orm entities for the relational backend.
//! - [`store`] defines the storage capabilities the flows depend on
//!   (`CredentialStore`, `AttendanceStore`) and the interchangeable backends.
//! - [`password`] hashes and verifies admin credentials.

pub mod models;
pub mod password;
pub mod store;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection, DbErr};
use std::path::Path;
use util::config;

/// Connects using the configured `DATABASE_URL` / `DATABASE_PATH`.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    connect_to(&config::database_url()).await
}

/// Connects to a `sqlite:` DSN or a bare SQLite file path.
///
/// Only the SQLite driver is compiled in, so any other URL (`postgres://`,
/// `mongodb://`, ...) is rejected instead of being mistaken for a file name.
pub async fn connect_to(path_or_url: &str) -> Result<DatabaseConnection, DbErr> {
    let url = sqlite_url(path_or_url)?;
    tracing::debug!(url = %url, "Connecting to database");
    Database::connect(&url).await
}

fn sqlite_url(path_or_url: &str) -> Result<String, DbErr> {
    if path_or_url.starts_with("sqlite:") {
        return Ok(path_or_url.to_string());
    }
    if let Some((scheme, _)) = path_or_url.split_once("://") {
        return Err(DbErr::Custom(format!(
            "unsupported database URL scheme `{scheme}`; only sqlite is available \
             (use STORE_BACKEND=mongodb for MongoDB)"
        )));
    }

    // SQLite won't create intermediate dirs.
    if let Some(parent) = Path::new(path_or_url).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    Ok(format!("sqlite://{path_or_url}?mode=rwc"))
}

//! Storage capabilities the attendance flows are written against.
//!
//! The flows only ever need two things from a backend: look up an admin by email,
//! and insert an attendance record unless one already exists for the same code.
//! Every backend below provides exactly that, so any of them can sit behind the server:
//!
//! - [`SqlStore`]: sea-orm over SQLite, uniqueness enforced by an index.
//! - [`MongoStore`]: MongoDB `admins` / `students` collections, uniqueness
//!   enforced by a unique index on the scan key.
//! - [`MemoryStore`]: an in-process store keyed the same way, for tests and
//!   local development only.

mod memory;
mod mongo;
mod sql;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use sql::SqlStore;

use async_trait::async_trait;
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use util::config::ConfigError;

use crate::password::verify_password;

/// An administrator as the flows see it, independent of the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    pub email: String,
    pub password_hash: String,
    pub admin_id: Option<String>,
    pub admin_location: Option<String>,
}

impl AdminAccount {
    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(&self.password_hash, password)
    }
}

impl From<crate::models::admin::Model> for AdminAccount {
    fn from(m: crate::models::admin::Model) -> Self {
        Self {
            email: m.email,
            password_hash: m.password_hash,
            admin_id: m.admin_id,
            admin_location: m.admin_location,
        }
    }
}

/// A persisted check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub scan_date: String,
    pub scan_time: String,
    pub admin_id: String,
    pub location: String,
    pub email: String,
    pub check_in_date: String,
    pub check_in_time: String,
}

impl AttendanceRecord {
    /// The `(scan_date, scan_time)` pair identifying the issued code.
    pub fn scan_key(&self) -> (&str, &str) {
        (&self.scan_date, &self.scan_time)
    }
}

impl From<crate::models::attendance_record::Model> for AttendanceRecord {
    fn from(m: crate::models::attendance_record::Model) -> Self {
        Self {
            scan_date: m.scan_date,
            scan_time: m.scan_time,
            admin_id: m.admin_id,
            location: m.location,
            email: m.email,
            check_in_date: m.check_in_date,
            check_in_time: m.check_in_time,
        }
    }
}

/// Orders records newest check-in first. Dates are `DD-MM-YYYY`, so they are
/// parsed rather than compared as text.
pub(crate) fn sort_newest_first(records: &mut [AttendanceRecord]) {
    records.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
}

fn sort_key(r: &AttendanceRecord) -> (Option<chrono::NaiveDate>, &str) {
    (util::clock::parse_date(&r.check_in_date), &r.check_in_time)
}

/// Result of [`AttendanceStore::insert_if_absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A record for the same code already exists; nothing was written.
    Conflict,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),

    #[error("document store error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_admin(&self, email: &str) -> Result<Option<AdminAccount>, StoreError>;
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Atomically writes `record` unless one exists for its scan key.
    async fn insert_if_absent(&self, record: &AttendanceRecord) -> Result<InsertOutcome, StoreError>;

    async fn find_by_scan(
        &self,
        scan_date: &str,
        scan_time: &str,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    /// Records for codes issued under `admin_id`, newest first.
    async fn list_for_admin(&self, admin_id: &str) -> Result<Vec<AttendanceRecord>, StoreError>;
}

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{
    AdminAccount, AttendanceRecord, AttendanceStore, CredentialStore, InsertOutcome, StoreError,
    sort_newest_first,
};
use crate::password::hash_password;

/// In-process store for tests and local development; nothing survives a restart.
///
/// Admins are keyed by email, records by `(scan_date, scan_time)`. The existence
/// check and the insert happen under one write lock.
#[derive(Default)]
pub struct MemoryStore {
    admins: RwLock<HashMap<String, AdminAccount>>,
    records: RwLock<HashMap<(String, String), AttendanceRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) an admin, hashing the plaintext password.
    pub async fn add_admin(
        &self,
        email: &str,
        password: &str,
        admin_id: Option<&str>,
        admin_location: Option<&str>,
    ) -> Result<(), StoreError> {
        let password_hash =
            hash_password(password).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        self.insert_admin(AdminAccount {
            email: email.to_owned(),
            password_hash,
            admin_id: admin_id.map(str::to_owned),
            admin_location: admin_location.map(str::to_owned),
        })
        .await;
        Ok(())
    }

    pub async fn insert_admin(&self, account: AdminAccount) {
        self.admins
            .write()
            .await
            .insert(account.email.clone(), account);
    }

    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_admin(&self, email: &str) -> Result<Option<AdminAccount>, StoreError> {
        Ok(self.admins.read().await.get(email).cloned())
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn insert_if_absent(&self, record: &AttendanceRecord) -> Result<InsertOutcome, StoreError> {
        let key = (record.scan_date.clone(), record.scan_time.clone());
        let mut records = self.records.write().await;
        if records.contains_key(&key) {
            return Ok(InsertOutcome::Conflict);
        }
        records.insert(key, record.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn find_by_scan(
        &self,
        scan_date: &str,
        scan_time: &str,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .get(&(scan_date.to_owned(), scan_time.to_owned()))
            .cloned())
    }

    async fn list_for_admin(&self, admin_id: &str) -> Result<Vec<AttendanceRecord>, StoreError> {
        let mut listed: Vec<AttendanceRecord> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.admin_id == admin_id)
            .cloned()
            .collect();
        sort_newest_first(&mut listed);
        Ok(listed)
    }
}

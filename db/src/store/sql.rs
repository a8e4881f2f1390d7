use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::{AdminAccount, AttendanceRecord, AttendanceStore, CredentialStore, InsertOutcome, StoreError};
use crate::models::{admin, attendance_record};

/// Relational backend over a sea-orm connection.
#[derive(Clone)]
pub struct SqlStore {
    db: DatabaseConnection,
}

impl SqlStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl CredentialStore for SqlStore {
    async fn find_admin(&self, email: &str) -> Result<Option<AdminAccount>, StoreError> {
        Ok(admin::Model::find_by_email(&self.db, email)
            .await?
            .map(AdminAccount::from))
    }
}

#[async_trait]
impl AttendanceStore for SqlStore {
    async fn insert_if_absent(&self, record: &AttendanceRecord) -> Result<InsertOutcome, StoreError> {
        let inserted = attendance_record::Model::insert_if_absent(
            &self.db,
            attendance_record::NewRecord {
                scan_date: &record.scan_date,
                scan_time: &record.scan_time,
                admin_id: &record.admin_id,
                location: &record.location,
                email: &record.email,
                check_in_date: &record.check_in_date,
                check_in_time: &record.check_in_time,
            },
        )
        .await?;

        Ok(if inserted {
            InsertOutcome::Inserted
        } else {
            InsertOutcome::Conflict
        })
    }

    async fn find_by_scan(
        &self,
        scan_date: &str,
        scan_time: &str,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        Ok(attendance_record::Model::find_for_scan(&self.db, scan_date, scan_time)
            .await?
            .map(AttendanceRecord::from))
    }

    async fn list_for_admin(&self, admin_id: &str) -> Result<Vec<AttendanceRecord>, StoreError> {
        Ok(attendance_record::Model::list_for_admin(&self.db, admin_id)
            .await?
            .into_iter()
            .map(AttendanceRecord::from)
            .collect())
    }
}

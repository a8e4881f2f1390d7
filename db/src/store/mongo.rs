use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{Document, doc, to_document},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions, UpdateOptions},
};
use serde::{Deserialize, Serialize};

use super::{
    AdminAccount, AttendanceRecord, AttendanceStore, CredentialStore, InsertOutcome, StoreError,
    sort_newest_first,
};
use crate::password::hash_password;

const ADMINS: &str = "admins";
const STUDENTS: &str = "students";
const APP_NAME: &str = "qr-attendance";

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// Hosted document store.
///
/// Admins live in `admins`, check-ins in `students`. A unique index on
/// `{scan_date, scan_time}` makes the server reject a second check-in for the
/// same code, so concurrent submissions cannot both be written.
#[derive(Clone)]
pub struct MongoStore {
    admins: Collection<AdminDocument>,
    records: Collection<CheckInDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AdminDocument {
    email: String,
    /// Argon2 PHC string. Missing hashes never verify.
    #[serde(default)]
    password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    admin_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    admin_location: Option<String>,
}

/// Check-ins written by older clients only carry the scan key and email.
#[derive(Debug, Serialize, Deserialize)]
struct CheckInDocument {
    scan_date: String,
    scan_time: String,
    #[serde(default)]
    admin_id: String,
    #[serde(default)]
    location: String,
    email: String,
    #[serde(default)]
    check_in_date: String,
    #[serde(default)]
    check_in_time: String,
}

impl From<AdminDocument> for AdminAccount {
    fn from(d: AdminDocument) -> Self {
        Self {
            email: d.email,
            password_hash: d.password_hash,
            admin_id: d.admin_id,
            admin_location: d.admin_location,
        }
    }
}

impl From<&AttendanceRecord> for CheckInDocument {
    fn from(r: &AttendanceRecord) -> Self {
        Self {
            scan_date: r.scan_date.clone(),
            scan_time: r.scan_time.clone(),
            admin_id: r.admin_id.clone(),
            location: r.location.clone(),
            email: r.email.clone(),
            check_in_date: r.check_in_date.clone(),
            check_in_time: r.check_in_time.clone(),
        }
    }
}

impl From<CheckInDocument> for AttendanceRecord {
    fn from(d: CheckInDocument) -> Self {
        Self {
            scan_date: d.scan_date,
            scan_time: d.scan_time,
            admin_id: d.admin_id,
            location: d.location,
            email: d.email,
            check_in_date: d.check_in_date,
            check_in_time: d.check_in_time,
        }
    }
}

impl MongoStore {
    /// Connects to `uri`, selects `db_name` and makes sure the indexes exist.
    ///
    /// Creating the indexes is the first round trip, so an unreachable server
    /// fails here rather than on the first request.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(APP_NAME.to_owned());

        let client = Client::with_options(options)?;
        let store = Self::new(&client.database(db_name));
        store.ensure_indexes().await?;

        tracing::info!(db = db_name, "Connected to document store");
        Ok(store)
    }

    pub fn new(db: &Database) -> Self {
        Self {
            admins: db.collection(ADMINS),
            records: db.collection(STUDENTS),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let unique = || IndexOptions::builder().unique(true).build();

        self.records
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "scan_date": 1, "scan_time": 1 })
                    .options(unique())
                    .build(),
                None,
            )
            .await?;
        self.records
            .create_index(IndexModel::builder().keys(doc! { "admin_id": 1 }).build(), None)
            .await?;
        self.admins
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique())
                    .build(),
                None,
            )
            .await?;
        Ok(())
    }

    /// Creates the admin unless one with the same email exists. Returns whether
    /// a document was written.
    pub async fn add_admin_if_missing(
        &self,
        email: &str,
        password: &str,
        admin_id: Option<&str>,
        admin_location: Option<&str>,
    ) -> Result<bool, StoreError> {
        let password_hash =
            hash_password(password).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let admin = AdminDocument {
            email: email.to_owned(),
            password_hash,
            admin_id: admin_id.map(str::to_owned),
            admin_location: admin_location.map(str::to_owned),
        };
        let fields: Document =
            to_document(&admin).map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let result = self
            .admins
            .update_one(
                doc! { "email": email },
                doc! { "$setOnInsert": fields },
                UpdateOptions::builder().upsert(true).build(),
            )
            .await?;
        Ok(result.upserted_id.is_some())
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl CredentialStore for MongoStore {
    async fn find_admin(&self, email: &str) -> Result<Option<AdminAccount>, StoreError> {
        let found = self.admins.find_one(doc! { "email": email }, None).await?;
        Ok(found.map(Into::into))
    }
}

#[async_trait]
impl AttendanceStore for MongoStore {
    async fn insert_if_absent(&self, record: &AttendanceRecord) -> Result<InsertOutcome, StoreError> {
        match self.records.insert_one(CheckInDocument::from(record), None).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(e) if is_duplicate_key(&e) => Ok(InsertOutcome::Conflict),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_scan(
        &self,
        scan_date: &str,
        scan_time: &str,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let found = self
            .records
            .find_one(doc! { "scan_date": scan_date, "scan_time": scan_time }, None)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn list_for_admin(&self, admin_id: &str) -> Result<Vec<AttendanceRecord>, StoreError> {
        let cursor = self.records.find(doc! { "admin_id": admin_id }, None).await?;
        let docs: Vec<CheckInDocument> = cursor.try_collect().await?;

        let mut listed: Vec<AttendanceRecord> = docs.into_iter().map(Into::into).collect();
        sort_newest_first(&mut listed);
        Ok(listed)
    }
}

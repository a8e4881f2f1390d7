use db::store::{AttendanceStore, CredentialStore, MemoryStore, MongoStore, SqlStore, StoreError};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use services::{CheckInFlow, SessionRegistry};
use std::sync::Arc;
use util::config::{self, StoreBackend};

/// Shared handles every request needs: the two stores, the admin session
/// registry and the configured check-in flow.
#[derive(Clone)]
pub struct AppState {
    credentials: Arc<dyn CredentialStore>,
    attendance: Arc<dyn AttendanceStore>,
    sessions: SessionRegistry,
    check_in: CheckInFlow,
}

impl AppState {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        attendance: Arc<dyn AttendanceStore>,
        check_in: CheckInFlow,
    ) -> Self {
        Self {
            credentials,
            attendance,
            sessions: SessionRegistry::new(),
            check_in,
        }
    }

    /// Uses one backend for both admins and attendance records.
    pub fn with_store<S>(store: Arc<S>, check_in: CheckInFlow) -> Self
    where
        S: CredentialStore + AttendanceStore + 'static,
    {
        Self::new(store.clone(), store, check_in)
    }

    /// Builds the state from `STORE_BACKEND` and friends.
    ///
    /// Unknown backends and out-of-range durations are rejected. The relational
    /// backend is migrated to the latest schema before use; the document backend
    /// gets its unique indexes.
    pub async fn from_config() -> Result<Self, StoreError> {
        config::validate()?;
        let check_in = CheckInFlow::from_config()?;

        match config::store_backend()? {
            StoreBackend::Sql => {
                let db = db::connect().await?;
                Migrator::up(&db, None).await?;
                tracing::info!("Using relational store");
                Ok(Self::with_store(Arc::new(SqlStore::new(db)), check_in))
            }
            StoreBackend::Mongo => {
                let store = MongoStore::connect(&config::mongodb_uri(), &config::mongodb_db_name()).await?;
                if let Some(admin) = config::bootstrap_admin() {
                    let added = store
                        .add_admin_if_missing(
                            &admin.email,
                            &admin.password,
                            admin.admin_id.as_deref(),
                            admin.admin_location.as_deref(),
                        )
                        .await?;
                    if added {
                        tracing::info!(email = %admin.email, "Added bootstrap admin to document store");
                    }
                }
                tracing::info!("Using document store");
                Ok(Self::with_store(Arc::new(store), check_in))
            }
            StoreBackend::Memory => {
                let store = MemoryStore::new();
                match config::bootstrap_admin() {
                    Some(admin) => {
                        store
                            .add_admin(
                                &admin.email,
                                &admin.password,
                                admin.admin_id.as_deref(),
                                admin.admin_location.as_deref(),
                            )
                            .await?;
                        tracing::info!(email = %admin.email, "Added bootstrap admin to in-memory store");
                    }
                    None => tracing::warn!("In-memory store has no admins; set ADMIN_EMAIL and ADMIN_PASSWORD"),
                }
                tracing::warn!("Using in-memory store; records are lost on restart");
                Ok(Self::with_store(Arc::new(store), check_in))
            }
        }
    }

    pub fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }

    pub fn attendance(&self) -> &dyn AttendanceStore {
        self.attendance.as_ref()
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn check_in(&self) -> &CheckInFlow {
        &self.check_in
    }
}

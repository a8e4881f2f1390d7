//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.
//!
//! Free functions at the bottom of this module (`config::host()`, `config::port()`, ...)
//! are the usual way for the rest of the workspace to read a single value.

use chrono::TimeDelta;
use std::env;
use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};
use thiserror::Error;

/// Directory searched for secret files (`/run/secrets/<NAME>`) when a value is not
/// present in the environment.
const SECRETS_DIR: &str = "/run/secrets";

const DEFAULT_DATABASE_URL: &str = "sqlite://data/attendance.db?mode=rwc";
const DEFAULT_CHECKIN_BASE_URL: &str = "https://testrepo.streamlit.app/";
const DEFAULT_MONGODB_DB_NAME: &str = "qr_attendance";

/// Longest accepted `JWT_DURATION_MINUTES` / `QR_MAX_AGE_MINUTES` (one year).
pub const MAX_DURATION_MINUTES: u64 = 365 * 24 * 60;

/// Configuration values the server refuses to start with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown STORE_BACKEND `{0}` (expected sql, mongodb or memory)")]
    UnknownBackend(String),

    #[error("{key}={value} is out of range (at most {max} minutes)", max = MAX_DURATION_MINUTES)]
    DurationOutOfRange { key: &'static str, value: u64 },

    #[error("{0} must be set for the selected store backend")]
    Missing(&'static str),
}

/// Which storage backend the server should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Relational store through sea-orm (SQLite).
    Sql,
    /// Hosted document store (MongoDB), `admins` and `students` collections.
    Mongo,
    /// In-process store for tests and local development. Contents are lost on restart.
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Sql => "sql",
            StoreBackend::Mongo => "mongodb",
            StoreBackend::Memory => "memory",
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "sql" | "sqlite" | "" => Ok(StoreBackend::Sql),
            "mongodb" | "mongo" => Ok(StoreBackend::Mongo),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::UnknownBackend(value.trim().to_owned())),
        }
    }
}

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_url: String,
    /// Raw `STORE_BACKEND` value, parsed by [`store_backend`].
    pub store_backend: String,
    pub mongodb_uri: String,
    pub mongodb_db_name: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub checkin_base_url: String,
    pub qr_max_age_minutes: u64,
    /// Admin account created at startup (memory backend) or by the seeder.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials and details for an admin created without the seeder's arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub admin_id: Option<String>,
    pub admin_location: Option<String>,
}

impl BootstrapAdmin {
    /// Reads `ADMIN_EMAIL` / `ADMIN_PASSWORD` (password may also come from
    /// `/run/secrets/ADMIN_PASSWORD`) plus optional `ADMIN_ID` and `ADMIN_LOCATION`.
    fn from_env() -> Option<Self> {
        let email = env::var("ADMIN_EMAIL").ok().filter(|s| !s.is_empty())?;
        let password = env::var("ADMIN_PASSWORD")
            .ok()
            .or_else(|| read_secret("ADMIN_PASSWORD"))
            .filter(|s| !s.is_empty())?;
        Some(Self {
            email,
            password,
            admin_id: env::var("ADMIN_ID").ok().filter(|s| !s.is_empty()),
            admin_location: env::var("ADMIN_LOCATION").ok().filter(|s| !s.is_empty()),
        })
    }
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Missing optional values fall back to defaults. The database connection
    /// string is looked up in `DATABASE_URL`, then `DATABASE_PATH` (a SQLite file),
    /// then the secret file `/run/secrets/DATABASE_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "qr-attendance".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info,services=info,db=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_url: database_url_from_env(),
            store_backend: env::var("STORE_BACKEND").unwrap_or_else(|_| "sql".into()),
            mongodb_uri: env::var("MONGODB_URI")
                .ok()
                .or_else(|| read_secret("MONGODB_URI"))
                .unwrap_or_default(),
            mongodb_db_name: env::var("MONGODB_DB_NAME")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_MONGODB_DB_NAME.into()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: parse_or("PORT", 3000),
            jwt_secret: env::var("JWT_SECRET")
                .ok()
                .or_else(|| read_secret("JWT_SECRET"))
                .unwrap_or_default(),
            jwt_duration_minutes: parse_or("JWT_DURATION_MINUTES", 60),
            checkin_base_url: env::var("CHECKIN_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_CHECKIN_BASE_URL.into()),
            qr_max_age_minutes: parse_or("QR_MAX_AGE_MINUTES", 0),
            bootstrap_admin: BootstrapAdmin::from_env(),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    ///
    /// Used by public per-field setter methods.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    /// Override `env` value.
    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_database_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_url = value.into());
    }

    pub fn set_store_backend(value: StoreBackend) {
        AppConfig::set_field(|cfg| cfg.store_backend = value.as_str().into());
    }

    /// Override the raw `STORE_BACKEND` value, including ones that do not parse.
    pub fn set_store_backend_raw(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.store_backend = value.into());
    }

    pub fn set_mongodb_uri(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.mongodb_uri = value.into());
    }

    pub fn set_mongodb_db_name(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.mongodb_db_name = value.into());
    }

    pub fn set_host(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.host = value.into());
    }

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value.into());
    }

    pub fn set_checkin_base_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.checkin_base_url = value.into());
    }

    pub fn set_qr_max_age_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.qr_max_age_minutes = value.into());
    }

    pub fn set_bootstrap_admin(value: Option<BootstrapAdmin>) {
        AppConfig::set_field(|cfg| cfg.bootstrap_admin = value);
    }

    /// Checks every value the server cannot run without.
    ///
    /// `AppConfig::from_env` never fails, so startup calls this once before
    /// building any state.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let backend = self.store_backend.parse::<StoreBackend>()?;
        if backend == StoreBackend::Mongo && self.mongodb_uri.trim().is_empty() {
            return Err(ConfigError::Missing("MONGODB_URI"));
        }
        minutes("JWT_DURATION_MINUTES", self.jwt_duration_minutes)?;
        minutes("QR_MAX_AGE_MINUTES", self.qr_max_age_minutes)?;
        Ok(())
    }
}

/// Converts a configured number of minutes, rejecting values above
/// [`MAX_DURATION_MINUTES`].
pub fn minutes(key: &'static str, value: u64) -> Result<TimeDelta, ConfigError> {
    Some(value)
        .filter(|v| *v <= MAX_DURATION_MINUTES)
        .and_then(|v| i64::try_from(v).ok())
        .and_then(TimeDelta::try_minutes)
        .ok_or(ConfigError::DurationOutOfRange { key, value })
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

fn read_secret(name: &str) -> Option<String> {
    let path = Path::new(SECRETS_DIR).join(name);
    read_to_string(&path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn database_url_from_env() -> String {
    if let Ok(url) = env::var("DATABASE_URL") {
        return url;
    }
    if let Ok(path) = env::var("DATABASE_PATH") {
        return path;
    }
    read_secret("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into())
}

// --- Accessors ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_url() -> String {
    AppConfig::global().database_url.clone()
}

pub fn store_backend() -> Result<StoreBackend, ConfigError> {
    AppConfig::global().store_backend.parse()
}

pub fn mongodb_uri() -> String {
    AppConfig::global().mongodb_uri.clone()
}

pub fn mongodb_db_name() -> String {
    AppConfig::global().mongodb_db_name.clone()
}

/// Runs [`AppConfig::validate`] on the global configuration.
pub fn validate() -> Result<(), ConfigError> {
    AppConfig::global().validate()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

/// How long an admin login lasts.
pub fn jwt_duration() -> Result<TimeDelta, ConfigError> {
    minutes("JWT_DURATION_MINUTES", jwt_duration_minutes())
}

pub fn checkin_base_url() -> String {
    AppConfig::global().checkin_base_url.clone()
}

/// Maximum age of a QR payload at check-in time, `0` when codes never expire.
pub fn qr_max_age_minutes() -> u64 {
    AppConfig::global().qr_max_age_minutes
}

/// `None` when codes never expire.
pub fn qr_max_age() -> Result<Option<TimeDelta>, ConfigError> {
    match qr_max_age_minutes() {
        0 => Ok(None),
        value => minutes("QR_MAX_AGE_MINUTES", value).map(Some),
    }
}

pub fn bootstrap_admin() -> Option<BootstrapAdmin> {
    AppConfig::global().bootstrap_admin.clone()
}

//! Admin login state and code generation.

use chrono::{DateTime, Utc};
use db::store::CredentialStore;

use crate::credentials::authenticate;
use crate::error::{FlowError, MSG_MISSING_CREDENTIALS};
use crate::payload::{self, AttendancePayload};
use crate::qr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn {
        email: String,
    },
}

/// One admin's session. Each server-side session owns its own value; nothing
/// here is shared between admins.
#[derive(Debug, Clone, Default)]
pub struct AdminSession {
    state: SessionState,
}

/// A freshly issued code.
#[derive(Debug, Clone)]
pub struct GeneratedCode {
    pub payload: AttendancePayload,
    /// Percent-encoded payload.
    pub token: String,
    /// Check-in URL carrying the token.
    pub link: String,
    /// The link rendered as a PNG QR image.
    pub png: Vec<u8>,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn { .. })
    }

    pub fn email(&self) -> Option<&str> {
        match &self.state {
            SessionState::LoggedIn { email } => Some(email),
            SessionState::LoggedOut => None,
        }
    }

    /// Authenticates and moves to `LoggedIn`.
    ///
    /// Calling this while logged in re-authenticates; a failed attempt leaves the
    /// current state untouched.
    pub async fn login(
        &mut self,
        store: &dyn CredentialStore,
        email: &str,
        password: &str,
    ) -> Result<(), FlowError> {
        if email.is_empty() || password.is_empty() {
            return Err(FlowError::Validation(MSG_MISSING_CREDENTIALS.into()));
        }
        if !authenticate(store, email, password).await {
            tracing::info!(email, "Rejected admin login");
            return Err(FlowError::Auth);
        }
        self.state = SessionState::LoggedIn {
            email: email.to_owned(),
        };
        Ok(())
    }

    pub fn logout(&mut self) {
        self.state = SessionState::LoggedOut;
    }

    /// Mints a payload stamped `now` for the logged-in admin and renders it.
    ///
    /// The admin's id and location are read from the store on every call, with
    /// placeholders when the account has none (or has since disappeared).
    pub async fn generate_code(
        &self,
        store: &dyn CredentialStore,
        now: DateTime<Utc>,
        base_url: &str,
    ) -> Result<GeneratedCode, FlowError> {
        let email = self.email().ok_or(FlowError::Auth)?;
        let account = store.find_admin(email).await?;

        let payload = AttendancePayload::mint(
            now,
            account.as_ref().and_then(|a| a.admin_id.as_deref()),
            account.as_ref().and_then(|a| a.admin_location.as_deref()),
        );
        let token = payload::encode(&payload);
        let link = payload::deep_link(base_url, &token);
        let png = qr::render_png(&link)?;

        tracing::info!(
            admin_id = %payload.admin_id,
            scan_date = %payload.scan_date,
            scan_time = %payload.scan_time,
            "Generated attendance code"
        );

        Ok(GeneratedCode {
            payload,
            token,
            link,
            png,
        })
    }
}

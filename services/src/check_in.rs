//! The student-facing check-in flow.
//!
//! A student arrives with whatever token the scanned code carried (or none),
//! sees a view derived from it, and submits an email. The only write is one
//! atomic insert-if-absent per issued code.

use chrono::{DateTime, Duration, Utc};
use db::store::{AttendanceRecord, AttendanceStore, InsertOutcome};
use serde::Serialize;

use crate::error::{
    FlowError, MSG_EXPIRED_CODE, MSG_INVALID_CODE, MSG_MISSING_EMAIL, MSG_SCAN_PROMPT,
};
use crate::notice::Notice;
use crate::payload::{self, AttendancePayload};
use util::{clock, config::ConfigError};

pub const MSG_ONCE_PER_DAY: &str = "You can only check in once per day";
pub const MSG_CHECKED_IN: &str = "You have successfully checked in";

/// Allowed clock skew, in seconds, for codes stamped slightly in the future.
const FUTURE_SKEW_SECS: i64 = 60;

/// What the check-in page should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckInView {
    ScanPrompt,
    InvalidCode,
    ExpiredCode,
    AwaitingEmail { payload: AttendancePayload },
    CheckedIn { record: AttendanceRecord },
}

impl CheckInView {
    pub fn notice(&self) -> Notice {
        match self {
            CheckInView::ScanPrompt => Notice::warning(MSG_SCAN_PROMPT),
            CheckInView::InvalidCode => Notice::error(MSG_INVALID_CODE),
            CheckInView::ExpiredCode => Notice::error(MSG_EXPIRED_CODE),
            CheckInView::AwaitingEmail { .. } => Notice::info(MSG_ONCE_PER_DAY),
            CheckInView::CheckedIn { .. } => Notice::success(MSG_CHECKED_IN),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckInFlow {
    max_age: Option<Duration>,
}

impl CheckInFlow {
    /// A flow that accepts codes of any age.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects codes issued more than `max_age` before the check-in.
    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            max_age: Some(max_age),
        }
    }

    /// Builds the flow from `QR_MAX_AGE_MINUTES`; `0` disables expiry.
    pub fn from_config() -> Result<Self, ConfigError> {
        Ok(Self {
            max_age: util::config::qr_max_age()?,
        })
    }

    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    /// Derives the page state from the request's token. Never touches the store.
    pub fn view(&self, token: Option<&str>, now: DateTime<Utc>) -> CheckInView {
        match self.admit(token, now) {
            Ok(payload) => CheckInView::AwaitingEmail { payload },
            Err(FlowError::MissingCode) => CheckInView::ScanPrompt,
            Err(FlowError::Expired) => CheckInView::ExpiredCode,
            Err(_) => CheckInView::InvalidCode,
        }
    }

    /// Records a check-in for the code in `token`.
    pub async fn submit(
        &self,
        store: &dyn AttendanceStore,
        token: Option<&str>,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<AttendanceRecord, FlowError> {
        let payload = self.admit(token, now)?;

        let email = email.trim();
        if email.is_empty() {
            return Err(FlowError::Validation(MSG_MISSING_EMAIL.into()));
        }

        let (check_in_date, check_in_time) = clock::date_time_strings(now);
        let record = AttendanceRecord {
            scan_date: payload.scan_date,
            scan_time: payload.scan_time,
            admin_id: payload.admin_id,
            location: payload.admin_location,
            email: email.to_owned(),
            check_in_date,
            check_in_time,
        };

        match store.insert_if_absent(&record).await? {
            InsertOutcome::Inserted => {
                tracing::info!(
                    email = %record.email,
                    scan_date = %record.scan_date,
                    scan_time = %record.scan_time,
                    "Check-in recorded"
                );
                Ok(record)
            }
            InsertOutcome::Conflict => {
                tracing::info!(
                    email = %record.email,
                    scan_date = %record.scan_date,
                    scan_time = %record.scan_time,
                    "Duplicate check-in rejected"
                );
                Err(FlowError::Conflict)
            }
        }
    }

    /// Decodes the token and applies the age window.
    fn admit(&self, token: Option<&str>, now: DateTime<Utc>) -> Result<AttendancePayload, FlowError> {
        let token = token.filter(|t| !t.is_empty()).ok_or(FlowError::MissingCode)?;
        let payload = payload::decode(token)?;

        if let Some(max_age) = self.max_age {
            let issued = payload
                .scanned_at()
                .ok_or(FlowError::Expired)?
                .with_timezone(&Utc);
            if now - issued > max_age || issued - now > Duration::seconds(FUTURE_SKEW_SECS) {
                return Err(FlowError::Expired);
            }
        }
        Ok(payload)
    }
}

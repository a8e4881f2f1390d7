use db::store::StoreError;
use thiserror::Error;

use crate::notice::Notice;
use crate::payload::DecodeError;

pub const MSG_MISSING_CREDENTIALS: &str = "Please enter both email and password.";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";
pub const MSG_SCAN_PROMPT: &str = "Kindly Scan New QR Code from the Admin";
pub const MSG_INVALID_CODE: &str = "Invalid QR code data in the URL.";
pub const MSG_EXPIRED_CODE: &str = "This QR code has expired. Kindly Scan New QR Code from the Admin";
pub const MSG_MISSING_EMAIL: &str = "Please enter your registered email address.";
pub const MSG_ALREADY_CHECKED_IN: &str = "You have already checked in";

/// Everything the admin and check-in flows can fail with.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Required input missing; nothing changed.
    #[error("{0}")]
    Validation(String),

    /// Bad credentials, or an action that needs a logged-in admin.
    #[error("{}", MSG_INVALID_CREDENTIALS)]
    Auth,

    /// The check-in request carried no code at all.
    #[error("{}", MSG_SCAN_PROMPT)]
    MissingCode,

    #[error("{}", MSG_INVALID_CODE)]
    Decode(#[from] DecodeError),

    #[error("{}", MSG_EXPIRED_CODE)]
    Expired,

    /// A record already exists for this code.
    #[error("{}", MSG_ALREADY_CHECKED_IN)]
    Conflict,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to render QR code: {0}")]
    Render(String),
}

impl FlowError {
    /// The notice a form renderer should show for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            FlowError::Validation(_) => Notice::warning(self.to_string()),
            FlowError::Store(_) | FlowError::Render(_) => {
                Notice::error("Something went wrong. Please try again later.")
            }
            _ => Notice::error(self.to_string()),
        }
    }
}

//! Attendance domain core.
//!
//! The flows here are written against the storage traits in [`db::store`] and
//! take the current instant as an argument, so the HTTP layer and tests drive
//! them the same way.

pub mod admin_session;
pub mod check_in;
pub mod credentials;
pub mod error;
pub mod notice;
pub mod payload;
pub mod qr;
pub mod session_registry;

pub use admin_session::{AdminSession, GeneratedCode, SessionState};
pub use check_in::{CheckInFlow, CheckInView};
pub use error::FlowError;
pub use notice::{Notice, Severity};
pub use payload::{AttendancePayload, DecodeError};
pub use session_registry::SessionRegistry;

//! QR payload codec.
//!
//! A payload is serialised as JSON and percent-encoded so it can travel as the
//! `data` query value of the check-in link. The token is self-describing: the
//! server keeps no registry of issued codes.

use chrono::{DateTime, FixedOffset, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use util::clock;

/// Placeholder used when an admin account carries no identifier.
pub const DEFAULT_ADMIN_ID: &str = "UNKNOWN_ADMIN";
/// Placeholder used when an admin account carries no location.
pub const DEFAULT_ADMIN_LOCATION: &str = "UNKNOWN_LOCATION";

/// Query parameter the token travels in.
pub const TOKEN_PARAM: &str = "data";

/// Everything but RFC 3986 unreserved characters is escaped.
const TOKEN_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("token is not valid percent-encoded UTF-8")]
    Encoding,

    #[error("token body is not a valid payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {field}: {value:?}")]
    Field { field: &'static str, value: String },
}

/// What one generated code says: this admin, at this time, at this location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePayload {
    /// `DD-MM-YYYY`, Lagos time.
    pub scan_date: String,
    /// `HH:MM:SS`, Lagos time.
    pub scan_time: String,
    // Codes minted before admins carried ids only hold the date and time.
    #[serde(default = "default_admin_id")]
    pub admin_id: String,
    #[serde(default = "default_admin_location")]
    pub admin_location: String,
}

fn default_admin_id() -> String {
    DEFAULT_ADMIN_ID.to_string()
}

fn default_admin_location() -> String {
    DEFAULT_ADMIN_LOCATION.to_string()
}

impl AttendancePayload {
    /// Builds the payload for a code issued at `now`.
    pub fn mint(now: DateTime<Utc>, admin_id: Option<&str>, admin_location: Option<&str>) -> Self {
        let (scan_date, scan_time) = clock::date_time_strings(now);
        Self {
            scan_date,
            scan_time,
            admin_id: admin_id.unwrap_or(DEFAULT_ADMIN_ID).to_string(),
            admin_location: admin_location
                .unwrap_or(DEFAULT_ADMIN_LOCATION)
                .to_string(),
        }
    }

    /// When the code was issued, in Lagos local time.
    pub fn scanned_at(&self) -> Option<DateTime<FixedOffset>> {
        clock::parse_local(&self.scan_date, &self.scan_time)
    }

    fn validate(self) -> Result<Self, DecodeError> {
        if clock::parse_date(&self.scan_date).is_none() {
            return Err(DecodeError::Field {
                field: "scan_date",
                value: self.scan_date,
            });
        }
        if clock::parse_time(&self.scan_time).is_none() {
            return Err(DecodeError::Field {
                field: "scan_time",
                value: self.scan_time,
            });
        }
        Ok(self)
    }
}

/// Serialises and percent-encodes a payload into a URL-safe token.
pub fn encode(payload: &AttendancePayload) -> String {
    // Serialising four owned strings cannot fail.
    let json = serde_json::to_string(payload).unwrap_or_default();
    utf8_percent_encode(&json, TOKEN_ESCAPE).to_string()
}

/// Reverses [`encode`]. Never panics on hostile input.
pub fn decode(token: &str) -> Result<AttendancePayload, DecodeError> {
    let text = percent_decode_str(token)
        .decode_utf8()
        .map_err(|_| DecodeError::Encoding)?;
    let payload: AttendancePayload = serde_json::from_str(&text)?;
    payload.validate()
}

/// `<base_url>?data=<token>`, appending with `&` when the base already has a query.
pub fn deep_link(base_url: &str, token: &str) -> String {
    let sep = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{sep}{TOKEN_PARAM}={token}")
}

/// Pulls the still-encoded `data` value out of a raw query string.
///
/// The value is returned as-is so [`decode`] performs the only percent-decoding
/// pass. An empty value counts as absent.
pub fn extract_token(raw_query: Option<&str>) -> Option<&str> {
    raw_query?
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == TOKEN_PARAM)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

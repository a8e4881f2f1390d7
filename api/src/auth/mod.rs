pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims, CurrentAdmin};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use util::config::{self, ConfigError};

/// How long a login lasts, from `JWT_DURATION_MINUTES`.
pub fn session_ttl() -> Result<Duration, ConfigError> {
    config::jwt_duration()
}

/// Signs a token for the admin session `sid` belonging to `email`, valid
/// until `expiry`.
pub fn generate_jwt(
    email: &str,
    sid: &str,
    expiry: DateTime<Utc>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: email.to_owned(),
        sid: sid.to_owned(),
        exp: expiry.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )
}

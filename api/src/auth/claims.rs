use serde::{Deserialize, Serialize};
use services::AdminSession;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Admin email.
    pub sub: String,
    /// Id of the server-side session in the registry.
    pub sid: String,
    pub exp: usize,
}

/// A request carrying a validly signed token. Says nothing about whether the
/// session behind it is still open; see [`CurrentAdmin`] for that.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

/// Inserted into request extensions by `require_admin_session` once the
/// token's session has been found in the registry.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub session_id: String,
    pub session: AdminSession,
}

impl CurrentAdmin {
    pub fn email(&self) -> &str {
        self.session.email().unwrap_or_default()
    }
}

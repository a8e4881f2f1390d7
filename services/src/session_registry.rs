//! Server-side registry of admin sessions.
//!
//! Each login gets its own [`AdminSession`] under a random id. The id travels in
//! the admin's token; the registry is the source of truth for whether that
//! session is still open.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::admin_session::AdminSession;

#[derive(Debug, Clone)]
struct Entry {
    session: AdminSession,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashMap<String, Entry>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `session` until `now + ttl` and returns its id.
    pub async fn open(&self, session: AdminSession, ttl: Duration, now: DateTime<Utc>) -> String {
        let id = Uuid::new_v4().to_string();
        let mut map = self.inner.write().await;
        map.retain(|_, e| e.expires_at > now);
        map.insert(
            id.clone(),
            Entry {
                session,
                expires_at: now + ttl,
            },
        );
        id
    }

    /// The session under `id`, if it exists and has not expired.
    pub async fn get(&self, id: &str, now: DateTime<Utc>) -> Option<AdminSession> {
        self.inner
            .read()
            .await
            .get(id)
            .filter(|e| e.expires_at > now)
            .map(|e| e.session.clone())
    }

    /// Logs the session out and forgets it. Returns whether it existed.
    pub async fn close(&self, id: &str) -> bool {
        match self.inner.write().await.remove(id) {
            Some(mut entry) => {
                entry.session.logout();
                true
            }
            None => false,
        }
    }

    /// Drops expired sessions.
    pub async fn prune(&self, now: DateTime<Utc>) -> usize {
        let mut map = self.inner.write().await;
        let before = map.len();
        map.retain(|_, e| e.expires_at > now);
        before - map.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

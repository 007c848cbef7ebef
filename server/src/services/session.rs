//! Session management.
//!
//! ARCHITECTURE
//! ============
//! Sessions are random 32-byte hex tokens held in an in-process map and
//! carried in an HttpOnly cookie. Nothing is persisted: a restart signs
//! everyone out, which is acceptable for a short-lived application form.
//!
//! TRADE-OFFS
//! ==========
//! Expired entries are rejected on lookup and swept by a background task,
//! so the map never needs a lock held across an await.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use super::discord::DiscordUser;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// The signed-in user, as returned by `/api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    /// Discord user id (snowflake string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Discord username.
    pub username: String,
    /// Avatar image URL, if available.
    pub avatar_url: Option<String>,
}

impl From<DiscordUser> for SessionUser {
    fn from(user: DiscordUser) -> Self {
        Self {
            name: user.display_name().to_owned(),
            avatar_url: user.avatar_url(),
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Clone)]
struct SessionEntry {
    user: SessionUser,
    expires_at: Instant,
}

/// Token -> user map with a fixed time-to-live.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Create a session for `user`, returning its token.
    pub async fn create(&self, user: SessionUser) -> String {
        self.create_at(user, Instant::now()).await
    }

    async fn create_at(&self, user: SessionUser, now: Instant) -> String {
        let token = generate_token();
        let entry = SessionEntry { user, expires_at: now + self.ttl };
        self.inner.write().await.insert(token.clone(), entry);
        token
    }

    /// Look up a live session.
    pub async fn validate(&self, token: &str) -> Option<SessionUser> {
        self.validate_at(token, Instant::now()).await
    }

    async fn validate_at(&self, token: &str, now: Instant) -> Option<SessionUser> {
        let sessions = self.inner.read().await;
        sessions
            .get(token)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.user.clone())
    }

    /// Delete a session by token. Unknown tokens are ignored.
    pub async fn delete(&self, token: &str) {
        self.inner.write().await.remove(token);
    }

    /// Drop expired sessions, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now()).await
    }

    async fn purge_expired_at(&self, now: Instant) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

/// Spawn the background sweep of expired sessions.
pub fn spawn_purge_task(store: SessionStore, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(every).await;
            let removed = store.purge_expired().await;
            if removed > 0 {
                let remaining = store.len().await;
                debug!(removed, remaining, "purged expired sessions");
            }
        }
    })
}

//! Session Store — pluggable, trait-based persistence for per-user session data.
//!
//! Default: `MemorySessionStore` (process-local, lost on restart).
//! Optional: `RedisSessionStore` (JSON blob per session with server-side expiry).
//!
//! `SessionManager` holds an `Arc<dyn SessionStore>`, picked at startup via config.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use redis::aio::MultiplexedConnection;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::SessionData;

const REDIS_KEY_PREFIX: &str = "offerwise:session:";
const MAX_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns `None` for unknown or expired sessions.
    async fn load(&self, id: Uuid) -> Result<Option<SessionData>, AppError>;

    async fn save(&self, id: Uuid, data: &SessionData) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// MemorySessionStore
// ────────────────────────────────────────────────────────────────────────────

struct MemoryEntry {
    data: SessionData,
    expires_at: DateTime<Utc>,
}

pub struct MemorySessionStore {
    ttl: Duration,
    entries: RwLock<HashMap<Uuid, MemoryEntry>>,
}

impl MemorySessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::seconds(
                i64::try_from(ttl_secs)
                    .unwrap_or(MAX_TTL_SECS)
                    .min(MAX_TTL_SECS),
            ),
            entries: RwLock::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<SessionData>, AppError> {
        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            match entries.get(&id) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.data.clone())),
                Some(_) => {}
            }
        }
        let mut entries = self.entries.write().await;
        if entries.get(&id).is_some_and(|e| e.expires_at <= now) {
            debug!(session_id = %id, "evicting expired session");
            entries.remove(&id);
        }
        Ok(None)
    }

    async fn save(&self, id: Uuid, data: &SessionData) -> Result<(), AppError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut entries = self.entries.write().await;

        // Abandoned sessions are never loaded again, so expiry is swept here.
        let before = entries.len();
        entries.retain(|_, e| e.expires_at > now);
        let swept = before - entries.len();
        if swept > 0 {
            debug!(swept, "evicted expired sessions");
        }

        entries.insert(
            id,
            MemoryEntry {
                data: data.clone(),
                expires_at,
            },
        );
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RedisSessionStore
// ────────────────────────────────────────────────────────────────────────────

pub struct RedisSessionStore {
    // Multiplexed: one connection, cloned per call.
    conn: MultiplexedConnection,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub async fn connect(
        client: &redis::Client,
        ttl_secs: u64,
    ) -> Result<Self, redis::RedisError> {
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self { conn, ttl_secs })
    }
}

pub fn redis_key(id: Uuid) -> String {
    format!("{REDIS_KEY_PREFIX}{id}")
}

pub fn encode(data: &SessionData) -> Result<String, AppError> {
    Ok(serde_json::to_string(data)?)
}

/// Unreadable payloads start over as an empty session.
pub fn decode(id: Uuid, raw: &str) -> Option<SessionData> {
    match serde_json::from_str(raw) {
        Ok(data) => Some(data),
        Err(e) => {
            warn!(session_id = %id, "discarding corrupt session payload: {e}");
            None
        }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<SessionData>, AppError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = redis::cmd("GET")
            .arg(redis_key(id))
            .query_async(&mut conn)
            .await?;
        Ok(raw.and_then(|raw| decode(id, &raw)))
    }

    async fn save(&self, id: Uuid, data: &SessionData) -> Result<(), AppError> {
        let payload = encode(data)?;
        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(redis_key(id))
            .arg(payload)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }
}

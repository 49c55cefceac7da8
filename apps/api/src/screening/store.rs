//! Session Store — redis-backed persistence for `ScreeningSession` values
//! between turns, plus per-session turn locks.
//!
//! Each session lives under one key as a JSON document with a TTL refreshed
//! on every save. Turns within a session must not overlap; `turn_lock` hands
//! the chat handler a session-scoped async mutex so the server can accept
//! overlapping requests without interleaving a session's turns. Distinct
//! sessions proceed concurrently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use redis::Client as RedisClient;
use tracing::warn;
use uuid::Uuid;

use crate::screening::session::ScreeningSession;

const KEY_PREFIX: &str = "screening:session:";

#[derive(Clone)]
pub struct SessionStore {
    client: RedisClient,
    ttl_seconds: u64,
    turn_locks: Arc<Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>>,
}

impl SessionStore {
    pub fn new(client: RedisClient, ttl_seconds: u64) -> Self {
        Self {
            client,
            ttl_seconds,
            turn_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn key(session_id: Uuid) -> String {
        format!("{KEY_PREFIX}{session_id}")
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to redis")
    }

    /// The async mutex serializing turns for one session. Lock entries are
    /// dropped when the session is cleared.
    pub fn turn_lock(&self, session_id: Uuid) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.turn_locks.lock().expect("turn lock registry poisoned");
        locks.entry(session_id).or_default().clone()
    }

    /// Loads the stored session, or `None` for a fresh conversation. A stored
    /// value that no longer parses is discarded and treated as fresh.
    pub async fn load(&self, session_id: Uuid) -> Result<Option<ScreeningSession>> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(Self::key(session_id))
            .query_async(&mut conn)
            .await
            .context("Failed to read session")?;

        let Some(raw) = raw else { return Ok(None) };

        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!("Discarding unparseable session {session_id}: {e}");
                Ok(None)
            }
        }
    }

    /// Stores the session and refreshes its TTL.
    pub async fn save(&self, session_id: Uuid, session: &ScreeningSession) -> Result<()> {
        let data = serde_json::to_string(session).context("Failed to serialize session")?;
        let mut conn = self.connection().await?;
        let _: () = redis::cmd("SETEX")
            .arg(Self::key(session_id))
            .arg(self.ttl_seconds)
            .arg(data)
            .query_async(&mut conn)
            .await
            .context("Failed to write session")?;
        Ok(())
    }

    /// Deletes the stored session and its turn lock entry.
    pub async fn clear(&self, session_id: Uuid) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = redis::cmd("DEL")
            .arg(Self::key(session_id))
            .query_async(&mut conn)
            .await
            .context("Failed to clear session")?;

        self.turn_locks
            .lock()
            .expect("turn lock registry poisoned")
            .remove(&session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        // No connection is made until a command runs; lock tests stay local.
        let client = RedisClient::open("redis://127.0.0.1/").unwrap();
        SessionStore::new(client, 3600)
    }

    #[test]
    fn test_turn_lock_is_stable_per_session() {
        let store = store();
        let id = Uuid::new_v4();
        let a = store.turn_lock(id);
        let b = store.turn_lock(id);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_turn_locks_are_distinct_across_sessions() {
        let store = store();
        let a = store.turn_lock(Uuid::new_v4());
        let b = store.turn_lock(Uuid::new_v4());
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_key_embeds_session_id() {
        let id = Uuid::new_v4();
        assert_eq!(SessionStore::key(id), format!("screening:session:{id}"));
    }
}

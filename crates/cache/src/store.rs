//! The [`CacheStore`] port and its adapters.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Errors raised by a cache backend.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(#[from] redis::RedisError),

    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache value under '{key}' is not a counter")]
    NotACounter { key: String },
}

/// A shared string key-value store.
///
/// Implementations provide their own concurrency control; callers never
/// lock around store operations.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key` without expiry, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Increment the counter under `key` and return the new count.
    ///
    /// The first increment starts a window: the counter disappears `window`
    /// after it was created, regardless of later increments.
    async fn incr_window(&self, key: &str, window: Duration) -> Result<u64, CacheError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Redis
// ---------------------------------------------------------------------------

/// Increment and start the window in one atomic step. A counter found
/// without a TTL gets one, so a key can never outlive its window.
const INCR_WINDOW_SCRIPT: &str = r"
local count = redis.call('INCR', KEYS[1])
if count == 1 or redis.call('TTL', KEYS[1]) == -1 then
    redis.call('EXPIRE', KEYS[1], ARGV[1])
end
return count
";

/// Redis-backed store. Cloning is cheap; all clones share one multiplexed
/// connection that reconnects on failure.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let connection = client.get_connection_manager().await?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection.clone();
        Ok(conn.get(key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        conn.set::<_, _, ()>(key, value).await?;
        Ok(())
    }

    async fn incr_window(&self, key: &str, window: Duration) -> Result<u64, CacheError> {
        let mut conn = self.connection.clone();
        let secs = window.as_secs().max(1);
        let count: u64 = redis::Script::new(INCR_WINDOW_SCRIPT)
            .key(key)
            .arg(secs)
            .invoke_async(&mut conn)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// How often expired entries are swept out of a [`MemoryStore`].
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<String, Entry>,
    last_sweep: Option<Instant>,
}

impl Entries {
    /// Drop expired entries, at most once per [`SWEEP_INTERVAL`].
    fn sweep(&mut self, now: Instant) {
        let due = self
            .last_sweep
            .map_or(true, |at| now.duration_since(at) >= SWEEP_INTERVAL);
        if due {
            self.map.retain(|_, entry| entry.is_live(now));
            self.last_sweep = Some(now);
        }
    }
}

/// Process-local store used in tests and when no Redis URL is configured.
///
/// Counters are not shared between processes. Expired entries are removed
/// when read and by a periodic sweep on writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        match entries.map.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.map.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.sweep(now);
        entries.map.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn incr_window(&self, key: &str, window: Duration) -> Result<u64, CacheError> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.sweep(now);

        let (current, expires_at) = match entries.map.get(key) {
            Some(entry) if entry.is_live(now) => {
                let count = entry
                    .value
                    .parse::<u64>()
                    .map_err(|_| CacheError::NotACounter {
                        key: key.to_string(),
                    })?;
                (count, entry.expires_at)
            }
            _ => (0, Some(now + window)),
        };

        let count = current + 1;
        entries.map.insert(
            key.to_string(),
            Entry {
                value: count.to_string(),
                expires_at,
            },
        );
        Ok(count)
    }
}

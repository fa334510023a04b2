use std::sync::Arc;

use ticketing_cache::{CacheStore, FixedWindowLimiter};

use crate::config::ServerConfig;
use crate::storage::ObjectStorage;
use crate::tickets::TicketApprover;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ticketing_db::DbPool,
    /// Server configuration, read-only after startup.
    pub config: Arc<ServerConfig>,
    /// Key-value store backing the list cache.
    pub cache: Arc<dyn CacheStore>,
    /// Request counters, sharing the cache's store.
    pub limiter: FixedWindowLimiter,
    /// Destination for uploaded files.
    pub storage: Arc<dyn ObjectStorage>,
    /// Blockchain ticket gateway.
    pub tickets: Arc<dyn TicketApprover>,
}

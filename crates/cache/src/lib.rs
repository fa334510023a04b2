//! Key-value cache layer.
//!
//! - [`store`] -- the [`CacheStore`] port with Redis and in-memory adapters.
//! - [`read_through`] -- read-through caching of list queries.
//! - [`limiter`] -- fixed-window request counters for rate limiting.

pub mod limiter;
pub mod read_through;
pub mod store;

pub use limiter::{FixedWindowLimiter, LimitDecision};
pub use read_through::{get_list, ReadThroughError, LIST_CATEGORIES_KEY, LIST_CITIES_KEY};
pub use store::{CacheError, CacheStore, MemoryStore, RedisStore};

//! Read-through caching of list queries.
//!
//! A miss runs the query, stores its JSON serialization without expiry and
//! returns the result. Concurrent misses on a cold key each run the query
//! and overwrite the same value; the last writer wins.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::{CacheError, CacheStore};

/// Key of the cached category listing.
pub const LIST_CATEGORIES_KEY: &str = "ListCategories";

/// Key of the cached city listing.
pub const LIST_CITIES_KEY: &str = "ListCities";

/// Failure of either the cache store or the underlying query.
#[derive(Debug, thiserror::Error)]
pub enum ReadThroughError<E> {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Query failed: {0}")]
    Query(E),
}

/// Return the list cached under `key`, or run `query` and cache its result.
///
/// A stored JSON `null` counts as a miss, and so does a value that no
/// longer deserializes into `T`. Store failures are not swallowed.
pub async fn get_list<T, E, F, Fut>(
    store: &dyn CacheStore,
    key: &str,
    query: F,
) -> Result<Vec<T>, ReadThroughError<E>>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    if let Some(raw) = store.get(key).await? {
        match serde_json::from_str::<Option<Vec<T>>>(&raw) {
            Ok(Some(items)) => {
                tracing::debug!(key, count = items.len(), "Cache hit");
                return Ok(items);
            }
            Ok(None) => tracing::debug!(key, "Cached null, treating as miss"),
            Err(error) => tracing::warn!(key, %error, "Unreadable cache entry, treating as miss"),
        }
    } else {
        tracing::debug!(key, "Cache miss");
    }

    let items = query().await.map_err(ReadThroughError::Query)?;
    let serialized = serde_json::to_string(&items).map_err(CacheError::from)?;
    store.set(key, &serialized).await?;
    Ok(items)
}

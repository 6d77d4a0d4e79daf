//! Typed caches layered over a [`CacheStore`].
//!
//! Entries are JSON projections of store rows. They are never the source of
//! truth: a miss always falls through to the store, writes delete entries
//! instead of patching them.

pub mod catalog;
pub mod order;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::ports::CacheStore;

pub use catalog::CatalogCache;
pub use order::OrderCache;

fn read<T: DeserializeOwned>(store: &dyn CacheStore, key: &str) -> Result<Option<T>, DomainError> {
    let Some(raw) = store.get(key)? else {
        log::debug!("cache miss for {}", key);
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| DomainError::Internal(format!("corrupt cache entry '{}': {}", key, e)))
}

fn write<T: Serialize + ?Sized>(
    store: &dyn CacheStore,
    key: &str,
    value: &T,
    ttl: Option<Duration>,
) -> Result<(), DomainError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| DomainError::Internal(format!("failed to serialize cache entry: {}", e)))?;
    store.set(key, &raw, ttl)
}

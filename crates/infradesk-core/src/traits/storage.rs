//! Durable client-side key/value storage.

use async_trait::async_trait;

use crate::result::AppResult;

/// Durable storage for client state (the persisted session record).
///
/// Values are opaque strings (JSON). Implementations must make `set`
/// all-or-nothing: a reader sees either the previous or the new value.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;
}

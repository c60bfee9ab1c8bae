//! Key-value storage abstraction.
//!
//! Backends implement this trait so the managers don't care which namespace
//! they run against; the deployment binding and the in-memory backend are
//! interchangeable.

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryStore;

/// Uniform error type for all storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `put_if_absent` found an existing value.
    #[error("already exists")]
    AlreadyExists,
    /// `compare_and_swap` observed something other than the expected value.
    #[error("conflict")]
    Conflict,
    #[error("backend error: {0}")]
    Backend(String),
}

/// The contract this service needs from a key-value namespace: point reads
/// and overwrites, idempotent delete, prefix listing, and the two
/// conditional writes that make registration race-free.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Unconditional overwrite; last write wins.
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Write only when the key is absent; `AlreadyExists` otherwise.
    async fn put_if_absent(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Replace the value only if it currently equals `expected`; `Conflict`
    /// otherwise, including when the key is absent.
    async fn compare_and_swap(
        &self,
        key: &str,
        expected: &str,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Succeeds whether or not the key exists.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Values of all keys starting with `prefix`, in key order. Best-effort
    /// snapshot; not point-in-time consistent across concurrent writes.
    async fn list_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

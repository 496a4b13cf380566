// Copyright 2025 DnsGate Contributors
// Licensed under GPL-3.0

//! Storage access for zone and ownership data
//!
//! [`Backend`] is the minimal key-value contract the rest of the crate is
//! written against; [`ZoneStore`] layers the typed zone/record/claim
//! operations on top of it.

pub mod memory;
pub mod redis;
pub mod zones;

pub use memory::MemoryBackend;
pub use redis::RedisBackend;
pub use zones::ZoneStore;

use crate::error::StoreError;

/// Minimal contract against the shared key-value store.
///
/// Keys address hashes of field/value pairs. Every operation is a single
/// round trip; absence is reported as `None` or an empty listing, never as
/// an error. No multi-key transactions are offered and none are assumed.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Read one field of a hash
    async fn get(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Overwrite one field of a hash (idempotent)
    async fn set(&self, key: &str, field: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Delete one field of a hash
    async fn delete(&self, key: &str, field: &str) -> Result<(), StoreError>;

    /// Delete a whole hash
    async fn delete_key(&self, key: &str) -> Result<(), StoreError>;

    /// List the fields of a hash
    async fn fields(&self, key: &str) -> Result<Vec<String>, StoreError>;

    /// List keys matching a glob pattern, filtered to hash-shaped keys so
    /// unrelated keys sharing the namespace are excluded
    async fn list_hashes(&self, pattern: &str) -> Result<Vec<String>, StoreError>;
}

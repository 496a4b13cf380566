// Copyright 2025 DnsGate Contributors
// Licensed under GPL-3.0

//! In-memory [`Backend`] for tests and local development

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::Backend;
use crate::error::StoreError;

type Hashes = HashMap<String, HashMap<String, Vec<u8>>>;

/// Hash-map backed [`Backend`] mimicking the redis semantics the crate
/// relies on: field absence is `None`, deleting the last field of a hash
/// removes the hash itself.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    hashes: Arc<RwLock<Hashes>>,
}

impl MemoryBackend {
    pub fn new() -> MemoryBackend {
        MemoryBackend::default()
    }
}

#[async_trait::async_trait]
impl Backend for MemoryBackend {
    async fn get(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let hashes = self.hashes.read().await;
        Ok(hashes.get(key).and_then(|h| h.get(field)).cloned())
    }

    async fn set(&self, key: &str, field: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let mut hashes = self.hashes.write().await;
        hashes
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str, field: &str) -> Result<(), StoreError> {
        let mut hashes = self.hashes.write().await;
        if let Some(hash) = hashes.get_mut(key) {
            hash.remove(field);
            if hash.is_empty() {
                hashes.remove(key);
            }
        }
        Ok(())
    }

    async fn delete_key(&self, key: &str) -> Result<(), StoreError> {
        let mut hashes = self.hashes.write().await;
        hashes.remove(key);
        Ok(())
    }

    async fn fields(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let hashes = self.hashes.read().await;
        Ok(hashes
            .get(key)
            .map(|h| h.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn list_hashes(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let hashes = self.hashes.read().await;
        Ok(hashes
            .keys()
            .filter(|k| glob_match(pattern, k))
            .cloned()
            .collect())
    }
}

/// Match a key against a glob pattern with at most one `*` wildcard, which
/// is all the key layout here needs.
fn glob_match(pattern: &str, key: &str) -> bool {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => {
            key.len() >= prefix.len() + suffix.len()
                && key.starts_with(prefix)
                && key.ends_with(suffix)
        }
        None => pattern == key,
    }
}

// Copyright 2025 DnsGate Contributors
// Licensed under GPL-3.0

//! Redis-backed [`Backend`] implementation

use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use super::Backend;
use crate::error::StoreError;

/// [`Backend`] over the shared redis instance CoreDNS reads from.
///
/// Holds a multiplexed connection manager; each operation is an independent
/// round trip and reconnection is handled underneath. No locks are held
/// across operations.
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
}

impl RedisBackend {
    /// Connect to redis at the given URL (e.g. `redis://127.0.0.1/`)
    pub async fn connect(url: &str) -> Result<RedisBackend, StoreError> {
        let client = redis::Client::open(url).map_err(StoreError::Redis)?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(StoreError::Redis)?;
        Ok(RedisBackend { conn })
    }
}

#[async_trait::async_trait]
impl Backend for RedisBackend {
    async fn get(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.hget(key, field).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, field: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn.hset(key, field, value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str, field: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn.hdel(key, field).await?;
        Ok(())
    }

    async fn delete_key(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn fields(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        let fields: Vec<String> = conn.hkeys(key).await?;
        Ok(fields)
    }

    async fn list_hashes(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn.keys(pattern).await?;

        let mut hashes = Vec::with_capacity(keys.len());
        for key in keys {
            let typ: String = redis::cmd("TYPE")
                .arg(&key)
                .query_async(&mut conn)
                .await?;
            if typ == "hash" {
                hashes.push(key);
            }
        }

        Ok(hashes)
    }
}

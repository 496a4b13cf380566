// Copyright 2025 DnsGate Contributors
// Licensed under GPL-3.0

//! Typed record-store layer over a [`Backend`]
//!
//! Key layout shared with the CoreDNS redis plugin:
//! - `zone` hash: field = zone name without trailing dot, value = `ZoneOwner`
//! - `<zone>.` hash: field = record name (`""` for the apex), value = `Records`;
//!   the trailing dot marks the hashes CoreDNS itself reads
//! - `managed_domains` hash: field = full subdomain, value = claiming identity

use crate::constants::{MANAGED_DOMAINS_KEY, ZONE_KEY_PATTERN, ZONE_OWNERS_KEY};
use crate::error::StoreError;
use crate::records::{Records, Zone, ZoneOwner};

use super::Backend;

/// Normalize a zone name into the record hash key shape (trailing dot)
fn zone_key(zone: &str) -> String {
    if zone.ends_with('.') {
        zone.to_string()
    } else {
        format!("{zone}.")
    }
}

/// Typed access to zone owners, record sets and subdomain claims
#[derive(Clone)]
pub struct ZoneStore<B> {
    backend: B,
}

impl<B: Backend> ZoneStore<B> {
    pub fn new(backend: B) -> ZoneStore<B> {
        ZoneStore { backend }
    }

    /// Current delegation of a zone; zero value when the zone is unknown
    pub async fn zone_owner(&self, zone: &str) -> Result<ZoneOwner, StoreError> {
        let zone = zone.trim_end_matches('.');
        let data = self.backend.get(ZONE_OWNERS_KEY, zone).await?;

        match data {
            None => Ok(ZoneOwner::default()),
            Some(data) => {
                serde_json::from_slice(&data).map_err(|source| StoreError::Malformed {
                    key: ZONE_OWNERS_KEY.to_string(),
                    field: zone.to_string(),
                    source,
                })
            }
        }
    }

    pub async fn set_zone_owner(&self, zone: &str, owner: &ZoneOwner) -> Result<(), StoreError> {
        let zone = zone.trim_end_matches('.');
        let data = serde_json::to_vec(owner).map_err(|source| StoreError::Malformed {
            key: ZONE_OWNERS_KEY.to_string(),
            field: zone.to_string(),
            source,
        })?;
        self.backend.set(ZONE_OWNERS_KEY, zone, data).await
    }

    pub async fn delete_zone_owner(&self, zone: &str) -> Result<(), StoreError> {
        let zone = zone.trim_end_matches('.');
        self.backend.delete(ZONE_OWNERS_KEY, zone).await
    }

    /// Record set stored for a name within a zone; empty when absent
    pub async fn zone_records(&self, zone: &str, name: &str) -> Result<Zone, StoreError> {
        let key = zone_key(zone);
        let data = self.backend.get(&key, name).await?;

        let records: Records = match data {
            None => Records::default(),
            Some(data) => {
                serde_json::from_slice(&data).map_err(|source| StoreError::Malformed {
                    key: key.clone(),
                    field: name.to_string(),
                    source,
                })?
            }
        };

        tracing::debug!(zone = %key, %name, "loaded zone records");
        Ok(Zone { records })
    }

    pub async fn set_zone_records(
        &self,
        zone: &str,
        name: &str,
        zr: &Zone,
    ) -> Result<(), StoreError> {
        let key = zone_key(zone);
        tracing::debug!(zone = %key, %name, "store zone records");

        let data = serde_json::to_vec(&zr.records).map_err(|source| StoreError::Malformed {
            key: key.clone(),
            field: name.to_string(),
            source,
        })?;
        self.backend.set(&key, name, data).await
    }

    pub async fn delete_zone_records(&self, zone: &str, name: &str) -> Result<(), StoreError> {
        let key = zone_key(zone);
        tracing::debug!(zone = %key, %name, "delete zone records");
        self.backend.delete(&key, name).await
    }

    /// Drop every record entry of a zone at once
    pub async fn delete_zone(&self, zone: &str) -> Result<(), StoreError> {
        let key = zone_key(zone);
        tracing::debug!(zone = %key, "delete zone");
        self.backend.delete_key(&key).await
    }

    /// Identity currently claiming a subdomain, if any
    pub async fn subdomain_owner(&self, domain: &str) -> Result<Option<String>, StoreError> {
        let data = self.backend.get(MANAGED_DOMAINS_KEY, domain).await?;
        match data {
            None => Ok(None),
            Some(data) => String::from_utf8(data)
                .map(Some)
                .map_err(|_| StoreError::NonUtf8 {
                    key: MANAGED_DOMAINS_KEY.to_string(),
                    field: domain.to_string(),
                }),
        }
    }

    pub async fn set_subdomain_owner(&self, domain: &str, user: &str) -> Result<(), StoreError> {
        tracing::debug!(%domain, %user, "set subdomain owner");
        self.backend
            .set(MANAGED_DOMAINS_KEY, domain, user.as_bytes().to_vec())
            .await
    }

    pub async fn delete_subdomain_owner(&self, domain: &str) -> Result<(), StoreError> {
        tracing::debug!(%domain, "delete subdomain owner");
        self.backend.delete(MANAGED_DOMAINS_KEY, domain).await
    }

    /// Enumerate the zone hashes CoreDNS reads, excluding unrelated keys
    /// that happen to share the namespace
    pub async fn list_zones(&self) -> Result<Vec<String>, StoreError> {
        self.backend.list_hashes(ZONE_KEY_PATTERN).await
    }

    /// Record names present under a raw zone key
    pub async fn record_names(&self, zone_key: &str) -> Result<Vec<String>, StoreError> {
        self.backend.fields(zone_key).await
    }

    /// Serialized record set under a raw zone key, unparsed
    pub async fn raw_records(
        &self,
        zone_key: &str,
        name: &str,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        self.backend.get(zone_key, name).await
    }
}

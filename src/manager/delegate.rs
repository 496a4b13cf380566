// Copyright 2025 DnsGate Contributors
// Licensed under GPL-3.0

//! Domain delegation operations

use serde::Serialize;

use crate::constants::{OWNER_RECORD_NAME, OWNER_RECORD_TTL};
use crate::domain::validate_domain;
use crate::error::{Error, StoreError};
use crate::records::{RecordTXT, Zone};
use crate::store::Backend;
use crate::Result;

use super::DnsManager;

/// Payload of the attestation TXT record. A standalone struct rather than
/// `ZoneOwner` so the wire shape can grow without touching the owner entry.
#[derive(Serialize)]
struct Attestation<'a> {
    identity: &'a str,
    owner: &'a str,
}

impl<B: Backend> DnsManager<B> {
    /// Grant `user` ownership of `domain`.
    ///
    /// Re-delegating to the same user succeeds and refreshes the attestation
    /// record; delegating a domain owned by someone else fails.
    pub async fn add_domain_delegate(&self, identity: &str, user: &str, domain: &str) -> Result<()> {
        tracing::info!(%domain, %user, "add domain delegation");
        validate_domain(domain)?;

        let mut owner = self.store.zone_owner(domain).await?;
        if !owner.owner.is_empty() && owner.owner != user {
            return Err(Error::Unauthorized(format!(
                "cannot delegate domain {domain} already owned by another identity"
            )));
        }

        owner.owner = user.to_string();
        self.store.set_zone_owner(domain, &owner).await?;

        self.set_owner_txt_record(domain, identity, &owner.owner)
            .await
    }

    /// Revoke a delegation added with [`add_domain_delegate`], dropping every
    /// record entry under the zone.
    ///
    /// [`add_domain_delegate`]: DnsManager::add_domain_delegate
    pub async fn remove_domain_delegate(&self, user: &str, domain: &str) -> Result<()> {
        tracing::info!(%domain, %user, "remove domain delegation");
        validate_domain(domain)?;

        let owner = self.store.zone_owner(domain).await?;
        if !owner.owner.is_empty() && owner.owner != user {
            return Err(Error::Unauthorized(format!(
                "cannot remove delegated domain {domain}"
            )));
        }

        // TODO: sweep the managed_domains claims under this zone as well;
        // a claim left behind blocks the first add after a re-delegation
        // of the same zone.

        self.store.delete_zone(domain).await?;
        self.store.delete_zone_owner(domain).await?;
        Ok(())
    }

    /// Write the delegation attestation under the reserved record name, as a
    /// durable externally visible trace of who holds the zone
    async fn set_owner_txt_record(&self, domain: &str, identity: &str, owner: &str) -> Result<()> {
        let data = Attestation { identity, owner };
        let text = serde_json::to_string(&data).map_err(|source| StoreError::Malformed {
            key: domain.to_string(),
            field: OWNER_RECORD_NAME.to_string(),
            source,
        })?;

        let mut zone = Zone::default();
        zone.add(RecordTXT {
            text,
            ttl: OWNER_RECORD_TTL,
        });

        self.store
            .set_zone_records(domain, OWNER_RECORD_NAME, &zone)
            .await?;
        Ok(())
    }
}

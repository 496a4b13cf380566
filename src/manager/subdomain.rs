// Copyright 2025 DnsGate Contributors
// Licensed under GPL-3.0

//! Subdomain claim and record operations

use std::net::IpAddr;

use crate::domain::{split_domain, validate_domain};
use crate::error::Error;
use crate::records::Record;
use crate::store::Backend;
use crate::Result;

use super::DnsManager;

impl<B: Backend> DnsManager<B> {
    /// Add A or AAAA records for `domain`, one per address, claiming the
    /// subdomain for `user`.
    ///
    /// On a zone the gateway manages itself, a subdomain already claimed by
    /// anyone (the same user included) must be released before it can be
    /// added again. On a delegated zone only the zone owner may add
    /// subdomains.
    pub async fn add_subdomain(&self, user: &str, domain: &str, ips: &[IpAddr]) -> Result<()> {
        tracing::info!(%domain, ?ips, "add subdomain");
        validate_domain(domain)?;

        let (name, zone) = split_domain(domain);

        let owner = self.store.zone_owner(zone).await?;
        if owner.owner.is_empty() {
            return Err(Error::NotManaged(zone.to_string()));
        }

        if owner.owner == self.identity {
            // managed zone: the claim table arbitrates who holds what
            if self.store.subdomain_owner(domain).await?.is_some() {
                return Err(Error::SubdomainInUse {
                    name: name.to_string(),
                    zone: zone.to_string(),
                });
            }
        } else if owner.owner != user {
            // delegated zone: the owner implicitly holds all its subdomains
            return Err(Error::Unauthorized(format!(
                "cannot add subdomain {name} to zone {zone}"
            )));
        }

        // reserve the subdomain before touching its records
        self.store.set_subdomain_owner(domain, user).await?;

        if let Err(err) = self.append_records(zone, name, ips).await {
            // restore the pre-call state before surfacing the error
            if let Err(rollback) = self.store.delete_subdomain_owner(domain).await {
                tracing::error!(
                    %domain,
                    error = %rollback,
                    "failed to roll back subdomain reservation"
                );
            }
            return Err(err);
        }

        Ok(())
    }

    /// Remove records added with [`add_subdomain`]; once the record set is
    /// empty the entry is dropped and the claim released for anyone to take.
    ///
    /// [`add_subdomain`]: DnsManager::add_subdomain
    pub async fn remove_subdomain(&self, user: &str, domain: &str, ips: &[IpAddr]) -> Result<()> {
        tracing::info!(%domain, ?ips, "remove subdomain");
        validate_domain(domain)?;

        let (name, zone) = split_domain(domain);

        let owner = self.store.zone_owner(zone).await?;
        if owner.owner.is_empty() {
            // The parent delegation is already gone and its records with it,
            // which can happen when a delegation expires before the
            // subdomain is cleaned up. Only the stray claim is left.
            self.store.delete_subdomain_owner(domain).await?;
            return Ok(());
        }

        // entries created before claim tracking existed have no claimant;
        // that is tolerated
        if let Some(claimant) = self.store.subdomain_owner(domain).await? {
            if claimant != user {
                return Err(Error::Unauthorized(format!(
                    "cannot remove subdomain {name} from zone {zone}"
                )));
            }
        }

        let mut zr = self.store.zone_records(zone, name).await?;
        if zr.records.is_empty() {
            return Ok(());
        }

        for &ip in ips {
            zr.remove(&Record::from_ip(ip));
        }

        if zr.records.is_empty() {
            self.store.delete_zone_records(zone, name).await?;
            // cleared out entirely: release the claim so anyone can take it
            self.store.delete_subdomain_owner(domain).await?;
            return Ok(());
        }

        self.store.set_zone_records(zone, name, &zr).await?;
        Ok(())
    }

    async fn append_records(&self, zone: &str, name: &str, ips: &[IpAddr]) -> Result<()> {
        let mut zr = self.store.zone_records(zone, name).await?;
        for &ip in ips {
            zr.add(Record::from_ip(ip));
        }
        self.store.set_zone_records(zone, name, &zr).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::net::IpAddr;

    use crate::error::{Error, StoreError};
    use crate::store::{Backend, MemoryBackend, ZoneStore};
    use crate::DnsManager;

    fn ips(addrs: &[&str]) -> Vec<IpAddr> {
        addrs.iter().map(|a| a.parse().unwrap()).collect()
    }

    #[tokio::test]
    async fn test_delegated_zone_auth() {
        let mgr = DnsManager::new(MemoryBackend::new(), "");

        let zone = "mydomain.com";
        let domain = "test.mydomain.com";
        let addrs = ips(&["10.1.1.10"]);

        mgr.add_domain_delegate("id", "user", zone).await.unwrap();
        mgr.add_subdomain("user", domain, &addrs).await.unwrap();

        // only the owner of the zone can add a subdomain
        let err = mgr.add_subdomain("user2", domain, &addrs).await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));

        // only the owner of the zone can remove a subdomain
        let err = mgr
            .remove_subdomain("user2", domain, &addrs)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));

        mgr.remove_subdomain("user", domain, &addrs).await.unwrap();
    }

    #[tokio::test]
    async fn test_not_delegated_zone() {
        let mgr = DnsManager::new(MemoryBackend::new(), "");

        let err = mgr
            .add_subdomain("user", "sub.thisisnotdelegated.com", &ips(&["10.1.1.10"]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotManaged(_)));
        assert_eq!(
            err.to_string(),
            "thisisnotdelegated.com is not managed by the gateway. delegate the domain first"
        );
    }

    #[tokio::test]
    async fn test_subdomain_change_owner() {
        let gwid = "gwid";
        let mgr = DnsManager::new(MemoryBackend::new(), gwid);

        let domain = "foo.mydomain.com";
        let subdomain = "test.foo.mydomain.com";
        let addrs = ips(&["10.1.1.10"]);

        // the gateway manages the domain
        mgr.add_domain_delegate("id", gwid, domain).await.unwrap();

        // a user creates a subdomain
        mgr.add_subdomain("user", subdomain, &addrs).await.unwrap();

        // freeing it up makes it claimable by anyone again
        mgr.remove_subdomain("user", subdomain, &addrs).await.unwrap();
        mgr.add_subdomain("user2", subdomain, &addrs).await.unwrap();
    }

    #[tokio::test]
    async fn test_managed_zone_claims() {
        let gwid = "gwid";
        let mgr = DnsManager::new(MemoryBackend::new(), gwid);

        let zone = "managed-domain.com";
        let mut addrs = ips(&["10.1.1.10"]);

        mgr.add_domain_delegate(gwid, gwid, zone).await.unwrap();

        // independent users claim their own subdomains
        mgr.add_subdomain("user1", "user1.managed-domain.com", &addrs)
            .await
            .unwrap();
        mgr.add_subdomain("user2", "user2.managed-domain.com", &addrs)
            .await
            .unwrap();

        // a user cannot overwrite the subdomain of someone else
        let err = mgr
            .add_subdomain("user2", "user1.managed-domain.com", &addrs)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SubdomainInUse { .. }));

        mgr.remove_subdomain("user2", "user2.managed-domain.com", &addrs)
            .await
            .unwrap();

        // not even the holder may re-add without releasing first
        addrs.push("2a02:2788:864:1314:9eb6:d0ff:fe97:764b".parse().unwrap());
        let err = mgr
            .add_subdomain("user1", "user1.managed-domain.com", &addrs)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SubdomainInUse { .. }));

        // while a freed subdomain is open to any user
        mgr.add_subdomain("user1", "user2.managed-domain.com", &addrs)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_full_removal_frees_entry_and_claim() {
        let backend = MemoryBackend::new();
        let store = ZoneStore::new(backend.clone());
        let mgr = DnsManager::new(backend, "gwid");

        let zone = "mydomain.com";
        let domain = "x.mydomain.com";
        let addrs = ips(&["1.1.1.1"]);

        mgr.add_domain_delegate("gwid", "gwid", zone).await.unwrap();
        mgr.add_subdomain("u1", domain, &addrs).await.unwrap();

        assert!(!store.zone_records(zone, "x").await.unwrap().records.is_empty());
        assert_eq!(
            store.subdomain_owner(domain).await.unwrap(),
            Some("u1".to_string())
        );

        mgr.remove_subdomain("u1", domain, &addrs).await.unwrap();

        assert!(store.zone_records(zone, "x").await.unwrap().records.is_empty());
        assert_eq!(store.subdomain_owner(domain).await.unwrap(), None);

        mgr.add_subdomain("u2", domain, &ips(&["2.2.2.2"])).await.unwrap();
    }

    #[tokio::test]
    async fn test_partial_removal_keeps_claim() {
        let backend = MemoryBackend::new();
        let store = ZoneStore::new(backend.clone());
        let mgr = DnsManager::new(backend, "gwid");

        let zone = "mydomain.com";
        let domain = "x.mydomain.com";

        mgr.add_domain_delegate("gwid", "gwid", zone).await.unwrap();
        mgr.add_subdomain("u1", domain, &ips(&["1.1.1.1", "2.2.2.2"]))
            .await
            .unwrap();

        mgr.remove_subdomain("u1", domain, &ips(&["1.1.1.1"])).await.unwrap();

        let zr = store.zone_records(zone, "x").await.unwrap();
        assert_eq!(zr.records.a.len(), 1);
        assert_eq!(zr.records.a[0].ip4, "2.2.2.2");
        // still held while records remain
        assert_eq!(
            store.subdomain_owner(domain).await.unwrap(),
            Some("u1".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_on_expired_delegation_clears_stray_claim() {
        let backend = MemoryBackend::new();
        let store = ZoneStore::new(backend.clone());
        let mgr = DnsManager::new(backend, "gwid");

        let domain = "x.gone.com";
        store.set_subdomain_owner(domain, "u1").await.unwrap();

        // parent zone was never delegated (or its delegation expired):
        // removal succeeds and sweeps the leftover claim
        mgr.remove_subdomain("someone-else", domain, &ips(&["1.1.1.1"]))
            .await
            .unwrap();
        assert_eq!(store.subdomain_owner(domain).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_empty_records_is_noop() {
        let mgr = DnsManager::new(MemoryBackend::new(), "gwid");

        let zone = "mydomain.com";
        mgr.add_domain_delegate("gwid", "gwid", zone).await.unwrap();

        mgr.remove_subdomain("u1", "never-added.mydomain.com", &ips(&["1.1.1.1"]))
            .await
            .unwrap();
    }

    /// Backend that fails every record write (keys with a trailing dot),
    /// to exercise the claim rollback path
    #[derive(Clone)]
    struct FailingRecordWrites(MemoryBackend);

    fn io_error() -> StoreError {
        StoreError::Redis(redis::RedisError::from((
            redis::ErrorKind::IoError,
            "connection reset",
        )))
    }

    #[async_trait::async_trait]
    impl Backend for FailingRecordWrites {
        async fn get(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>, StoreError> {
            self.0.get(key, field).await
        }

        async fn set(&self, key: &str, field: &str, value: Vec<u8>) -> Result<(), StoreError> {
            if key.ends_with('.') {
                return Err(io_error());
            }
            self.0.set(key, field, value).await
        }

        async fn delete(&self, key: &str, field: &str) -> Result<(), StoreError> {
            self.0.delete(key, field).await
        }

        async fn delete_key(&self, key: &str) -> Result<(), StoreError> {
            self.0.delete_key(key).await
        }

        async fn fields(&self, key: &str) -> Result<Vec<String>, StoreError> {
            self.0.fields(key).await
        }

        async fn list_hashes(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
            self.0.list_hashes(pattern).await
        }
    }

    #[tokio::test]
    async fn test_claim_rolled_back_when_record_write_fails() {
        let inner = MemoryBackend::new();
        let store = ZoneStore::new(inner.clone());

        // seed the delegation directly; the manager sees record writes fail
        store
            .set_zone_owner(
                "mydomain.com",
                &crate::ZoneOwner {
                    owner: "gwid".to_string(),
                },
            )
            .await
            .unwrap();

        let mgr = DnsManager::new(FailingRecordWrites(inner), "gwid");

        let domain = "x.mydomain.com";
        let err = mgr
            .add_subdomain("u1", domain, &ips(&["1.1.1.1"]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Store(_)));

        // the reservation must not survive the failed add
        assert_eq!(store.subdomain_owner(domain).await.unwrap(), None);
    }
}

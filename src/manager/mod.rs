// Copyright 2025 DnsGate Contributors
// Licensed under GPL-3.0

//! Ownership and domain management on top of the record store
//!
//! [`DnsManager`] arbitrates which identity may touch which zone: domains are
//! delegated to exactly one owner, and subdomains under a zone the gateway
//! manages itself are claimed and released by independent tenants. It holds
//! no in-memory state; every read goes to the shared store, since several
//! gateway instances may work against the same one.

mod cleanup;
mod delegate;
mod subdomain;

use crate::store::{Backend, ZoneStore};

/// Configures CoreDNS through the zone data in the shared store and enforces
/// the ownership rules on every mutation
pub struct DnsManager<B> {
    store: ZoneStore<B>,
    identity: String,
}

impl<B: Backend> DnsManager<B> {
    /// Create a manager acting as the gateway with the given identity.
    /// Zones delegated to this identity are "managed": their subdomains are
    /// individually claimable by arbitrary tenants.
    pub fn new(backend: B, identity: impl Into<String>) -> DnsManager<B> {
        DnsManager {
            store: ZoneStore::new(backend),
            identity: identity.into(),
        }
    }
}

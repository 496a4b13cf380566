// Copyright 2025 DnsGate Contributors
// Licensed under GPL-3.0

//! DnsGate - multi-tenant DNS configuration for CoreDNS
//!
//! Manages the zone and record data an authoritative CoreDNS instance reads
//! from a shared redis store (through its redis plugin), and arbitrates which
//! identity may create, modify or delete them. A domain is delegated to exactly
//! one owner; subdomains under a gateway-managed zone can be claimed and
//! released by independent tenant identities.

pub mod constants;
pub mod domain;
pub mod error;
pub mod manager;
pub mod records;
pub mod store;

pub use constants::*;

// Re-export commonly used types
pub use error::{Error, StoreError};
pub use manager::DnsManager;
pub use records::{Record, RecordA, RecordAAAA, RecordTXT, Records, Zone, ZoneOwner};
pub use store::{Backend, MemoryBackend, RedisBackend, ZoneStore};

/// Common result type for DnsGate operations
pub type Result<T> = std::result::Result<T, Error>;

// Copyright 2025 DnsGate Contributors
// Licensed under GPL-3.0

//! Error types for DnsGate operations

use thiserror::Error;

/// Errors surfaced to callers of the manager operations.
///
/// Authorization and validation failures carry enough context (domain, zone)
/// to be displayed verbatim; store failures are transient and the whole
/// operation may be retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed domain name; the caller must fix its input
    #[error("domain '{0}' name is invalid")]
    InvalidDomain(String),

    /// Caller identity does not match the required owner or claimant
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Target zone has no delegation yet
    #[error("{0} is not managed by the gateway. delegate the domain first")]
    NotManaged(String),

    /// Target subdomain is claimed and must be released before re-use
    #[error("cannot add subdomain {name} to zone {zone}: already in use")]
    SubdomainInUse { name: String, zone: String },

    /// Underlying store unreachable or returned malformed data
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of the underlying key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store unreachable or a command failed
    #[error("redis: {0}")]
    Redis(#[from] redis::RedisError),

    /// Stored entry did not deserialize
    #[error("malformed entry at {key}/{field}: {source}")]
    Malformed {
        key: String,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// Stored entry was expected to be a UTF-8 string
    #[error("non-utf8 entry at {key}/{field}")]
    NonUtf8 { key: String, field: String },
}

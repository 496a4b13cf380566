// Copyright 2025 DnsGate Contributors
// Licensed under GPL-3.0

//! DNS record model and its wire encoding
//!
//! The JSON shape produced here is read back by the CoreDNS redis plugin:
//! type tags (`A`, `AAAA`, `TXT`) and field names (`IP4`, `IP6`, `Text`,
//! `TTL`) are a wire contract, not an internal detail.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::constants::RECORD_TTL;

/// Delegation state of a zone. An empty owner means the zone is not delegated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneOwner {
    #[serde(rename = "Owner")]
    pub owner: String,
}

/// IPv4 address record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordA {
    #[serde(rename = "IP4")]
    pub ip4: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
}

/// IPv6 address record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAAAA {
    #[serde(rename = "IP6")]
    pub ip6: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
}

/// Text record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTXT {
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
}

/// A single DNS resource record of any supported type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    A(RecordA),
    AAAA(RecordAAAA),
    TXT(RecordTXT),
}

impl Record {
    /// Derive the record matching an IP address: A for IPv4, AAAA for IPv6,
    /// with the fixed tenant record TTL.
    pub fn from_ip(ip: IpAddr) -> Record {
        match ip {
            IpAddr::V4(v4) => Record::A(RecordA {
                ip4: v4.to_string(),
                ttl: RECORD_TTL,
            }),
            IpAddr::V6(v6) => Record::AAAA(RecordAAAA {
                ip6: v6.to_string(),
                ttl: RECORD_TTL,
            }),
        }
    }
}

impl From<RecordA> for Record {
    fn from(r: RecordA) -> Record {
        Record::A(r)
    }
}

impl From<RecordAAAA> for Record {
    fn from(r: RecordAAAA) -> Record {
        Record::AAAA(r)
    }
}

impl From<RecordTXT> for Record {
    fn from(r: RecordTXT) -> Record {
        Record::TXT(r)
    }
}

/// Mapping from record type tag to the ordered records of that type.
///
/// Absent tags are omitted on the wire, so an empty mapping serializes
/// as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    #[serde(rename = "A", default, skip_serializing_if = "Vec::is_empty")]
    pub a: Vec<RecordA>,
    #[serde(rename = "AAAA", default, skip_serializing_if = "Vec::is_empty")]
    pub aaaa: Vec<RecordAAAA>,
    #[serde(rename = "TXT", default, skip_serializing_if = "Vec::is_empty")]
    pub txt: Vec<RecordTXT>,
}

impl Records {
    /// Append a record to the sequence of its type, deduplicating by equality
    pub fn add(&mut self, record: Record) {
        match record {
            Record::A(r) => {
                if !self.a.contains(&r) {
                    self.a.push(r);
                }
            }
            Record::AAAA(r) => {
                if !self.aaaa.contains(&r) {
                    self.aaaa.push(r);
                }
            }
            Record::TXT(r) => {
                if !self.txt.contains(&r) {
                    self.txt.push(r);
                }
            }
        }
    }

    /// Delete all entries equal to the given record
    pub fn remove(&mut self, record: &Record) {
        match record {
            Record::A(r) => self.a.retain(|e| e != r),
            Record::AAAA(r) => self.aaaa.retain(|e| e != r),
            Record::TXT(r) => self.txt.retain(|e| e != r),
        }
    }

    /// True iff every type's sequence is empty
    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.aaaa.is_empty() && self.txt.is_empty()
    }
}

/// The full record set stored for one name within one zone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Zone {
    pub records: Records,
}

impl Zone {
    pub fn add(&mut self, record: impl Into<Record>) {
        self.records.add(record.into());
    }

    pub fn remove(&mut self, record: &Record) {
        self.records.remove(record);
    }
}

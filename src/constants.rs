// Copyright 2025 DnsGate Contributors
// Licensed under GPL-3.0

/// Hash holding one `ZoneOwner` entry per delegated zone,
/// keyed by zone name without the trailing dot
pub const ZONE_OWNERS_KEY: &str = "zone";

/// Hash mapping full subdomain names to the identity currently holding them
pub const MANAGED_DOMAINS_KEY: &str = "managed_domains";

/// Reserved record name carrying the delegation attestation TXT record
pub const OWNER_RECORD_NAME: &str = "__owner__";

/// TTL in seconds for A/AAAA records created from tenant addresses
pub const RECORD_TTL: u32 = 3600;

/// TTL in seconds for the delegation attestation TXT record
pub const OWNER_RECORD_TTL: u32 = 600;

/// Key pattern matching the zone hashes CoreDNS reads (trailing dot)
pub const ZONE_KEY_PATTERN: &str = "*.";

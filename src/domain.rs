// Copyright 2025 DnsGate Contributors
// Licensed under GPL-3.0

//! Domain name validation and name/zone splitting

use crate::error::Error;

/// Maximum length of a full domain name
const MAX_DOMAIN_LEN: usize = 253;

/// Maximum length of a single label
const MAX_LABEL_LEN: usize = 63;

/// Validate the syntax of a domain name.
///
/// A valid domain is a non-empty DNS name with at least one `.` separator,
/// no trailing dot and no empty label.
pub fn validate_domain(domain: &str) -> Result<(), Error> {
    let invalid = || Error::InvalidDomain(domain.to_string());

    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return Err(invalid());
    }

    if !domain.contains('.') {
        return Err(invalid());
    }

    if domain.ends_with('.') {
        return Err(invalid());
    }

    if domain.contains("..") {
        return Err(invalid());
    }

    if !domain.split('.').all(is_valid_label) {
        return Err(invalid());
    }

    Ok(())
}

/// Split a domain into its first label (the record name) and the remaining
/// zone. Domains with fewer than 3 labels have an empty name and the whole
/// string is the zone.
pub fn split_domain(domain: &str) -> (&str, &str) {
    if domain.matches('.').count() < 2 {
        return ("", domain);
    }
    // at least two separators, so the split cannot fail
    match domain.split_once('.') {
        Some((name, zone)) => (name, zone),
        None => ("", domain),
    }
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }

    let first_ok = label
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');

    first_ok
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

//! Validation utilities for hcloud-dyndns
//!
//! This module provides validation functions for the inputs of a DynDNS
//! request: the comma-separated domain list and the target IP address.

use std::net::{IpAddr, Ipv4Addr};

use anyhow::{anyhow, Result};

use crate::constants::{MAX_DOMAIN_NAME_LENGTH, MAX_LABEL_LENGTH};
use crate::error::BadRequest;

/// Normalizes a domain name for comparison
///
/// Trims whitespace, drops a trailing root dot and lower-cases the name.
pub fn normalize_domain(name: &str) -> String {
    let trimmed = name.trim();
    trimmed
        .strip_suffix('.')
        .unwrap_or(trimmed)
        .to_ascii_lowercase()
}

/// Validates that a string is a valid fully-qualified domain name
///
/// # Validation Rules
///
/// 1. **Length constraints**:
///    - Maximum total length: 253 characters (excluding trailing dot)
///    - Maximum label length: 63 characters
///
/// 2. **Syntax rules**:
///    - At least two labels (a bare TLD is never a managed zone)
///    - No empty labels, no spaces
///    - Labels cannot start or end with hyphens (`-`)
///
/// 3. **Allowed characters**:
///    - Letters, digits, hyphens and underscores
///    - Wildcard (`*`) as a complete label only
///
/// # Examples
///
/// ```
/// use hcloud_dyndns::validation::validate_domain_name;
///
/// assert!(validate_domain_name("drop.bury.link").is_ok());
/// assert!(validate_domain_name("bury.link.").is_ok());
/// assert!(validate_domain_name("*.bury.link").is_ok());
///
/// assert!(validate_domain_name("").is_err());
/// assert!(validate_domain_name("link").is_err());
/// assert!(validate_domain_name("drop..bury.link").is_err());
/// assert!(validate_domain_name("-drop.bury.link").is_err());
/// ```
pub fn validate_domain_name(domain: &str) -> Result<()> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Domain name cannot be empty"));
    }
    if trimmed.contains(char::is_whitespace) {
        return Err(anyhow!("Domain name cannot contain spaces"));
    }

    let name = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if name.len() > MAX_DOMAIN_NAME_LENGTH {
        return Err(anyhow!(
            "Domain name too long (max {} characters, got {})",
            MAX_DOMAIN_NAME_LENGTH,
            name.len()
        ));
    }
    if name.starts_with('.') {
        return Err(anyhow!("Domain name cannot start with a dot"));
    }
    if name.contains("..") {
        return Err(anyhow!("Domain name cannot contain consecutive dots"));
    }
    if !name.contains('.') {
        return Err(anyhow!("Domain name must contain at least two labels"));
    }

    for label in name.split('.') {
        if label.is_empty() {
            return Err(anyhow!("Domain name contains empty label"));
        }
        if label == "*" {
            continue;
        }
        if label.len() > MAX_LABEL_LENGTH {
            return Err(anyhow!(
                "Domain name label too long (max {} characters, got {})",
                MAX_LABEL_LENGTH,
                label.len()
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(anyhow!("Domain name label cannot start or end with hyphen"));
        }
        for ch in label.chars() {
            if !ch.is_ascii_alphanumeric() && ch != '-' && ch != '_' {
                return Err(anyhow!(
                    "Domain name contains invalid character: '{}' (allowed: letters, digits, '-', '_', or wildcard labels)",
                    ch
                ));
            }
        }
    }

    Ok(())
}

/// Splits the `subdomains` parameter into normalized names
///
/// Entries are trimmed and empty entries dropped. Duplicates (after
/// normalization) are removed, keeping the first occurrence, so a name is
/// never reconciled twice in one request. Syntax is not checked here: a
/// malformed name fails on its own without taking the rest of the batch
/// down with it (see [`validate_domain_name`]).
pub fn parse_domain_list(csv: &str) -> Result<Vec<String>, BadRequest> {
    let mut domains: Vec<String> = Vec::new();
    for raw in csv.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let domain = normalize_domain(raw);
        if !domains.contains(&domain) {
            domains.push(domain);
        }
    }
    if domains.is_empty() {
        return Err(BadRequest::EmptyDomainList);
    }
    Ok(domains)
}

/// Parses the `newip` parameter into an address an A record can hold
///
/// Any IPv4 literal is accepted, private ranges included. IPv6 literals
/// parse but are rejected, since only A records are managed.
///
/// # Examples
///
/// ```
/// use hcloud_dyndns::validation::parse_desired_ip;
///
/// assert!(parse_desired_ip("203.0.113.7").is_ok());
/// assert!(parse_desired_ip("2001:db8::1").is_err());
/// assert!(parse_desired_ip("invalid").is_err());
/// ```
pub fn parse_desired_ip(value: &str) -> Result<Ipv4Addr, BadRequest> {
    let value = value.trim();
    let addr = value
        .parse::<IpAddr>()
        .map_err(|_| BadRequest::InvalidIp(value.to_string()))?;

    match addr {
        IpAddr::V4(v4) => Ok(v4),
        IpAddr::V6(_) => Err(BadRequest::UnsupportedIp(value.to_string())),
    }
}

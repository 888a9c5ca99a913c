//! DNS provider abstraction layer
//!
//! This module defines the trait the reconciliation pipeline talks to, so the
//! zone matching and record reconciliation logic can run against Hetzner Cloud
//! or against an in-memory double in tests.

use std::fmt;
use std::net::Ipv4Addr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::error::ProviderError;

//==============================================================================
// Types
//==============================================================================

/// A provider-managed DNS zone
///
/// Fetched fresh for every request and treated as immutable while that
/// request's batch is processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Opaque provider identifier
    pub id: String,
    /// Domain suffix the zone is rooted at (e.g. "example.com")
    pub name: String,
}

impl Zone {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: {})", self.name, self.id)
    }
}

/// A single record value that already exists inside a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingRecord {
    /// Opaque provider identifier of the record (or record set)
    pub id: String,
    /// Label relative to the zone ("@" for the apex)
    pub name: String,
    /// Record type, "A" for everything this service writes
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record content, an IPv4 literal for A records
    pub value: String,
}

impl ExistingRecord {
    /// Whether the stored value already points at `ip`
    pub fn points_to(&self, ip: Ipv4Addr) -> bool {
        match self.value.trim().parse::<Ipv4Addr>() {
            Ok(current) => current == ip,
            Err(_) => self.value.trim() == ip.to_string(),
        }
    }
}

impl fmt::Display for ExistingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DNS {} {} -> {} (ID: {})",
            self.record_type, self.name, self.value, self.id
        )
    }
}

//==============================================================================
// Trait
//==============================================================================

/// DNS provider trait for managing A records
///
/// Every method takes the credentials of the request being served; a provider
/// implementation holds no per-caller state.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Provider name used in logs and metric labels
    fn name(&self) -> &'static str;

    /// Lists every zone visible to `credentials`
    ///
    /// Implementations must follow pagination until exhausted: an incomplete
    /// list turns into false "zone not found" outcomes.
    async fn list_zones(&self, credentials: &Credentials) -> Result<Vec<Zone>, ProviderError>;

    /// Lists the A records stored under `label` in `zone`
    async fn list_a_records(
        &self,
        credentials: &Credentials,
        zone: &Zone,
        label: &str,
    ) -> Result<Vec<ExistingRecord>, ProviderError>;

    /// Creates an A record `label -> ip` in `zone`
    async fn create_a_record(
        &self,
        credentials: &Credentials,
        zone: &Zone,
        label: &str,
        ip: Ipv4Addr,
        ttl: u32,
    ) -> Result<(), ProviderError>;

    /// Points the existing `record` at `ip`
    async fn update_a_record(
        &self,
        credentials: &Credentials,
        zone: &Zone,
        record: &ExistingRecord,
        ip: Ipv4Addr,
    ) -> Result<(), ProviderError>;
}

//==============================================================================
// Test Double
//==============================================================================


//==============================================================================
// Tests
//==============================================================================

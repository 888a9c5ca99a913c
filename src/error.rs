//! Error types for the DynDNS service
//!
//! Provider failures are typed so the orchestrator can turn every one of them
//! into a per-domain outcome or a batch-level short-circuit.

use thiserror::Error;

//==============================================================================
// Provider Errors
//==============================================================================

/// Failure reported by (or while talking to) the DNS provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider rejected the bearer credential (HTTP 401/403)
    #[error("authentication rejected by provider (HTTP {status})")]
    Auth {
        /// HTTP status returned by the provider
        status: u16,
    },

    /// Network failure, timeout, rate limiting or a 5xx response
    #[error("provider unavailable: {detail}")]
    Unavailable {
        /// HTTP status, when a response was received at all
        status: Option<u16>,
        /// Error details
        detail: String,
    },

    /// The provider answered with an unexpected non-success status
    #[error("provider returned HTTP {status}: {message}")]
    Api {
        /// HTTP status returned by the provider
        status: u16,
        /// Message extracted from the provider's error body
        message: String,
    },

    /// The provider's response body could not be understood
    #[error("unexpected provider response: {0}")]
    Parse(String),

    /// More than one A record exists for a label, so the update target is ambiguous
    #[error("ambiguous record state: {count} A records exist for '{label}'")]
    AmbiguousRecordState {
        /// Record label relative to the zone
        label: String,
        /// Number of A records found
        count: usize,
    },
}

impl ProviderError {
    /// Short, stable category name used for metrics labels and response bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Auth { .. } => "auth",
            Self::Unavailable { .. } => "unavailable",
            Self::Api { .. } => "api",
            Self::Parse(_) => "parse",
            Self::AmbiguousRecordState { .. } => "ambiguous_record_state",
        }
    }

    /// HTTP status returned by the provider, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status } | Self::Api { status, .. } => Some(*status),
            Self::Unavailable { status, .. } => *status,
            Self::Parse(_) | Self::AmbiguousRecordState { .. } => None,
        }
    }

    /// Whether the credential was rejected
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

//==============================================================================
// Request Validation Errors
//==============================================================================

/// Caller input rejected before any provider call is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BadRequest {
    /// A required query parameter is absent or blank
    #[error("missing '{0}' parameter")]
    MissingParameter(&'static str),

    /// The domain list contained no usable entries
    #[error("no valid subdomains provided")]
    EmptyDomainList,

    /// The target address is not an IP literal
    #[error("invalid IP address: '{0}'")]
    InvalidIp(String),

    /// The target address is an IPv6 literal; only A records are managed
    #[error("A records require an IPv4 address, got '{0}'")]
    UnsupportedIp(String),
}

//==============================================================================
// Tests
//==============================================================================

//! Common constants used throughout the hcloud-dyndns service

//==============================================================================
// Hetzner Cloud API Constants
//==============================================================================

/// Hetzner Cloud API base URL
pub const HETZNER_API_BASE: &str = "https://api.hetzner.cloud/v1";

/// User agent string for Hetzner API requests
pub const HETZNER_USER_AGENT: &str = "hcloud-dyndns/1.0";

/// DNS record type managed by this service
pub const DNS_RECORD_TYPE_A: &str = "A";

/// Page size requested from paginated list endpoints
pub const API_PAGE_SIZE: u32 = 100;

/// Upper bound on pages followed for a single listing
pub const MAX_PAGES: u32 = 1000;

/// Record label used by the provider for the zone apex
pub const APEX_LABEL: &str = "@";

//==============================================================================
// HTTP Status Codes
//==============================================================================

/// HTTP status code for unauthorized requests (401)
pub const HTTP_STATUS_UNAUTHORIZED: u16 = 401;

/// HTTP status code for forbidden requests (403)
pub const HTTP_STATUS_FORBIDDEN: u16 = 403;

/// HTTP status code for rate limiting (429)
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

//==============================================================================
// Runtime Defaults
//==============================================================================

/// Default listen address for the HTTP server
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Minimum HTTP request timeout in seconds
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum HTTP request timeout in seconds
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Default TTL for newly created records in seconds
pub const DEFAULT_RECORD_TTL: u32 = 300;

/// Minimum record TTL in seconds
pub const MIN_RECORD_TTL: u32 = 60;

/// Maximum record TTL in seconds
pub const MAX_RECORD_TTL: u32 = 86_400;

/// Default number of domains reconciled concurrently per request
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Maximum number of domains reconciled concurrently per request
pub const MAX_CONCURRENCY: usize = 64;

//==============================================================================
// Validation Constants
//==============================================================================

/// Maximum DNS name length in characters
pub const MAX_DOMAIN_NAME_LENGTH: usize = 253;

/// Maximum DNS label length in characters
pub const MAX_LABEL_LENGTH: usize = 63;

//==============================================================================
// Environment Variable Names
//==============================================================================

/// Environment variable name for the listen address
pub const ENV_LISTEN_ADDR: &str = "DYNDNS_LISTEN_ADDR";

/// Environment variable name for the provider API base URL
pub const ENV_API_BASE: &str = "DYNDNS_API_BASE";

/// Environment variable name for the provider request timeout
pub const ENV_TIMEOUT: &str = "DYNDNS_TIMEOUT";

/// Environment variable name for the TTL of created records
pub const ENV_RECORD_TTL: &str = "DYNDNS_RECORD_TTL";

/// Environment variable name for the per-request concurrency limit
pub const ENV_MAX_CONCURRENCY: &str = "DYNDNS_MAX_CONCURRENCY";

/// Environment variable name for verbose logging
pub const ENV_VERBOSE: &str = "DYNDNS_VERBOSE";

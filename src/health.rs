//! Health check endpoint for hcloud-dyndns
//!
//! The service keeps no state between requests, so liveness is all there is
//! to report.

use chrono::{DateTime, Utc};
use serde::Serialize;

//==============================================================================
// Types
//==============================================================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Fixed "ok" indicator
    pub status: String,
    /// Service version
    pub version: String,
    /// Seconds since the server started
    pub uptime_seconds: i64,
}

//==============================================================================
// Helpers
//==============================================================================

pub fn build_response(started_at: DateTime<Utc>) -> HealthResponse {
    HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (Utc::now() - started_at).num_seconds().max(0),
    }
}

//==============================================================================
// Tests
//==============================================================================

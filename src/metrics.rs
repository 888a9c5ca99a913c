//! Prometheus metrics collection for hcloud-dyndns
//!
//! This module provides metrics collection for monitoring DynDNS requests and
//! provider behavior.

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram, register_histogram_vec, CounterVec, Histogram,
    HistogramVec,
};

//==============================================================================
// Metrics
//==============================================================================

lazy_static! {
    /// Total number of DynDNS requests by overall status
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        "hcloud_dyndns_requests_total",
        "Total number of DynDNS requests by overall status",
        &["status"]
    )
    .unwrap();

    /// Total number of per-domain outcomes
    pub static ref DOMAIN_OUTCOMES_TOTAL: CounterVec = register_counter_vec!(
        "hcloud_dyndns_domain_outcomes_total",
        "Total number of per-domain outcomes",
        &["outcome"]
    )
    .unwrap();

    /// Total number of provider errors
    pub static ref PROVIDER_ERRORS_TOTAL: CounterVec = register_counter_vec!(
        "hcloud_dyndns_provider_errors_total",
        "Total number of DNS provider errors",
        &["provider", "operation", "error_type"]
    )
    .unwrap();

    /// Provider call duration histogram
    pub static ref PROVIDER_CALL_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "hcloud_dyndns_provider_call_duration_seconds",
        "DNS provider call duration in seconds",
        &["provider", "operation"]
    )
    .unwrap();

    /// Batch duration histogram
    pub static ref BATCH_DURATION_SECONDS: Histogram = register_histogram!(
        "hcloud_dyndns_batch_duration_seconds",
        "Duration of a whole DynDNS batch in seconds",
        vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .unwrap();
}

//==============================================================================
// Public Functions
//==============================================================================

/// Records a completed request
///
/// # Arguments
///
/// * `status` - Overall status name (e.g., "partialSuccess")
pub fn record_request(status: &str) {
    REQUESTS_TOTAL.with_label_values(&[status]).inc();
}

/// Records a per-domain outcome
pub fn record_outcome(outcome: &str) {
    DOMAIN_OUTCOMES_TOTAL.with_label_values(&[outcome]).inc();
}

/// Records a provider error
///
/// # Arguments
///
/// * `provider` - DNS provider name (e.g., "hetzner")
/// * `operation` - Operation that failed (e.g., "list_zones")
/// * `error_type` - Type of error (e.g., "auth", "unavailable")
pub fn record_provider_error(provider: &str, operation: &str, error_type: &str) {
    PROVIDER_ERRORS_TOTAL
        .with_label_values(&[provider, operation, error_type])
        .inc();
}

/// Starts a timer for a provider call
///
/// The duration is observed when the returned timer is dropped.
pub fn start_provider_timer(provider: &str, operation: &str) -> HistogramTimer {
    PROVIDER_CALL_DURATION_SECONDS
        .with_label_values(&[provider, operation])
        .start_timer()
}

/// Starts a timer for a whole batch
pub fn start_batch_timer() -> HistogramTimer {
    BATCH_DURATION_SECONDS.start_timer()
}

/// Collects all metrics and returns them as text
///
/// # Returns
///
/// Returns the metrics in Prometheus text format
pub fn gather_metrics() -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

//==============================================================================
// Types
//==============================================================================

/// Histogram timer for measuring duration
pub type HistogramTimer = prometheus::HistogramTimer;

//==============================================================================
// Tests
//==============================================================================

//! Batch orchestration
//!
//! Entry point of a DynDNS update: validates the request, fetches the zone
//! directory once, runs zone matching, label derivation and reconciliation
//! for every domain independently, and folds the per-domain outcomes into one
//! overall status.

use std::net::Ipv4Addr;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::credentials::Credentials;
use crate::dns_provider::{DnsProvider, Zone};
use crate::error::{BadRequest, ProviderError};
use crate::metrics;
use crate::reconcile::{reconcile, Outcome};
use crate::validation::{parse_desired_ip, parse_domain_list, validate_domain_name};
use crate::zones::resolve;

//==============================================================================
// Request
//==============================================================================

/// Raw query parameters of `GET /dyndns`
///
/// Deliberately not `Debug`: the token must never reach a log line.
#[derive(Clone, Default, Deserialize)]
pub struct UpdateParams {
    /// Comma-separated list of fully-qualified domain names
    pub subdomains: Option<String>,
    /// Target IP address
    pub newip: Option<String>,
    /// Provider API token
    pub token: Option<String>,
}

/// A validated batch: one target address, one credential, many domains
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub domains: Vec<String>,
    pub desired_ip: Ipv4Addr,
    pub credentials: Credentials,
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, BadRequest> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BadRequest::MissingParameter(name)),
    }
}

impl BatchRequest {
    /// Validates raw parameters without touching the provider
    pub fn from_params(params: &UpdateParams) -> Result<Self, BadRequest> {
        let subdomains = required(&params.subdomains, "subdomains")?;
        let newip = required(&params.newip, "newip")?;
        let token = required(&params.token, "token")?;

        let domains = parse_domain_list(subdomains)?;
        let desired_ip = parse_desired_ip(newip)?;
        let credentials = Credentials::new(token).ok_or(BadRequest::MissingParameter("token"))?;

        Ok(Self {
            domains,
            desired_ip,
            credentials,
        })
    }
}

//==============================================================================
// Report
//==============================================================================

/// Overall status of a batch, mapped onto the HTTP response status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OverallStatus {
    /// Every domain resolves to the requested address
    Success,
    /// Some domains succeeded, some failed
    PartialSuccess,
    /// The request was rejected before any provider call
    BadRequest,
    /// The provider rejected the credential
    AuthFailed,
    /// Every domain failed because no managed zone covers it
    ZoneNotFound,
    /// The zone directory could not be reached
    ProviderUnavailable,
    /// Every domain failed with a provider error
    ProviderError,
    /// Every domain failed, for mixed reasons
    Failed,
}

impl OverallStatus {
    pub fn http_status(self) -> u16 {
        match self {
            Self::Success => 200,
            Self::PartialSuccess => 207,
            Self::BadRequest => 400,
            Self::AuthFailed => 401,
            Self::ZoneNotFound => 404,
            Self::ProviderUnavailable => 503,
            Self::ProviderError | Self::Failed => 502,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::PartialSuccess => "partialSuccess",
            Self::BadRequest => "badRequest",
            Self::AuthFailed => "authFailed",
            Self::ZoneNotFound => "zoneNotFound",
            Self::ProviderUnavailable => "providerUnavailable",
            Self::ProviderError => "providerError",
            Self::Failed => "failed",
        }
    }
}

/// Outcome of one requested domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainResult {
    pub domain: String,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl DomainResult {
    fn failed(domain: &str, outcome: Outcome, detail: String) -> Self {
        Self {
            domain: domain.to_string(),
            outcome,
            zone: None,
            record: None,
            detail: Some(detail),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Response body of a DynDNS update
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub status: OverallStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub summary: Summary,
    pub results: Vec<DomainResult>,
}

impl BatchReport {
    /// Rejected request; every domain that could be read is listed as `rejected`
    fn bad_request(err: &BadRequest, domains: &[String]) -> Self {
        let detail = err.to_string();
        let results: Vec<DomainResult> = domains
            .iter()
            .map(|domain| DomainResult::failed(domain, Outcome::Rejected, detail.clone()))
            .collect();
        Self {
            status: OverallStatus::BadRequest,
            ip: None,
            detail: Some(detail),
            summary: Summary {
                total: results.len(),
                succeeded: 0,
                failed: results.len(),
            },
            results,
        }
    }

    fn new(
        status: OverallStatus,
        ip: Ipv4Addr,
        detail: Option<String>,
        results: Vec<DomainResult>,
    ) -> Self {
        let succeeded = results.iter().filter(|r| r.outcome.is_success()).count();
        Self {
            status,
            ip: Some(ip.to_string()),
            detail,
            summary: Summary {
                total: results.len(),
                succeeded,
                failed: results.len() - succeeded,
            },
            results,
        }
    }

    pub fn http_status(&self) -> u16 {
        self.status.http_status()
    }
}

/// Folds per-domain outcomes into one overall status
///
/// All successes give [`OverallStatus::Success`], any mix of successes and
/// failures gives [`OverallStatus::PartialSuccess`]. When everything failed,
/// a uniform failure reason is reported as such and mixed reasons collapse
/// into [`OverallStatus::Failed`].
pub fn aggregate(results: &[DomainResult]) -> OverallStatus {
    let Some(first) = results.first() else {
        return OverallStatus::BadRequest;
    };

    let succeeded = results.iter().filter(|r| r.outcome.is_success()).count();
    if succeeded == results.len() {
        return OverallStatus::Success;
    }
    if succeeded > 0 {
        return OverallStatus::PartialSuccess;
    }

    if results.iter().any(|r| r.outcome != first.outcome) {
        return OverallStatus::Failed;
    }
    match first.outcome {
        Outcome::ZoneNotFound => OverallStatus::ZoneNotFound,
        Outcome::AuthFailed => OverallStatus::AuthFailed,
        Outcome::ProviderError => OverallStatus::ProviderError,
        _ => OverallStatus::Failed,
    }
}

//==============================================================================
// Orchestrator
//==============================================================================

/// State shared by all domains of one request; dropped with the request
struct RequestContext<'a> {
    zones: Vec<Zone>,
    credentials: &'a Credentials,
    desired_ip: Ipv4Addr,
}

/// Runs DynDNS batches against a DNS provider
pub struct Orchestrator {
    provider: Arc<dyn DnsProvider>,
    record_ttl: u32,
    max_concurrency: usize,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn DnsProvider>, record_ttl: u32, max_concurrency: usize) -> Self {
        Self {
            provider,
            record_ttl,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Validates raw parameters and runs the batch
    pub async fn run(&self, params: &UpdateParams) -> BatchReport {
        let report = match BatchRequest::from_params(params) {
            Ok(request) => self.run_batch(&request).await,
            Err(e) => {
                warn!("Rejected DynDNS request: {}", e);
                let domains = params
                    .subdomains
                    .as_deref()
                    .and_then(|csv| parse_domain_list(csv).ok())
                    .unwrap_or_default();
                BatchReport::bad_request(&e, &domains)
            }
        };
        metrics::record_request(report.status.as_str());
        report
    }

    /// Runs an already validated batch
    pub async fn run_batch(&self, request: &BatchRequest) -> BatchReport {
        let _timer = metrics::start_batch_timer();
        info!(
            "DynDNS update request - IP: {}, domains: {}",
            request.desired_ip,
            request.domains.join(", ")
        );

        let zones = match self.provider.list_zones(&request.credentials).await {
            Ok(zones) => zones,
            Err(e) => return self.short_circuit(request, &e),
        };
        info!("Found {} zones", zones.len());

        let ctx = RequestContext {
            zones,
            credentials: &request.credentials,
            desired_ip: request.desired_ip,
        };

        let units: Vec<_> = request
            .domains
            .iter()
            .map(|domain| self.process_domain(&ctx, domain))
            .collect();
        let results: Vec<DomainResult> = stream::iter(units)
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let status = aggregate(&results);
        match status {
            OverallStatus::Success => info!("All DNS records updated successfully"),
            _ => {
                let failed: Vec<&str> = results
                    .iter()
                    .filter(|r| !r.outcome.is_success())
                    .map(|r| r.domain.as_str())
                    .collect();
                warn!("Some updates failed ({}): {}", status.as_str(), failed.join(", "));
            }
        }

        BatchReport::new(status, request.desired_ip, None, results)
    }

    /// Ends the batch early when the zone directory itself failed
    fn short_circuit(&self, request: &BatchRequest, err: &ProviderError) -> BatchReport {
        let detail = request.credentials.redact(&err.to_string());
        let (status, outcome) = match err {
            ProviderError::Auth { .. } => (OverallStatus::AuthFailed, Outcome::AuthFailed),
            ProviderError::Unavailable { .. } => {
                (OverallStatus::ProviderUnavailable, Outcome::ProviderError)
            }
            _ => (OverallStatus::ProviderError, Outcome::ProviderError),
        };
        error!("Failed to fetch zones from {}: {}", self.provider.name(), detail);

        let results = request
            .domains
            .iter()
            .map(|domain| {
                metrics::record_outcome(outcome.as_str());
                DomainResult::failed(domain, outcome, detail.clone())
            })
            .collect();

        BatchReport::new(status, request.desired_ip, Some(detail), results)
    }

    /// Matcher, deriver and reconciler for a single domain
    async fn process_domain(&self, ctx: &RequestContext<'_>, domain: &str) -> DomainResult {
        if let Err(e) = validate_domain_name(domain) {
            warn!("Cannot update {}: {}", domain, e);
            metrics::record_outcome(Outcome::ZoneNotFound.as_str());
            return DomainResult::failed(
                domain,
                Outcome::ZoneNotFound,
                format!("invalid domain name: {}", e),
            );
        }

        let result = match resolve(domain, &ctx.zones) {
            None => {
                warn!("Cannot update {}: No matching zone found", domain);
                DomainResult::failed(
                    domain,
                    Outcome::ZoneNotFound,
                    "no managed zone covers this domain".to_string(),
                )
            }
            Some((zone, label)) => {
                info!("Processing {} (zone: {}, record: {})", domain, zone, label);
                let reconciled = reconcile(
                    self.provider.as_ref(),
                    ctx.credentials,
                    zone,
                    &label,
                    ctx.desired_ip,
                    self.record_ttl,
                )
                .await;

                let (outcome, detail) = match reconciled {
                    Ok(outcome) => {
                        info!("{}: {}", domain, outcome.as_str());
                        (outcome, None)
                    }
                    Err(e) => {
                        let detail = ctx.credentials.redact(&e.to_string());
                        error!(
                            "Failed to update {} (zone: {}, record: {}, provider status: {}): {}",
                            domain,
                            zone,
                            label,
                            e.status().map_or_else(|| "n/a".to_string(), |s| s.to_string()),
                            detail
                        );
                        (Outcome::from(&e), Some(detail))
                    }
                };

                DomainResult {
                    domain: domain.to_string(),
                    outcome,
                    zone: Some(zone.name.clone()),
                    record: Some(label.to_string()),
                    detail,
                }
            }
        };

        metrics::record_outcome(result.outcome.as_str());
        result
    }
}

//==============================================================================
// Tests
//==============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::dns_provider::mock::MockProvider;

    fn params(subdomains: &str, newip: &str, token: &str) -> UpdateParams {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        UpdateParams {
            subdomains: opt(subdomains),
            newip: opt(newip),
            token: opt(token),
        }
    }

    fn orchestrator(provider: &Arc<MockProvider>) -> Orchestrator {
        Orchestrator::new(provider.clone(), 300, 4)
    }

    fn result(domain: &str, outcome: Outcome) -> DomainResult {
        DomainResult {
            domain: domain.to_string(),
            outcome,
            zone: None,
            record: None,
            detail: None,
        }
    }

    #[tokio::test]
    async fn test_all_succeed() {
        let provider = Arc::new(
            MockProvider::with_zones(&[("1", "bury.link")]).with_record("1", "@", "203.0.113.7"),
        );
        let report = orchestrator(&provider)
            .run(&params("bury.link,drop.bury.link", "203.0.113.7", "tok"))
            .await;

        assert_eq!(report.status, OverallStatus::Success);
        assert_eq!(report.http_status(), 200);
        assert_eq!(report.results[0].outcome, Outcome::Unchanged);
        assert_eq!(report.results[0].record.as_deref(), Some("@"));
        assert_eq!(report.results[1].outcome, Outcome::Created);
        assert_eq!(report.results[1].record.as_deref(), Some("drop"));
        assert_eq!(provider.list_zones_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.writes(), 1);
    }

    #[tokio::test]
    async fn test_partial_failure() {
        let provider = Arc::new(MockProvider::with_zones(&[("1", "example.com")]));
        let report = orchestrator(&provider)
            .run(&params("a.example.com,x.unmanaged.test", "203.0.113.7", "tok"))
            .await;

        assert_eq!(report.status, OverallStatus::PartialSuccess);
        assert_eq!(report.http_status(), 207);
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].domain, "a.example.com");
        assert_eq!(report.results[0].outcome, Outcome::Created);
        assert_eq!(report.results[1].domain, "x.unmanaged.test");
        assert_eq!(report.results[1].outcome, Outcome::ZoneNotFound);
        assert_eq!(
            report.summary,
            Summary {
                total: 2,
                succeeded: 1,
                failed: 1
            }
        );
    }

    #[tokio::test]
    async fn test_auth_failure_short_circuits() {
        let provider = Arc::new(MockProvider::failing_zones(ProviderError::Auth { status: 401 }));
        let report = orchestrator(&provider)
            .run(&params("a.example.com,b.example.com", "203.0.113.7", "bad"))
            .await;

        assert_eq!(report.status, OverallStatus::AuthFailed);
        assert_eq!(report.http_status(), 401);
        assert_eq!(report.results.len(), 2);
        assert!(report.results.iter().all(|r| r.outcome == Outcome::AuthFailed));
        assert_eq!(provider.per_domain_calls(), 0);
    }

    #[tokio::test]
    async fn test_zone_directory_unavailable() {
        let provider = Arc::new(MockProvider::failing_zones(ProviderError::Unavailable {
            status: None,
            detail: "request timed out".to_string(),
        }));
        let report = orchestrator(&provider)
            .run(&params("a.example.com", "203.0.113.7", "tok"))
            .await;

        assert_eq!(report.status, OverallStatus::ProviderUnavailable);
        assert_eq!(report.http_status(), 503);
        assert_eq!(report.results[0].outcome, Outcome::ProviderError);
        assert_eq!(provider.per_domain_calls(), 0);
    }

    #[tokio::test]
    async fn test_all_zone_not_found() {
        let provider = Arc::new(MockProvider::with_zones(&[("1", "example.com")]));
        let report = orchestrator(&provider)
            .run(&params("a.other.test,b.other.test", "203.0.113.7", "tok"))
            .await;

        assert_eq!(report.status, OverallStatus::ZoneNotFound);
        assert_eq!(report.http_status(), 404);
        assert_eq!(provider.per_domain_calls(), 0);
    }

    #[tokio::test]
    async fn test_ambiguous_record_state() {
        let provider = Arc::new(
            MockProvider::with_zones(&[("1", "example.com")])
                .with_record("1", "vpn", "198.51.100.1")
                .with_record("1", "vpn", "198.51.100.2"),
        );
        let report = orchestrator(&provider)
            .run(&params("vpn.example.com,www.example.com", "203.0.113.7", "tok"))
            .await;

        assert_eq!(report.status, OverallStatus::PartialSuccess);
        let vpn = &report.results[0];
        assert_eq!(vpn.outcome, Outcome::ProviderError);
        assert!(vpn.detail.as_deref().unwrap().contains("ambiguous"));
        assert_eq!(provider.update_calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_per_domain_auth_failure() {
        let provider = Arc::new(
            MockProvider::with_zones(&[("1", "example.com")])
                .with_record_error("a", ProviderError::Auth { status: 403 }),
        );
        let report = orchestrator(&provider)
            .run(&params("a.example.com", "203.0.113.7", "tok"))
            .await;

        assert_eq!(report.status, OverallStatus::AuthFailed);
        assert_eq!(report.results[0].outcome, Outcome::AuthFailed);
    }

    #[tokio::test]
    async fn test_bad_request_makes_no_provider_calls() {
        let provider = Arc::new(MockProvider::with_zones(&[("1", "example.com")]));
        let orchestrator = orchestrator(&provider);

        for p in [
            params("", "203.0.113.7", "tok"),
            params(" , ", "203.0.113.7", "tok"),
            params("a.example.com", "", "tok"),
            params("a.example.com", "not-an-ip", "tok"),
            params("a.example.com", "2001:db8::1", "tok"),
            params("a.example.com", "203.0.113.7", ""),
            params("a.example.com", "203.0.113.7", "   "),
        ] {
            let report = orchestrator.run(&p).await;
            assert_eq!(report.status, OverallStatus::BadRequest);
            assert_eq!(report.http_status(), 400);
            assert!(report.detail.is_some());
        }

        assert_eq!(provider.list_zones_calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.per_domain_calls(), 0);
    }

    #[tokio::test]
    async fn test_bad_request_lists_parsed_domains() {
        let provider = Arc::new(MockProvider::with_zones(&[("1", "example.com")]));
        let report = orchestrator(&provider)
            .run(&params("a.example.com,B.example.com", "not-an-ip", "tok"))
            .await;

        assert_eq!(report.http_status(), 400);
        let domains: Vec<&str> = report.results.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(domains, vec!["a.example.com", "b.example.com"]);
        assert!(report.results.iter().all(|r| r.outcome == Outcome::Rejected));
        assert_eq!(report.results[0].detail.as_deref(), Some("invalid IP address: 'not-an-ip'"));
        assert_eq!(report.summary.failed, 2);
        assert_eq!(provider.list_zones_calls.load(Ordering::SeqCst), 0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["results"][1]["outcome"], "rejected");
    }

    #[tokio::test]
    async fn test_malformed_domain_fails_alone() {
        let provider = Arc::new(MockProvider::with_zones(&[("1", "example.com")]));
        let report = orchestrator(&provider)
            .run(&params("a.example.com,münchen.de,bad..example.com", "203.0.113.7", "tok"))
            .await;

        assert_eq!(report.status, OverallStatus::PartialSuccess);
        assert_eq!(report.http_status(), 207);
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.results[0].outcome, Outcome::Created);
        for bad in &report.results[1..] {
            assert_eq!(bad.outcome, Outcome::ZoneNotFound);
            assert!(bad.detail.as_deref().unwrap().starts_with("invalid domain name"));
        }
        assert_eq!(provider.create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.list_records_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_writes_do_not_affect_siblings() {
        let provider = Arc::new(
            MockProvider::with_zones(&[("1", "example.com")])
                .with_record("1", "upd", "198.51.100.1")
                .with_write_error(
                    "new",
                    ProviderError::Api {
                        status: 422,
                        message: "invalid_input".to_string(),
                    },
                )
                .with_write_error(
                    "upd",
                    ProviderError::Unavailable {
                        status: Some(503),
                        detail: "Service Unavailable".to_string(),
                    },
                ),
        );
        let report = orchestrator(&provider)
            .run(&params(
                "new.example.com,upd.example.com,ok.example.com",
                "203.0.113.7",
                "tok",
            ))
            .await;

        assert_eq!(report.status, OverallStatus::PartialSuccess);
        assert_eq!(report.results[0].outcome, Outcome::ProviderError);
        assert!(report.results[0].detail.as_deref().unwrap().contains("invalid_input"));
        assert_eq!(report.results[1].outcome, Outcome::ProviderError);
        assert!(report.results[1].detail.is_some());
        assert_eq!(report.results[2].outcome, Outcome::Created);
        assert_eq!(provider.create_calls.load(Ordering::SeqCst), 2);
        assert_eq!(provider.update_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_duplicate_domains_are_processed_once() {
        let provider = Arc::new(MockProvider::with_zones(&[("1", "example.com")]));
        let report = orchestrator(&provider)
            .run(&params("www.example.com,WWW.example.com.", "203.0.113.7", "tok"))
            .await;

        assert_eq!(report.results.len(), 1);
        assert_eq!(provider.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_results_keep_request_order() {
        let provider = Arc::new(MockProvider::with_zones(&[("1", "example.com")]));
        let domains: Vec<String> = (0..20).map(|i| format!("host{i}.example.com")).collect();
        let report = Orchestrator::new(provider.clone(), 300, 3)
            .run(&params(&domains.join(","), "203.0.113.7", "tok"))
            .await;

        let reported: Vec<&str> = report.results.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(reported, domains.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(provider.create_calls.load(Ordering::SeqCst), 20);
    }

    #[test]
    fn test_aggregate() {
        assert_eq!(aggregate(&[]), OverallStatus::BadRequest);
        assert_eq!(
            aggregate(&[
                result("a", Outcome::Created),
                result("b", Outcome::Unchanged),
                result("c", Outcome::Updated)
            ]),
            OverallStatus::Success
        );
        assert_eq!(
            aggregate(&[result("a", Outcome::Created), result("b", Outcome::ProviderError)]),
            OverallStatus::PartialSuccess
        );
        assert_eq!(
            aggregate(&[result("a", Outcome::ZoneNotFound), result("b", Outcome::ZoneNotFound)]),
            OverallStatus::ZoneNotFound
        );
        assert_eq!(
            aggregate(&[result("a", Outcome::ProviderError)]),
            OverallStatus::ProviderError
        );
        assert_eq!(
            aggregate(&[result("a", Outcome::ZoneNotFound), result("b", Outcome::ProviderError)]),
            OverallStatus::Failed
        );
        assert_eq!(OverallStatus::Failed.http_status(), 502);
    }

    #[test]
    fn test_report_serialization() {
        let report = BatchReport::new(
            OverallStatus::PartialSuccess,
            Ipv4Addr::new(203, 0, 113, 7),
            None,
            vec![
                DomainResult {
                    domain: "drop.bury.link".to_string(),
                    outcome: Outcome::Created,
                    zone: Some("bury.link".to_string()),
                    record: Some("drop".to_string()),
                    detail: None,
                },
                DomainResult::failed("x.unmanaged.test", Outcome::ZoneNotFound, "no zone".to_string()),
            ],
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "partialSuccess");
        assert_eq!(json["ip"], "203.0.113.7");
        assert_eq!(json["summary"]["succeeded"], 1);
        assert_eq!(json["results"][0]["outcome"], "created");
        assert_eq!(json["results"][1]["outcome"], "zoneNotFound");
        assert!(json["results"][0].get("detail").is_none());
        assert!(json.get("detail").is_none());
    }
}

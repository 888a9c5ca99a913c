//! Record reconciliation
//!
//! Brings the A record for one label in one zone to the desired address with
//! at most one write: create when nothing exists, update when the single
//! existing value differs, nothing when it already matches.

use std::net::Ipv4Addr;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::constants::DNS_RECORD_TYPE_A;
use crate::credentials::Credentials;
use crate::dns_provider::{DnsProvider, Zone};
use crate::error::ProviderError;
use crate::zones::RecordLabel;

//==============================================================================
// Outcome
//==============================================================================

/// Per-domain result of a DynDNS request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Updated,
    Created,
    Unchanged,
    ZoneNotFound,
    AuthFailed,
    ProviderError,
    /// Not attempted because the request as a whole was malformed
    Rejected,
}

impl Outcome {
    /// Whether the domain now resolves to the requested address
    pub fn is_success(self) -> bool {
        matches!(self, Self::Updated | Self::Created | Self::Unchanged)
    }

    /// Stable name used for metric labels
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::Created => "created",
            Self::Unchanged => "unchanged",
            Self::ZoneNotFound => "zoneNotFound",
            Self::AuthFailed => "authFailed",
            Self::ProviderError => "providerError",
            Self::Rejected => "rejected",
        }
    }
}

impl From<&ProviderError> for Outcome {
    fn from(err: &ProviderError) -> Self {
        if err.is_auth() {
            Self::AuthFailed
        } else {
            Self::ProviderError
        }
    }
}

//==============================================================================
// Reconciler
//==============================================================================

/// Reconciles the A record `label` in `zone` so that it points at `desired_ip`
///
/// Returns [`Outcome::Created`], [`Outcome::Updated`] or
/// [`Outcome::Unchanged`]. Several existing A records under the same label
/// are refused with [`ProviderError::AmbiguousRecordState`] without writing,
/// since there is no way to tell which one should be updated.
pub async fn reconcile(
    provider: &dyn DnsProvider,
    credentials: &Credentials,
    zone: &Zone,
    label: &RecordLabel,
    desired_ip: Ipv4Addr,
    ttl: u32,
) -> Result<Outcome, ProviderError> {
    let name = label.as_str();
    let mut records: Vec<_> = provider
        .list_a_records(credentials, zone, name)
        .await?
        .into_iter()
        .filter(|r| {
            r.record_type.eq_ignore_ascii_case(DNS_RECORD_TYPE_A) && r.name.eq_ignore_ascii_case(name)
        })
        .collect();

    if records.len() > 1 {
        warn!(
            "Multiple A records found for {} in zone {}. Refusing to update.",
            name, zone
        );
        return Err(ProviderError::AmbiguousRecordState {
            label: name.to_string(),
            count: records.len(),
        });
    }

    match records.pop() {
        None => {
            info!("Creating A record: {} -> {} (zone: {})", name, desired_ip, zone);
            provider
                .create_a_record(credentials, zone, name, desired_ip, ttl)
                .await?;
            Ok(Outcome::Created)
        }
        Some(record) if record.points_to(desired_ip) => {
            debug!("Record already matches {}: {}", desired_ip, record);
            Ok(Outcome::Unchanged)
        }
        Some(record) => {
            info!("Updating {} -> {}", record, desired_ip);
            provider
                .update_a_record(credentials, zone, &record, desired_ip)
                .await?;
            Ok(Outcome::Updated)
        }
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

    const ZONE_ID: &str = "z1";

    fn zone() -> Zone {
        Zone::new(ZONE_ID, "bury.link")
    }

    fn creds() -> Credentials {
        Credentials::new("test-token").unwrap()
    }

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    fn drop_label() -> RecordLabel {
        RecordLabel::Subdomain("drop".to_string())
    }

    #[tokio::test]
    async fn test_create_then_unchanged_is_idempotent() {
        let provider = MockProvider::with_zones(&[(ZONE_ID, "bury.link")]);
        let creds = creds();

        let first = reconcile(&provider, &creds, &zone(), &drop_label(), ip("203.0.113.7"), 300)
            .await
            .unwrap();
        let second = reconcile(&provider, &creds, &zone(), &drop_label(), ip("203.0.113.7"), 300)
            .await
            .unwrap();

        assert_eq!(first, Outcome::Created);
        assert_eq!(second, Outcome::Unchanged);
        assert_eq!(provider.writes(), 1);
        assert_eq!(provider.values(ZONE_ID, "drop"), vec!["203.0.113.7"]);
    }

    #[tokio::test]
    async fn test_update_then_unchanged() {
        let provider =
            MockProvider::with_zones(&[(ZONE_ID, "bury.link")]).with_record(ZONE_ID, "drop", "198.51.100.1");
        let creds = creds();

        let first = reconcile(&provider, &creds, &zone(), &drop_label(), ip("203.0.113.7"), 300)
            .await
            .unwrap();
        let second = reconcile(&provider, &creds, &zone(), &drop_label(), ip("203.0.113.7"), 300)
            .await
            .unwrap();

        assert_eq!(first, Outcome::Updated);
        assert_eq!(second, Outcome::Unchanged);
        assert_eq!(provider.update_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.create_calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.values(ZONE_ID, "drop"), vec!["203.0.113.7"]);
    }

    #[tokio::test]
    async fn test_apex_record() {
        let provider =
            MockProvider::with_zones(&[(ZONE_ID, "bury.link")]).with_record(ZONE_ID, "@", "203.0.113.7");

        let outcome = reconcile(&provider, &creds(), &zone(), &RecordLabel::Apex, ip("203.0.113.7"), 300)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(provider.writes(), 0);
    }

    #[tokio::test]
    async fn test_ambiguous_records_are_not_written() {
        let provider = MockProvider::with_zones(&[(ZONE_ID, "bury.link")])
            .with_record(ZONE_ID, "drop", "198.51.100.1")
            .with_record(ZONE_ID, "drop", "198.51.100.2");

        let err = reconcile(&provider, &creds(), &zone(), &drop_label(), ip("203.0.113.7"), 300)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ProviderError::AmbiguousRecordState {
                label: "drop".to_string(),
                count: 2
            }
        );
        assert_eq!(Outcome::from(&err), Outcome::ProviderError);
        assert_eq!(provider.writes(), 0);
    }

    #[tokio::test]
    async fn test_listing_failure_propagates() {
        let provider = MockProvider::with_zones(&[(ZONE_ID, "bury.link")]).with_record_error(
            "drop",
            ProviderError::Unavailable {
                status: Some(503),
                detail: "Service Unavailable".to_string(),
            },
        );

        let err = reconcile(&provider, &creds(), &zone(), &drop_label(), ip("203.0.113.7"), 300)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "unavailable");
        assert_eq!(provider.writes(), 0);
    }

    #[tokio::test]
    async fn test_failed_create_is_reported() {
        let provider = MockProvider::with_zones(&[(ZONE_ID, "bury.link")]).with_write_error(
            "drop",
            ProviderError::Api {
                status: 422,
                message: "invalid_input".to_string(),
            },
        );

        let err = reconcile(&provider, &creds(), &zone(), &drop_label(), ip("203.0.113.7"), 300)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(422));
        assert_eq!(Outcome::from(&err), Outcome::ProviderError);
        assert_eq!(provider.create_calls.load(Ordering::SeqCst), 1);
        assert!(provider.values(ZONE_ID, "drop").is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_is_reported() {
        let provider = MockProvider::with_zones(&[(ZONE_ID, "bury.link")])
            .with_record(ZONE_ID, "drop", "198.51.100.1")
            .with_write_error(
                "drop",
                ProviderError::Unavailable {
                    status: Some(502),
                    detail: "Bad Gateway".to_string(),
                },
            );

        let err = reconcile(&provider, &creds(), &zone(), &drop_label(), ip("203.0.113.7"), 300)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "unavailable");
        assert_eq!(Outcome::from(&err), Outcome::ProviderError);
        assert_eq!(provider.update_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.values(ZONE_ID, "drop"), vec!["198.51.100.1"]);
    }

    #[test]
    fn test_outcome_classification() {
        assert!(Outcome::Created.is_success());
        assert!(Outcome::Updated.is_success());
        assert!(Outcome::Unchanged.is_success());
        assert!(!Outcome::ZoneNotFound.is_success());
        assert!(!Outcome::AuthFailed.is_success());
        assert!(!Outcome::ProviderError.is_success());
        assert!(!Outcome::Rejected.is_success());

        assert_eq!(Outcome::from(&ProviderError::Auth { status: 403 }), Outcome::AuthFailed);
        assert_eq!(
            serde_json::to_string(&Outcome::ZoneNotFound).unwrap(),
            "\"zoneNotFound\""
        );
    }
}

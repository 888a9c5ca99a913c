//! Hetzner Cloud DNS API client
//!
//! Uses reqwest with rustls for HTTP requests. Records are managed as RRSets
//! (one set per name and type, holding one or more values); each value is
//! surfaced as its own [`ExistingRecord`] so the reconciler can spot
//! ambiguous label states.

use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use urlencoding::encode;

use crate::constants::{
    API_PAGE_SIZE, DNS_RECORD_TYPE_A, HETZNER_USER_AGENT, HTTP_STATUS_FORBIDDEN,
    HTTP_STATUS_TOO_MANY_REQUESTS, HTTP_STATUS_UNAUTHORIZED, MAX_PAGES,
};
use crate::credentials::Credentials;
use crate::dns_provider::{DnsProvider, ExistingRecord, Zone};
use crate::error::ProviderError;
use crate::metrics;

const PROVIDER_NAME: &str = "hetzner";

/// Maximum number of characters of a raw response body kept in error messages
const ERROR_BODY_LIMIT: usize = 256;

//==============================================================================
// Types
//==============================================================================

/// Identifier that the API may encode as a number or a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HetznerZone {
    id: RawId,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RecordValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct RrSet {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(rename = "type")]
    record_type: String,
    #[serde(default)]
    records: Vec<RecordValue>,
}

#[derive(Debug, Default, Deserialize)]
struct Meta {
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    #[serde(default)]
    next_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ZonesPage {
    zones: Vec<HetznerZone>,
    #[serde(default)]
    meta: Meta,
}

#[derive(Debug, Deserialize)]
struct RrSetsPage {
    rrsets: Vec<RrSet>,
    #[serde(default)]
    meta: Meta,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiError {
    code: String,
    message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

#[derive(Debug, Serialize)]
struct RecordValuePayload {
    value: String,
}

/// One page of a paginated listing
trait Page: DeserializeOwned {
    type Item;

    fn into_parts(self) -> (Vec<Self::Item>, Option<u32>);
}

impl Page for ZonesPage {
    type Item = HetznerZone;

    fn into_parts(self) -> (Vec<HetznerZone>, Option<u32>) {
        (self.zones, self.meta.pagination.and_then(|p| p.next_page))
    }
}

impl Page for RrSetsPage {
    type Item = RrSet;

    fn into_parts(self) -> (Vec<RrSet>, Option<u32>) {
        (self.rrsets, self.meta.pagination.and_then(|p| p.next_page))
    }
}

//==============================================================================
// Client
//==============================================================================

pub struct HetznerClient {
    api_base: String,
    client: reqwest::Client,
}

impl HetznerClient {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(HETZNER_USER_AGENT)
            .build()
            .context("build reqwest client")?;

        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// GET `url` and decode a successful JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        credentials: &Credentials,
        url: &str,
    ) -> Result<T, ProviderError> {
        debug!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .bearer_auth(credentials.expose())
            .send()
            .await
            .map_err(transport_error)?;
        let status = resp.status();
        let body = resp.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(error_from_response(status, &body, credentials));
        }

        serde_json::from_str(&body)
            .map_err(|e| ProviderError::Parse(format!("Failed to parse response: {}", e)))
    }

    /// POST a JSON `payload` to `url`, expecting a 2xx answer
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        credentials: &Credentials,
        url: &str,
        payload: &B,
    ) -> Result<(), ProviderError> {
        debug!("POST {}", url);
        let resp = self
            .client
            .post(url)
            .bearer_auth(credentials.expose())
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(error_from_response(status, &body, credentials));
        }

        Ok(())
    }

    /// Follows `meta.pagination.next_page` until the listing is exhausted
    async fn get_all_pages<P: Page>(
        &self,
        credentials: &Credentials,
        url: &str,
    ) -> Result<Vec<P::Item>, ProviderError> {
        let separator = if url.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let page_url = format!(
                "{}{}page={}&per_page={}",
                url, separator, page, API_PAGE_SIZE
            );
            let body: P = self.get_json(credentials, &page_url).await?;
            let (batch, next_page) = body.into_parts();
            items.extend(batch);

            match next_page {
                Some(next) if next > page && next <= MAX_PAGES => page = next,
                Some(next) if next > page => {
                    return Err(ProviderError::Parse(format!(
                        "pagination exceeded {} pages",
                        MAX_PAGES
                    )));
                }
                Some(next) => {
                    return Err(ProviderError::Parse(format!(
                        "pagination went backwards ({} -> {})",
                        page, next
                    )));
                }
                None => break,
            }
        }

        Ok(items)
    }

    /// Logs and counts a failed call before handing the error back
    fn track<T>(
        &self,
        operation: &str,
        result: Result<T, ProviderError>,
    ) -> Result<T, ProviderError> {
        if let Err(e) = &result {
            warn!("Hetzner {} failed: {}", operation, e);
            metrics::record_provider_error(PROVIDER_NAME, operation, e.kind());
        }
        result
    }
}

#[async_trait]
impl DnsProvider for HetznerClient {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn list_zones(&self, credentials: &Credentials) -> Result<Vec<Zone>, ProviderError> {
        let _timer = metrics::start_provider_timer(PROVIDER_NAME, "list_zones");
        let url = format!("{}/zones", self.api_base);
        let result = self
            .get_all_pages::<ZonesPage>(credentials, &url)
            .await
            .map(|zones| {
                zones
                    .into_iter()
                    .map(|z| Zone::new(z.id.to_string(), z.name))
                    .collect::<Vec<_>>()
            });

        if let Ok(zones) = &result {
            debug!("Found {} zones", zones.len());
        }
        self.track("list_zones", result)
    }

    async fn list_a_records(
        &self,
        credentials: &Credentials,
        zone: &Zone,
        label: &str,
    ) -> Result<Vec<ExistingRecord>, ProviderError> {
        let _timer = metrics::start_provider_timer(PROVIDER_NAME, "list_records");
        let url = format!(
            "{}/zones/{}/rrsets?name={}&type={}",
            self.api_base,
            encode(&zone.id),
            encode(label),
            DNS_RECORD_TYPE_A
        );
        let result = self
            .get_all_pages::<RrSetsPage>(credentials, &url)
            .await
            .map(flatten_rrsets);

        self.track("list_records", result)
    }

    async fn create_a_record(
        &self,
        credentials: &Credentials,
        zone: &Zone,
        label: &str,
        ip: Ipv4Addr,
        ttl: u32,
    ) -> Result<(), ProviderError> {
        #[derive(Serialize)]
        struct Payload<'a> {
            name: &'a str,
            #[serde(rename = "type")]
            rt: &'static str,
            ttl: u32,
            records: Vec<RecordValuePayload>,
        }

        let _timer = metrics::start_provider_timer(PROVIDER_NAME, "create_record");
        let url = format!("{}/zones/{}/rrsets", self.api_base, encode(&zone.id));
        let payload = Payload {
            name: label,
            rt: DNS_RECORD_TYPE_A,
            ttl,
            records: vec![RecordValuePayload {
                value: ip.to_string(),
            }],
        };

        let result = self.post_json(credentials, &url, &payload).await;
        self.track("create_record", result)
    }

    async fn update_a_record(
        &self,
        credentials: &Credentials,
        zone: &Zone,
        record: &ExistingRecord,
        ip: Ipv4Addr,
    ) -> Result<(), ProviderError> {
        #[derive(Serialize)]
        struct Payload {
            records: Vec<RecordValuePayload>,
        }

        let _timer = metrics::start_provider_timer(PROVIDER_NAME, "update_record");
        let url = format!(
            "{}/zones/{}/rrsets/{}/{}/actions/set_records",
            self.api_base,
            encode(&zone.id),
            encode(&record.name),
            encode(&record.record_type)
        );
        let payload = Payload {
            records: vec![RecordValuePayload {
                value: ip.to_string(),
            }],
        };

        let result = self.post_json(credentials, &url, &payload).await;
        self.track("update_record", result)
    }
}

//==============================================================================
// Helpers
//==============================================================================

/// Turns RRSets into one record per stored value
fn flatten_rrsets(rrsets: Vec<RrSet>) -> Vec<ExistingRecord> {
    rrsets
        .into_iter()
        .flat_map(|set| {
            let id = set
                .id
                .clone()
                .unwrap_or_else(|| format!("{}/{}", set.name, set.record_type));
            set.records.into_iter().map(move |value| ExistingRecord {
                id: id.clone(),
                name: set.name.clone(),
                record_type: set.record_type.clone(),
                value: value.value,
            })
        })
        .collect()
}

fn transport_error(e: reqwest::Error) -> ProviderError {
    let detail = if e.is_timeout() {
        "request timed out".to_string()
    } else {
        format!("HTTP request failed: {}", e)
    };
    ProviderError::Unavailable {
        status: e.status().map(|s| s.as_u16()),
        detail,
    }
}

fn truncate_for_log(s: &str) -> String {
    if s.chars().count() <= ERROR_BODY_LIMIT {
        s.to_string()
    } else {
        let head: String = s.chars().take(ERROR_BODY_LIMIT).collect();
        format!("{}... [truncated, total {} bytes]", head, s.len())
    }
}

/// Maps a non-success response onto the error taxonomy
fn error_from_response(status: StatusCode, body: &str, credentials: &Credentials) -> ProviderError {
    let code = status.as_u16();
    if code == HTTP_STATUS_UNAUTHORIZED || code == HTTP_STATUS_FORBIDDEN {
        return ProviderError::Auth { status: code };
    }

    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.to_string(),
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string(),
        Err(_) => truncate_for_log(body.trim()),
    };
    let message = credentials.redact(&message);

    if status.is_server_error() || code == HTTP_STATUS_TOO_MANY_REQUESTS {
        ProviderError::Unavailable {
            status: Some(code),
            detail: message,
        }
    } else {
        ProviderError::Api {
            status: code,
            message,
        }
    }
}

//==============================================================================
// Tests
//==============================================================================

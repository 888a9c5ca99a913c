//! hcloud-dyndns - DynDNS-style A record updater for Hetzner Cloud DNS
//!
//! Architecture:
//! - One `GET /dyndns` request carries a domain list, the desired IPv4 address and a provider token
//! - Zones are listed once per request and every domain is matched to its most specific zone
//! - Each domain is reconciled independently (create, update or leave unchanged)
//! - Per-domain outcomes are aggregated into one HTTP status (200/207/4xx/5xx)

pub mod batch;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod dns_provider;
pub mod error;
pub mod health;
pub mod hetzner;
pub mod metrics;
pub mod reconcile;
pub mod server;
pub mod validation;
pub mod zones;

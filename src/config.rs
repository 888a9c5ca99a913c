//! Configuration module for hcloud-dyndns
//!
//! This module handles loading and validating configuration from files and environment variables.
//! Provider credentials are not configuration: every DynDNS request carries its own token.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};

use crate::constants::{
    DEFAULT_LISTEN_ADDR, DEFAULT_MAX_CONCURRENCY, DEFAULT_RECORD_TTL, DEFAULT_TIMEOUT_SECS,
    ENV_API_BASE, ENV_LISTEN_ADDR, ENV_MAX_CONCURRENCY, ENV_RECORD_TTL, ENV_TIMEOUT, ENV_VERBOSE,
    HETZNER_API_BASE, MAX_CONCURRENCY, MAX_RECORD_TTL, MAX_TIMEOUT_SECS, MIN_RECORD_TTL,
    MIN_TIMEOUT_SECS,
};

//==============================================================================
// Config
//==============================================================================

/// Configuration for the hcloud-dyndns server
///
/// # Configuration Loading Priority
///
/// Configuration is loaded from multiple sources in order of precedence:
/// 1. Environment variables (highest priority)
/// 2. Config file (`--config <path>`)
/// 3. Defaults (lowest priority)
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    ///
    /// Default: `0.0.0.0:5000`
    pub listen_addr: SocketAddr,
    /// Base URL of the Hetzner Cloud API
    ///
    /// Default: `https://api.hetzner.cloud/v1`
    pub api_base: String,
    /// Timeout applied to every provider call
    ///
    /// Default: 10 seconds
    pub timeout: Duration,
    /// TTL of records created by the service, in seconds
    ///
    /// Default: 300
    pub record_ttl: u32,
    /// Number of domains of one request reconciled concurrently
    ///
    /// Default: 8
    pub max_concurrency: usize,
    /// Enable verbose logging
    ///
    /// Default: false
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 5000))),
            api_base: HETZNER_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            record_ttl: DEFAULT_RECORD_TTL,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            verbose: false,
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables
    ///
    /// This method loads configuration in the following order:
    /// 1. Loads from the specified config file (if provided and exists)
    /// 2. Overrides with environment variables (if set and non-empty)
    /// 3. Validates the final configuration
    ///
    /// # Environment Variables
    ///
    /// - `DYNDNS_LISTEN_ADDR` - Listen address (e.g. `0.0.0.0:5000`)
    /// - `DYNDNS_API_BASE` - Provider API base URL
    /// - `DYNDNS_TIMEOUT` - Provider request timeout in seconds
    /// - `DYNDNS_RECORD_TTL` - TTL of created records
    /// - `DYNDNS_MAX_CONCURRENCY` - Domains reconciled in parallel per request
    /// - `DYNDNS_VERBOSE` - Verbose logging (true/false)
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load_from_file(config_path)?;
        Self::override_with_env(&mut config)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Loads configuration from a TOML file, falling back to defaults for
    /// missing fields or a missing file
    fn load_from_file(config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config: {}", path.display()))?;
                let toml_config: TomlConfig =
                    toml::from_str(&content).with_context(|| "Failed to parse config file")?;

                if let Some(v) = toml_config.listen_addr {
                    config.listen_addr = parse_listen_addr(&v)?;
                }
                if let Some(v) = toml_config.api_base {
                    config.api_base = v;
                }
                if let Some(v) = toml_config.timeout {
                    config.timeout = Duration::from_secs(v);
                }
                if let Some(v) = toml_config.record_ttl {
                    config.record_ttl = v;
                }
                if let Some(v) = toml_config.max_concurrency {
                    config.max_concurrency = v;
                }
                if let Some(v) = toml_config.verbose {
                    config.verbose = v;
                }
            }
        }

        Ok(config)
    }

    /// Overrides configuration values with environment variables
    fn override_with_env(config: &mut Self) -> Result<()> {
        if let Some(v) = non_empty_env(ENV_LISTEN_ADDR) {
            config.listen_addr = parse_listen_addr(&v)?;
        }
        if let Some(v) = non_empty_env(ENV_API_BASE) {
            config.api_base = v;
        }
        if let Some(v) = non_empty_env(ENV_TIMEOUT) {
            let secs: u64 = v
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value", ENV_TIMEOUT))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(v) = non_empty_env(ENV_RECORD_TTL) {
            config.record_ttl = v
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value", ENV_RECORD_TTL))?;
        }
        if let Some(v) = non_empty_env(ENV_MAX_CONCURRENCY) {
            config.max_concurrency = v
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value", ENV_MAX_CONCURRENCY))?;
        }
        if let Some(v) = non_empty_env(ENV_VERBOSE) {
            config.verbose =
                parse_bool_env(&v).with_context(|| format!("Invalid {} value", ENV_VERBOSE))?;
        }
        Ok(())
    }

    /// Validates the configuration
    ///
    /// Returns an error if:
    /// - The API base URL is not an http(s) URL
    /// - Timeout, TTL or concurrency is out of its valid range
    fn validate(&self) -> Result<()> {
        let api_base = self.api_base.trim();
        if !(api_base.starts_with("https://") || api_base.starts_with("http://")) {
            return Err(anyhow::anyhow!(
                "api_base must be an http(s) URL, got: {}",
                self.api_base
            ));
        }

        let timeout_secs = self.timeout.as_secs();
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&timeout_secs) {
            return Err(anyhow::anyhow!(
                "timeout must be between {} and {} seconds, got {}",
                MIN_TIMEOUT_SECS,
                MAX_TIMEOUT_SECS,
                timeout_secs
            ));
        }

        if !(MIN_RECORD_TTL..=MAX_RECORD_TTL).contains(&self.record_ttl) {
            return Err(anyhow::anyhow!(
                "record_ttl must be between {} and {} seconds, got {}",
                MIN_RECORD_TTL,
                MAX_RECORD_TTL,
                self.record_ttl
            ));
        }

        if !(1..=MAX_CONCURRENCY).contains(&self.max_concurrency) {
            return Err(anyhow::anyhow!(
                "max_concurrency must be between 1 and {}, got {}",
                MAX_CONCURRENCY,
                self.max_concurrency
            ));
        }

        Ok(())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_listen_addr(value: &str) -> Result<SocketAddr> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid listen address: {}", value))
}

/// Parses a boolean value from an environment variable
///
/// This function accepts multiple string representations of boolean values:
/// - `true`: "1", "true", "yes", "on"
/// - `false`: "0", "false", "no", "off"
fn parse_bool_env(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!(
            "expected boolean (true/false/1/0/yes/no/on/off)"
        )),
    }
}

/// TOML configuration file structure
#[derive(Debug, serde::Deserialize)]
struct TomlConfig {
    listen_addr: Option<String>,
    api_base: Option<String>,
    timeout: Option<u64>,
    record_ttl: Option<u32>,
    max_concurrency: Option<usize>,
    verbose: Option<bool>,
}

//==============================================================================
// Tests
//==============================================================================

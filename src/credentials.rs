//! Per-request provider credentials
//!
//! The bearer token arrives with each DynDNS request and lives only as long as
//! that request. It is wiped from memory on drop and never printed.

use std::fmt;

use zeroize::Zeroizing;

/// Bearer token forwarded to every provider call of a single request
#[derive(Clone)]
pub struct Credentials {
    token: Zeroizing<String>,
}

impl Credentials {
    /// Wraps a token, rejecting blank values
    pub fn new(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self {
            token: Zeroizing::new(token.to_string()),
        })
    }

    /// Returns the raw token for use in an `Authorization` header
    pub fn expose(&self) -> &str {
        self.token.as_str()
    }

    /// Redacts the token from a message before it is logged or returned
    #[must_use]
    pub fn redact(&self, message: &str) -> String {
        redact_secrets(message, self.expose())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(***REDACTED***)")
    }
}

/// Redacts sensitive data (API tokens) from log messages
///
/// Every occurrence of `secret` is replaced with `***REDACTED***`.
///
/// # Examples
///
/// ```
/// use hcloud_dyndns::credentials::redact_secrets;
///
/// let redacted = redact_secrets("token=abc123 failed", "abc123");
/// assert_eq!(redacted, "token=***REDACTED*** failed");
/// ```
#[must_use]
pub fn redact_secrets(message: &str, secret: &str) -> String {
    if secret.is_empty() {
        return message.to_string();
    }
    message.replace(secret, "***REDACTED***")
}

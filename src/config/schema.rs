//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the core-banking client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BankConfig {
    /// Core-banking SOAP endpoint and its credentials.
    pub core: CoreConfig,

    /// JSON screening (fraud-check) service, if used.
    pub screening: Option<ScreeningConfig>,

    /// Timeout, retry and TLS policy.
    pub transport: TransportConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Core-banking service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CoreConfig {
    /// SOAP endpoint URL (e.g., "https://bank.example.com/ws").
    pub endpoint: String,

    /// Service username placed in the envelope header.
    pub username: String,

    /// Service password placed in the envelope header.
    pub password: String,

    /// Authorization header value forwarded on SOAP calls.
    pub authorization: Option<String>,

    /// OAuth grant type used by adjacent services.
    pub grant_type: Option<String>,

    /// JWT assertion used by adjacent services.
    pub jwt_assertion: Option<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            username: String::new(),
            password: String::new(),
            authorization: None,
            grant_type: None,
            jwt_assertion: None,
        }
    }
}

/// Screening (fraud-check) service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScreeningConfig {
    /// JSON endpoint URL.
    pub endpoint: String,

    /// Bearer token sent in the Authorization header.
    #[serde(default)]
    pub bearer_token: String,

    /// Application token sent in `application_header`.
    #[serde(default)]
    pub application_token: String,

    /// Header carrying the application token.
    #[serde(default = "default_application_header")]
    pub application_header: String,

    /// Minimum TLS version for this route.
    #[serde(default = "default_screening_tls")]
    pub min_tls: TlsVersion,
}

fn default_application_header() -> String {
    "X-Application-Token".to_string()
}

fn default_screening_tls() -> TlsVersion {
    TlsVersion::Tls13
}

/// Minimum negotiated TLS version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum TlsVersion {
    #[serde(rename = "1.2")]
    Tls12,
    #[serde(rename = "1.3")]
    Tls13,
}

/// Timeout, retry and TLS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Per-attempt request timeout in seconds.
    pub timeout_secs: u64,

    /// Total number of attempts (at least 1).
    pub max_retries: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Upper bound of the random jitter added to each delay, in milliseconds.
    pub jitter_ms: u64,

    /// Optional cap on a single backoff delay in milliseconds.
    pub max_delay_ms: Option<u64>,

    /// Optional deadline for a whole call, retries included, in seconds.
    pub total_timeout_secs: Option<u64>,

    /// Minimum TLS version for the core route.
    pub min_tls: TlsVersion,

    /// Refuse plain-HTTP endpoints.
    pub https_only: bool,

    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 3,
            base_delay_ms: 1000,
            jitter_ms: 500,
            max_delay_ms: None,
            total_timeout_secs: None,
            min_tls: TlsVersion::Tls12,
            https_only: true,
            user_agent: concat!("bankwire/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

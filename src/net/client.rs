//! HTTP exchange backed by reqwest.
//!
//! # Responsibilities
//! - Build the HTTPS client with the configured TLS floor
//! - POST one request with a per-attempt timeout
//! - Read the whole body so the connection is torn down cleanly
//!
//! # Design Decisions
//! - No idle connections are pooled, so a retry never reuses the connection
//!   of a failed attempt
//! - Redirects are not followed; a SOAP endpoint that redirects is misconfigured

use std::time::Duration;

use crate::config::{ConfigError, TlsVersion, TransportConfig};
use crate::net::exchange::{Exchange, NetworkError, RawResponse, WireRequest};
use crate::net::tls;

/// Production [`Exchange`] over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpExchange {
    client: reqwest::Client,
}

impl HttpExchange {
    /// Build a client for one route.
    pub fn new(config: &TransportConfig, min_tls: TlsVersion) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .min_tls_version(tls::min_version(min_tls))
            .https_only(config.https_only)
            .pool_max_idle_per_host(0)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Exchange for HttpExchange {
    async fn exchange(
        &self,
        request: &WireRequest,
        timeout: Duration,
    ) -> Result<RawResponse, NetworkError> {
        let response = self
            .client
            .post(request.endpoint.clone())
            .headers(request.headers.clone())
            .body(request.body.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| NetworkError::from_reqwest(e, timeout))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| NetworkError::from_reqwest(e, timeout))?;

        tracing::trace!(status, bytes = body.len(), "Exchange complete");
        Ok(RawResponse { status, body })
    }
}

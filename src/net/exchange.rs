//! Single request/response exchange abstraction.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use thiserror::Error;
use url::Url;

/// A fully prepared POST request.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub endpoint: Url,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Raw status and body of one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Network-level failure of a single attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed reading response body: {0}")]
    Body(String),
}

impl NetworkError {
    pub(crate) fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            NetworkError::Timeout(timeout)
        } else if error.is_connect() {
            NetworkError::Connect(error_chain(&error))
        } else if error.is_body() || error.is_decode() {
            NetworkError::Body(error_chain(&error))
        } else {
            NetworkError::Request(error_chain(&error))
        }
    }
}

/// Flatten an error and its sources into one line; reqwest hides TLS detail in the chain.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Performs one attempt. Implementations never retry on their own.
pub trait Exchange: Send + Sync {
    fn exchange(
        &self,
        request: &WireRequest,
        timeout: Duration,
    ) -> impl Future<Output = Result<RawResponse, NetworkError>> + Send;
}

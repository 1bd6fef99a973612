//! Retry logic.
//!
//! # Responsibilities
//! - Decide which attempts are retried (network errors and 5xx only)
//! - Execute retries with exponential backoff + jitter
//! - Surface a terminal error once attempts are exhausted
//!
//! # Design Decisions
//! - 4xx and below are terminal: the classifier decides what they mean
//! - No sleep after the final attempt
//! - Every attempt and every sleep races the caller's cancellation token

use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::config::TransportConfig;
use crate::net::{Exchange, NetworkError, WireRequest};
use crate::observability::metrics;
use crate::resilience::backoff::Backoff;
use crate::resilience::timeouts::{cancellable, with_deadline};

/// Retry and timeout policy for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts. Values below 1 are treated as 1.
    pub max_retries: u32,
    pub timeout_per_attempt: Duration,
    pub backoff: Backoff,
    /// Deadline for the whole call, retries included.
    pub total_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&TransportConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(config: &TransportConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            timeout_per_attempt: Duration::from_secs(config.timeout_secs),
            backoff: Backoff {
                base: Duration::from_millis(config.base_delay_ms),
                jitter: Duration::from_millis(config.jitter_ms),
                max_delay: config.max_delay_ms.map(Duration::from_millis),
            },
            total_timeout: config.total_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.max_retries.max(1)
    }
}

/// Whether a response status warrants another attempt.
pub fn is_retryable_status(status: u16) -> bool {
    status >= 500
}

/// Terminal transport failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("{route}: giving up after {attempts} attempts: {source}")]
    Network {
        route: &'static str,
        attempts: u32,
        #[source]
        source: NetworkError,
    },

    #[error("{route}: server returned HTTP {status} on the final attempt ({attempts} attempts)")]
    ServerStatus {
        route: &'static str,
        attempts: u32,
        status: u16,
    },

    #[error("{route}: call cancelled after {attempts} attempts")]
    Cancelled { route: &'static str, attempts: u32 },

    #[error("{route}: call exceeded its {limit:?} deadline")]
    DeadlineExceeded { route: &'static str, limit: Duration },
}

/// A response that the classifier should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub status: u16,
    pub body: Bytes,
    /// Attempts made, including the one that produced this response.
    pub attempts: u32,
    /// Backoff delays slept before the retries, in order.
    pub backoffs: Vec<Duration>,
}

enum Failure {
    Network(NetworkError),
    Status(u16),
}

/// Sends requests over an [`Exchange`] with bounded retries.
///
/// Retries are not idempotency-aware. A 5xx may be returned after the remote
/// side already executed the operation, and the retry then executes it again.
/// Integrators calling non-idempotent operations such as payments must account
/// for duplicate execution.
#[derive(Debug, Clone)]
pub struct ResilientTransport<E> {
    route: &'static str,
    exchange: E,
    policy: RetryPolicy,
}

impl<E: Exchange> ResilientTransport<E> {
    pub fn new(route: &'static str, exchange: E, policy: RetryPolicy) -> Self {
        Self {
            route,
            exchange,
            policy,
        }
    }

    pub fn route(&self) -> &'static str {
        self.route
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn exchange(&self) -> &E {
        &self.exchange
    }

    /// Send `request`, retrying network failures and 5xx responses.
    pub async fn send(
        &self,
        request: &WireRequest,
        cancel: &CancellationToken,
    ) -> Result<Delivery, TransportError> {
        with_deadline(self.policy.total_timeout, self.attempt_loop(request, cancel))
            .await
            .map_err(|limit| {
                tracing::warn!(route = self.route, limit = ?limit, "Call deadline exceeded");
                TransportError::DeadlineExceeded {
                    route: self.route,
                    limit,
                }
            })?
    }

    async fn attempt_loop(
        &self,
        request: &WireRequest,
        cancel: &CancellationToken,
    ) -> Result<Delivery, TransportError> {
        let max_attempts = self.policy.attempts();
        let mut backoffs = Vec::new();
        let mut attempt = 0;

        loop {
            let exchange = self.exchange.exchange(request, self.policy.timeout_per_attempt);
            let Some(result) = cancellable(cancel, exchange).await else {
                return Err(self.cancelled(attempt));
            };

            let failure = match result {
                Ok(response) if !is_retryable_status(response.status) => {
                    metrics::record_attempt(self.route, "ok");
                    if attempt > 0 {
                        tracing::info!(
                            route = self.route,
                            attempts = attempt + 1,
                            status = response.status,
                            "Request succeeded after retries"
                        );
                    }
                    return Ok(Delivery {
                        status: response.status,
                        body: response.body,
                        attempts: attempt + 1,
                        backoffs,
                    });
                }
                Ok(response) => {
                    metrics::record_attempt(self.route, "server_error");
                    // The exchange already drained the body; it is discarded here.
                    tracing::warn!(
                        route = self.route,
                        attempt,
                        status = response.status,
                        bytes = response.body.len(),
                        "Upstream server error"
                    );
                    Failure::Status(response.status)
                }
                Err(error) => {
                    metrics::record_attempt(self.route, "network_error");
                    tracing::warn!(route = self.route, attempt, error = %error, "Upstream request failed");
                    Failure::Network(error)
                }
            };

            attempt += 1;
            if attempt >= max_attempts {
                return Err(self.exhausted(attempt, failure));
            }

            let delay = self.policy.backoff.delay(attempt - 1);
            metrics::record_retry(self.route);
            tracing::info!(route = self.route, attempt, delay = ?delay, "Retrying request");
            if cancellable(cancel, tokio::time::sleep(delay)).await.is_none() {
                return Err(self.cancelled(attempt));
            }
            backoffs.push(delay);
        }
    }

    fn cancelled(&self, attempts: u32) -> TransportError {
        tracing::info!(route = self.route, attempts, "Call cancelled");
        TransportError::Cancelled {
            route: self.route,
            attempts,
        }
    }

    fn exhausted(&self, attempts: u32, failure: Failure) -> TransportError {
        tracing::error!(route = self.route, attempts, "Retries exhausted");
        match failure {
            Failure::Network(source) => TransportError::Network {
                route: self.route,
                attempts,
                source,
            },
            Failure::Status(status) => TransportError::ServerStatus {
                route: self.route,
                attempts,
                status,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::RawResponse;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use url::Url;

    /// Replays a fixed script of attempt results.
    struct ScriptedExchange {
        script: Mutex<VecDeque<Result<RawResponse, NetworkError>>>,
        calls: AtomicU32,
    }

    impl ScriptedExchange {
        fn new(script: Vec<Result<RawResponse, NetworkError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Exchange for ScriptedExchange {
        fn exchange(
            &self,
            _request: &WireRequest,
            _timeout: Duration,
        ) -> impl Future<Output = Result<RawResponse, NetworkError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(NetworkError::Request("script exhausted".into())));
            async move { next }
        }
    }

    fn request() -> WireRequest {
        WireRequest {
            endpoint: Url::parse("https://bank.example.com/ws").unwrap(),
            headers: Default::default(),
            body: Bytes::from_static(b"<x/>"),
        }
    }

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            timeout_per_attempt: Duration::from_secs(5),
            backoff: Backoff::default(),
            total_timeout: None,
        }
    }

    fn ok(status: u16) -> Result<RawResponse, NetworkError> {
        Ok(RawResponse::new(status, "body"))
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_after_server_errors() {
        let transport = ResilientTransport::new(
            "core",
            ScriptedExchange::new(vec![ok(503), ok(502), ok(200)]),
            policy(5),
        );

        let delivery = transport.send(&request(), &CancellationToken::new()).await.unwrap();

        assert_eq!(delivery.status, 200);
        assert_eq!(delivery.attempts, 3);
        assert_eq!(delivery.backoffs.len(), 2);
        assert_eq!(transport.exchange().calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_error_not_retried() {
        let transport =
            ResilientTransport::new("core", ScriptedExchange::new(vec![ok(404), ok(200)]), policy(5));

        let delivery = transport.send(&request(), &CancellationToken::new()).await.unwrap();

        assert_eq!(delivery.status, 404);
        assert_eq!(delivery.attempts, 1);
        assert!(delivery.backoffs.is_empty());
        assert_eq!(transport.exchange().calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_on_server_status() {
        let transport = ResilientTransport::new(
            "core",
            ScriptedExchange::new(vec![ok(500), ok(500), ok(503)]),
            policy(3),
        );

        let err = transport.send(&request(), &CancellationToken::new()).await.unwrap_err();

        assert_eq!(
            err,
            TransportError::ServerStatus {
                route: "core",
                attempts: 3,
                status: 503
            }
        );
        assert_eq!(transport.exchange().calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_wraps_last_network_error() {
        let transport = ResilientTransport::new(
            "core",
            ScriptedExchange::new(vec![
                ok(500),
                Err(NetworkError::Connect("refused".into())),
            ]),
            policy(2),
        );

        let err = transport.send(&request(), &CancellationToken::new()).await.unwrap_err();

        match err {
            TransportError::Network { attempts, source, .. } => {
                assert_eq!(attempts, 2);
                assert_eq!(source, NetworkError::Connect("refused".into()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_still_attempts_once() {
        let transport = ResilientTransport::new("core", ScriptedExchange::new(vec![ok(200)]), policy(0));
        let delivery = transport.send(&request(), &CancellationToken::new()).await.unwrap();
        assert_eq!(delivery.attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleeps_follow_backoff() {
        let transport = ResilientTransport::new(
            "core",
            ScriptedExchange::new(vec![ok(503), ok(503), ok(503), ok(200)]),
            policy(5),
        );

        let start = tokio::time::Instant::now();
        let delivery = transport.send(&request(), &CancellationToken::new()).await.unwrap();
        let elapsed = start.elapsed();

        let slept: Duration = delivery.backoffs.iter().sum();
        assert_eq!(delivery.backoffs.len(), 3);
        assert!(elapsed >= slept);
        // 1s + 2s + 4s plus at most 3 x 500ms jitter.
        assert!(slept >= Duration::from_secs(7));
        assert!(slept < Duration::from_millis(8500));
        assert!(delivery.backoffs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_backoff() {
        let transport = ResilientTransport::new(
            "core",
            ScriptedExchange::new(vec![ok(503), ok(200)]),
            policy(5),
        );
        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let err = transport.send(&request(), &cancel).await.unwrap_err();

        assert_eq!(
            err,
            TransportError::Cancelled {
                route: "core",
                attempts: 1
            }
        );
        assert_eq!(transport.exchange().calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_total_deadline() {
        let mut policy = policy(10);
        policy.total_timeout = Some(Duration::from_secs(5));
        let transport = ResilientTransport::new(
            "core",
            ScriptedExchange::new(vec![ok(503); 10]),
            policy,
        );

        let err = transport.send(&request(), &CancellationToken::new()).await.unwrap_err();

        assert_eq!(
            err,
            TransportError::DeadlineExceeded {
                route: "core",
                limit: Duration::from_secs(5)
            }
        );
        assert!(transport.exchange().calls() < 10);
    }

    #[test]
    fn test_policy_from_config() {
        let config = TransportConfig {
            max_retries: 5,
            timeout_secs: 10,
            base_delay_ms: 250,
            max_delay_ms: Some(4000),
            ..TransportConfig::default()
        };
        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.attempts(), 5);
        assert_eq!(policy.timeout_per_attempt, Duration::from_secs(10));
        assert_eq!(policy.backoff.base, Duration::from_millis(250));
        assert_eq!(policy.backoff.max_delay, Some(Duration::from_secs(4)));
    }

    #[test]
    fn test_retryable_status() {
        assert!(!is_retryable_status(200));
        assert!(!is_retryable_status(429));
        assert!(!is_retryable_status(499));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(503));
    }
}

//! Core-banking client facade.

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::classify::{classify, Outcome};
use crate::config::{BankConfig, ConfigError, Credentials};
use crate::error::{BankError, BankResult};
use crate::net::{Exchange, HttpExchange, WireRequest};
use crate::observability::metrics;
use crate::operation::{Operation, Payload, Route};
use crate::resilience::{ResilientTransport, RetryPolicy};

/// Entry point for every operation.
///
/// Holds one immutable credential set and one resilient transport per route.
/// Calls are independent and may run concurrently; nothing is mutated during
/// a call.
///
/// Retries are not idempotency-aware: after a 5xx the remote side may already
/// have executed the operation, and the retry executes it again.
pub struct CoreBankClient<E = HttpExchange> {
    credentials: Arc<Credentials>,
    core: ResilientTransport<E>,
    screening: Option<ResilientTransport<E>>,
}

impl CoreBankClient<HttpExchange> {
    /// Build a client with HTTPS transports from validated configuration.
    pub fn from_config(config: &BankConfig) -> Result<Self, ConfigError> {
        let credentials = Credentials::from_config(config)?;
        let policy = RetryPolicy::from_config(&config.transport);

        let core = ResilientTransport::new(
            Route::Core.as_str(),
            HttpExchange::new(&config.transport, config.transport.min_tls)?,
            policy.clone(),
        );
        let screening = match credentials.screening() {
            Some(screening) => Some(ResilientTransport::new(
                Route::Screening.as_str(),
                HttpExchange::new(&config.transport, screening.min_tls)?,
                policy,
            )),
            None => None,
        };

        tracing::info!(
            endpoint = %credentials.endpoint(),
            screening = screening.is_some(),
            max_retries = config.transport.max_retries,
            "Core-banking client initialized"
        );

        Ok(Self {
            credentials: Arc::new(credentials),
            core,
            screening,
        })
    }
}

impl<E: Exchange> CoreBankClient<E> {
    pub fn new(credentials: Credentials, core: ResilientTransport<E>) -> Self {
        Self {
            credentials: Arc::new(credentials),
            core,
            screening: None,
        }
    }

    pub fn with_screening(mut self, transport: ResilientTransport<E>) -> Self {
        self.screening = Some(transport);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Run operation `O` to completion.
    pub async fn call<O: Operation>(&self, params: &O::Params) -> BankResult<Outcome<O::Detail>> {
        self.call_with_cancel::<O>(params, &CancellationToken::new()).await
    }

    /// Run operation `O`, giving up as soon as `cancel` fires.
    pub async fn call_with_cancel<O: Operation>(
        &self,
        params: &O::Params,
        cancel: &CancellationToken,
    ) -> BankResult<Outcome<O::Detail>> {
        let span = tracing::info_span!("bank_call", operation = O::NAME, call_id = %Uuid::new_v4());
        self.execute::<O>(params, cancel).instrument(span).await
    }

    async fn execute<O: Operation>(
        &self,
        params: &O::Params,
        cancel: &CancellationToken,
    ) -> BankResult<Outcome<O::Detail>> {
        let start_time = Instant::now();

        let result = self.round_trip::<O>(params, cancel).await;
        match &result {
            Ok(outcome) => {
                metrics::record_outcome(O::NAME, outcome.kind().as_str(), start_time);
                tracing::info!(
                    success = outcome.success(),
                    kind = outcome.kind().as_str(),
                    transaction_id = outcome.transaction_id().unwrap_or(""),
                    "Call classified"
                );
            }
            Err(e) => {
                metrics::record_outcome(O::NAME, e.kind(), start_time);
                tracing::error!(error = %e, "Call failed");
            }
        }
        result
    }

    async fn round_trip<O: Operation>(
        &self,
        params: &O::Params,
        cancel: &CancellationToken,
    ) -> BankResult<Outcome<O::Detail>> {
        let payload = O::render(params, &self.credentials);
        let (transport, request) = self.prepare(payload)?;

        tracing::debug!(route = transport.route(), bytes = request.body.len(), "Sending request");
        let delivery = transport.send(&request, cancel).await?;

        if !(200..300).contains(&delivery.status) {
            tracing::warn!(
                status = delivery.status,
                "Non-success HTTP status, classifying body anyway"
            );
        }
        tracing::debug!(
            status = delivery.status,
            attempts = delivery.attempts,
            bytes = delivery.body.len(),
            "Response received"
        );

        Ok(classify::<O::Detail>(&delivery.body, &O::schema())?)
    }

    fn prepare(&self, payload: Payload) -> Result<(&ResilientTransport<E>, WireRequest), BankError> {
        let credentials = &self.credentials;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(payload.format.content_type()));

        let (transport, endpoint) = match payload.route {
            Route::Core => {
                if let Some(action) = &payload.soap_action {
                    headers.insert(
                        HeaderName::from_static("soapaction"),
                        header_value("SOAPAction", &format!("\"{action}\""), false)?,
                    );
                }
                if let Some(authorization) = &credentials.auxiliary().authorization {
                    headers.insert(AUTHORIZATION, header_value("Authorization", authorization, true)?);
                }
                (&self.core, credentials.endpoint().clone())
            }
            Route::Screening => {
                let (Some(transport), Some(screening)) = (&self.screening, credentials.screening()) else {
                    return Err(ConfigError::MissingRoute(Route::Screening.as_str()).into());
                };
                headers.insert(
                    AUTHORIZATION,
                    header_value("Authorization", &format!("Bearer {}", screening.bearer_token), true)?,
                );
                let name = HeaderName::from_bytes(screening.application_header.as_bytes())
                    .map_err(|_| ConfigError::InvalidHeader("application header name"))?;
                headers.insert(
                    name,
                    header_value("application token", &screening.application_token, true)?,
                );
                (transport, screening.endpoint.clone())
            }
        };

        let request = WireRequest {
            endpoint,
            headers,
            body: Bytes::from(payload.body),
        };
        Ok((transport, request))
    }
}

fn header_value(name: &'static str, value: &str, sensitive: bool) -> Result<HeaderValue, ConfigError> {
    let mut value = HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidHeader(name))?;
    value.set_sensitive(sensitive);
    Ok(value)
}

//! Crate-level error type.
//!
//! Business failures are not errors: they arrive as an
//! [`Outcome`](crate::classify::Outcome) with `success() == false`. Check the
//! error first, then `success()`, then `detail()`.

use thiserror::Error;

use crate::classify::MalformedResponse;
use crate::config::ConfigError;
use crate::resilience::TransportError;

/// Errors that can end a call without a classified outcome.
#[derive(Debug, Error)]
pub enum BankError {
    /// Credentials, endpoints or headers are unusable. Never retried.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Delivery failed after the retry policy was exhausted, cancelled, or
    /// ran past its deadline.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response could not be parsed. Never retried.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] MalformedResponse),
}

impl BankError {
    pub fn kind(&self) -> &'static str {
        match self {
            BankError::Configuration(_) => "configuration_error",
            BankError::Transport(_) => "transport_error",
            BankError::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// Result type for client calls.
pub type BankResult<T> = Result<T, BankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BankError::from(TransportError::ServerStatus {
            route: "core",
            attempts: 3,
            status: 503,
        });
        assert_eq!(
            err.to_string(),
            "transport error: core: server returned HTTP 503 on the final attempt (3 attempts)"
        );
        assert_eq!(err.kind(), "transport_error");

        let err = BankError::from(MalformedResponse::Empty);
        assert_eq!(err.to_string(), "malformed response: response body is empty");
    }
}

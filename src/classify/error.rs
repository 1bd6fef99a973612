//! Classifier error type.

use thiserror::Error;

/// The response could not be understood.
///
/// Distinct from a business failure: the remote side may or may not have
/// rejected the operation, the caller cannot tell. Never retried.
#[derive(Debug, Error)]
pub enum MalformedResponse {
    #[error("response body is empty")]
    Empty,

    #[error("response body is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("malformed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("detail section does not fit {type_name}: {source}")]
    Detail {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

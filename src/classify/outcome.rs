//! Typed call outcome.

use serde::Serialize;

pub const MISSING_STATUS: &str = "Missing Status";
pub const INVALID_RESPONSE: &str = "Invalid response";
pub const GENERIC_FAILURE: &str = "API returned failure";

/// Terminal state reached by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    SuccessWithDetail,
    /// Succeeded but carried no payload. Not an error.
    SuccessNoDetail,
    BusinessFailure,
    MissingStatus,
    UnknownShape,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::SuccessWithDetail => "success_with_detail",
            OutcomeKind::SuccessNoDetail => "success_no_detail",
            OutcomeKind::BusinessFailure => "business_failure",
            OutcomeKind::MissingStatus => "missing_status",
            OutcomeKind::UnknownShape => "unknown_shape",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeKind::SuccessWithDetail | OutcomeKind::SuccessNoDetail)
    }
}

/// Classified result of a well-formed response.
///
/// A failed outcome never carries a detail; constructors are the only way
/// to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    success: bool,
    kind: OutcomeKind,
    detail: Option<T>,
    messages: Vec<String>,
    transaction_id: Option<String>,
}

impl<T> Outcome<T> {
    fn build(
        kind: OutcomeKind,
        detail: Option<T>,
        messages: Vec<String>,
        transaction_id: Option<String>,
    ) -> Self {
        Self {
            success: kind.is_success(),
            kind,
            detail,
            messages,
            transaction_id,
        }
    }

    pub fn with_detail(detail: T, messages: Vec<String>, transaction_id: Option<String>) -> Self {
        Self::build(OutcomeKind::SuccessWithDetail, Some(detail), messages, transaction_id)
    }

    pub fn without_detail(messages: Vec<String>, transaction_id: Option<String>) -> Self {
        Self::build(OutcomeKind::SuccessNoDetail, None, messages, transaction_id)
    }

    pub fn failure(messages: Vec<String>, transaction_id: Option<String>) -> Self {
        Self::build(OutcomeKind::BusinessFailure, None, messages, transaction_id)
    }

    pub fn missing_status() -> Self {
        Self::build(OutcomeKind::MissingStatus, None, vec![MISSING_STATUS.to_string()], None)
    }

    pub fn unknown_shape() -> Self {
        Self::build(OutcomeKind::UnknownShape, None, vec![INVALID_RESPONSE.to_string()], None)
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn kind(&self) -> OutcomeKind {
        self.kind
    }

    pub fn detail(&self) -> Option<&T> {
        self.detail.as_ref()
    }

    pub fn into_detail(self) -> Option<T> {
        self.detail
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }
}

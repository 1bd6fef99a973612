//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate endpoint URLs and the https policy
//! - Validate value ranges (timeouts > 0, at least one attempt)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BankConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use url::Url;

use crate::config::schema::BankConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &BankConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let https_only = config.transport.https_only;

    check_endpoint("core.endpoint", &config.core.endpoint, https_only, &mut errors);

    if config.core.username.trim().is_empty() {
        errors.push(ValidationError::new("core.username", "must not be empty"));
    }

    if let Some(screening) = &config.screening {
        check_endpoint("screening.endpoint", &screening.endpoint, https_only, &mut errors);
        if screening.bearer_token.is_empty() {
            errors.push(ValidationError::new("screening.bearer_token", "must not be empty"));
        }
        if screening.application_token.is_empty() {
            errors.push(ValidationError::new("screening.application_token", "must not be empty"));
        }
        if screening.application_header.trim().is_empty() {
            errors.push(ValidationError::new("screening.application_header", "must not be empty"));
        }
    }

    let transport = &config.transport;
    if transport.max_retries == 0 {
        errors.push(ValidationError::new("transport.max_retries", "must be at least 1"));
    }
    if transport.timeout_secs == 0 {
        errors.push(ValidationError::new("transport.timeout_secs", "must be greater than 0"));
    }
    if transport.total_timeout_secs == Some(0) {
        errors.push(ValidationError::new("transport.total_timeout_secs", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_endpoint(
    field: &'static str,
    value: &str,
    https_only: bool,
    errors: &mut Vec<ValidationError>,
) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
        return;
    }
    match Url::parse(value) {
        Ok(url) => {
            if https_only && url.scheme() != "https" {
                errors.push(ValidationError::new(
                    field,
                    format!("scheme '{}' not allowed while https_only is set", url.scheme()),
                ));
            }
        }
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL '{}': {}", value, e))),
    }
}

//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::BankConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading and client construction.
///
/// Configuration errors are fatal: they are surfaced immediately and never
/// retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid endpoint '{value}': {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("No endpoint configured for the {0} route")]
    MissingRoute(&'static str),

    #[error("Invalid value for header {0}")]
    InvalidHeader(&'static str),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Environment variables that override secrets from the file.
const ENV_OVERRIDES: &[&str] = &[
    "BANKWIRE_CORE_ENDPOINT",
    "BANKWIRE_CORE_USERNAME",
    "BANKWIRE_CORE_PASSWORD",
    "BANKWIRE_SCREENING_BEARER_TOKEN",
    "BANKWIRE_SCREENING_APPLICATION_TOKEN",
];

/// Load and validate configuration from a TOML file.
///
/// Secrets found in the process environment take precedence over the file.
pub fn load_config(path: &Path) -> Result<BankConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse_config(&content)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Parse configuration text without validating it.
pub fn parse_config(content: &str) -> Result<BankConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Overlay secrets from `lookup` (normally the process environment).
pub fn apply_env_overrides<F>(config: &mut BankConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for key in ENV_OVERRIDES {
        let Some(value) = lookup(key) else {
            continue;
        };
        tracing::debug!(variable = *key, "Applying environment override");
        match *key {
            "BANKWIRE_CORE_ENDPOINT" => config.core.endpoint = value,
            "BANKWIRE_CORE_USERNAME" => config.core.username = value,
            "BANKWIRE_CORE_PASSWORD" => config.core.password = value,
            "BANKWIRE_SCREENING_BEARER_TOKEN" => {
                if let Some(screening) = config.screening.as_mut() {
                    screening.bearer_token = value;
                }
            }
            "BANKWIRE_SCREENING_APPLICATION_TOKEN" => {
                if let Some(screening) = config.screening.as_mut() {
                    screening.application_token = value;
                }
            }
            _ => {}
        }
    }
}

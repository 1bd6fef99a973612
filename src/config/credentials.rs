//! Immutable credential set.
//!
//! Built once from a validated [`BankConfig`] and handed to the client by
//! value. There is no process-wide instance: two clients may carry two
//! different credential sets side by side.

use std::fmt;

use url::Url;

use crate::config::loader::ConfigError;
use crate::config::schema::{BankConfig, ScreeningConfig, TlsVersion};

/// Credentials and endpoints for one core-banking tenant.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
    endpoint: Url,
    auxiliary: AuxiliaryTokens,
    screening: Option<ScreeningCredentials>,
}

/// Tokens used by adjacent services.
#[derive(Clone, Default)]
pub struct AuxiliaryTokens {
    pub authorization: Option<String>,
    pub grant_type: Option<String>,
    pub jwt_assertion: Option<String>,
}

/// Endpoint and tokens for the JSON screening service.
#[derive(Clone)]
pub struct ScreeningCredentials {
    pub endpoint: Url,
    pub bearer_token: String,
    pub application_token: String,
    pub application_header: String,
    pub min_tls: TlsVersion,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>, endpoint: Url) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            endpoint,
            auxiliary: AuxiliaryTokens::default(),
            screening: None,
        }
    }

    /// Build credentials from configuration, parsing every endpoint.
    pub fn from_config(config: &BankConfig) -> Result<Self, ConfigError> {
        let core = &config.core;
        let mut credentials = Self::new(&core.username, &core.password, parse_url(&core.endpoint)?);
        credentials.auxiliary = AuxiliaryTokens {
            authorization: core.authorization.clone(),
            grant_type: core.grant_type.clone(),
            jwt_assertion: core.jwt_assertion.clone(),
        };
        if let Some(screening) = &config.screening {
            credentials.screening = Some(ScreeningCredentials::from_config(screening)?);
        }
        Ok(credentials)
    }

    pub fn with_auxiliary(mut self, auxiliary: AuxiliaryTokens) -> Self {
        self.auxiliary = auxiliary;
        self
    }

    pub fn with_screening(mut self, screening: ScreeningCredentials) -> Self {
        self.screening = Some(screening);
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn auxiliary(&self) -> &AuxiliaryTokens {
        &self.auxiliary
    }

    pub fn screening(&self) -> Option<&ScreeningCredentials> {
        self.screening.as_ref()
    }
}

impl ScreeningCredentials {
    fn from_config(config: &ScreeningConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: parse_url(&config.endpoint)?,
            bearer_token: config.bearer_token.clone(),
            application_token: config.application_token.clone(),
            application_header: config.application_header.clone(),
            min_tls: config.min_tls,
        })
    }
}

fn parse_url(value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidEndpoint {
        value: value.to_string(),
        source,
    })
}

const REDACTED: &str = "<redacted>";

fn redact(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| REDACTED)
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("endpoint", &self.endpoint.as_str())
            .field("auxiliary", &self.auxiliary)
            .field("screening", &self.screening)
            .finish()
    }
}

impl fmt::Debug for AuxiliaryTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuxiliaryTokens")
            .field("authorization", &redact(&self.authorization))
            .field("grant_type", &self.grant_type)
            .field("jwt_assertion", &redact(&self.jwt_assertion))
            .finish()
    }
}

impl fmt::Debug for ScreeningCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreeningCredentials")
            .field("endpoint", &self.endpoint.as_str())
            .field("bearer_token", &REDACTED)
            .field("application_token", &REDACTED)
            .field("application_header", &self.application_header)
            .field("min_tls", &self.min_tls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let mut config = BankConfig::default();
        config.core.endpoint = "https://bank.example.com/ws".into();
        config.core.username = "teller".into();
        config.core.password = "hunter2".into();
        config.core.grant_type = Some("client_credentials".into());

        let credentials = Credentials::from_config(&config).unwrap();
        assert_eq!(credentials.username(), "teller");
        assert_eq!(credentials.endpoint().host_str(), Some("bank.example.com"));
        assert_eq!(credentials.auxiliary().grant_type.as_deref(), Some("client_credentials"));
        assert!(credentials.screening().is_none());
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut config = BankConfig::default();
        config.core.endpoint = "::not-a-url".into();
        let err = Credentials::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let endpoint = Url::parse("https://bank.example.com/ws").unwrap();
        let credentials = Credentials::new("teller", "hunter2", endpoint).with_auxiliary(AuxiliaryTokens {
            authorization: Some("Basic abc".into()),
            grant_type: None,
            jwt_assertion: Some("eyJ".into()),
        });

        let debug = format!("{:?}", credentials);
        assert!(debug.contains("teller"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("Basic abc"));
        assert!(!debug.contains("eyJ"));
    }
}

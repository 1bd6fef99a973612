//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse, deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → BankConfig (validated, immutable)
//!     → credentials.rs (Credentials snapshot handed to each client)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no global instance
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Secrets may come from the environment instead of the file

pub mod credentials;
pub mod loader;
pub mod schema;
pub mod validation;

pub use credentials::{AuxiliaryTokens, Credentials, ScreeningCredentials};
pub use loader::{load_config, ConfigError};
pub use schema::{BankConfig, CoreConfig, ObservabilityConfig, ScreeningConfig, TlsVersion, TransportConfig};
pub use validation::ValidationError;

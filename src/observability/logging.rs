//! Structured logging.
//!
//! # Responsibilities
//! - Install the global `tracing` subscriber for binaries
//! - Pick human or JSON output from configuration
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level when set
//! - The library never installs a subscriber on its own; only binaries call
//!   [`init_logging`]

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Build the filter: `RUST_LOG` if set and valid, otherwise `bankwire=<level>`.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bankwire={}", config.log_level)))
}

/// Install the global subscriber. Returns `false` if one was already set.
pub fn init_logging(config: &ObservabilityConfig) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    let installed = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    installed.is_ok()
}

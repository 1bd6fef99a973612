//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! facade and transport produce:
//!     → tracing events inside a `bank_call` span (operation, call_id)
//!     → metrics.rs (counters, histograms)
//!
//! consumers:
//!     → logging.rs subscriber (human or JSON lines on stdout)
//!     → whatever `metrics` recorder the application installs
//! ```
//!
//! # Design Decisions
//! - Secrets never appear in events; credential types redact themselves
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;

pub use logging::init_logging;

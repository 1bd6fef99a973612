//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! WireRequest to endpoint:
//!     → timeouts.rs (overall deadline, cancellation)
//!     → retries.rs (attempt loop: retry network errors and 5xx)
//!     → backoff.rs (2^n base delay plus jitter between attempts)
//!     → Delivery (status < 500) or TransportError
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every attempt has a deadline
//! - Retries apply to every operation; duplicates are the caller's concern
//! - Jittered backoff prevents synchronized retry storms
//! - Backoff growth is uncapped unless a cap is configured

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use backoff::Backoff;
pub use retries::{Delivery, ResilientTransport, RetryPolicy, TransportError};

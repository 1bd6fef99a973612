//! Network subsystem.
//!
//! # Data Flow
//! ```text
//! WireRequest (endpoint, headers, body)
//!     → exchange.rs (Exchange trait: one attempt, no retries)
//!     → client.rs (reqwest over rustls, per-attempt timeout)
//!     → RawResponse (status, body) or NetworkError
//! ```
//!
//! # Design Decisions
//! - The retry loop depends on the trait only, so it can be driven by a
//!   scripted exchange in tests
//! - TLS floor is chosen per route (tls.rs)

pub mod client;
pub mod exchange;
pub mod tls;

pub use client::HttpExchange;
pub use exchange::{Exchange, NetworkError, RawResponse, WireRequest};

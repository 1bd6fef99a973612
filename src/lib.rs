//! Core-banking client library
//!
//! Renders SOAP/XML (or JSON) requests from typed parameters, delivers them
//! with bounded retries, and classifies responses into typed outcomes.
//!
//! ```text
//! caller → operation::CoreBankClient
//!            → envelope   (typed params → escaped XML)
//!            → resilience (retries, backoff, cancellation) → net (HTTPS)
//!            → classify   (bytes → Outcome<T> | MalformedResponse)
//! ```

pub mod classify;
pub mod config;
pub mod envelope;
pub mod error;
pub mod net;
pub mod observability;
pub mod operation;
pub mod operations;
pub mod resilience;

pub use classify::{Outcome, OutcomeKind};
pub use config::{BankConfig, Credentials};
pub use error::{BankError, BankResult};
pub use operation::{CoreBankClient, Operation};

//! Envelope rendering subsystem.
//!
//! # Data Flow
//! ```text
//! Operation parameters
//!     → builder.rs (Element tree, values escaped on write)
//!     → soap.rs (SOAP envelope with credential header)
//!     → request body String
//! ```
//!
//! # Design Decisions
//! - Rendering is pure and total: no I/O, no hidden state, never fails
//! - Field order is exactly the order the operation appends them
//! - Values are escaped; callers do not pre-sanitize

pub mod builder;
pub mod soap;

pub use builder::Element;
pub use soap::SoapEnvelope;

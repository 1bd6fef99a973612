//! Response classification subsystem.
//!
//! # Data Flow
//! ```text
//! raw response bytes
//!     → tree.rs (XML → value tree) or serde_json (JSON → value tree)
//!     → classifier.rs (locate response, status, detail by schema)
//!     → Outcome<T> or MalformedResponse
//! ```
//!
//! # Terminal States
//! ```text
//! Start → MalformedInput      (error: could not parse)
//!       → UnknownShape        (success=false, "Invalid response")
//!       → MissingStatus       (success=false, "Missing Status")
//!       → BusinessFailure     (success=false, status messages)
//!       → SuccessNoDetail     (success=true, no detail)
//!       → SuccessWithDetail   (success=true, detail: T)
//! ```
//!
//! # Design Decisions
//! - One generic routine for every operation, parameterized by the detail type
//! - XML and JSON share the same value-tree path
//! - No retries here; retries belong to the transport

pub mod classifier;
pub mod de;
pub mod error;
pub mod outcome;
pub mod schema;
pub mod tree;

pub use classifier::{classify, is_success_indicator};
pub use error::MalformedResponse;
pub use outcome::{Outcome, OutcomeKind};
pub use schema::{ResponseSchema, WireFormat};

//! Operation facade subsystem.
//!
//! # Data Flow
//! ```text
//! caller → CoreBankClient::call::<O>(params)
//!     → O::render (envelope body)
//!     → headers for the route (SOAP or JSON screening)
//!     → ResilientTransport::send (retries, backoff, cancellation)
//!     → classify::<O::Detail>(body, O::schema())
//!     → Outcome<O::Detail> or BankError
//! ```
//!
//! # Design Decisions
//! - An operation is a type: its parameters, detail and schema are bound at
//!   compile time
//! - Transport and parse errors pass through untouched; business results are
//!   always an Outcome

pub mod client;

use serde::de::DeserializeOwned;

use crate::classify::{ResponseSchema, WireFormat};
use crate::config::Credentials;
use crate::envelope::SoapEnvelope;

pub use client::CoreBankClient;

/// Remote service a payload is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The SOAP core-banking endpoint.
    Core,
    /// The JSON screening (fraud-check) endpoint.
    Screening,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Core => "core",
            Route::Screening => "screening",
        }
    }
}

/// A rendered request body and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub route: Route,
    pub format: WireFormat,
    pub body: String,
    pub soap_action: Option<String>,
}

impl Payload {
    /// A SOAP envelope for the core route.
    pub fn soap(envelope: &SoapEnvelope, action: impl Into<String>) -> Self {
        Self {
            route: Route::Core,
            format: WireFormat::Xml,
            body: envelope.render(),
            soap_action: Some(action.into()),
        }
    }

    /// A JSON document for the screening route.
    pub fn json(value: &serde_json::Value) -> Self {
        Self {
            route: Route::Screening,
            format: WireFormat::Json,
            body: value.to_string(),
            soap_action: None,
        }
    }
}

/// One remote capability.
pub trait Operation {
    /// Operation name, used for the SOAP action, logs and metrics.
    const NAME: &'static str;

    type Params;
    type Detail: DeserializeOwned;

    fn schema() -> ResponseSchema;

    /// Render the request. Must be deterministic and must not fail.
    fn render(params: &Self::Params, credentials: &Credentials) -> Payload;
}

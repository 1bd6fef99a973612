//! SOAP 1.1 envelope rendering.

use crate::config::Credentials;
use crate::envelope::builder::Element;

pub const SOAP_ENV_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SERVICE_NAMESPACE: &str = "urn:corebanking:services";
const SERVICE_PREFIX: &str = "bank";

/// A request envelope: credential header plus one operation element.
#[derive(Debug, Clone)]
pub struct SoapEnvelope {
    header: Option<Element>,
    body: Element,
}

impl SoapEnvelope {
    /// Wrap an operation request element.
    pub fn new(body: Element) -> Self {
        Self { header: None, body }
    }

    /// Add the username/password header block.
    pub fn with_credentials(mut self, credentials: &Credentials) -> Self {
        self.header = Some(
            Element::new("Credentials")
                .field("Username", credentials.username())
                .field("Password", credentials.password()),
        );
        self
    }

    /// Render the full document. Never fails.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(512);
        out.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        out.push_str(&format!(
            r#"<soapenv:Envelope xmlns:soapenv="{SOAP_ENV_NAMESPACE}" xmlns:{SERVICE_PREFIX}="{SERVICE_NAMESPACE}">"#
        ));
        out.push_str("<soapenv:Header>");
        if let Some(header) = &self.header {
            header.write_to(Some(SERVICE_PREFIX), &mut out);
        }
        out.push_str("</soapenv:Header>");
        out.push_str("<soapenv:Body>");
        self.body.write_to(Some(SERVICE_PREFIX), &mut out);
        out.push_str("</soapenv:Body>");
        out.push_str("</soapenv:Envelope>");
        out
    }
}

//! Response schema descriptions.

/// Body encoding of a request/response pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    Xml,
    Json,
}

impl WireFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            WireFormat::Xml => "text/xml; charset=utf-8",
            WireFormat::Json => "application/json",
        }
    }
}

/// Where the classifier finds each section of a response.
///
/// Tag lookups are case-insensitive, so the same defaults serve the XML
/// (`Status`) and JSON (`status`) spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSchema {
    pub format: WireFormat,
    /// Element wrapping the response inside the SOAP body, or the top-level
    /// JSON key. `None` takes the only body child (XML) or the root (JSON).
    pub response_tag: Option<&'static str>,
    pub status_tag: &'static str,
    pub indicator_tag: &'static str,
    pub messages_tag: &'static str,
    pub transaction_tag: &'static str,
    pub detail_tag: &'static str,
}

impl ResponseSchema {
    const fn base(format: WireFormat, response_tag: Option<&'static str>) -> Self {
        Self {
            format,
            response_tag,
            status_tag: "Status",
            indicator_tag: "Result",
            messages_tag: "Messages",
            transaction_tag: "TransactionId",
            detail_tag: "Detail",
        }
    }

    /// SOAP response wrapped in `response_tag`.
    pub const fn xml(response_tag: &'static str) -> Self {
        Self::base(WireFormat::Xml, Some(response_tag))
    }

    /// JSON response whose root object holds the sections.
    pub const fn json() -> Self {
        Self::base(WireFormat::Json, None)
    }

    pub const fn with_detail_tag(mut self, tag: &'static str) -> Self {
        self.detail_tag = tag;
        self
    }

    pub const fn with_status_tags(mut self, status: &'static str, indicator: &'static str) -> Self {
        self.status_tag = status;
        self.indicator_tag = indicator;
        self
    }
}

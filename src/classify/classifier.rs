//! Generic envelope classification.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::classify::error::MalformedResponse;
use crate::classify::outcome::{Outcome, GENERIC_FAILURE};
use crate::classify::schema::{ResponseSchema, WireFormat};
use crate::classify::tree::parse_xml;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The one success rule shared by every operation.
pub fn is_success_indicator(indicator: &str) -> bool {
    indicator.trim().eq_ignore_ascii_case("success")
}

/// Classify a raw response body against `schema`.
///
/// Structural failures are errors; everything else, including business
/// rejections and unrecognised shapes, is an [`Outcome`].
pub fn classify<T>(raw: &[u8], schema: &ResponseSchema) -> Result<Outcome<T>, MalformedResponse>
where
    T: DeserializeOwned,
{
    let text = decode(raw)?;

    match schema.format {
        WireFormat::Xml => {
            let document = parse_xml(text)?;
            match locate_xml(&document.root_name, &document.root, schema) {
                Located::Response(response) => classify_response(response, schema),
                Located::Fault(messages) => Ok(Outcome::failure(messages, None)),
                Located::Unknown => Ok(Outcome::unknown_shape()),
            }
        }
        WireFormat::Json => {
            let root: Value = serde_json::from_str(text)?;
            match locate_json(&root, schema) {
                Some(response) => classify_response(response, schema),
                None => Ok(Outcome::unknown_shape()),
            }
        }
    }
}

fn decode(raw: &[u8]) -> Result<&str, MalformedResponse> {
    let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    let text = std::str::from_utf8(raw)?;
    if text.trim().is_empty() {
        return Err(MalformedResponse::Empty);
    }
    Ok(text)
}

enum Located<'a> {
    Response(&'a Value),
    Fault(Vec<String>),
    Unknown,
}

fn locate_xml<'a>(root_name: &str, root: &'a Value, schema: &ResponseSchema) -> Located<'a> {
    if root_name.eq_ignore_ascii_case("Envelope") {
        let Some(body) = field(root, "Body") else {
            return Located::Unknown;
        };
        if let Some(fault) = field(body, "Fault") {
            return Located::Fault(fault_messages(fault));
        }
        let response = match schema.response_tag {
            Some(tag) => field(body, tag),
            None => only_child(body),
        };
        return response.map_or(Located::Unknown, Located::Response);
    }

    // Some gateways strip the SOAP wrapper and return the response element bare.
    match schema.response_tag {
        Some(tag) if root_name.eq_ignore_ascii_case(tag) => Located::Response(root),
        _ => Located::Unknown,
    }
}

fn locate_json<'a>(root: &'a Value, schema: &ResponseSchema) -> Option<&'a Value> {
    if !root.is_object() {
        return None;
    }
    match schema.response_tag {
        Some(tag) => field(root, tag).filter(|v| v.is_object()),
        None => Some(root),
    }
}

fn classify_response<T>(response: &Value, schema: &ResponseSchema) -> Result<Outcome<T>, MalformedResponse>
where
    T: DeserializeOwned,
{
    let Some(status) = field(response, schema.status_tag) else {
        tracing::debug!("Response has no status section");
        return Ok(Outcome::missing_status());
    };

    let (indicator, messages, transaction_id) = match status {
        Value::Object(_) => (
            field(status, schema.indicator_tag).map(scalar_text).unwrap_or_default(),
            field(status, schema.messages_tag).map(collect_messages).unwrap_or_default(),
            field(status, schema.transaction_tag)
                .map(scalar_text)
                .filter(|id| !id.is_empty()),
        ),
        other => (scalar_text(other), Vec::new(), None),
    };

    if !is_success_indicator(&indicator) {
        tracing::debug!(indicator = %indicator, "Business failure reported");
        let messages = if messages.is_empty() {
            vec![GENERIC_FAILURE.to_string()]
        } else {
            messages
        };
        return Ok(Outcome::failure(messages, transaction_id));
    }

    match field(response, schema.detail_tag).filter(|detail| !is_empty_section(detail)) {
        None => Ok(Outcome::without_detail(messages, transaction_id)),
        Some(detail) => {
            let detail = T::deserialize(detail).map_err(|source| MalformedResponse::Detail {
                type_name: std::any::type_name::<T>(),
                source,
            })?;
            Ok(Outcome::with_detail(detail, messages, transaction_id))
        }
    }
}

/// Case-insensitive object lookup, preferring an exact match.
fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let object = value.as_object()?;
    object.get(key).or_else(|| {
        object
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

fn only_child(value: &Value) -> Option<&Value> {
    let object = value.as_object()?;
    if object.len() == 1 {
        object.values().next()
    } else {
        None
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn collect_messages(value: &Value) -> Vec<String> {
    let mut messages = Vec::new();
    push_messages(value, &mut messages);
    messages
}

fn push_messages(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| push_messages(item, out)),
        Value::Object(map) => map.values().for_each(|item| push_messages(item, out)),
        Value::Null => {}
        scalar => {
            let text = scalar_text(scalar);
            if !text.is_empty() {
                out.push(text);
            }
        }
    }
}

fn fault_messages(fault: &Value) -> Vec<String> {
    let messages = ["faultstring", "Reason"]
        .iter()
        .find_map(|key| field(fault, key))
        .map(collect_messages)
        .unwrap_or_default();

    if messages.is_empty() {
        vec!["SOAP fault".to_string()]
    } else {
        messages
    }
}

fn is_empty_section(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

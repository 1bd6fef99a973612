//! XML document to value tree.
//!
//! Elements are keyed by local name (namespace prefixes dropped). A leaf
//! becomes its trimmed text, an element with children becomes an object, and
//! repeated sibling names collapse into an array in document order.
//! Attributes are ignored except `xsi:nil="true"`, which yields `null`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::classify::error::MalformedResponse;

/// A parsed document: root element name and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub root_name: String,
    pub root: Value,
}

struct Frame {
    name: String,
    nil: bool,
    text: String,
    children: Vec<(String, Value)>,
}

impl Frame {
    fn open(start: &BytesStart<'_>, position: u64) -> Result<Self, MalformedResponse> {
        let name = std::str::from_utf8(start.local_name().as_ref())
            .map_err(|e| xml_error(position, e))?
            .to_string();
        let nil = start
            .attributes()
            .flatten()
            .any(|attr| attr.key.local_name().as_ref() == b"nil" && attr.value.as_ref() == b"true");

        Ok(Self {
            name,
            nil,
            text: String::new(),
            children: Vec::new(),
        })
    }

    fn close(self) -> (String, Value) {
        if self.children.is_empty() {
            let value = if self.nil {
                Value::Null
            } else {
                Value::String(self.text.trim().to_string())
            };
            return (self.name, value);
        }

        let mut map = Map::new();
        for (key, value) in self.children {
            match map.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(mut slot) => {
                    let existing = slot.get_mut();
                    if let Value::Array(items) = existing {
                        items.push(value);
                    } else {
                        let first = existing.take();
                        *existing = Value::Array(vec![first, value]);
                    }
                }
            }
        }
        (self.name, Value::Object(map))
    }
}

fn xml_error(position: u64, error: impl std::fmt::Display) -> MalformedResponse {
    MalformedResponse::Xml {
        position,
        message: error.to_string(),
    }
}

/// Parse `text` into a value tree, rejecting anything not well-formed.
pub fn parse_xml(text: &str) -> Result<XmlDocument, MalformedResponse> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let position = reader.buffer_position() as u64;
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(Frame::open(&start, position)?),
            Ok(Event::Empty(start)) => {
                let element = Frame::open(&start, position)?.close();
                attach(element, &mut stack, &mut root, position)?;
            }
            Ok(Event::End(_)) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| xml_error(position, "closing tag without an open element"))?;
                attach(frame.close(), &mut stack, &mut root, position)?;
            }
            Ok(Event::Text(text)) => {
                if let Some(frame) = stack.last_mut() {
                    let raw = std::str::from_utf8(&text).map_err(|e| xml_error(position, e))?;
                    let unescaped =
                        quick_xml::escape::unescape(raw).map_err(|e| xml_error(position, e))?;
                    frame.text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(frame) = stack.last_mut() {
                    let raw = std::str::from_utf8(&data).map_err(|e| xml_error(position, e))?;
                    frame.text.push_str(raw);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_error(position, e)),
        }
    }

    let end = reader.buffer_position() as u64;
    if let Some(open) = stack.last() {
        return Err(xml_error(end, format!("unexpected end of document inside <{}>", open.name)));
    }

    let (root_name, root) = root.ok_or_else(|| xml_error(end, "document has no root element"))?;
    Ok(XmlDocument { root_name, root })
}

fn attach(
    element: (String, Value),
    stack: &mut [Frame],
    root: &mut Option<(String, Value)>,
    position: u64,
) -> Result<(), MalformedResponse> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(xml_error(position, "more than one root element"));
        }
        None => *root = Some(element),
    }
    Ok(())
}

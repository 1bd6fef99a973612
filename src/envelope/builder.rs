//! Structured XML element builder.

use std::fmt::Write;

use quick_xml::escape::escape;

/// An XML element with either text content or child elements.
///
/// Text is escaped when written, so parameter values can never break out of
/// their slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    content: Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Text(String),
    Children(Vec<Element>),
}

impl Element {
    /// Create an element that will hold child elements.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Content::Children(Vec::new()),
        }
    }

    /// Create a leaf element holding `value` as text.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Content::Text(value.into()),
        }
    }

    /// Append a child element.
    ///
    /// Appending to a text element replaces its text with children.
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::Text(_) => self.content = Content::Children(vec![child]),
        }
        self
    }

    /// Append a leaf child `<name>value</name>`.
    pub fn field(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.child(Element::text(name, value))
    }

    /// Append a leaf child only when `value` is present.
    pub fn optional_field(self, name: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => self,
        }
    }

    /// Append every element of `children` in order.
    pub fn children<I>(self, children: I) -> Self
    where
        I: IntoIterator<Item = Element>,
    {
        children.into_iter().fold(self, Element::child)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write the element, qualifying every name with `prefix` when given.
    pub fn write_to(&self, prefix: Option<&str>, out: &mut String) {
        let name = qualify(prefix, &self.name);
        match &self.content {
            Content::Text(value) => {
                let _ = write!(out, "<{name}>{}</{name}>", escape(value.as_str()));
            }
            Content::Children(children) => {
                let _ = write!(out, "<{name}>");
                for child in children {
                    child.write_to(prefix, out);
                }
                let _ = write!(out, "</{name}>");
            }
        }
    }

    /// Render the element without a prefix.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(None, &mut out);
        out
    }
}

fn qualify(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}:{name}"),
        None => name.to_string(),
    }
}

//! Minimal XML element tree and pretty-printer.
//!
//! Elements keep attributes in insertion order. Rendering indents children by
//! two spaces per level. An element with text content keeps that text verbatim
//! and its closing tag follows the text directly. Childless, textless elements
//! are written self-closing (`<failure ... />`).

use std::fmt::Write as _;
use std::io::{self, Write};

const INDENT: &str = "  ";

/// XML declaration written at the top of every document.
pub const DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    pub text: Option<String>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Set an attribute, replacing an earlier value but keeping its position.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct children with the given tag.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Number of elements with the given tag anywhere below this one.
    pub fn count_descendants(&self, name: &str) -> usize {
        self.children
            .iter()
            .map(|c| usize::from(c.name == name) + c.count_descendants(name))
            .sum()
    }

    /// Render the element (without declaration) as indented text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let pad = INDENT.repeat(depth);
        let _ = write!(out, "{}<{}", pad, self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", key, escape_attr(value));
        }

        if self.children.is_empty() && self.text.is_none() {
            out.push_str(" />\n");
            return;
        }

        out.push('>');
        if let Some(ref text) = self.text {
            out.push_str(&escape_text(text));
        }
        if !self.children.is_empty() {
            out.push('\n');
            for child in &self.children {
                child.render_into(out, depth + 1);
            }
            out.push_str(&pad);
        }
        let _ = writeln!(out, "</{}>", self.name);
    }
}

/// Write a complete document: declaration followed by the rendered root.
///
/// The document is rendered in memory first, so the writer only ever sees a
/// single complete buffer. Nothing follows the root's closing tag.
pub fn write_document<W: Write>(root: &XmlElement, mut writer: W) -> io::Result<()> {
    let rendered = root.render();
    let document = format!("{}\n{}", DECLARATION, rendered.trim_end_matches('\n'));
    writer.write_all(document.as_bytes())?;
    writer.flush()
}

/// Escape character data.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape an attribute value for a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#09;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

//! Owned XML tree used by every datastream mapper.
//!
//! Legacy datastreams are small, so the mappers work on a fully materialized
//! tree instead of an event stream. Parsing and serialization go through
//! quick-xml; values are stored unescaped and escaped exactly once on write.
//!
//! ```text
//! XmlElement
//! ├── name: "titleInfo"
//! ├── attributes: IndexMap<String, String>  (document order)
//! └── children: Vec<XmlNode>                (Element | Text)
//! ```

use std::io::Cursor;

use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{MappingError, Result};

/// A node in an XML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Qualified name as written in the document (may carry a prefix).
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Element holding a single text child.
    pub fn text_element(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).with_text(text)
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the attribute only when a value is present.
    pub fn with_opt_attr(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(v) = value {
            self.attributes.insert(key.to_string(), v.to_string());
        }
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Name without any namespace prefix.
    pub fn local_name(&self) -> &str {
        local(&self.name)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(key)
    }

    /// Concatenated direct text content, trimmed.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            if let XmlNode::Text(t) = node {
                out.push_str(t);
            }
        }
        out.trim().to_string()
    }

    /// Direct text content, or `None` when blank.
    pub fn text_opt(&self) -> Option<String> {
        let text = self.text();
        if text.is_empty() { None } else { Some(text) }
    }

    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// Child elements whose local name matches.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |e| e.local_name() == name)
    }

    /// First child element whose local name matches.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.local_name() == name)
    }

    /// Text of the first matching child, if non-blank.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).and_then(XmlElement::text_opt)
    }

    pub fn has_element_children(&self) -> bool {
        self.elements().next().is_some()
    }

    /// No attributes, no element children, and no non-blank text.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && !self.has_element_children() && self.text().is_empty()
    }

    /// Keep element children matching the predicate; text nodes are kept.
    pub fn retain_elements(&mut self, mut keep: impl FnMut(&XmlElement) -> bool) {
        self.children.retain(|node| match node {
            XmlNode::Element(e) => keep(e),
            XmlNode::Text(_) => true,
        });
    }

    // ------------------------------------------------------------------
    // Parsing and serialization
    // ------------------------------------------------------------------

    /// Parse a document and return its root element.
    pub fn parse(input: &str) -> Result<XmlElement> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => stack.push(start_element(e)?),
                Ok(Event::Empty(ref e)) => {
                    let element = start_element(e)?;
                    attach(element, &mut stack, &mut root)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| MappingError::xml("Unbalanced end tag"))?;
                    attach(element, &mut stack, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| MappingError::xml(format!("Text error: {e}")))?;
                    if !text.trim().is_empty() {
                        if let Some(parent) = stack.last_mut() {
                            parent.children.push(XmlNode::Text(text.into_owned()));
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8(e.into_inner().into_owned())
                        .map_err(|e| MappingError::xml(format!("Invalid UTF-8 in CDATA: {e}")))?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::Text(text));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(MappingError::xml(format!(
                        "XML parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(MappingError::xml("Unclosed element at end of document"));
        }
        root.ok_or_else(|| MappingError::xml("Document has no root element"))
    }

    /// Serialize with an XML declaration and two-space indentation.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| MappingError::xml(format!("Write error: {e}")))?;
        self.write_into(&mut writer)?;
        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(|e| MappingError::xml(format!("Invalid UTF-8: {e}")))
    }

    fn write_into<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            writer
                .write_event(Event::Empty(start))
                .map_err(|e| MappingError::xml(format!("Write error: {e}")))?;
            return Ok(());
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| MappingError::xml(format!("Write error: {e}")))?;
        for child in &self.children {
            match child {
                XmlNode::Element(e) => e.write_into(writer)?,
                XmlNode::Text(t) => writer
                    .write_event(Event::Text(BytesText::new(t)))
                    .map_err(|e| MappingError::xml(format!("Write error: {e}")))?,
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(|e| MappingError::xml(format!("Write error: {e}")))?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Equivalence
    // ------------------------------------------------------------------

    /// Order-insensitive structural key: attributes and children are sorted,
    /// text is whitespace-collapsed.
    pub fn canonical_key(&self) -> String {
        let mut attrs: Vec<(&String, &String)> = self.attributes.iter().collect();
        attrs.sort();
        let mut children: Vec<String> = self.elements().map(XmlElement::canonical_key).collect();
        children.sort();

        let mut key = format!("<{}", self.name);
        for (k, v) in attrs {
            key.push_str(&format!(" {k}={v:?}"));
        }
        key.push('>');
        key.push_str(&collapse_whitespace(&self.text()));
        for child in children {
            key.push_str(&child);
        }
        key.push_str("</>");
        key
    }

    /// Documents are equivalent when they differ only in element order,
    /// attribute order, or insignificant whitespace.
    pub fn equivalent(&self, other: &XmlElement) -> bool {
        self.canonical_key() == other.canonical_key()
    }

    /// Human-readable summary of why two documents are not equivalent.
    pub fn describe_difference(&self, other: &XmlElement) -> Option<String> {
        if self.equivalent(other) {
            return None;
        }
        if self.name != other.name {
            return Some(format!("root <{}> vs <{}>", self.name, other.name));
        }
        let mut parts = Vec::new();
        if self.attributes != other.attributes {
            parts.push(format!(
                "attributes {:?} vs {:?}",
                self.attributes, other.attributes
            ));
        }
        if collapse_whitespace(&self.text()) != collapse_whitespace(&other.text()) {
            parts.push(format!("text {:?} vs {:?}", self.text(), other.text()));
        }

        let mut theirs: Vec<String> = other.elements().map(XmlElement::canonical_key).collect();
        let mut missing = Vec::new();
        for child in self.elements() {
            let key = child.canonical_key();
            match theirs.iter().position(|k| *k == key) {
                Some(idx) => {
                    theirs.swap_remove(idx);
                }
                None => missing.push(key),
            }
        }
        if !missing.is_empty() {
            parts.push(format!("only in expected: {}", missing.join(", ")));
        }
        if !theirs.is_empty() {
            parts.push(format!("only in actual: {}", theirs.join(", ")));
        }
        Some(parts.join("; "))
    }
}

fn start_element(e: &BytesStart<'_>) -> Result<XmlElement> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|e| MappingError::xml(format!("Invalid tag name: {e}")))?
        .to_string();
    let mut element = XmlElement::new(name);
    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| MappingError::xml(format!("Attribute error: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| MappingError::xml(format!("Attribute key error: {e}")))?;
        let value = attr
            .unescape_value()
            .map_err(|e| MappingError::xml(format!("Attribute value error: {e}")))?;
        element
            .attributes
            .insert(key.to_string(), value.into_owned());
    }
    Ok(element)
}

fn attach(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Element(element));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(MappingError::xml("Document has more than one root element")),
    }
}

/// Strip a namespace prefix from a qualified name.
pub fn local(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, l)| l)
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_document() {
        let doc = XmlElement::parse(
            r#"<?xml version="1.0"?><mods version="3.7"><titleInfo usage="primary"><title>Hello</title></titleInfo></mods>"#,
        )
        .unwrap();
        assert_eq!(doc.name, "mods");
        assert_eq!(doc.attr("version"), Some("3.7"));
        let title = doc.child("titleInfo").unwrap();
        assert_eq!(title.attr("usage"), Some("primary"));
        assert_eq!(title.child_text("title").as_deref(), Some("Hello"));
    }

    #[test]
    fn test_parse_unescapes_once() {
        let doc = XmlElement::parse("<note>Fish &amp; chips &#233;t&#xE9;</note>").unwrap();
        assert_eq!(doc.text(), "Fish & chips été");
    }

    #[test]
    fn test_write_escapes_once() {
        let doc = XmlElement::text_element("note", "A &amp; B < C");
        let out = doc.to_xml_string().unwrap();
        assert!(out.contains("A &amp;amp; B &lt; C"), "Got:\n{out}");

        let reparsed = XmlElement::parse(&out).unwrap();
        assert_eq!(reparsed.text(), "A &amp; B < C");
    }

    #[test]
    fn test_write_preserves_non_ascii() {
        let doc = XmlElement::text_element("title", "Café Ζ");
        let out = doc.to_xml_string().unwrap();
        assert!(out.contains("Café Ζ"));
    }

    #[test]
    fn test_parse_rejects_multiple_roots() {
        assert!(XmlElement::parse("<a/><b/>").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(XmlElement::parse("<a><b></a>").is_err());
        assert!(XmlElement::parse("").is_err());
    }

    #[test]
    fn test_equivalent_ignores_order_and_whitespace() {
        let a = XmlElement::parse(r#"<r><x a="1" b="2">one  two</x><y/></r>"#).unwrap();
        let b = XmlElement::parse("<r>\n  <y/>\n  <x b=\"2\" a=\"1\">one two</x>\n</r>").unwrap();
        assert!(a.equivalent(&b));
        assert!(a.describe_difference(&b).is_none());
    }

    #[test]
    fn test_describe_difference_lists_missing_children() {
        let a = XmlElement::parse("<r><x>1</x><y>2</y></r>").unwrap();
        let b = XmlElement::parse("<r><x>1</x></r>").unwrap();
        let diff = a.describe_difference(&b).unwrap();
        assert!(diff.contains("only in expected"), "{diff}");
    }

    #[test]
    fn test_children_named_matches_local_name() {
        let doc =
            XmlElement::parse(r#"<mods:mods xmlns:mods="x"><mods:note>n</mods:note></mods:mods>"#)
                .unwrap();
        assert_eq!(doc.local_name(), "mods");
        assert_eq!(doc.children_named("note").count(), 1);
    }

    #[test]
    fn test_child_outlives_borrowed_name() {
        let doc = XmlElement::parse("<r><x>1</x><y>2</y></r>").unwrap();
        let found = {
            let name = String::from("y");
            doc.child(&name)
        };
        assert_eq!(found.map(XmlElement::text).as_deref(), Some("2"));
    }

    #[test]
    fn test_remove_attr_keeps_order() {
        let mut e = XmlElement::new("a")
            .with_attr("x", "1")
            .with_attr("y", "2")
            .with_attr("z", "3");
        e.remove_attr("y");
        let keys: Vec<_> = e.attributes.keys().cloned().collect();
        assert_eq!(keys, vec!["x", "z"]);
    }
}

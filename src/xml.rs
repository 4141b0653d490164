//! Lossless XML element tree.
//!
//! Office parts are read into a generic tree so that markup the typed model
//! does not understand survives a load/save cycle untouched. Names are kept
//! qualified (`w:p`, `r:id`) exactly as they appear in the source.

use crate::error::{Error, Result};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;

/// An XML element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified element name
    pub name: String,

    /// Attributes in document order
    pub attributes: Vec<(String, String)>,

    /// Child nodes in document order
    pub children: Vec<Node>,
}

/// A node inside an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data (unescaped)
    Text(String),
    /// CDATA section
    CData(String),
    /// Comment
    Comment(String),
    /// Processing instruction
    ProcessingInstruction(String),
}

impl Element {
    /// Create an element without attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute and return self.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Add a child element and return self.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Add a text node and return self.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Get an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Iterate over child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Get the first child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// Get the first child element with the given name, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// Remove every child element with the given name.
    pub fn remove_child(&mut self, name: &str) {
        self.children
            .retain(|node| !matches!(node, Node::Element(e) if e.name == name));
    }

    /// Insert a child element, keeping children in the given schema order.
    ///
    /// An existing child with the same name is replaced in place. Children
    /// whose names are not listed in `order` are left where they are.
    pub fn set_child_ordered(&mut self, child: Element, order: &[&str]) {
        match self.position_of(&child.name) {
            Some(index) => self.children[index] = Node::Element(child),
            None => {
                self.insert_ordered(child, order);
            }
        }
    }

    /// Get the first child element with the given name, creating it in
    /// schema order when absent.
    pub fn ensure_child(&mut self, name: &str, order: &[&str]) -> &mut Element {
        let index = match self.position_of(name) {
            Some(index) => index,
            None => self.insert_ordered(Element::new(name), order),
        };
        match &mut self.children[index] {
            Node::Element(element) => element,
            _ => unreachable!("child {} holds an element", index),
        }
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|node| matches!(node, Node::Element(e) if e.name == name))
    }

    fn insert_ordered(&mut self, child: Element, order: &[&str]) -> usize {
        let rank = |name: &str| order.iter().position(|n| *n == name);
        let position = rank(&child.name).and_then(|own_rank| {
            self.children.iter().position(|node| match node {
                Node::Element(e) => rank(&e.name).is_some_and(|r| r > own_rank),
                _ => false,
            })
        });
        match position {
            Some(index) => {
                self.children.insert(index, Node::Element(child));
                index
            }
            None => {
                self.children.push(Node::Element(child));
                self.children.len() - 1
            }
        }
    }

    /// Concatenated character data of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for node in &element.children {
        match node {
            Node::Element(e) => collect_text(e, out),
            Node::Text(t) | Node::CData(t) => out.push_str(t),
            _ => {}
        }
    }
}

/// The XML declaration of a part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// XML version
    pub version: String,
    /// Declared encoding
    pub encoding: Option<String>,
    /// Standalone flag
    pub standalone: Option<String>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: Some("yes".to_string()),
        }
    }
}

/// A parsed XML part: optional declaration and a single root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    /// XML declaration, if the source had one
    pub declaration: Option<Declaration>,
    /// Root element
    pub root: Element,
}

impl XmlDocument {
    /// Wrap a root element with the standard Office declaration.
    pub fn new(root: Element) -> Self {
        Self {
            declaration: Some(Declaration::default()),
            root,
        }
    }

    /// Parse an XML part from text.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut declaration = None;
        let mut root = None;

        loop {
            match reader.read_event()? {
                Event::Decl(decl) => declaration = Some(read_declaration(&decl)?),
                Event::Start(start) => stack.push(read_start(&start)?),
                Event::Empty(start) => {
                    let element = read_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::Xml("unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(parent) = stack.last_mut() {
                        parent
                            .children
                            .push(Node::Text(text.unescape()?.into_owned()));
                    }
                }
                Event::CData(data) => {
                    if let Some(parent) = stack.last_mut() {
                        parent
                            .children
                            .push(Node::CData(utf8(&data.into_inner())?));
                    }
                }
                Event::Comment(comment) => {
                    if let Some(parent) = stack.last_mut() {
                        parent
                            .children
                            .push(Node::Comment(utf8(&comment.into_inner())?));
                    }
                }
                Event::PI(pi) => {
                    if let Some(parent) = stack.last_mut() {
                        parent
                            .children
                            .push(Node::ProcessingInstruction(utf8(&pi.into_inner())?));
                    }
                }
                Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::Xml(format!("unclosed element <{}>", open.name)));
        }
        let root = root.ok_or_else(|| Error::Xml("document has no root element".to_string()))?;

        Ok(Self { declaration, root })
    }

    /// Serialize the part back to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        if let Some(ref decl) = self.declaration {
            writer.write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )))?;
            writer.write_event(Event::Text(BytesText::from_escaped("\r\n")))?;
        }
        write_element(&mut writer, &self.root)?;
        Ok(writer.into_inner().into_inner())
    }
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| Error::Xml(format!("invalid UTF-8 in markup: {}", e)))
}

fn read_declaration(decl: &BytesDecl<'_>) -> Result<Declaration> {
    let version = utf8(&decl.version()?)?;
    let encoding = match decl.encoding() {
        Some(value) => Some(utf8(&value?)?),
        None => None,
    };
    let standalone = match decl.standalone() {
        Some(value) => Some(utf8(&value?)?),
        None => None,
    };
    Ok(Declaration {
        version,
        encoding,
        standalone,
    })
}

fn read_start(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(utf8(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr?;
        let key = utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::Xml(format!(
            "second root element <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for node in &element.children {
        match node {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            Node::CData(data) => writer.write_event(Event::CData(BytesCData::new(data.as_str())))?,
            Node::Comment(comment) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?
            }
            Node::ProcessingInstruction(pi) => {
                writer.write_event(Event::PI(BytesText::from_escaped(pi.as_str())))?
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_structure() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="urn:w"><w:body><w:p><w:r><w:t xml:space="preserve"> a &amp; b </w:t></w:r></w:p><w:sectPr/></w:body></w:document>"#;
        let doc = XmlDocument::parse(xml).unwrap();

        assert_eq!(doc.root.name, "w:document");
        assert_eq!(doc.root.attr("xmlns:w"), Some("urn:w"));
        let body = doc.root.child("w:body").unwrap();
        assert_eq!(body.elements().count(), 2);
        assert_eq!(body.text(), " a & b ");
        assert_eq!(doc.declaration.unwrap().standalone.as_deref(), Some("yes"));
    }

    #[test]
    fn test_write_escapes_text_and_attributes() {
        let root = Element::new("root")
            .with_attr("title", "a \"quoted\" <value>")
            .with_child(Element::new("item").with_text("x < y & z"));
        let bytes = XmlDocument::new(root.clone()).to_bytes().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("x &lt; y &amp; z"));
        let reparsed = XmlDocument::parse(&text).unwrap();
        assert_eq!(reparsed.root, root);
    }

    #[test]
    fn test_parse_rejects_unclosed() {
        let result = XmlDocument::parse("<a><b></b>");
        assert!(matches!(result, Err(Error::Xml(_))));
    }

    #[test]
    fn test_set_child_ordered() {
        let order = ["a", "b", "c", "d"];
        let mut parent = Element::new("p")
            .with_child(Element::new("a"))
            .with_child(Element::new("d"));

        parent.set_child_ordered(Element::new("c"), &order);
        parent.set_child_ordered(Element::new("b"), &order);
        parent.set_child_ordered(Element::new("c").with_attr("v", "1"), &order);

        let names: Vec<_> = parent.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
        assert_eq!(parent.child("c").unwrap().attr("v"), Some("1"));
    }

    #[test]
    fn test_ensure_child_and_remove() {
        let mut parent = Element::new("p");
        parent.ensure_child("x", &["x"]).set_attr("k", "v");
        assert_eq!(parent.child("x").unwrap().attr("k"), Some("v"));

        parent.remove_child("x");
        assert!(parent.child("x").is_none());
    }
}

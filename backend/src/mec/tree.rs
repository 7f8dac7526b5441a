//! Immutable element tree and its indented serialization.
//!
//! Elements are assembled bottom-up with consuming builder methods, so the
//! order children are declared in is the order they are written in.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{BuildError, BuildResult};

/// An XML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append `child` only when it is `Some`.
    pub fn child_opt(self, child: Option<Element>) -> Self {
        match child {
            Some(c) => self.child(c),
            None => self,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn child_elements(&self) -> &[Element] {
        &self.children
    }

    /// Direct children named `name`.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First direct child named `name`.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.as_deref().map_or(true, str::is_empty)
    }
}

/// Serialize `root` with an XML declaration and two-space indentation.
///
/// Elements without children and without text are written self-closing.
/// Text is written inline with its element.
pub fn to_xml_string(root: &Element) -> BuildResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(serialize_error)?;
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(serialize_error)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> BuildResult<()> {
    let start = BytesStart::new(element.name.as_str()).with_attributes(
        element
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str())),
    );

    if element.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(serialize_error);
    }

    writer
        .write_event(Event::Start(start))
        .map_err(serialize_error)?;
    if let Some(text) = element.text.as_deref().filter(|t| !t.is_empty()) {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(serialize_error)?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(serialize_error)
}

fn serialize_error(err: impl std::fmt::Display) -> BuildError {
    BuildError::Serialize(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_elements_indent_by_two() {
        let root = Element::new("a").child(Element::new("b").text("hi")).child(Element::new("c"));
        let xml = to_xml_string(&root).unwrap();

        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<a>\n  <b>hi</b>\n  <c/>\n</a>\n"
        );
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let root = Element::new("a")
            .attr("title", "Tom & \"Jerry\"")
            .text("1 < 2 & 3 > 2");
        let xml = to_xml_string(&root).unwrap();

        assert!(xml.contains("title=\"Tom &amp; &quot;Jerry&quot;\""));
        assert!(xml.contains("1 &lt; 2 &amp; 3 &gt; 2"));
    }

    #[test]
    fn test_empty_text_is_self_closing() {
        let xml = to_xml_string(&Element::new("md:TitleSort").text("")).unwrap();
        assert!(xml.contains("<md:TitleSort/>"));
    }

    #[test]
    fn test_whitespace_body_is_kept() {
        let xml = to_xml_string(&Element::new("md:Genre").attr("id", "1234").text(" ")).unwrap();
        assert!(xml.contains("<md:Genre id=\"1234\"> </md:Genre>"));
    }

    #[test]
    fn test_lookup_helpers() {
        let root = Element::new("r")
            .child(Element::new("x").attr("k", "1"))
            .child_opt(None)
            .child(Element::new("x").attr("k", "2"));

        assert_eq!(root.find_all("x").count(), 2);
        assert_eq!(root.find("x").and_then(|x| x.attribute("k")), Some("1"));
        assert!(root.find("y").is_none());
    }
}

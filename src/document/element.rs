//! In-memory document tree and its XML encoding.

use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, Event},
};

use crate::foundation::error::{FlameError, FlameResult};

/// One document node: a tag, ordered attributes and child nodes.
///
/// Text content is not modeled; flame documents carry everything in attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub tag: String,
    /// Attributes in document order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element without attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Attribute value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Builder form of [`Element::set`].
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Append a child node.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Parse a whole XML document into its root element.
    pub fn parse_str(text: &str) -> FlameResult<Element> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = match reader.read_event() {
                Ok(ev) => ev,
                Err(e) => {
                    return Err(FlameError::format(format!(
                        "malformed document near byte {}: {e}",
                        reader.buffer_position()
                    )));
                }
            };
            match event {
                Event::Start(start) => stack.push(element_from_start(&start)?),
                Event::Empty(start) => {
                    let el = element_from_start(&start)?;
                    attach(&mut stack, &mut root, el)?;
                }
                Event::End(_) => {
                    let el = stack
                        .pop()
                        .ok_or_else(|| FlameError::format("unexpected closing tag"))?;
                    attach(&mut stack, &mut root, el)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(FlameError::format(format!(
                "element <{}> is never closed",
                open.tag
            )));
        }
        root.ok_or_else(|| FlameError::format("document has no root element"))
    }

    /// Encode this element and its subtree as indented XML.
    pub fn to_xml_string(&self) -> FlameResult<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.write_into(&mut writer)?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| FlameError::Other(anyhow::Error::new(e)))
    }

    fn write_into<W: std::io::Write>(&self, writer: &mut Writer<W>) -> FlameResult<()> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (k, v) in &self.attrs {
            start.push_attribute((k.as_str(), v.as_str()));
        }
        if self.children.is_empty() {
            writer.write_event(Event::Empty(start)).map_err(write_err)?;
            return Ok(());
        }
        writer.write_event(Event::Start(start)).map_err(write_err)?;
        for child in &self.children {
            child.write_into(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.tag.as_str())))
            .map_err(write_err)?;
        Ok(())
    }
}

fn element_from_start(start: &BytesStart<'_>) -> FlameResult<Element> {
    let mut el = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attr in start.attributes() {
        let attr = attr.map_err(|e| {
            FlameError::format(format!("malformed attribute in <{}>: {e}", el.tag))
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| {
                FlameError::format(format!("bad value for '{key}' in <{}>: {e}", el.tag))
            })?
            .into_owned();
        el.attrs.push((key, value));
    }
    Ok(el)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, el: Element) -> FlameResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(el);
    } else if root.is_none() {
        *root = Some(el);
    } else {
        return Err(FlameError::format("document has more than one root element"));
    }
    Ok(())
}

fn write_err(e: impl std::fmt::Display) -> FlameError {
    FlameError::Other(anyhow::anyhow!("failed to write document: {e}"))
}

#[cfg(test)]
#[path = "../../tests/unit/document/element.rs"]
mod tests;

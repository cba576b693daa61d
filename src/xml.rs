//! Namespace-agnostic XML element tree.

use crate::error::{Error, ParseError};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;
use std::str::FromStr;
use std::{fs, io};

/// An XML element with its namespace prefix stripped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    /// Local tag name.
    pub name: String,
    /// Attributes keyed by local name, in document order.
    pub attributes: IndexMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<Element>,
    /// Concatenated character data directly inside this element.
    pub text: String,
}

/// A parsed SVD document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// The root element, normally `<device>`.
    pub root: Element,
}

impl Element {
    /// Creates an empty element named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Returns the first child named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Returns all children named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Returns the trimmed text, or `None` if it is blank.
    pub fn text(&self) -> Option<&str> {
        let text = self.text.trim();
        (!text.is_empty()).then_some(text)
    }

    /// Returns the trimmed text of the first child named `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Element::text)
    }

    /// Returns the value of the attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Appends a child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    fn open(start: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Self, ParseError> {
        let decoder = reader.decoder();
        let mut element = Self::new(decoder.decode(start.local_name().as_ref())?);
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = attribute.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let name = decoder.decode(attribute.key.local_name().as_ref())?.into_owned();
            let value = attribute.decode_and_unescape_value(reader)?.into_owned();
            element.attributes.insert(name, value);
        }
        Ok(element)
    }
}

impl Document {
    /// Reads and parses the SVD file at `path`.
    ///
    /// The file is decoded with the encoding named in its XML declaration,
    /// UTF-8 if there is none.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let xml = fs::read(path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                Error::NotFound { path: path.to_owned() }
            } else {
                Error::io(path, err)
            }
        })?;
        Ok(Self::from_bytes(&xml)?)
    }

    /// Parses a document from raw bytes, honouring the declared encoding.
    pub fn from_bytes(xml: &[u8]) -> Result<Self, ParseError> {
        parse(Reader::from_reader(xml))
    }

    /// Returns the `<peripheral>` elements of the device in document order.
    pub fn peripherals(&self) -> impl Iterator<Item = &Element> + '_ {
        self.root.child("peripherals").into_iter().flat_map(|p| p.children_named("peripheral"))
    }
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        parse(Reader::from_str(xml))
    }
}

fn parse(mut reader: Reader<&[u8]>) -> Result<Document, ParseError> {
    let mut stack = Vec::<Element>::new();
    let mut root = None;
    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::open(&start, &reader)?),
            Event::Empty(start) => {
                close(Element::open(&start, &reader)?, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    close(element, &mut stack, &mut root)?;
                }
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&reader.decoder().decode(&data)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if let Some(element) = stack.pop() {
        return Err(ParseError::Unclosed(element.name));
    }
    root.map(|root| Document { root }).ok_or(ParseError::Empty)
}

fn close(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.push(element);
    } else if root.is_some() {
        return Err(ParseError::TrailingElement(element.name));
    } else {
        *root = Some(element);
    }
    Ok(())
}

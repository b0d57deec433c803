use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{
    fs::File,
    io::{BufRead, Read, Write},
    path::Path,
};

use crate::{
    error::Error,
    source::path::{DataPath, DataValue, PathElement},
    traits::{DataVisitor, Parser},
};

/// One XML element of a CLDR data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Trimmed text content; only meaningful for leaf elements.
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn to_path_element(&self) -> PathElement {
        PathElement {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

/// An in-memory CLDR data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CldrData {
    root: Element,
}

impl CldrData {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Walks the tree depth-first in document order, dispatching prefixes and values to
    /// `visitor` (see [`DataVisitor`]). The first error aborts the walk.
    pub fn accept<V: DataVisitor>(&self, visitor: &mut V) -> Result<(), Error> {
        let mut path = DataPath::default();
        walk(&self.root, &mut path, None, visitor)
    }

    /// Returns every leaf node in document order.
    pub fn values(&self) -> Vec<DataValue> {
        let mut out = Vec::new();
        let mut path = DataPath::default();
        collect_values(&self.root, &mut path, &mut out);
        out
    }
}

fn walk<V: DataVisitor>(
    element: &Element,
    path: &mut DataPath,
    scope: Option<&V::Scope>,
    visitor: &mut V,
) -> Result<(), Error> {
    path.push(element.to_path_element());
    let result = if element.is_leaf() {
        match scope {
            Some(scope) => visitor.visit_value(scope, &DataValue::new(path.clone(), &element.text)),
            None => Ok(()),
        }
    } else {
        visit_children(element, path, scope, visitor)
    };
    path.pop();
    result
}

fn visit_children<V: DataVisitor>(
    element: &Element,
    path: &mut DataPath,
    scope: Option<&V::Scope>,
    visitor: &mut V,
) -> Result<(), Error> {
    let installed = visitor.visit_prefix(path)?;
    let active = installed.as_ref().or(scope);
    for child in &element.children {
        walk(child, path, active, visitor)?;
    }
    Ok(())
}

fn collect_values(element: &Element, path: &mut DataPath, out: &mut Vec<DataValue>) {
    path.push(element.to_path_element());
    if element.is_leaf() {
        out.push(DataValue::new(path.clone(), &element.text));
    } else {
        for child in &element.children {
            collect_values(child, path, out);
        }
    }
    path.pop();
}

impl Parser for CldrData {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => stack.push(parse_element(e)?),
                Ok(Event::Empty(ref e)) => {
                    let element = parse_element(e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack.pop().ok_or_else(|| {
                        Error::InvalidResource("unbalanced closing tag".to_string())
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&e.unescape().map_err(Error::XmlParse)?);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(Error::InvalidResource("Unexpected EOF".to_string()));
        }
        root.map(CldrData::new)
            .ok_or_else(|| Error::InvalidResource("document has no root element".to_string()))
    }

    /// BOM-aware file reading; CLDR files are UTF-8 but may carry a byte order mark.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new_with_indent(&mut writer, b' ', 4);
        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_element(&mut xml_writer, &self.root)?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }
}

fn parse_element(e: &BytesStart) -> Result<Element, Error> {
    let mut element = Element::new(String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::InvalidResource(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.to_string();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), Error> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::InvalidResource(format!(
            "multiple root elements (found <{}>)",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn write_element<W: Write>(xml_writer: &mut Writer<W>, element: &Element) -> Result<(), Error> {
    let mut start = BytesStart::new(element.name.as_str());
    for (k, v) in &element.attributes {
        start.push_attribute((k.as_str(), v.as_str()));
    }
    if element.is_leaf() && element.text.is_empty() {
        xml_writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    xml_writer.write_event(Event::Start(start))?;
    if !element.text.is_empty() {
        xml_writer.write_event(Event::Text(BytesText::new(&element.text)))?;
    }
    for child in &element.children {
        write_element(xml_writer, child)?;
    }
    xml_writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

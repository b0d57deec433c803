use std::fmt::Display;

/// One element on a [`DataPath`], with its attributes in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl PathElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Display for PathElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for (k, v) in &self.attributes {
            write!(f, "[@{}=\"{}\"]", k, v)?;
        }
        Ok(())
    }
}

/// Structural path of a node, from the document root down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataPath {
    elements: Vec<PathElement>,
}

impl DataPath {
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    pub(crate) fn push(&mut self, element: PathElement) {
        self.elements.push(element);
    }

    pub(crate) fn pop(&mut self) -> Option<PathElement> {
        self.elements.pop()
    }
}

impl Display for DataPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/")?;
        for element in &self.elements {
            write!(f, "/{}", element)?;
        }
        Ok(())
    }
}

/// A leaf node: its full path plus any text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataValue {
    pub path: DataPath,
    pub text: String,
}

impl DataValue {
    pub fn new(path: DataPath, text: impl Into<String>) -> Self {
        Self {
            path,
            text: text.into(),
        }
    }

    pub fn path(&self) -> &DataPath {
        &self.path
    }
}

impl Display for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}={}", self.path, self.text)
        }
    }
}

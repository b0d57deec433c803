use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{error::Error, source::path::DataPath};

/// Identifies an attribute by its owning element name and attribute name, e.g. `key@alias`.
///
/// Lookups use the innermost element on a path with the given name, so a `key` attribute can
/// be read from the path of any `type` below it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct AttributeKey {
    pub element: String,
    pub attribute: String,
}

/// Shorthand for [`AttributeKey::new`].
pub fn key_of(element: &str, attribute: &str) -> AttributeKey {
    AttributeKey::new(element, attribute)
}

impl AttributeKey {
    pub fn new(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    pub fn optional_value_from<'a>(&self, path: &'a DataPath) -> Option<&'a str> {
        path.elements()
            .iter()
            .rev()
            .find(|e| e.name == self.element)
            .and_then(|e| e.attribute(&self.attribute))
    }

    /// Returns the attribute value, failing if it is absent.
    pub fn value_from(&self, path: &DataPath) -> Result<String, Error> {
        self.optional_value_from(path)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::data_contract(format!("missing required attribute {} in {}", self, path))
            })
    }

    /// Reads a `true`/`false` attribute, substituting `default` when absent.
    pub fn bool_value_from(&self, path: &DataPath, default: bool) -> Result<bool, Error> {
        match self.optional_value_from(path) {
            None => Ok(default),
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(other) => Err(Error::data_contract(format!(
                "invalid boolean value {:?} for {} in {}",
                other, self, path
            ))),
        }
    }

    /// Splits a whitespace-separated list attribute. Absent attributes yield an empty list.
    pub fn list_of_values_from(&self, path: &DataPath) -> Vec<String> {
        self.optional_value_from(path)
            .map(|v| v.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

impl Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.element, self.attribute)
    }
}

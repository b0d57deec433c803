//! Resource bundle values: a thin wrapper over a non-empty sequence of strings.

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RbValue {
    elements: Vec<String>,
}

impl RbValue {
    pub fn of<I, S>(elements: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let elements: Vec<String> = elements.into_iter().map(Into::into).collect();
        if elements.is_empty() {
            return Err(Error::InvalidValue(
                "resource bundle values cannot be empty".to_string(),
            ));
        }
        Ok(Self { elements })
    }

    /// Returns the (non zero) number of elements in this value.
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn element(&self, n: usize) -> Option<&str> {
        self.elements.get(n).map(String::as_str)
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(String::as_str)
    }
}

impl From<String> for RbValue {
    fn from(value: String) -> Self {
        Self {
            elements: vec![value],
        }
    }
}

impl From<&str> for RbValue {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl Display for RbValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.elements.join(", "))
    }
}

impl<'de> Deserialize<'de> for RbValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let elements = Vec::<String>::deserialize(deserializer)?;
        RbValue::of(elements).map_err(serde::de::Error::custom)
    }
}

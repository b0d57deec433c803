use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    source::path::{DataPath, PathElement},
};

lazy_static! {
    static ref ELEMENT_REGEX: Regex =
        Regex::new(r#"([A-Za-z_][\w.\-]*)((?:\[@[\w.\-:]+=(?:\*|"[^"]*")\])*)"#).unwrap();
    static ref ATTRIBUTE_REGEX: Regex =
        Regex::new(r#"\[@([\w.\-:]+)=(?:(\*)|"([^"]*)")\]"#).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeSelector {
    name: String,
    /// `None` matches any value, as long as the attribute is present.
    value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ElementSelector {
    name: String,
    attributes: Vec<AttributeSelector>,
}

impl ElementSelector {
    fn matches(&self, element: &PathElement) -> bool {
        self.name == element.name
            && self
                .attributes
                .iter()
                .all(|a| match (element.attribute(&a.name), &a.value) {
                    (Some(_), None) => true,
                    (Some(actual), Some(expected)) => actual == expected,
                    (None, _) => false,
                })
    }
}

/// A compiled structural path pattern such as `ldmlBCP47/keyword/key[@name=*]`.
///
/// `[@attr=*]` requires the attribute to be present; `[@attr="v"]` requires the exact value.
/// Attributes not named in the pattern are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatcher {
    pattern: String,
    selectors: Vec<ElementSelector>,
}

impl PathMatcher {
    pub fn of(pattern: &str) -> Result<Self, Error> {
        let body = pattern.trim_start_matches('/');
        let mut selectors = Vec::new();
        let mut rebuilt = Vec::new();

        for caps in ELEMENT_REGEX.captures_iter(body) {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            let attributes = ATTRIBUTE_REGEX
                .captures_iter(&caps[2])
                .map(|a| AttributeSelector {
                    name: a[1].to_string(),
                    value: a.get(3).map(|v| v.as_str().to_string()),
                })
                .collect();
            selectors.push(ElementSelector {
                name: caps[1].to_string(),
                attributes,
            });
            rebuilt.push(whole);
        }

        if selectors.is_empty() || rebuilt.join("/") != body {
            return Err(Error::InvalidPattern(format!(
                "malformed path pattern: {:?}",
                pattern
            )));
        }
        Ok(Self {
            pattern: pattern.to_string(),
            selectors,
        })
    }

    /// Name of the innermost element the pattern selects.
    pub fn last_element(&self) -> &str {
        self.selectors
            .last()
            .map(|s| s.name.as_str())
            .unwrap_or_default()
    }

    /// The first attribute the innermost element must carry with any value (`[@attr=*]`).
    pub fn required_attribute(&self) -> Option<&str> {
        self.selectors
            .last()?
            .attributes
            .iter()
            .find(|a| a.value.is_none())
            .map(|a| a.name.as_str())
    }

    /// Matches the whole path.
    pub fn matches(&self, path: &DataPath) -> bool {
        path.len() == self.selectors.len() && self.matches_tail(path)
    }

    /// Matches the trailing elements of the path.
    pub fn matches_suffix_of(&self, path: &DataPath) -> bool {
        path.len() >= self.selectors.len() && self.matches_tail(path)
    }

    fn matches_tail(&self, path: &DataPath) -> bool {
        let offset = path.len() - self.selectors.len();
        self.selectors
            .iter()
            .zip(&path.elements()[offset..])
            .all(|(s, e)| s.matches(e))
    }
}

impl Display for PathMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

//! Schema-level configuration for attribute-driven mappers.
//!
//! The defaults describe the CLDR `ldmlBCP47` keyword data; other schemas with the same
//! container/child shape can be mapped by loading a different configuration from JSON.

use serde::{Deserialize, Serialize};

use crate::{error::Error, source::AttributeKey, traits::Parser};

impl Parser for MapperConfig {
    /// Parse from any reader.
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(Error::Parse)
    }
}

/// An output sink declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SinkConfig {
    pub name: String,
    #[serde(default)]
    pub has_fallback: bool,
}

impl SinkConfig {
    pub fn new(name: impl Into<String>, has_fallback: bool) -> Self {
        Self {
            name: name.into(),
            has_fallback,
        }
    }
}

/// Routes every child of the container with this classification key into `sink`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Route {
    pub key: String,
    pub sink: SinkConfig,
}

/// An auxiliary attribute worth emitting under `{element}Info/{attribute}/...` when it is
/// present and differs from `default`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InfoAttribute {
    #[serde(flatten)]
    pub key: AttributeKey,
    #[serde(default)]
    pub default: String,
}

impl InfoAttribute {
    pub fn new(element: &str, attribute: &str, default: &str) -> Self {
        Self {
            key: AttributeKey::new(element, attribute),
            default: default.to_string(),
        }
    }
}

/// A fixed alias entry appended to the primary sink after mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CrossLink {
    pub path: String,
    pub target: String,
}

impl CrossLink {
    pub fn new(path: &str, target: &str) -> Self {
        Self {
            path: path.to_string(),
            target: target.to_string(),
        }
    }
}

/// Names of the per-node attributes the mapper reads besides the classification names, which
/// come from the `[@attr=*]` selectors of the key and type patterns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AttributeNames {
    pub alias: String,
    pub preferred: String,
    pub deprecated: String,
}

impl Default for AttributeNames {
    fn default() -> Self {
        Self {
            alias: "alias".to_string(),
            preferred: "preferred".to_string(),
            deprecated: "deprecated".to_string(),
        }
    }
}

/// Configuration for [`crate::Bcp47Mapper`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MapperConfig {
    /// Pattern for container ("key") nodes. Its innermost `[@attr=*]` selector names the
    /// classification attribute.
    pub key_pattern: String,

    /// Suffix pattern every child ("type") value must match. Its innermost `[@attr=*]`
    /// selector names the child attribute.
    pub type_pattern: String,

    #[serde(default)]
    pub attributes: AttributeNames,

    /// Receives all unrouted children plus the key map, info attributes and cross links.
    pub primary: SinkConfig,

    #[serde(default)]
    pub routes: Vec<Route>,

    #[serde(default)]
    pub info_attributes: Vec<InfoAttribute>,

    #[serde(default)]
    pub cross_links: Vec<CrossLink>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            key_pattern: "ldmlBCP47/keyword/key[@name=*]".to_string(),
            type_pattern: "type[@name=*]".to_string(),
            attributes: AttributeNames::default(),
            primary: SinkConfig::new("keyTypeData", false),
            routes: vec![Route {
                key: "tz".to_string(),
                sink: SinkConfig::new("timezoneTypes", false),
            }],
            info_attributes: vec![
                InfoAttribute::new("key", "valueType", ""),
                InfoAttribute::new("key", "deprecated", "false"),
                InfoAttribute::new("type", "deprecated", "false"),
            ],
            cross_links: vec![
                CrossLink::new(
                    "typeAlias/timezone:alias",
                    "/ICUDATA/timezoneTypes/typeAlias/timezone",
                ),
                CrossLink::new(
                    "typeMap/timezone:alias",
                    "/ICUDATA/timezoneTypes/typeMap/timezone",
                ),
                CrossLink::new("bcpTypeAlias/tz:alias", "/ICUDATA/timezoneTypes/bcpTypeAlias/tz"),
            ],
        }
    }
}

impl MapperConfig {
    /// Creates the default (BCP-47 keyword) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_primary(mut self, sink: SinkConfig) -> Self {
        self.primary = sink;
        self
    }

    /// Adds a route; a later route for the same key replaces the earlier one.
    pub fn with_route(mut self, key: impl Into<String>, sink: SinkConfig) -> Self {
        let key = key.into();
        self.routes.retain(|r| r.key != key);
        self.routes.push(Route { key, sink });
        self
    }

    pub fn with_attribute_names(mut self, attributes: AttributeNames) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_info_attributes(mut self, info_attributes: Vec<InfoAttribute>) -> Self {
        self.info_attributes = info_attributes;
        self
    }

    pub fn with_cross_links(mut self, cross_links: Vec<CrossLink>) -> Self {
        self.cross_links = cross_links;
        self
    }

    /// Sink names in output order: the primary sink, then each distinct routed sink.
    pub fn sinks(&self) -> Vec<&SinkConfig> {
        let mut sinks = vec![&self.primary];
        for route in &self.routes {
            if !sinks.iter().any(|s| s.name == route.sink.name) {
                sinks.push(&route.sink);
            }
        }
        sinks
    }

    /// Checks the parts that are not validated by compiling patterns and paths.
    pub fn validate(&self) -> Result<(), Error> {
        for sink in self.sinks() {
            if sink.name.is_empty() {
                return Err(Error::config("sink names must not be empty"));
            }
        }
        let names = [
            &self.attributes.alias,
            &self.attributes.preferred,
            &self.attributes.deprecated,
        ];
        if names.iter().any(|n| n.is_empty()) {
            return Err(Error::config("attribute names must not be empty"));
        }
        for route in &self.routes {
            if route.key.is_empty() {
                return Err(Error::config("route keys must not be empty"));
            }
            if route.sink.name == self.primary.name && route.sink != self.primary {
                return Err(Error::config(format!(
                    "route `{}` redeclares primary sink `{}` differently",
                    route.key, route.sink.name
                )));
            }
        }
        for (i, a) in self.routes.iter().enumerate() {
            if self.routes[..i].iter().any(|b| b.key == a.key) {
                return Err(Error::config(format!("duplicate route key `{}`", a.key)));
            }
            if self.routes[..i]
                .iter()
                .any(|b| b.sink.name == a.sink.name && b.sink != a.sink)
            {
                return Err(Error::config(format!(
                    "sink `{}` is declared with conflicting settings",
                    a.sink.name
                )));
            }
        }
        Ok(())
    }
}

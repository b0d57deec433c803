//! Mapper for BCP-47 keyword data, collected from paths matching:
//!
//! ```text
//! //ldmlBCP47/keyword/key[@name=*]/type[@name=*]
//! ```
//!
//! Types of the `tz` key go to `timezoneTypes`, everything else to `keyTypeData`, which also
//! receives the key map, auxiliary `keyInfo`/`typeInfo` attributes and aliases into
//! `timezoneTypes` once the walk is complete.

use std::collections::HashMap;

use tracing::{debug, info, trace};

use crate::{
    config::{InfoAttribute, MapperConfig},
    error::Error,
    icu_data::IcuData,
    mappers::deferred::{Deferred, SideTable},
    path::RbPath,
    source::{AttributeKey, CldrData, DataPath, DataValue, PathMatcher, key_of},
    traits::{DataVisitor, Mapper},
};

const KEY_MAP: &str = "keyMap";
const TYPE_MAP: &str = "typeMap";
const TYPE_ALIAS: &str = "typeAlias";
const BCP_TYPE_ALIAS: &str = "bcpTypeAlias";

/// Attribute keys and matchers compiled from a [`MapperConfig`].
#[derive(Debug, Clone)]
pub struct Schema {
    key_matcher: PathMatcher,
    type_matcher: PathMatcher,
    key_element: String,
    key_name: AttributeKey,
    key_alias: AttributeKey,
    // Deprecation of the data itself, not of the attribute. Values with a preferred
    // replacement must carry one of these.
    key_deprecated: AttributeKey,
    type_deprecated: AttributeKey,
    type_name: AttributeKey,
    type_aliases: AttributeKey,
    preferred_type_name: AttributeKey,
    info_attributes: Vec<InfoAttribute>,
}

impl Schema {
    fn new(config: &MapperConfig) -> Result<Self, Error> {
        let key_matcher = PathMatcher::of(&config.key_pattern)?;
        let type_matcher = PathMatcher::of(&config.type_pattern)?;
        let key_element = key_matcher.last_element().to_string();
        let type_element = type_matcher.last_element().to_string();
        let key_name = name_attribute(&key_matcher)?;
        let type_name = name_attribute(&type_matcher)?;
        let names = &config.attributes;
        Ok(Self {
            key_name: key_of(&key_element, key_name),
            key_alias: key_of(&key_element, &names.alias),
            key_deprecated: key_of(&key_element, &names.deprecated),
            type_deprecated: key_of(&type_element, &names.deprecated),
            type_name: key_of(&type_element, type_name),
            type_aliases: key_of(&type_element, &names.alias),
            preferred_type_name: key_of(&type_element, &names.preferred),
            info_attributes: config.info_attributes.clone(),
            key_element,
            key_matcher,
            type_matcher,
        })
    }
}

fn name_attribute(matcher: &PathMatcher) -> Result<&str, Error> {
    matcher.required_attribute().ok_or_else(|| {
        Error::config(format!(
            "pattern `{}` must select its last element by an `[@attr=*]` attribute",
            matcher
        ))
    })
}

/// The classification key of the enclosing container and the sink its children go to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyScope {
    pub key_name: String,
    pub sink: usize,
}

/// Maps BCP-47 keyword data (or any data of the same shape, see [`MapperConfig`]).
#[derive(Debug, Clone)]
pub struct Bcp47Mapper {
    schema: Schema,
    sinks: Vec<(String, bool)>,
    routes: HashMap<String, usize>,
    cross_links: Vec<(RbPath, String)>,
}

impl Bcp47Mapper {
    pub fn new(config: &MapperConfig) -> Result<Self, Error> {
        config.validate()?;
        let schema = Schema::new(config)?;

        let sinks: Vec<(String, bool)> = config
            .sinks()
            .into_iter()
            .map(|s| (s.name.clone(), s.has_fallback))
            .collect();
        let routes = config
            .routes
            .iter()
            .filter_map(|r| {
                sinks
                    .iter()
                    .position(|(name, _)| *name == r.sink.name)
                    .map(|i| (r.key.clone(), i))
            })
            .collect();
        let cross_links = config
            .cross_links
            .iter()
            .map(|l| Ok((RbPath::parse(&l.path)?, l.target.clone())))
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self {
            schema,
            sinks,
            routes,
            cross_links,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Maps several data files as one pass (BCP-47 data is split across files per key).
    pub fn process_all(&self, sources: &[CldrData]) -> Result<Vec<IcuData>, Error> {
        let mut visitor = Bcp47Visitor::new(self);
        for src in sources {
            src.accept(&mut visitor)?;
        }
        visitor.finish()
    }

    fn route(&self, key_name: &str) -> usize {
        self.routes.get(key_name).copied().unwrap_or(0)
    }
}

impl Mapper for Bcp47Mapper {
    fn process(&self, src: &CldrData) -> Result<Vec<IcuData>, Error> {
        self.process_all(std::slice::from_ref(src))
    }
}

/// Processes BCP-47 data with the default configuration.
///
/// Returns `keyTypeData` followed by `timezoneTypes`.
pub fn process(src: &CldrData) -> Result<Vec<IcuData>, Error> {
    Bcp47Mapper::new(&MapperConfig::default())?.process(src)
}

struct Bcp47Visitor<'a> {
    mapper: &'a Bcp47Mapper,
    sinks: Vec<IcuData>,
    side_table: SideTable,
}

impl<'a> Bcp47Visitor<'a> {
    fn new(mapper: &'a Bcp47Mapper) -> Self {
        Self {
            mapper,
            sinks: mapper
                .sinks
                .iter()
                .map(|(name, has_fallback)| IcuData::new(name.as_str(), *has_fallback))
                .collect(),
            side_table: SideTable::new(),
        }
    }

    // Emits the deferred key map and info entries, then the cross links, into the primary sink.
    fn finish(self) -> Result<Vec<IcuData>, Error> {
        let Bcp47Visitor {
            mapper,
            mut sinks,
            side_table,
        } = self;

        let primary = &mut sinks[0];
        for deferred in side_table {
            match deferred {
                Deferred::Info { path, value } => primary.add(path, value),
                Deferred::KeyAlias { key, alias } => {
                    // An empty value means the BCP-47 key is the same as the legacy key.
                    let value = if key == alias { String::new() } else { key };
                    primary.add(RbPath::of([KEY_MAP, alias.as_str()])?, value);
                }
            }
        }
        for (path, target) in &mapper.cross_links {
            primary.add(path.clone(), target.as_str());
        }

        for sink in &sinks {
            info!(sink = sink.name(), entries = sink.len(), "mapped data");
        }
        Ok(sinks)
    }
}

impl DataVisitor for Bcp47Visitor<'_> {
    type Scope = KeyScope;

    fn visit_prefix(&mut self, prefix: &DataPath) -> Result<Option<KeyScope>, Error> {
        let schema = &self.mapper.schema;
        if !schema.key_matcher.matches(prefix) {
            return Ok(None);
        }
        let key_name = schema.key_name.value_from(prefix)?.to_ascii_lowercase();
        let sink = self.mapper.route(&key_name);
        debug!(key = %key_name, sink = self.sinks[sink].name(), "selected sink");
        Ok(Some(KeyScope { key_name, sink }))
    }

    fn visit_value(&mut self, scope: &KeyScope, value: &DataValue) -> Result<(), Error> {
        collect_type(
            &self.mapper.schema,
            &scope.key_name,
            value,
            &mut self.sinks[scope.sink],
            &mut self.side_table,
        )
    }
}

/// Emits the entries for one child value of the container classified as `key_name` into
/// `sink`, recording key aliases and info attributes in `side_table`.
pub fn collect_type(
    schema: &Schema,
    key_name: &str,
    value: &DataValue,
    sink: &mut IcuData,
    side_table: &mut SideTable,
) -> Result<(), Error> {
    let path = &value.path;
    if !schema.type_matcher.matches_suffix_of(path) {
        return Err(Error::data_contract(format!(
            "unexpected child element: {}",
            path
        )));
    }
    let type_name = schema.type_name.value_from(path)?;

    // A value with a preferred replacement is only emitted as an alias.
    if let Some(preferred) = schema.preferred_type_name.optional_value_from(path) {
        let deprecated = schema.key_deprecated.bool_value_from(path, false)?
            || schema.type_deprecated.bool_value_from(path, false)?;
        if !deprecated {
            return Err(Error::data_contract(format!(
                "unexpected 'preferred' attribute for non-deprecated value: {}",
                value
            )));
        }
        sink.add(
            RbPath::of([BCP_TYPE_ALIAS, key_name, type_name.as_str()])?,
            preferred,
        );
        return Ok(());
    }

    let key_alias = match schema.key_alias.optional_value_from(path) {
        Some(alias) => alias.to_ascii_lowercase(),
        None => {
            debug!(key = key_name, "no alias for key, using the key name");
            key_name.to_string()
        }
    };
    side_table.record(Deferred::KeyAlias {
        key: key_name.to_string(),
        alias: key_alias.clone(),
    });

    let type_map = RbPath::of([TYPE_MAP, key_alias.as_str()])?;
    let type_aliases = schema.type_aliases.list_of_values_from(path);
    match type_aliases.split_first() {
        // An empty value means the same type name is used for BCP-47 and the legacy type.
        None => sink.add(type_map.extend_by([type_name.as_str()])?, ""),
        Some((main_alias, rest)) => {
            sink.add(
                type_map.extend_by([quote_alias(main_alias)])?,
                type_name.as_str(),
            );
            let type_alias = RbPath::of([TYPE_ALIAS, key_alias.as_str()])?;
            for alias in rest {
                sink.add(
                    type_alias.extend_by([quote_alias(alias)])?,
                    main_alias.as_str(),
                );
            }
        }
    }

    add_info_attributes(schema, key_name, &type_name, path, side_table)
}

// Only non-default values are kept. Container attributes are keyed by the key name alone,
// child attributes by key name and type name.
fn add_info_attributes(
    schema: &Schema,
    key_name: &str,
    type_name: &str,
    path: &DataPath,
    side_table: &mut SideTable,
) -> Result<(), Error> {
    for info in &schema.info_attributes {
        let Some(value) = info.key.optional_value_from(path) else {
            continue;
        };
        if value.is_empty() || value == info.default {
            continue;
        }
        let mut segments = vec![
            format!("{}Info", info.key.element),
            info.key.attribute.clone(),
            key_name.to_string(),
        ];
        if info.key.element != schema.key_element {
            segments.push(type_name.to_string());
        }
        let info_path = RbPath::of(segments)?;
        trace!(path = %info_path, value, "deferred info attribute");
        side_table.record(Deferred::Info {
            path: info_path,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Makes an alias usable as a path segment: `/` is replaced with `:` and the result quoted,
/// so `Foo/Bar` becomes `"Foo:Bar"`. Aliases without `/` are returned unchanged.
///
/// Timezone aliases (e.g. `America/Los_Angeles`) are the main case.
pub fn quote_alias(alias: &str) -> String {
    if alias.contains('/') {
        format!("\"{}\"", alias.replace('/', ":"))
    } else {
        alias.to_string()
    }
}

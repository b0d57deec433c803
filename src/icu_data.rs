//! Mutable ICU data collected during a mapping pass, ready to hand to a file writer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{error::Error, path::RbPath, traits::Parser, value::RbValue};

impl Parser for IcuData {
    /// Parse from any reader.
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(Error::Parse)
    }
}

/// The contents of one ICU data file.
///
/// Entries are kept in [`RbPath`] order regardless of the order they were added in, so the
/// output is reproducible no matter how the source data was traversed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IcuData {
    /// File name (without extension) of the ICU data file.
    name: String,

    /// Whether the generated file should fall back to a parent locale.
    has_fallback: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    file_comment: Vec<String>,

    #[serde(default)]
    entries: BTreeMap<RbPath, Vec<RbValue>>,
}

impl IcuData {
    pub fn new(name: impl Into<String>, has_fallback: bool) -> Self {
        Self {
            name: name.into(),
            has_fallback,
            file_comment: Vec::new(),
            entries: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_fallback(&self) -> bool {
        self.has_fallback
    }

    pub fn file_comment(&self) -> &[String] {
        &self.file_comment
    }

    pub fn set_file_comment<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_comment = lines.into_iter().map(Into::into).collect();
    }

    /// Appends a value under `path`; existing values are kept.
    pub fn add(&mut self, path: RbPath, value: impl Into<RbValue>) {
        self.entries.entry(path).or_default().push(value.into());
    }

    pub fn add_all(&mut self, path: RbPath, values: impl IntoIterator<Item = RbValue>) {
        self.entries.entry(path).or_default().extend(values);
    }

    /// Replaces all values under `path` with `value`.
    pub fn replace(&mut self, path: RbPath, value: impl Into<RbValue>) {
        self.entries.insert(path, vec![value.into()]);
    }

    pub fn get(&self, path: &RbPath) -> Option<&[RbValue]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &RbPath) -> bool {
        self.entries.contains_key(path)
    }

    /// Returns all paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &RbPath> {
        self.entries.keys()
    }

    /// Returns all entries in sorted path order.
    pub fn iter(&self) -> impl Iterator<Item = (&RbPath, &[RbValue])> {
        self.entries.iter().map(|(p, v)| (p, v.as_slice()))
    }

    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

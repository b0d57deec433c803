//! Resource bundle paths, used to identify entries in ICU data.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::Error,
    segment::{self, SUFFIX_SEPARATORS, SegmentKind},
};

/// An immutable, validated sequence of path segments.
///
/// The derived ordering (lexicographic over segments) is the order in which paths appear in
/// [`crate::IcuData`] and therefore in generated ICU data files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RbPath {
    segments: Vec<String>,
}

impl RbPath {
    /// Returns the empty path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a path from explicit segments, validating each one.
    pub fn of<I, S>(segments: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(segments.into_iter().map(Into::into).collect())
    }

    fn new(segments: Vec<String>) -> Result<Self, Error> {
        for s in &segments {
            segment::validate(s, &segments)?;
        }
        Ok(Self { segments })
    }

    /// Parses a `/`-separated path. A leading `/` is allowed, empty segments anywhere else are
    /// not. Whitespace around each segment is trimmed.
    pub fn parse(path: &str) -> Result<Self, Error> {
        if path.is_empty() {
            return Err(Error::invalid_path("cannot parse an empty path string"));
        }
        let path = path.strip_prefix('/').unwrap_or(path);
        Self::of(path.split('/').map(str::trim))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, n: usize) -> Option<&str> {
        self.segments.get(n).map(String::as_str)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns this path without its last segment.
    pub fn parent(&self) -> Result<Self, Error> {
        match self.segments.split_last() {
            Some((_, rest)) => Ok(Self {
                segments: rest.to_vec(),
            }),
            None => Err(Error::invalid_path("cannot get parent of the empty path")),
        }
    }

    /// Whether the last segment is a hidden `<...>` label.
    pub fn is_anonymous(&self) -> bool {
        self.segments
            .last()
            .is_some_and(|s| SegmentKind::of(s) == SegmentKind::Hidden)
    }

    pub fn extend_by<I, S>(&self, parts: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments = self.segments.clone();
        segments.extend(parts.into_iter().map(Into::into));
        Self::new(segments)
    }

    /// Appends a whole path. Both sides are already valid, so this cannot fail.
    pub fn extend_by_path(&self, suffix: &RbPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(suffix.segments.iter().cloned());
        Self { segments }
    }

    /// Maps every segment through `f`; the results are validated again.
    pub fn map_segments<F>(&self, f: F) -> Result<Self, Error>
    where
        F: FnMut(&str) -> String,
    {
        Self::new(self.segments.iter().map(String::as_str).map(f).collect())
    }

    /// Returns whether the "base name" of the first segment is `base_name`.
    ///
    /// Paths for related data are grouped under the same first segment, but that segment can
    /// carry a suffix (`Foo:alias`, `Foo%subtype`), so this is not a plain equality check.
    pub fn has_prefix(&self, base_name: &str) -> Result<bool, Error> {
        if base_name.is_empty() || segment::has_suffix_separator(base_name) {
            return Err(Error::InvalidArgument(format!(
                "invalid base name: {:?}",
                base_name
            )));
        }
        let Some(first) = self.segments.first() else {
            return Ok(false);
        };
        Ok(match first.strip_prefix(base_name) {
            Some("") => true,
            Some(rest) => rest.starts_with(SUFFIX_SEPARATORS),
            None => false,
        })
    }

    pub fn starts_with(&self, prefix: &RbPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    pub fn ends_with(&self, suffix: &RbPath) -> bool {
        self.segments.ends_with(&suffix.segments)
    }

    /// Whether `other` appears as a contiguous run of segments anywhere in this path.
    pub fn contains(&self, other: &RbPath) -> bool {
        if other.is_empty() {
            return true;
        }
        self.segments
            .windows(other.len())
            .any(|w| w == other.segments.as_slice())
    }

    /// Number of leading segments shared by both paths.
    pub fn common_prefix_len(&self, other: &RbPath) -> usize {
        self.segments
            .iter()
            .zip(&other.segments)
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// Whether values at this path are integers (`:int`) or integer vectors (`:intvector`)
    /// rather than strings.
    pub fn is_int_path(&self) -> bool {
        self.segments
            .last()
            .is_some_and(|s| s.ends_with(":int") || s.ends_with(":intvector"))
    }
}

impl Display for RbPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl FromStr for RbPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RbPath::parse(s)
    }
}

impl Serialize for RbPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RbPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(RbPath::empty());
        }
        RbPath::parse(&s).map_err(serde::de::Error::custom)
    }
}

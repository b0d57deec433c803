//! Character and quoting rules for a single resource bundle path segment.
//!
//! ICU data keys are restricted to "invariant" characters (see `uinvchar.cpp` in ICU4C). There
//! is no escaping mechanism for keys, so a segment that needs characters with special meaning
//! (such as `:` in metazone names) has to be quoted, and `"` itself may only appear as the
//! surrounding quotes.

use crate::error::Error;

/// ASCII punctuation which is not an ICU invariant character.
const VARIANT_PUNCTUATION: &str = "!#$@[\\]^`{|}~";

/// Characters which separate the "base name" of a segment from its suffix, as in
/// `Foo:intvector` or `Foo%subtype`.
pub const SUFFIX_SEPARATORS: [char; 2] = [':', '%'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// `<...>` labels; anything goes inside since they never reach the final ICU data.
    Hidden,
    /// `"..."` labels; content may contain whitespace and invariant punctuation.
    Quoted,
    Plain,
}

impl SegmentKind {
    /// Classifies a segment by its first character. Does not validate.
    pub fn of(segment: &str) -> Self {
        match segment.chars().next() {
            Some('<') => SegmentKind::Hidden,
            Some('"') => SegmentKind::Quoted,
            _ => SegmentKind::Plain,
        }
    }
}

fn is_invariant(c: char) -> bool {
    c.is_ascii() && !VARIANT_PUNCTUATION.contains(c)
}

/// Characters allowed inside a quoted segment.
pub fn is_quotable(c: char) -> bool {
    is_invariant(c) && !c.is_ascii_control() && c != '"'
}

/// Characters allowed in an unquoted segment.
pub fn is_unquoted(c: char) -> bool {
    is_quotable(c) && !c.is_whitespace()
}

/// Returns whether the segment contains a suffix separator.
pub fn has_suffix_separator(s: &str) -> bool {
    s.contains(SUFFIX_SEPARATORS)
}

/// Validates one segment of `path`, which is only used for error reporting.
pub fn validate(segment: &str, path: &[String]) -> Result<SegmentKind, Error> {
    if segment.is_empty() {
        return Err(Error::invalid_path(format!(
            "empty path segments not permitted: {:?}",
            path
        )));
    }
    let kind = SegmentKind::of(segment);
    match kind {
        SegmentKind::Hidden => {
            if !segment.ends_with('>') {
                return Err(Error::invalid_path(format!(
                    "mismatched quoting for hidden label: {} in {:?}",
                    segment, path
                )));
            }
        }
        SegmentKind::Quoted => {
            if segment.len() < 2 || !segment.ends_with('"') {
                return Err(Error::invalid_path(format!(
                    "mismatched quoting for segment: {} in {:?}",
                    segment, path
                )));
            }
            if !segment[1..segment.len() - 1].chars().all(is_quotable) {
                return Err(Error::invalid_path(format!(
                    "invalid character in quoted resource bundle path segment: {} in {:?}",
                    segment, path
                )));
            }
        }
        SegmentKind::Plain => {
            if !segment.chars().all(is_unquoted) {
                return Err(Error::invalid_path(format!(
                    "invalid character in unquoted resource bundle path segment: {} in {:?}",
                    segment, path
                )));
            }
        }
    }
    Ok(kind)
}

//! A minimal model of the CLDR data supplier consumed by mappers.
//!
//! CLDR data is a tree of XML elements. Mappers address nodes by their structural path
//! (`ldmlBCP47/keyword/key[@name="ca"]/type[@name="buddhist"]`) and read attributes from any
//! element on that path.

pub mod attribute;
pub mod data;
pub mod matcher;
pub mod path;

pub use attribute::{AttributeKey, key_of};
pub use data::{CldrData, Element};
pub use matcher::PathMatcher;
pub use path::{DataPath, DataValue, PathElement};

#![forbid(unsafe_code)]
//! Resource bundle paths and values for ICU data, and mappers that build them from CLDR data.
//!
//! [`RbPath`] identifies an entry in an ICU resource bundle, [`RbValue`] holds its contents,
//! and [`IcuData`] collects both, sorted by path, for a file writer to consume.
//! Mappers such as [`Bcp47Mapper`] walk a [`CldrData`] tree and fill one or more
//! [`IcuData`] sinks.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use icu_rbdata::{Bcp47Mapper, CldrData, MapperConfig, traits::{Mapper, Parser}};
//!
//! let data = CldrData::read_from("common/bcp47/collation.xml")?;
//! let mapper = Bcp47Mapper::new(&MapperConfig::default())?;
//! for icu_data in mapper.process(&data)? {
//!     icu_data.write_to(format!("{}.json", icu_data.name()))?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Path segments
//!
//! - Plain segments use ICU invariant characters without whitespace (`typeMap`, `Foo:intvector`)
//! - Quoted segments (`"America:Los_Angeles"`) may also contain whitespace
//! - Hidden labels (`<0001>`) may contain anything and never reach the final data

pub mod config;
pub mod error;
pub mod icu_data;
pub mod mappers;
pub mod path;
pub mod segment;
pub mod source;
pub mod traits;
pub mod value;

// Re-export most used types for easy consumption
pub use crate::{
    config::{AttributeNames, CrossLink, InfoAttribute, MapperConfig, Route, SinkConfig},
    error::Error,
    icu_data::IcuData,
    mappers::{Bcp47Mapper, quote_alias},
    path::RbPath,
    source::{AttributeKey, CldrData, DataPath, DataValue, Element, PathElement, PathMatcher},
    value::RbValue,
};

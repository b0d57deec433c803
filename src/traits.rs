//! Traits for reading/writing data files and for walking CLDR data in icu-rbdata.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{
    error::Error,
    icu_data::IcuData,
    source::{CldrData, DataPath, DataValue},
};

/// A trait for parsing and writing one data file.
///
/// # Example
///
/// ```rust,no_run
/// use icu_rbdata::{CldrData, traits::Parser};
/// let data = CldrData::read_from("bcp47/calendar.xml")?;
/// data.write_to("calendar_copy.xml")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.to_writer(writer)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}

/// Two-level visitor driven by [`CldrData::accept`].
///
/// `visit_prefix` is called for every non-leaf node, outermost first. Returning
/// a scope makes it the active scope for every node below that prefix, until a
/// deeper prefix selects another one. Leaf nodes are only passed to
/// `visit_value` when some scope is active, and always together with it.
pub trait DataVisitor {
    type Scope;

    fn visit_prefix(&mut self, prefix: &DataPath) -> Result<Option<Self::Scope>, Error>;

    fn visit_value(&mut self, scope: &Self::Scope, value: &DataValue) -> Result<(), Error>;
}

/// Converts one category of CLDR data into ICU data sinks.
pub trait Mapper {
    fn process(&self, src: &CldrData) -> Result<Vec<IcuData>, Error>;
}

//! All error types for the icu-rbdata crate.
//!
//! These are returned from all fallible operations (path validation, data loading, mapping, etc.).
//! None of them are recoverable mid-pass: a mapping run that hits any of these produces no output.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("data contract violation: {0}")]
    DataContract(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new path validation error
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Error::InvalidPath(message.into())
    }

    /// Creates a new data contract error
    pub fn data_contract(message: impl Into<String>) -> Self {
        Error::DataContract(message.into())
    }

    /// Creates a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_invalid_path_error() {
        let error = Error::invalid_path("empty path segments not permitted: [a, , b]");
        assert_eq!(
            error.to_string(),
            "invalid path: empty path segments not permitted: [a, , b]"
        );
    }

    #[test]
    fn test_data_contract_error() {
        let error = Error::data_contract("unexpected child element: ldml/foo");
        assert_eq!(
            error.to_string(),
            "data contract violation: unexpected child element: ldml/foo"
        );
    }

    #[test]
    fn test_config_error() {
        let error = Error::config("duplicate sink name `keyTypeData`");
        assert!(error.to_string().starts_with("invalid configuration"));
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::from(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_parse_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::Parse(json_error);
        assert!(error.to_string().contains("parse error"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::InvalidValue("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("InvalidValue"));
        assert!(debug.contains("test"));
    }
}

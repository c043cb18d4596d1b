//! Error types for conversion operations

use std::fmt;

/// Errors that can occur during conversion operations
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Error during parsing
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// Operation not supported by a format
    NotSupported(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConvertError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            ConvertError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}

//! Format trait definition
//!
//! The uniform seam between the two conversion directions. The display
//! formatter picks a source and a target format and chains `parse` with
//! `serialize`; formats stay focused on their own representation.

use crate::error::ConvertError;
use crate::ir::Document;

/// Trait for text-field representations.
///
/// Implementors provide conversion between their string representation and
/// the block/inline document model. A format can support parsing,
/// serialization, or both.
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "html")
    fn name(&self) -> &str;

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Document, ConvertError> {
        Err(ConvertError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &Document) -> Result<String, ConvertError> {
        Err(ConvertError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}

//! Markdown format: the lightweight dialect agents and humans write.

pub mod inline;
pub mod parser;
pub mod serializer;

use crate::error::ConvertError;
use crate::format::Format;
use crate::ir::Document;

/// Markdown format implementation
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        Ok(parser::scan(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConvertError> {
        Ok(serializer::serialize(doc))
    }
}

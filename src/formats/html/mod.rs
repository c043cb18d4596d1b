//! HTML format: the constrained subset the remote rich-text field stores.

pub mod parser;
pub mod serializer;

use crate::error::ConvertError;
use crate::format::Format;
use crate::ir::Document;

/// HTML subset format implementation
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        parser::parse(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConvertError> {
        Ok(serializer::serialize(doc))
    }
}

//! Export tests for the markdown format (Document → markdown)

use crate::common::{example_document, item, kitchen_sink, text, EXAMPLE_MD};
use richdown::format::Format;
use richdown::formats::markdown::MarkdownFormat;
use richdown::{Block, Document};

fn doc_to_md(doc: &Document) -> String {
    MarkdownFormat.serialize(doc).expect("markdown serialization never fails")
}

#[test]
fn example_document_round_trips_structurally() {
    let rendered = doc_to_md(&example_document());
    let rescanned = MarkdownFormat.parse(&rendered).unwrap();
    assert_eq!(rescanned, example_document());
}

#[test]
fn example_document_renders_expected_text() {
    assert_eq!(doc_to_md(&example_document()), EXAMPLE_MD);
}

#[test]
fn kitchen_sink_round_trips_structurally() {
    let doc = kitchen_sink();
    let rendered = doc_to_md(&doc);
    assert_eq!(MarkdownFormat.parse(&rendered).unwrap(), doc);
}

#[test]
fn list_indentation_follows_depth() {
    let doc = Document::new(vec![item(0, "a"), item(1, "b"), item(2, "c")]);
    assert_eq!(doc_to_md(&doc), "- a\n  - b\n    - c");
}

#[test]
fn literal_delimiters_survive_a_round_trip() {
    let doc = Document::new(vec![Block::Paragraph {
        content: vec![text("price is 2*3 and var_name here")],
    }]);
    let rendered = doc_to_md(&doc);
    assert_eq!(MarkdownFormat.parse(&rendered).unwrap(), doc);
}

#[test]
fn code_block_with_backticks_gets_longer_fence() {
    let doc = Document::new(vec![Block::CodeBlock {
        language: None,
        text: "```\ninner".to_string(),
    }]);
    let rendered = doc_to_md(&doc);
    assert_eq!(MarkdownFormat.parse(&rendered).unwrap(), doc);
}

//! Import tests for the markdown format (markdown → Document)
//!
//! These verify that markdown text is correctly scanned into the block
//! model, including nesting depth and the fallback rules for malformed
//! input.

use crate::common::{example_document, text, EXAMPLE_MD};
use richdown::format::Format;
use richdown::formats::markdown::MarkdownFormat;
use richdown::{Block, Inline};

fn md_to_doc(md: &str) -> richdown::Document {
    MarkdownFormat.parse(md).expect("markdown scan never fails")
}

#[test]
fn example_document_structure() {
    assert_eq!(md_to_doc(EXAMPLE_MD), example_document());
}

#[test]
fn heading_levels() {
    let doc = md_to_doc("# One\n\n###### Six\n");
    assert_eq!(
        doc.blocks,
        vec![
            Block::Heading { level: 1, content: vec![text("One")] },
            Block::Heading { level: 6, content: vec![text("Six")] },
        ]
    );
}

#[test]
fn ordered_and_unordered_markers() {
    let doc = md_to_doc("1. one\n2. two\n- bullet\n* star\n");
    let flags: Vec<bool> = doc
        .blocks
        .iter()
        .map(|block| match block {
            Block::ListItem { ordered, .. } => *ordered,
            _ => panic!("expected list item"),
        })
        .collect();
    assert_eq!(flags, vec![true, true, false, false]);
}

#[test]
fn depth_clamp_on_deep_jump() {
    // Declared at depth 5 right after a depth-0 item: parses as 1, not 5.
    let doc = md_to_doc("- top\n          - jumped\n");
    assert_eq!(
        doc.blocks[1],
        Block::ListItem { depth: 1, ordered: false, content: vec![text("jumped")] }
    );
}

#[test]
fn code_block_isolation() {
    let doc = md_to_doc("```\n**not bold** and `not code`\n```\n");
    assert_eq!(
        doc.blocks,
        vec![Block::CodeBlock {
            language: None,
            text: "**not bold** and `not code`".to_string(),
        }]
    );
}

#[test]
fn unterminated_fence_is_not_an_error() {
    let doc = md_to_doc("```rust\nfn main() {}\n");
    assert_eq!(
        doc.blocks,
        vec![Block::CodeBlock {
            language: Some("rust".to_string()),
            text: "fn main() {}".to_string(),
        }]
    );
}

#[test]
fn inline_spans_inside_blocks() {
    let doc = md_to_doc("## With **bold**\n\n> quoted *softly*\n");
    assert_eq!(
        doc.blocks,
        vec![
            Block::Heading {
                level: 2,
                content: vec![text("With "), Inline::Bold(vec![text("bold")])],
            },
            Block::Blockquote {
                content: vec![text("quoted "), Inline::Italic(vec![text("softly")])],
            },
        ]
    );
}

#[test]
fn unmatched_inline_delimiters_degrade_to_text() {
    let doc = md_to_doc("a **b and `c\n");
    assert_eq!(
        doc.blocks,
        vec![richdown::Block::Paragraph { content: vec![text("a **b and `c")] }]
    );
}

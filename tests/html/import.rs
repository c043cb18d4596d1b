//! Import tests for the HTML format (HTML subset → Document)
//!
//! Tolerance is the theme: unclosed tags, unknown tags and platform
//! dialect quirks must parse into sensible blocks, never error.

use crate::common::{item, text};
use richdown::format::Format;
use richdown::formats::html::HtmlFormat;
use richdown::{Block, Document, Inline};

fn html_to_doc(html: &str) -> Document {
    HtmlFormat.parse(html).expect("subset html should parse")
}

#[test]
fn example_html_reconstructs_structure() {
    let html = "<h1>Title</h1>\n\
                <ul><li>item1<ul><li>subitem</li></ul></li><li>item2</li></ul>\n\
                <pre><code class=\"language-python\">print('hi')</code></pre>";
    let doc = html_to_doc(html);
    assert_eq!(
        doc.blocks,
        vec![
            Block::Heading { level: 1, content: vec![text("Title")] },
            item(0, "item1"),
            item(1, "subitem"),
            item(0, "item2"),
            Block::CodeBlock {
                language: Some("python".to_string()),
                text: "print('hi')".to_string(),
            },
        ]
    );
}

#[test]
fn missing_list_closes_degrade_gracefully() {
    let doc = html_to_doc("<ul><li>a<li>b");
    assert_eq!(doc.blocks, vec![item(0, "a"), item(0, "b")]);
}

#[test]
fn unknown_tags_unwrap_to_children() {
    let doc = html_to_doc("<article><p>body</p><aside>note</aside></article>");
    assert_eq!(
        doc.blocks,
        vec![
            Block::Paragraph { content: vec![text("body")] },
            Block::Paragraph { content: vec![text("note")] },
        ]
    );
}

#[test]
fn legacy_h_tag_with_class_maps_to_heading() {
    let doc = html_to_doc("<h class=\"h2\">Section</h><p>after</p>");
    assert_eq!(
        doc.blocks[0],
        Block::Heading { level: 2, content: vec![text("Section")] }
    );
}

#[test]
fn deeply_nested_lists_count_ancestors() {
    let html = "<ul><li>a<ol><li>b<ul><li>c</li></ul></li></ol></li></ul>";
    let doc = html_to_doc(html);
    assert_eq!(
        doc.blocks,
        vec![
            item(0, "a"),
            Block::ListItem { depth: 1, ordered: true, content: vec![text("b")] },
            Block::ListItem { depth: 2, ordered: false, content: vec![text("c")] },
        ]
    );
}

#[test]
fn entities_resolve_exactly_once() {
    let doc = html_to_doc("<p>&amp;amp; stays</p>");
    assert_eq!(
        doc.blocks,
        vec![Block::Paragraph { content: vec![text("&amp; stays")] }]
    );
}

#[test]
fn formatting_inside_list_items() {
    let doc = html_to_doc("<ul><li><strong>bold</strong> rest</li></ul>");
    assert_eq!(
        doc.blocks,
        vec![Block::ListItem {
            depth: 0,
            ordered: false,
            content: vec![
                Inline::Bold(vec![text("bold")]),
                Inline::Text(" rest".to_string()),
            ],
        }]
    );
}

#[test]
fn paragraphs_inside_list_items_merge_with_a_space() {
    let doc = html_to_doc("<ul><li><p>a</p><p>b</p></li></ul>");
    assert_eq!(doc.blocks, vec![item(0, "a b")]);
}

#[test]
fn whitespace_between_blocks_is_not_content() {
    let doc = html_to_doc("<p>a</p>\n   \n<p>b</p>");
    assert_eq!(doc.blocks.len(), 2);
}

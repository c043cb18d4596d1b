//! Shared builders for the conversion tests.

use richdown::{Block, Document, Inline};

pub fn text(s: &str) -> Inline {
    Inline::Text(s.to_string())
}

pub fn item(depth: usize, content: &str) -> Block {
    Block::ListItem {
        depth,
        ordered: false,
        content: vec![text(content)],
    }
}

/// The worked example from the conversion contract: heading, nested list,
/// fenced code block.
pub const EXAMPLE_MD: &str = "# Title\n\n- item1\n  - subitem\n- item2\n\n```python\nprint('hi')\n```";

pub fn example_document() -> Document {
    Document::new(vec![
        Block::Heading {
            level: 1,
            content: vec![text("Title")],
        },
        item(0, "item1"),
        item(1, "subitem"),
        item(0, "item2"),
        Block::CodeBlock {
            language: Some("python".to_string()),
            text: "print('hi')".to_string(),
        },
    ])
}

/// A document exercising every block and span kind once.
pub fn kitchen_sink() -> Document {
    Document::new(vec![
        Block::Heading {
            level: 2,
            content: vec![text("Everything")],
        },
        Block::Paragraph {
            content: vec![
                text("Mix of "),
                Inline::Bold(vec![text("bold "), Inline::Italic(vec![text("nested")])]),
                text(" and "),
                Inline::Code("code".to_string()),
                text(" plus "),
                Inline::Link {
                    text: "a link".to_string(),
                    href: "https://example.com/x".to_string(),
                },
                text("."),
            ],
        },
        Block::ListItem {
            depth: 0,
            ordered: true,
            content: vec![text("first")],
        },
        Block::ListItem {
            depth: 1,
            ordered: false,
            content: vec![text("nested bullet")],
        },
        Block::ListItem {
            depth: 0,
            ordered: true,
            content: vec![text("second")],
        },
        Block::CodeBlock {
            language: None,
            text: "**not bold** & <tag>".to_string(),
        },
        Block::Blockquote {
            content: vec![text("quoted words")],
        },
    ])
}

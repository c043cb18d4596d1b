//! Markdown serialization (Document → markdown)
//!
//! The inverse of the block scanner. Blocks are separated by blank lines,
//! except consecutive list items which stay adjacent so they read back as
//! one list run.

use super::inline::render_inline;
use super::parser;
use crate::ir::{Block, Document};

/// Serialize a document to markdown text.
pub fn serialize(doc: &Document) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut i = 0;
    let blocks = &doc.blocks;

    while i < blocks.len() {
        match &blocks[i] {
            Block::ListItem { .. } => {
                let mut lines: Vec<String> = Vec::new();
                let mut counters: Vec<usize> = Vec::new();
                while let Some(Block::ListItem {
                    depth,
                    ordered,
                    content,
                }) = blocks.get(i)
                {
                    counters.truncate(depth + 1);
                    if counters.len() < depth + 1 {
                        counters.resize(depth + 1, 0);
                    }
                    counters[*depth] += 1;
                    let marker = if *ordered {
                        format!("{}. ", counters[*depth])
                    } else {
                        "- ".to_string()
                    };
                    lines.push(format!(
                        "{}{}{}",
                        "  ".repeat(*depth),
                        marker,
                        render_inline(content)
                    ));
                    i += 1;
                }
                parts.push(lines.join("\n"));
            }
            Block::Heading { level, content } => {
                parts.push(format!(
                    "{} {}",
                    "#".repeat(*level as usize),
                    render_inline(content)
                ));
                i += 1;
            }
            Block::Paragraph { content } => {
                parts.push(guard_paragraph(render_inline(content)));
                i += 1;
            }
            Block::CodeBlock { language, text } => {
                parts.push(render_code_block(language.as_deref(), text));
                i += 1;
            }
            Block::Blockquote { content } => {
                let rendered = render_inline(content);
                let quoted: Vec<String> =
                    rendered.lines().map(|line| format!("> {line}")).collect();
                if quoted.is_empty() {
                    parts.push(">".to_string());
                } else {
                    parts.push(quoted.join("\n"));
                }
                i += 1;
            }
        }
    }

    parts.join("\n\n")
}

/// Escape a leading block marker so the paragraph scans back as a
/// paragraph, not a heading, list item, quote or fence.
fn guard_paragraph(rendered: String) -> String {
    if !parser::starts_block(&rendered) {
        return rendered;
    }
    let indent = rendered.len() - rendered.trim_start_matches(' ').len();
    let rest = &rendered[indent..];
    if rest.starts_with('`') {
        // A backtick run here is an inline code span's own fence; escaping
        // it would split the span.
        return rendered;
    }
    // An ordered-item marker breaks at the dot, everything else at the
    // first marker character.
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    let at = if digits > 0 && rest[digits..].starts_with(". ") {
        indent + digits
    } else {
        indent
    };
    format!("{}\\{}", &rendered[..at], &rendered[at..])
}

/// Fence a code block, growing the fence past any backtick run in the body.
fn render_code_block(language: Option<&str>, text: &str) -> String {
    let longest = text
        .lines()
        .map(|line| line.chars().take_while(|&c| c == '`').count())
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest.max(2) + 1);
    let info = language.unwrap_or("");
    if text.is_empty() {
        format!("{fence}{info}\n{fence}")
    } else {
        format!("{fence}{info}\n{text}\n{fence}")
    }
}

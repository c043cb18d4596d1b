//! HTML serialization (Document → HTML subset)
//!
//! A pure structural mapping: every markdown decision was already made when
//! the `Document` was built. Contiguous list-item runs are regrouped into
//! nested `ul`/`ol` trees by tracking depth deltas between consecutive
//! items; depth increases open a nested list inside the current `li`.

use crate::entity;
use crate::ir::{clamp_depth, Block, Document, Inline};

/// Serialize a document to the HTML subset.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    let blocks = &doc.blocks;
    let mut i = 0;

    while i < blocks.len() {
        if !out.is_empty() {
            out.push('\n');
        }
        match &blocks[i] {
            Block::ListItem { .. } => i = render_list_run(blocks, i, &mut out),
            block => {
                render_block(block, &mut out);
                i += 1;
            }
        }
    }

    out
}

fn render_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            let level = (*level).clamp(1, 6);
            out.push_str(&format!("<h{level}>"));
            render_inline_seq(content, out);
            out.push_str(&format!("</h{level}>"));
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            render_inline_seq(content, out);
            out.push_str("</p>");
        }
        Block::CodeBlock { language, text } => {
            match language {
                Some(lang) => {
                    out.push_str("<pre><code class=\"language-");
                    out.push_str(&entity::escape(lang));
                    out.push_str("\">");
                }
                None => out.push_str("<pre><code>"),
            }
            out.push_str(&entity::escape(text));
            out.push_str("</code></pre>");
        }
        Block::Blockquote { content } => {
            out.push_str("<blockquote>");
            render_inline_seq(content, out);
            out.push_str("</blockquote>");
        }
        Block::ListItem { .. } => unreachable!("list items are rendered as runs"),
    }
}

/// Render a contiguous run of list items starting at `start`; returns the
/// index of the first block past the run.
fn render_list_run(blocks: &[Block], start: usize, out: &mut String) -> usize {
    let mut open: Vec<bool> = Vec::new();
    let mut prev: Option<usize> = None;
    let mut i = start;

    while let Some(Block::ListItem {
        depth,
        ordered,
        content,
    }) = blocks.get(i)
    {
        let depth = clamp_depth(*depth, prev);
        match prev {
            None => {
                out.push_str(open_tag(*ordered));
                open.push(*ordered);
                out.push_str("<li>");
            }
            Some(prev_depth) if depth > prev_depth => {
                // Clamping guarantees exactly one level deeper; the nested
                // list opens inside the still-open parent item.
                out.push_str(open_tag(*ordered));
                open.push(*ordered);
                out.push_str("<li>");
            }
            Some(prev_depth) if depth == prev_depth => {
                out.push_str("</li><li>");
            }
            Some(prev_depth) => {
                out.push_str("</li>");
                for _ in depth..prev_depth {
                    out.push_str(close_tag(open.pop().unwrap_or(false)));
                    out.push_str("</li>");
                }
                out.push_str("<li>");
            }
        }
        render_inline_seq(content, out);
        prev = Some(depth);
        i += 1;
    }

    out.push_str("</li>");
    while let Some(ordered) = open.pop() {
        out.push_str(close_tag(ordered));
        if !open.is_empty() {
            out.push_str("</li>");
        }
    }
    i
}

fn open_tag(ordered: bool) -> &'static str {
    if ordered {
        "<ol>"
    } else {
        "<ul>"
    }
}

fn close_tag(ordered: bool) -> &'static str {
    if ordered {
        "</ol>"
    } else {
        "</ul>"
    }
}

fn render_inline_seq(spans: &[Inline], out: &mut String) {
    for span in spans {
        match span {
            Inline::Text(text) => out.push_str(&entity::escape(text)),
            Inline::Bold(children) => {
                out.push_str("<strong>");
                render_inline_seq(children, out);
                out.push_str("</strong>");
            }
            Inline::Italic(children) => {
                out.push_str("<em>");
                render_inline_seq(children, out);
                out.push_str("</em>");
            }
            Inline::Code(code) => {
                out.push_str("<code>");
                out.push_str(&entity::escape(code));
                out.push_str("</code>");
            }
            Inline::Link { text, href } => {
                out.push_str("<a href=\"");
                out.push_str(&entity::escape(href));
                out.push_str("\">");
                out.push_str(&entity::escape(text));
                out.push_str("</a>");
            }
        }
    }
}

//! Markdown block scanning (markdown → Document)
//!
//! Line-oriented, single pass. The scanner only decides block boundaries
//! and nesting depth; each block's raw text goes through the inline parser
//! afterwards. It never fails: unterminated fences close at end of input
//! and anything unrecognized is a paragraph.

use super::inline::parse_inline;
use crate::ir::{clamp_depth, Block, Document};

/// Scan markdown text into a block sequence.
pub fn scan(source: &str) -> Document {
    let mut blocks: Vec<Block> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut quote: Vec<&str> = Vec::new();

    let lines: Vec<&str> = source.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some((fence_char, fence_len, language)) = parse_fence_open(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            flush_quote(&mut blocks, &mut quote);
            let mut body: Vec<&str> = Vec::new();
            i += 1;
            while i < lines.len() && !closes_fence(lines[i], fence_char, fence_len) {
                body.push(lines[i]);
                i += 1;
            }
            // Consume the closing fence if there is one; an unterminated
            // fence closes implicitly at end of input.
            if i < lines.len() {
                i += 1;
            }
            blocks.push(Block::CodeBlock {
                language,
                text: body.join("\n"),
            });
            continue;
        }

        if line.trim().is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
            flush_quote(&mut blocks, &mut quote);
            i += 1;
            continue;
        }

        if let Some((level, rest)) = parse_heading(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            flush_quote(&mut blocks, &mut quote);
            blocks.push(Block::Heading {
                level,
                content: parse_inline(rest.trim()),
            });
            i += 1;
            continue;
        }

        if let Some((declared, ordered, rest)) = parse_list_item(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            flush_quote(&mut blocks, &mut quote);
            let prev = match blocks.last() {
                Some(Block::ListItem { depth, .. }) => Some(*depth),
                _ => None,
            };
            blocks.push(Block::ListItem {
                depth: clamp_depth(declared, prev),
                ordered,
                content: parse_inline(rest),
            });
            i += 1;
            continue;
        }

        if let Some(rest) = parse_quote_line(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            quote.push(rest);
            i += 1;
            continue;
        }

        flush_quote(&mut blocks, &mut quote);
        paragraph.push(line.trim());
        i += 1;
    }

    flush_paragraph(&mut blocks, &mut paragraph);
    flush_quote(&mut blocks, &mut quote);
    Document::new(blocks)
}

fn flush_paragraph(blocks: &mut Vec<Block>, lines: &mut Vec<&str>) {
    if !lines.is_empty() {
        // Soft line breaks inside a paragraph become a single space.
        let text = lines.join(" ");
        lines.clear();
        blocks.push(Block::Paragraph {
            content: parse_inline(&text),
        });
    }
}

fn flush_quote(blocks: &mut Vec<Block>, lines: &mut Vec<&str>) {
    if !lines.is_empty() {
        let text = lines.join(" ");
        lines.clear();
        blocks.push(Block::Blockquote {
            content: parse_inline(text.trim()),
        });
    }
}

/// A fence line: three or more identical backticks or tildes, optionally
/// followed by a language token.
fn parse_fence_open(line: &str) -> Option<(char, usize, Option<String>)> {
    let trimmed = line.trim_start();
    let fence_char = match trimmed.chars().next() {
        Some(c @ ('`' | '~')) => c,
        _ => return None,
    };
    let fence_len = trimmed.chars().take_while(|&c| c == fence_char).count();
    if fence_len < 3 {
        return None;
    }
    let info = trimmed[fence_len..].trim();
    let language = info
        .split_whitespace()
        .next()
        .filter(|token| !token.contains(fence_char))
        .map(str::to_string);
    Some((fence_char, fence_len, language))
}

/// A closing fence: same character, length at least the opener's, nothing
/// else on the line.
fn closes_fence(line: &str, fence_char: char, open_len: usize) -> bool {
    let trimmed = line.trim();
    let len = trimmed.chars().take_while(|&c| c == fence_char).count();
    len >= open_len && trimmed.chars().all(|c| c == fence_char)
}

/// A heading: 1-6 `#` then whitespace.
fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &trimmed[level..];
    rest.starts_with(char::is_whitespace)
        .then(|| (level as u8, rest))
}

/// A list item: leading spaces (two per depth level) then `- `, `* ` or
/// `digits. `.
fn parse_list_item(line: &str) -> Option<(usize, bool, &str)> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    let depth = indent / 2;
    let rest = &line[indent..];

    if let Some(content) = rest.strip_prefix("- ").or_else(|| rest.strip_prefix("* ")) {
        return Some((depth, false, content));
    }

    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        if let Some(content) = rest[digits..].strip_prefix(". ") {
            return Some((depth, true, content));
        }
    }
    None
}

fn parse_quote_line(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    trimmed
        .strip_prefix("> ")
        .or_else(|| trimmed.strip_prefix('>'))
}

/// Whether the scanner would read this line as something other than
/// paragraph text. The serializer guards paragraphs with this so a stored
/// paragraph cannot change block kind on a later scan.
pub(super) fn starts_block(line: &str) -> bool {
    parse_fence_open(line).is_some()
        || parse_heading(line).is_some()
        || parse_list_item(line).is_some()
        || parse_quote_line(line).is_some()
}

//! Display formatting: the public conversion surface
//!
//! `to_storage` prepares a description or comment for the remote rich-text
//! field (markdown → HTML subset); `to_display` reshapes a fetched field
//! for presentation (HTML → markdown). Conversion failure never propagates
//! to the caller: anything the engine rejects is logged and degraded to the
//! original text with tags stripped.

use crate::error::ConvertError;
use crate::format::Format;
use crate::formats::html::HtmlFormat;
use crate::formats::markdown::MarkdownFormat;

/// Caller-supplied label for `to_display` input, for when the text field's
/// origin is known. `Auto` falls back to the closing-tag heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceHint {
    #[default]
    Auto,
    Markdown,
    Html,
}

/// Convert markdown to the storage HTML subset.
///
/// Input that already looks like HTML is re-parsed and re-serialized so it
/// lands normalized in the same subset (unknown tags unwrapped, entities
/// applied exactly once).
pub fn to_storage(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let result = if looks_like_html(text) {
        HtmlFormat
            .parse(text)
            .and_then(|doc| HtmlFormat.serialize(&doc))
    } else {
        MarkdownFormat
            .parse(text)
            .and_then(|doc| HtmlFormat.serialize(&doc))
    };

    match result {
        Ok(html) => html,
        Err(error) => fallback("to_storage", text, &error),
    }
}

/// Convert a fetched rich-text field to markdown for display.
pub fn to_display(text: &str) -> String {
    to_display_hinted(text, SourceHint::Auto)
}

/// `to_display` with an explicit source label.
///
/// Markdown-labelled input is not round-tripped through the engine; it only
/// gets heading spacing normalized.
pub fn to_display_hinted(text: &str, hint: SourceHint) -> String {
    if text.is_empty() {
        return String::new();
    }

    let is_html = match hint {
        SourceHint::Html => true,
        SourceHint::Markdown => false,
        SourceHint::Auto => looks_like_html(text),
    };

    if !is_html {
        return normalize_heading_spacing(text);
    }

    match HtmlFormat
        .parse(text)
        .and_then(|doc| MarkdownFormat.serialize(&doc))
    {
        Ok(markdown) => markdown,
        Err(error) => fallback("to_display", text, &error),
    }
}

fn fallback(operation: &str, text: &str, error: &ConvertError) -> String {
    log::warn!("{operation}: conversion failed, degrading to plain text: {error}");
    strip_tags(text)
}

/// Heuristic from the original platform client: HTML starts with a tag and
/// contains at least one closing tag.
fn looks_like_html(text: &str) -> bool {
    text.trim_start().starts_with('<') && text.contains("</")
}

/// Plain-text fallback: drop tags, resolve entities, keep the text.
pub(crate) fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '<' {
            let mut consumed = String::new();
            let mut closed = false;
            for inner in chars.by_ref() {
                if inner == '>' {
                    closed = true;
                    break;
                }
                consumed.push(inner);
            }
            if !closed {
                // Not a tag after all; keep the text verbatim.
                out.push('<');
                out.push_str(&consumed);
            }
        } else {
            out.push(ch);
        }
    }
    crate::entity::unescape(out.trim())
}

/// Ensure a space after leading `#` runs so headings render as headings.
fn normalize_heading_spacing(text: &str) -> String {
    let lines: Vec<String> = text
        .lines()
        .map(|line| {
            let hashes = line.chars().take_while(|&c| c == '#').count();
            if hashes == 0 || hashes == line.len() {
                return line.to_string();
            }
            let rest = &line[hashes..];
            if rest.starts_with(' ') {
                line.to_string()
            } else {
                format!("{} {}", &line[..hashes], rest)
            }
        })
        .collect();
    let mut out = lines.join("\n");
    if text.ends_with('\n') {
        out.push('\n');
    }
    out
}

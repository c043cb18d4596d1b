//! Inline span parsing and rendering (markdown side)
//!
//! Precedence at each cursor position: inline code, link, bold, italic.
//! Unmatched opening delimiters degrade to literal text; this parser never
//! fails. Bold/italic content is parsed recursively, inline code content
//! never is.

use crate::ir::Inline;

/// Characters a backslash neutralizes: the inline delimiters plus the
/// leading block markers the serializer guards paragraphs against.
const ESCAPABLE: &[char] = &['*', '_', '`', '[', ']', '\\', '#', '-', '.', '>', '~'];

/// Parse a block's raw text into an inline span sequence.
pub fn parse_inline(raw: &str) -> Vec<Inline> {
    let chars: Vec<char> = raw.chars().collect();
    parse_chars(&chars)
}

fn parse_chars(chars: &[char]) -> Vec<Inline> {
    let mut spans: Vec<Inline> = Vec::new();
    let mut text = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() && ESCAPABLE.contains(&chars[i + 1]) => {
                text.push(chars[i + 1]);
                i += 2;
            }
            '`' => {
                let open = run_len(chars, i, '`');
                match find_backtick_close(chars, i + open, open) {
                    Some(close) => {
                        flush_text(&mut spans, &mut text);
                        let code: String = chars[i + open..close].iter().collect();
                        spans.push(Inline::Code(code));
                        i = close + open;
                    }
                    None => {
                        // Unterminated code span: the backticks are literal.
                        for _ in 0..open {
                            text.push('`');
                        }
                        i += open;
                    }
                }
            }
            '[' => match parse_link(chars, i) {
                Some((link, next)) => {
                    flush_text(&mut spans, &mut text);
                    spans.push(link);
                    i = next;
                }
                None => {
                    text.push('[');
                    i += 1;
                }
            },
            c @ ('*' | '_') => {
                let double = i + 1 < chars.len() && chars[i + 1] == c;
                let parsed = if double {
                    find_double_close(chars, i + 2, c).map(|close| {
                        (Inline::Bold(parse_chars(&chars[i + 2..close])), close + 2)
                    })
                } else {
                    find_single_close(chars, i + 1, c).map(|close| {
                        (Inline::Italic(parse_chars(&chars[i + 1..close])), close + 1)
                    })
                };
                match parsed {
                    Some((span, next)) => {
                        flush_text(&mut spans, &mut text);
                        spans.push(span);
                        i = next;
                    }
                    None => {
                        text.push(c);
                        if double {
                            text.push(c);
                            i += 2;
                        } else {
                            i += 1;
                        }
                    }
                }
            }
            c => {
                text.push(c);
                i += 1;
            }
        }
    }

    flush_text(&mut spans, &mut text);
    spans
}

/// Render an inline span sequence back to markdown.
///
/// Literal delimiter characters in text spans are backslash-escaped so a
/// later rescan cannot misread them as syntax.
pub fn render_inline(spans: &[Inline]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Inline::Text(text) => out.push_str(&escape_markdown(text)),
            Inline::Bold(children) => {
                out.push_str("**");
                out.push_str(&render_inline(children));
                out.push_str("**");
            }
            Inline::Italic(children) => {
                // Underscore, not asterisk: italic adjacent to a bold close
                // would otherwise fuse into an ambiguous `***` run.
                out.push('_');
                out.push_str(&render_inline(children));
                out.push('_');
            }
            Inline::Code(code) => {
                let fence = "`".repeat(longest_backtick_run(code) + 1);
                out.push_str(&fence);
                out.push_str(code);
                out.push_str(&fence);
            }
            Inline::Link { text, href } => {
                out.push('[');
                out.push_str(&escape_markdown(text));
                out.push_str("](");
                out.push_str(href);
                out.push(')');
            }
        }
    }
    out
}

/// Backslash-escape characters that would be misread as markdown syntax.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '*' | '_' | '`' | '[' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Try to parse `[text](href)` at `start`. Nested brackets are not
/// supported; on failure the opening bracket stays literal.
fn parse_link(chars: &[char], start: usize) -> Option<(Inline, usize)> {
    let close_bracket = find_unescaped(chars, start + 1, ']')?;
    if chars.get(close_bracket + 1) != Some(&'(') {
        return None;
    }
    let close_paren = find_unescaped(chars, close_bracket + 2, ')')?;
    let text = unescape_backslashes(&chars[start + 1..close_bracket]);
    let href: String = chars[close_bracket + 2..close_paren].iter().collect();
    Some((Inline::Link { text, href }, close_paren + 1))
}

fn find_unescaped(chars: &[char], from: usize, target: char) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == '\\' {
            i += 2;
        } else if chars[i] == target {
            return Some(i);
        } else {
            i += 1;
        }
    }
    None
}

fn unescape_backslashes(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' && i + 1 < chars.len() && ESCAPABLE.contains(&chars[i + 1]) {
            out.push(chars[i + 1]);
            i += 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

fn flush_text(spans: &mut Vec<Inline>, text: &mut String) {
    if !text.is_empty() {
        spans.push(Inline::Text(std::mem::take(text)));
    }
}

fn run_len(chars: &[char], start: usize, c: char) -> usize {
    chars[start..].iter().take_while(|&&x| x == c).count()
}

/// Find a closing backtick run of exactly `len` backticks at or after `from`.
fn find_backtick_close(chars: &[char], from: usize, len: usize) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == '`' {
            let run = run_len(chars, i, '`');
            if run == len {
                return Some(i);
            }
            i += run;
        } else {
            i += 1;
        }
    }
    None
}

/// Find the closing double delimiter for bold, requiring non-empty content.
fn find_double_close(chars: &[char], from: usize, c: char) -> Option<usize> {
    let mut i = from;
    while i + 1 < chars.len() {
        if chars[i] == '\\' {
            i += 2;
            continue;
        }
        if chars[i] == c && chars[i + 1] == c && i > from {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Find the closing single delimiter for italic, skipping doubled runs so
/// `*a **b** c*` closes at the final `*`.
fn find_single_close(chars: &[char], from: usize, c: char) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == '\\' {
            i += 2;
            continue;
        }
        if chars[i] == c {
            let run = run_len(chars, i, c);
            if run == 1 && i > from {
                return Some(i);
            }
            i += run;
        } else {
            i += 1;
        }
    }
    None
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

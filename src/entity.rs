//! HTML entity escaping and unescaping
//!
//! The remote rich-text field stores a fixed entity set. Escaping is
//! idempotent: an `&` that already begins a well-formed entity reference is
//! left alone, so `escape(escape(x)) == escape(x)` holds without any
//! "already escaped" bookkeeping in the callers.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Named entities the unescaper recognizes. The escaper only ever emits
/// `amp`, `lt`, `gt`, `quot` and `#39`, but `apos` shows up in stored
/// content and must round back.
static NAMED_ENTITIES: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    HashMap::from([
        ("amp", '&'),
        ("lt", '<'),
        ("gt", '>'),
        ("quot", '"'),
        ("apos", '\''),
    ])
});

/// Escape the reserved characters `&`, `<`, `>`, `"`, `'`.
///
/// An `&` that starts a well-formed entity reference (`&name;`, `&#digits;`
/// or `&#xhex;`) passes through untouched; a malformed entity-like run is
/// escaped as a literal `&amp;`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, ch) in text.char_indices() {
        match ch {
            '&' => {
                if entity_len(&text[i..]).is_some() {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Unescape the fixed named entity set plus numeric character references.
///
/// Anything that does not resolve (unknown names, malformed references,
/// out-of-range code points) stays literal.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match entity_len(tail).and_then(|len| decode_entity(&tail[..len]).map(|c| (len, c))) {
            Some((len, decoded)) => {
                out.push(decoded);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Length in bytes of a well-formed entity reference at the start of `s`
/// (which begins with `&`), or `None`.
fn entity_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix('&')?;
    let semi = body.find(';')?;
    let name = &body[..semi];
    if name.is_empty() || semi > 32 {
        return None;
    }
    let well_formed = if let Some(num) = name.strip_prefix('#') {
        if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
        } else {
            !num.is_empty() && num.chars().all(|c| c.is_ascii_digit())
        }
    } else {
        name.chars().all(|c| c.is_ascii_alphanumeric())
            && name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
    };
    well_formed.then_some(semi + 2)
}

/// Decode a single well-formed entity reference (including `&` and `;`).
///
/// Returns `None` for names outside the fixed set, leaving them literal.
fn decode_entity(entity: &str) -> Option<char> {
    let name = &entity[1..entity.len() - 1];
    if let Some(num) = name.strip_prefix('#') {
        let code = if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            num.parse::<u32>().ok()?
        };
        char::from_u32(code)
    } else {
        NAMED_ENTITIES.get(name).copied()
    }
}

//! HTML parsing (HTML subset → Document)
//!
//! Two stages. A one-pass tolerant scanner builds a minimal tag tree
//! (element name, attributes, ordered children) — unclosed tags auto-close,
//! stray closers are ignored, comments are skipped. A walker then maps the
//! tree back to blocks: ancestor `ul`/`ol` tags give list depth, `pre>code`
//! gives code blocks, unrecognized tags unwrap to their children. Malformed
//! markup never errors; only a pathological nesting depth does, and the
//! display formatter turns that into the plain-text fallback.

use crate::entity;
use crate::error::ConvertError;
use crate::ir::{clamp_depth, Block, Document, Inline};

/// Hard bound on open elements; past this the input is considered
/// pathological rather than merely malformed.
const MAX_DEPTH: usize = 64;

/// Tags that never have children.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Block-level tags that implicitly close an open `<p>`.
const P_CLOSERS: &[&str] = &[
    "p", "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5", "h6", "pre", "blockquote", "div",
];

/// A minimal tag-tree node. Text is entity-unescaped at construction, so
/// the walker never sees raw references.
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<HtmlNode>,
    },
    Text(String),
}

impl HtmlNode {
    fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Element { tag, .. } => Some(tag),
            HtmlNode::Text(_) => None,
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match self {
            HtmlNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            HtmlNode::Text(_) => None,
        }
    }

    /// Concatenated text content of the subtree, `<br>` as newline.
    fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            HtmlNode::Text(text) => out.push_str(text),
            HtmlNode::Element { tag, children, .. } => {
                if tag == "br" {
                    out.push('\n');
                }
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Parse the HTML subset into a document.
pub fn parse(html: &str) -> Result<Document, ConvertError> {
    let nodes = build_tree(html)?;
    let mut blocks = Vec::new();
    walk_blocks(&nodes, &mut blocks);
    Ok(Document::new(blocks))
}

// --- stage 1: tolerant tag-tree construction ---

struct OpenElement {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<HtmlNode>,
}

fn build_tree(html: &str) -> Result<Vec<HtmlNode>, ConvertError> {
    let mut roots: Vec<HtmlNode> = Vec::new();
    let mut stack: Vec<OpenElement> = Vec::new();
    let chars: Vec<char> = html.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '<' {
            if starts_with(&chars, i, "<!--") {
                i = skip_comment(&chars, i);
                continue;
            }
            if starts_with(&chars, i, "<!") || starts_with(&chars, i, "<?") {
                i = skip_until(&chars, i, '>');
                continue;
            }
            if starts_with(&chars, i, "</") {
                let (name, next) = read_tag_name(&chars, i + 2);
                i = skip_until(&chars, next, '>');
                close_element(&name, &mut stack, &mut roots);
                continue;
            }
            let (name, after_name) = read_tag_name(&chars, i + 1);
            if name.is_empty() {
                // A lone '<' that opens no tag is literal text.
                push_text(&mut stack, &mut roots, "<");
                i += 1;
                continue;
            }
            let (attrs, after_attrs, self_closing) = read_attrs(&chars, after_name);
            i = after_attrs;

            if stack.len() >= MAX_DEPTH {
                return Err(ConvertError::ParseError(format!(
                    "tag nesting exceeds {MAX_DEPTH} levels"
                )));
            }

            // Implicit closes, insertion-mode lite: a new <li> closes an
            // open <li>, block tags close an open <p>.
            if name == "li" && stack.last().is_some_and(|open| open.tag == "li") {
                close_element("li", &mut stack, &mut roots);
            }
            if P_CLOSERS.contains(&name.as_str())
                && stack.last().is_some_and(|open| open.tag == "p")
            {
                close_element("p", &mut stack, &mut roots);
            }

            if self_closing || VOID_TAGS.contains(&name.as_str()) {
                attach(
                    &mut stack,
                    &mut roots,
                    HtmlNode::Element {
                        tag: name,
                        attrs,
                        children: Vec::new(),
                    },
                );
            } else {
                stack.push(OpenElement {
                    tag: name,
                    attrs,
                    children: Vec::new(),
                });
            }
        } else {
            let start = i;
            while i < chars.len() && chars[i] != '<' {
                i += 1;
            }
            let raw: String = chars[start..i].iter().collect();
            push_text(&mut stack, &mut roots, &raw);
        }
    }

    // Auto-close everything still open at end of input.
    while let Some(open) = stack.pop() {
        let node = HtmlNode::Element {
            tag: open.tag,
            attrs: open.attrs,
            children: open.children,
        };
        attach(&mut stack, &mut roots, node);
    }

    Ok(roots)
}

fn starts_with(chars: &[char], at: usize, pattern: &str) -> bool {
    pattern
        .chars()
        .enumerate()
        .all(|(offset, expected)| chars.get(at + offset) == Some(&expected))
}

fn skip_comment(chars: &[char], from: usize) -> usize {
    let mut i = from + 4;
    while i < chars.len() {
        if starts_with(chars, i, "-->") {
            return i + 3;
        }
        i += 1;
    }
    chars.len()
}

fn skip_until(chars: &[char], from: usize, target: char) -> usize {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == target {
            return i + 1;
        }
        i += 1;
    }
    chars.len()
}

fn read_tag_name(chars: &[char], from: usize) -> (String, usize) {
    let mut name = String::new();
    let mut i = from;
    while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '-') {
        name.push(chars[i].to_ascii_lowercase());
        i += 1;
    }
    (name, i)
}

/// Read attributes up to the closing `>`; returns (attrs, index past `>`,
/// self-closing flag). Tolerates missing `>` at end of input.
fn read_attrs(chars: &[char], from: usize) -> (Vec<(String, String)>, usize, bool) {
    let mut attrs = Vec::new();
    let mut i = from;
    let mut self_closing = false;

    loop {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        match chars.get(i) {
            None => return (attrs, i, self_closing),
            Some('>') => return (attrs, i + 1, self_closing),
            Some('/') => {
                self_closing = true;
                i += 1;
            }
            _ => {
                let mut name = String::new();
                while i < chars.len()
                    && !chars[i].is_whitespace()
                    && !matches!(chars[i], '=' | '>' | '/')
                {
                    name.push(chars[i].to_ascii_lowercase());
                    i += 1;
                }
                let mut value = String::new();
                if chars.get(i) == Some(&'=') {
                    i += 1;
                    match chars.get(i) {
                        Some(&quote @ ('"' | '\'')) => {
                            i += 1;
                            while i < chars.len() && chars[i] != quote {
                                value.push(chars[i]);
                                i += 1;
                            }
                            if i < chars.len() {
                                i += 1;
                            }
                        }
                        _ => {
                            while i < chars.len()
                                && !chars[i].is_whitespace()
                                && chars[i] != '>'
                            {
                                value.push(chars[i]);
                                i += 1;
                            }
                        }
                    }
                }
                if !name.is_empty() {
                    attrs.push((name, entity::unescape(&value)));
                }
            }
        }
    }
}

fn push_text(stack: &mut Vec<OpenElement>, roots: &mut Vec<HtmlNode>, raw: &str) {
    if raw.is_empty() {
        return;
    }
    attach(stack, roots, HtmlNode::Text(entity::unescape(raw)));
}

fn attach(stack: &mut Vec<OpenElement>, roots: &mut Vec<HtmlNode>, node: HtmlNode) {
    match stack.last_mut() {
        Some(open) => open.children.push(node),
        None => roots.push(node),
    }
}

/// Close the nearest open element with this tag, auto-closing anything
/// opened after it. A closer with no matching opener is ignored.
fn close_element(name: &str, stack: &mut Vec<OpenElement>, roots: &mut Vec<HtmlNode>) {
    let Some(position) = stack.iter().rposition(|open| open.tag == name) else {
        return;
    };
    while stack.len() > position {
        let Some(open) = stack.pop() else { break };
        let node = HtmlNode::Element {
            tag: open.tag,
            attrs: open.attrs,
            children: open.children,
        };
        attach(stack, roots, node);
    }
}

// --- stage 2: tree walk ---

fn walk_blocks(nodes: &[HtmlNode], blocks: &mut Vec<Block>) {
    // Bare text and inline tags at block level accumulate into an implicit
    // paragraph, flushed whenever a real block tag shows up.
    let mut pending: Vec<Inline> = Vec::new();

    for node in nodes {
        match node {
            HtmlNode::Text(text) => {
                if !text.trim().is_empty() {
                    pending.push(Inline::Text(collapse_whitespace(text)));
                }
            }
            HtmlNode::Element { tag, children, .. } => match tag.as_str() {
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                    flush_pending(&mut pending, blocks);
                    let level = tag[1..].parse::<u8>().unwrap_or(1);
                    blocks.push(Block::Heading {
                        level,
                        content: collect_inline(children),
                    });
                }
                // Legacy platform dialect: <h class="hN">.
                "h" => {
                    flush_pending(&mut pending, blocks);
                    blocks.push(Block::Heading {
                        level: heading_level_from_class(node),
                        content: collect_inline(children),
                    });
                }
                "p" => {
                    flush_pending(&mut pending, blocks);
                    let content = collect_inline(children);
                    if !content.is_empty() {
                        blocks.push(Block::Paragraph { content });
                    }
                }
                "ul" | "ol" => {
                    flush_pending(&mut pending, blocks);
                    walk_list(children, tag == "ol", 0, blocks);
                }
                "pre" => {
                    flush_pending(&mut pending, blocks);
                    blocks.push(code_block_from_pre(node, children));
                }
                "blockquote" => {
                    flush_pending(&mut pending, blocks);
                    let content = collect_inline(children);
                    if !content.is_empty() {
                        blocks.push(Block::Blockquote { content });
                    }
                }
                "br" | "hr" => {}
                "strong" | "b" | "em" | "i" | "code" | "a" | "u" | "span" => {
                    collect_inline_node(node, &mut pending);
                }
                // Unrecognized tags unwrap: the children are processed in
                // this same block context, the tag itself is dropped.
                _ => {
                    flush_pending(&mut pending, blocks);
                    walk_blocks(children, blocks);
                }
            },
        }
    }

    flush_pending(&mut pending, blocks);
}

fn flush_pending(pending: &mut Vec<Inline>, blocks: &mut Vec<Block>) {
    if pending.is_empty() {
        return;
    }
    let content = normalize_inline(std::mem::take(pending));
    if !content.is_empty() {
        blocks.push(Block::Paragraph { content });
    }
}

/// Walk a `ul`/`ol` subtree, emitting flat `ListItem` blocks. Depth comes
/// from the ancestor list count; clamping against the previously emitted
/// item keeps malformed jumps within the invariant.
fn walk_list(children: &[HtmlNode], ordered: bool, depth: usize, blocks: &mut Vec<Block>) {
    for child in children {
        match child {
            HtmlNode::Element { tag, children, .. } if tag == "li" => {
                let inline_children: Vec<&HtmlNode> = children
                    .iter()
                    .filter(|node| !matches!(node.tag(), Some("ul" | "ol")))
                    .collect();
                let mut content = Vec::new();
                for node in inline_children {
                    collect_inline_node(node, &mut content);
                }
                let prev = match blocks.last() {
                    Some(Block::ListItem { depth, .. }) => Some(*depth),
                    _ => None,
                };
                blocks.push(Block::ListItem {
                    depth: clamp_depth(depth, prev),
                    ordered,
                    content: normalize_inline(content),
                });
                for node in children {
                    if let HtmlNode::Element { tag, children, .. } = node {
                        if tag == "ul" || tag == "ol" {
                            walk_list(children, tag == "ol", depth + 1, blocks);
                        }
                    }
                }
            }
            // A list directly inside a list (no li wrapper) still nests.
            HtmlNode::Element { tag, children, .. } if tag == "ul" || tag == "ol" => {
                walk_list(children, tag == "ol", depth + 1, blocks);
            }
            _ => {}
        }
    }
}

fn code_block_from_pre(pre: &HtmlNode, children: &[HtmlNode]) -> Block {
    let code_child = children
        .iter()
        .find(|node| node.tag() == Some("code"));
    let (language, text) = match code_child {
        Some(code) => (language_from_class(code), code.text_content()),
        None => (language_from_class(pre), pre.text_content()),
    };
    Block::CodeBlock {
        language,
        text: text.trim_matches('\n').to_string(),
    }
}

fn language_from_class(node: &HtmlNode) -> Option<String> {
    node.attr("class")?
        .split_whitespace()
        .find_map(|token| token.strip_prefix("language-"))
        .map(str::to_string)
}

fn heading_level_from_class(node: &HtmlNode) -> u8 {
    node.attr("class")
        .and_then(|class| {
            class
                .split_whitespace()
                .find_map(|token| token.strip_prefix('h'))
                .and_then(|digits| digits.parse::<u8>().ok())
        })
        .filter(|level| (1..=6).contains(level))
        .unwrap_or(1)
}

/// Map a node to inline spans. Unknown inline tags unwrap to their
/// children; block tags encountered in inline context degrade to their
/// plain text.
fn collect_inline_node(node: &HtmlNode, out: &mut Vec<Inline>) {
    match node {
        HtmlNode::Text(text) => {
            if !text.is_empty() {
                out.push(Inline::Text(collapse_whitespace(text)));
            }
        }
        HtmlNode::Element { tag, children, .. } => match tag.as_str() {
            "strong" | "b" => out.push(Inline::Bold(collect_inline(children))),
            "em" | "i" => out.push(Inline::Italic(collect_inline(children))),
            "code" => out.push(Inline::Code(node.text_content())),
            "a" => {
                let label: String = collect_inline(children)
                    .iter()
                    .map(Inline::plain_text)
                    .collect();
                out.push(Inline::Link {
                    text: collapse_whitespace(&label).trim().to_string(),
                    href: node.attr("href").unwrap_or_default().to_string(),
                });
            }
            "br" => out.push(Inline::Text(" ".to_string())),
            _ => {
                // A block tag degrading to inline context still separates
                // words from its siblings.
                if P_CLOSERS.contains(&tag.as_str()) && !out.is_empty() {
                    out.push(Inline::Text(" ".to_string()));
                }
                for child in children {
                    collect_inline_node(child, out);
                }
            }
        },
    }
}

fn collect_inline(nodes: &[HtmlNode]) -> Vec<Inline> {
    let mut out = Vec::new();
    for node in nodes {
        collect_inline_node(node, &mut out);
    }
    normalize_inline(out)
}

/// Merge adjacent text spans, then trim the outer edges of the sequence.
fn normalize_inline(spans: Vec<Inline>) -> Vec<Inline> {
    let mut merged: Vec<Inline> = Vec::new();
    for span in spans {
        match (merged.last_mut(), span) {
            (Some(Inline::Text(acc)), Inline::Text(next)) => acc.push_str(&next),
            (_, span) => merged.push(span),
        }
    }
    if let Some(Inline::Text(first)) = merged.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(Inline::Text(last)) = merged.last_mut() {
        *last = last.trim_end().to_string();
    }
    merged.retain(|span| !matches!(span, Inline::Text(text) if text.is_empty()));
    merged
}

/// Collapse whitespace runs (including newlines from pretty-printed HTML)
/// into single spaces, preserving edge spaces for later normalization.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}

//! Core data structures for the document representation.

/// The root of a parsed rich-text field: an ordered sequence of blocks.
///
/// A `Document` is transient. It is built fresh per conversion call by one
/// of the parsers, walked once by a serializer, then dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

/// A structural unit of text.
///
/// List items are flat: nesting is expressed through `depth`, and a
/// contiguous run of `ListItem` blocks with rising and falling depths
/// implicitly forms and closes nested lists. Reconstructing the nesting is
/// the HTML serializer's job, so both parsers can stay single-pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        /// 1 through 6.
        level: u8,
        content: Vec<Inline>,
    },
    Paragraph {
        content: Vec<Inline>,
    },
    ListItem {
        /// Nesting level relative to the list root, 0 = top level.
        depth: usize,
        ordered: bool,
        content: Vec<Inline>,
    },
    CodeBlock {
        language: Option<String>,
        /// Verbatim text. Never inline-parsed and never markdown-escaped;
        /// only entity-escaped on the way into HTML.
        text: String,
    },
    Blockquote {
        content: Vec<Inline>,
    },
}

/// An inline formatting unit within a block's text.
///
/// Bold and italic nest freely; inline code is a leaf whose content is
/// never reparsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    Code(String),
    Link { text: String, href: String },
}

impl Inline {
    /// Flatten a span to its plain text, dropping formatting.
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(text) | Inline::Code(text) => text.clone(),
            Inline::Bold(children) | Inline::Italic(children) => {
                children.iter().map(Inline::plain_text).collect()
            }
            Inline::Link { text, .. } => text.clone(),
        }
    }
}

/// Clamp a declared list depth against its predecessor.
///
/// A list item cannot sit more than one level deeper than the item before
/// it; the first item of a run is always top level. `prev` is `None` at the
/// start of a run.
pub fn clamp_depth(declared: usize, prev: Option<usize>) -> usize {
    match prev {
        Some(prev) => declared.min(prev + 1),
        None => 0,
    }
}

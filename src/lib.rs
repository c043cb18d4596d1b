//! Bidirectional conversion between Markdown and a constrained rich-text
//! HTML subset.
//!
//!     Task-management platforms store descriptions and comments in a small
//!     fixed HTML vocabulary, while the callers on our side read and write
//!     a lightweight markdown dialect. This crate is the conversion engine
//!     between the two: a structural parser/renderer pair that round-trips
//!     headings, paragraphs, nested lists, fenced code blocks, blockquotes
//!     and inline spans without double-encoding entities or reinterpreting
//!     code content.
//!
//!     This is a pure lib: no I/O, no shared state, no network. The HTTP
//!     client that fetches and sends the text fields lives elsewhere and
//!     only ever calls [`to_storage`] and [`to_display`].
//!
//! Architecture
//!
//!     Both directions meet in a common document model (./ir/nodes.rs): an
//!     ordered block sequence with inline span trees. Each format owns a
//!     parser and a serializer over that model (./formats/<format>/), so a
//!     conversion is parse-source then serialize-target and the two
//!     directions never share mutable state.
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── entity.rs               # HTML entity codec, idempotent escaping
//!     ├── formats
//!     │   ├── markdown
//!     │   │   ├── parser.rs       # block scanner
//!     │   │   ├── inline.rs       # inline span parser/renderer
//!     │   │   └── serializer.rs
//!     │   ├── html
//!     │   │   ├── parser.rs       # tolerant tag tree + walker
//!     │   │   └── serializer.rs
//!     ├── ir                      # document model
//!     └── display.rs              # public entry points, fallback policy
//!
//! Error Policy
//!
//!     Structural anomalies (unterminated fences, unmatched delimiters,
//!     unknown tags, missing closers) are resolved locally by documented
//!     fallback rules and never surface. Only pathological input (nesting
//!     past a hard bound) errors inside the engine, and the display layer
//!     catches that, logs it via the `log` facade, and returns the original
//!     text with tags stripped. Callers never see an error and never lose
//!     content.

pub mod display;
pub mod entity;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;

pub use display::{to_display, to_display_hinted, to_storage, SourceHint};
pub use error::ConvertError;
pub use format::Format;
pub use ir::{Block, Document, Inline};

//! Intermediate representation shared by both conversion directions.

pub mod nodes;

pub use nodes::{clamp_depth, Block, Document, Inline};

//! Format implementations

pub mod html;
pub mod markdown;

//! CLI command implementations

pub mod extract;
pub mod parse;
pub mod simulate;

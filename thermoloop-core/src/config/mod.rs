//! Configuration types
//!
//! Board-agnostic configuration structures and the parser for the embedded
//! TOML file.

pub mod parse;
pub mod types;

pub use parse::parse_config;
pub use types::*;

//! Configuration types
//!
//! Board-agnostic configuration structures, loaded from `board.toml`.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;

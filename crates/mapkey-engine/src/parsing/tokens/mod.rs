//! # Content Tokenization
//!
//! Extracts typed tokens from a segmented block.
//!
//! ## Modules
//!
//! - **`types`**: `Token`, `TokenKind` (closed set, dotted serialized names)
//! - **`kinds`**: content constructs owning their delimiters (`Tag`, `NestedCall`)
//! - **`cursor`**: byte cursor with absolute positions
//! - **`flatten`**: joins tag content across escaped continuation lines
//! - **`parser`**: `tokenize_block`, tag and nested-call recognition
//!
//! ## Key Invariants
//!
//! - Every token span is non-empty and lies inside its block
//! - Output is sorted by `(start, end)`
//! - Tokens of the same kind never overlap

pub mod cursor;
pub mod flatten;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::{TagOccurrence, tag_occurrences, tokenize_block};
pub use types::{Token, TokenKind, sort_tokens};

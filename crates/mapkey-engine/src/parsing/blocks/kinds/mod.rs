//! # Line Kinds
//!
//! Line-level syntax owners. Each type holds its delimiter constants and the
//! recognizer for its line shape; the classifier calls these, it never
//! hardcodes `mapkey` or `!`.

pub mod comment;
pub mod continuation;
pub mod declaration;
pub mod escape;
pub mod region;

pub use comment::Comment;
pub use continuation::Continuation;
pub use declaration::{Declaration, DeclarationSig};
pub use escape::{Escape, Terminator};
pub use region::{Region, RegionSig};

/// ASCII case-insensitive prefix test.
pub(crate) fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Byte length of the leading spaces/tabs.
pub(crate) fn indent_len(s: &str) -> usize {
    s.len() - s.trim_start_matches([' ', '\t']).len()
}

/// Whitespace or a statement terminator: the bytes that end a name.
pub(crate) fn terminator_or_blank(b: u8) -> bool {
    b.is_ascii_whitespace() || b == Terminator::CHAR
}

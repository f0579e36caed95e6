use crate::parsing::rope::span::Span;

use super::{escape::Escape, indent_len};

/// Comment line type with owned marker constant.
pub struct Comment;

impl Comment {
    /// The comment marker; must be the first non-blank character.
    pub const MARKER: char = '!';

    /// Local span of the comment text, from the marker to the last non-blank byte.
    pub fn text(line: &str) -> Option<Span> {
        let indent = indent_len(line);
        if !line[indent..].starts_with(Self::MARKER) {
            return None;
        }
        Some(Span::new(indent, line.trim_end().len()))
    }

    /// A commented line that ends with `;\` keeps its record open.
    pub fn continues(line: &str) -> bool {
        line.trim_end().ends_with(Escape::TERMINATED_SUFFIX)
    }
}

use crate::parsing::rope::span::Span;

use super::{indent_len, starts_with_ignore_case};

/// Continuation line type with owned marker constant.
pub struct Continuation;

impl Continuation {
    /// Prefix that marks a line as extending the record above it.
    pub const MARKER: &'static str = "mapkey(continued)";

    /// Local span of the continuation marker, if the line starts with one.
    pub fn marker(line: &str) -> Option<Span> {
        let indent = indent_len(line);
        if starts_with_ignore_case(&line[indent..], Self::MARKER) {
            Some(Span::new(indent, indent + Self::MARKER.len()))
        } else {
            None
        }
    }
}

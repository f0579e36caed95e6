use crate::parsing::rope::span::Span;

use super::{escape::Escape, indent_len, starts_with_ignore_case, terminator_or_blank};

/// Local spans found on a declaration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationSig {
    /// The `mapkey` keyword as written.
    pub keyword: Span,
    /// The record name following the keyword.
    pub name: Span,
}

/// Declaration line type with owned keyword constant.
pub struct Declaration;

impl Declaration {
    pub const KEYWORD: &'static str = "mapkey";

    /// Recognizes `mapkey <name>` where the keyword is followed by at least
    /// one space or tab and the name contains no whitespace, `;` or escape.
    pub fn sig(line: &str) -> Option<DeclarationSig> {
        let indent = indent_len(line);
        if !starts_with_ignore_case(&line[indent..], Self::KEYWORD) {
            return None;
        }
        let keyword_end = indent + Self::KEYWORD.len();
        let gap = indent_len(&line[keyword_end..]);
        if gap == 0 {
            return None;
        }
        let name_start = keyword_end + gap;
        let name_len = line[name_start..]
            .bytes()
            .position(|b| terminator_or_blank(b) || b == Escape::CHAR)
            .unwrap_or(line.len() - name_start);
        if name_len == 0 {
            return None;
        }
        Some(DeclarationSig {
            keyword: Span::new(indent, keyword_end),
            name: Span::new(name_start, name_start + name_len),
        })
    }
}

use std::fmt;

use serde::Serialize;

use crate::parsing::rope::span::Span;

/// The closed set of token kinds handed to presentation layers.
///
/// Serialized names are the dotted strings from [`TokenKind::as_str`];
/// consumers map them onto their own display taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TokenKind {
    #[serde(rename = "record.keyword")]
    Keyword,
    #[serde(rename = "record.name")]
    Name,
    #[serde(rename = "record.continuation_marker")]
    ContinuationMarker,
    #[serde(rename = "record.escape")]
    Escape,
    #[serde(rename = "record.tag")]
    Tag,
    #[serde(rename = "record.description")]
    Description,
    #[serde(rename = "record.label")]
    Label,
    #[serde(rename = "record.system_instruction")]
    SystemInstruction,
    #[serde(rename = "record.nested_call")]
    NestedCall,
    #[serde(rename = "record.terminator")]
    Terminator,
    #[serde(rename = "comment")]
    Comment,
    #[serde(rename = "region.start")]
    RegionStart,
    #[serde(rename = "region.end")]
    RegionEnd,
}

impl TokenKind {
    pub const ALL: [TokenKind; 13] = [
        TokenKind::Keyword,
        TokenKind::Name,
        TokenKind::ContinuationMarker,
        TokenKind::Escape,
        TokenKind::Tag,
        TokenKind::Description,
        TokenKind::Label,
        TokenKind::SystemInstruction,
        TokenKind::NestedCall,
        TokenKind::Terminator,
        TokenKind::Comment,
        TokenKind::RegionStart,
        TokenKind::RegionEnd,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Keyword => "record.keyword",
            TokenKind::Name => "record.name",
            TokenKind::ContinuationMarker => "record.continuation_marker",
            TokenKind::Escape => "record.escape",
            TokenKind::Tag => "record.tag",
            TokenKind::Description => "record.description",
            TokenKind::Label => "record.label",
            TokenKind::SystemInstruction => "record.system_instruction",
            TokenKind::NestedCall => "record.nested_call",
            TokenKind::Terminator => "record.terminator",
            TokenKind::Comment => "comment",
            TokenKind::RegionStart => "region.start",
            TokenKind::RegionEnd => "region.end",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed fragment of the document.
///
/// `span` is always non-empty. `value` is the source text of the span,
/// except for flattened tag content where it is the space-joined text of
/// every fragment the content spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
    /// The owning block, `None` for document-level tokens.
    pub block_id: Option<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span, block_id: Option<usize>) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
            block_id,
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}

/// Sorts tokens into the canonical order: start, then end, then kind.
pub fn sort_tokens(tokens: &mut [Token]) {
    tokens.sort_by(|a, b| {
        (a.span.start, a.span.end, a.kind).cmp(&(b.span.start, b.span.end, b.kind))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_as_str() {
        for kind in TokenKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn sort_orders_by_start_then_end() {
        let mut tokens = vec![
            Token::new(TokenKind::Label, "b", Span::new(4, 9), Some(0)),
            Token::new(TokenKind::Tag, "a", Span::new(0, 4), Some(0)),
            Token::new(TokenKind::NestedCall, "c", Span::new(4, 6), Some(0)),
        ];
        sort_tokens(&mut tokens);
        let starts: Vec<_> = tokens.iter().map(|t| (t.start(), t.end())).collect();
        assert_eq!(starts, vec![(0, 4), (4, 6), (4, 9)]);
    }
}

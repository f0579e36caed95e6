use std::collections::HashMap;

use crate::parsing::{
    blocks::{
        Block,
        kinds::{Escape, Terminator, terminator_or_blank},
    },
    rope::span::Span,
};

use super::{
    cursor::Cursor,
    flatten::{flatten, segments},
    kinds::{NestedCall, Tag},
    types::{Token, TokenKind, sort_tokens},
};

/// One metadata tag found in a block, with its flattened content if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOccurrence {
    pub tag: Tag,
    /// Span of the tag literal itself.
    pub marker: Span,
    /// `None` when the content flattened to nothing.
    pub content: Option<Token>,
}

/// Tokenizes one block.
///
/// Returns the block's structural tokens together with tag markers, tag
/// content, nested calls and terminators, sorted by start. Constructs are
/// recognized independently, so a broad token (flattened label) may overlap
/// narrower ones (terminators, calls) of other kinds.
pub fn tokenize_block(block: &Block) -> Vec<Token> {
    let mut tokens = block.tokens.clone();

    for occ in tag_occurrences(block) {
        tokens.push(Token::new(
            TokenKind::Tag,
            occ.tag.literal(),
            occ.marker,
            Some(block.id),
        ));
        tokens.extend(occ.content);
    }

    for line in block.statement_lines() {
        scan_body(block, line.body, &mut tokens);
    }

    sort_tokens(&mut tokens);
    tokens
}

/// Finds every metadata tag in the block's statement lines.
///
/// An occurrence that starts inside the previous content of the same tag is
/// part of that content and is skipped, which keeps same-kind tokens disjoint.
pub fn tag_occurrences(block: &Block) -> Vec<TagOccurrence> {
    let segs = segments(block);
    let mut claimed: HashMap<Tag, usize> = HashMap::new();
    let mut out = vec![];

    for (si, seg) in segs.iter().enumerate() {
        let mut cur = Cursor::new(block.text(seg.body), seg.body.start);
        while !cur.eof() {
            let Some(tag) = Tag::ALL
                .into_iter()
                .find(|t| cur.starts_with(t.literal().as_bytes()))
            else {
                cur.bump();
                continue;
            };

            let marker = Span::new(cur.pos(), cur.pos() + tag.literal().len());
            cur.bump_n(tag.literal().len());
            if claimed.get(&tag).is_some_and(|&end| marker.start < end) {
                continue;
            }

            let flat = flatten(block, &segs, si, marker.end);
            let content = flat.span.map(|sp| {
                claimed.insert(tag, sp.end);
                Token::new(tag.content_kind(), flat.value, sp, Some(block.id))
            });
            out.push(TagOccurrence {
                tag,
                marker,
                content,
            });
        }
    }

    out
}

/// Emits terminators and nested calls found in one statement body.
fn scan_body(block: &Block, body: Span, out: &mut Vec<Token>) {
    let text = block.text(body);

    let bytes = text.as_bytes();
    for i in 0..bytes.len() {
        if Terminator::is_unescaped_at(bytes, i) {
            out.push(Token::new(
                TokenKind::Terminator,
                ";",
                Span::new(body.start + i, body.start + i + 1),
                Some(block.id),
            ));
        }
    }

    let mut cur = Cursor::new(text, body.start);
    while !cur.eof() {
        if let Some(token) = try_parse_nested_call(&mut cur, block.id) {
            out.push(token);
            continue;
        }
        cur.bump();
    }
}

/// Attempts to parse `%name;` at the current position.
///
/// The marker must open the body or follow whitespace or `;`, the name must
/// be non-empty, and a terminator must follow (blanks allowed in between).
/// The token spans the name only. On failure, cursor position is restored.
fn try_parse_nested_call(cur: &mut Cursor<'_>, block_id: usize) -> Option<Token> {
    if cur.peek() != Some(NestedCall::MARKER) {
        return None;
    }
    if cur.prev().is_some_and(|b| !NestedCall::may_follow(b)) {
        return None;
    }

    let saved = cur.clone();
    cur.bump(); // %
    let name_start = cur.i;
    let start = cur.pos();
    cur.bump_while(|b| !terminator_or_blank(b) && b != Escape::CHAR);
    let name_end = cur.i;
    let end = cur.pos();
    cur.bump_while(|b| b == b' ' || b == b'\t');

    if name_end == name_start || cur.peek() != Some(Terminator::CHAR) {
        *cur = saved;
        return None;
    }

    Some(Token::new(
        TokenKind::NestedCall,
        &cur.s[name_start..name_end],
        Span::new(start, end),
        Some(block_id),
    ))
}

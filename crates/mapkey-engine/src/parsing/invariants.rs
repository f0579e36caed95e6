//! Runtime checks for segmenter and tokenizer output.
//!
//! Used by unit, scenario and property tests. Every check panics with a
//! description of the offending span.

use xi_rope::Rope;

use crate::parsing::{blocks::Block, tokens::Token};

pub fn check(rope: &Rope, blocks: &[Block], tokens: &[Token]) {
    check_blocks(rope, blocks);
    check_tokens(rope, tokens);
}

pub fn check_blocks(rope: &Rope, blocks: &[Block]) {
    let n = rope.len();
    for b in blocks {
        assert!(
            b.span.start <= b.span.end && b.span.end <= n,
            "block span out of bounds: {:?} (rope len: {})",
            b.span,
            n
        );
        assert_eq!(
            b.raw_text,
            rope.slice_to_cow(b.span.start..b.span.end),
            "block raw text does not match its span: {:?}",
            b.span
        );
        for t in &b.tokens {
            assert!(
                b.span.start <= t.span.start && t.span.end <= b.span.end,
                "token {:?} at {:?} escapes block {:?}",
                t.kind,
                t.span,
                b.span
            );
        }
    }
    for pair in blocks.windows(2) {
        assert!(
            pair[0].span.end <= pair[1].span.start,
            "blocks overlap or are out of order: {:?} then {:?}",
            pair[0].span,
            pair[1].span
        );
    }
}

pub fn check_tokens(rope: &Rope, tokens: &[Token]) {
    let n = rope.len();
    for t in tokens {
        assert!(
            t.span.start < t.span.end && t.span.end <= n,
            "token span empty or out of bounds: {:?} {:?} (rope len: {})",
            t.kind,
            t.span,
            n
        );
    }
    for pair in tokens.windows(2) {
        assert!(
            (pair[0].span.start, pair[0].span.end) <= (pair[1].span.start, pair[1].span.end),
            "tokens not sorted: {:?} then {:?}",
            pair[0].span,
            pair[1].span
        );
    }
    for (i, a) in tokens.iter().enumerate() {
        for b in tokens[i + 1..].iter().take_while(|b| b.span.start < a.span.end) {
            assert!(
                a.kind != b.kind || !a.span.overlaps(b.span),
                "same-kind tokens overlap: {:?} {:?} and {:?}",
                a.kind,
                a.span,
                b.span
            );
        }
    }
}

//! Multi-line flattening of tag content.
//!
//! Tag content may run across continuation lines. Flattening walks the
//! statement bodies of a block (continuation markers and trailing escapes are
//! already outside the bodies), trims each fragment, and joins the surviving
//! fragments with a single space. It stops at the first un-escaped `;`, at a
//! line that does not continue, or at the end of the block.

use crate::parsing::{
    blocks::{Block, kinds::Terminator},
    rope::span::Span,
};

/// Statement text of one block line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub body: Span,
    /// The line ends with an escape, so the statement continues below.
    pub escaped: bool,
}

/// Statement segments of a block in line order, comment lines skipped.
pub fn segments(block: &Block) -> Vec<Segment> {
    block
        .statement_lines()
        .map(|line| Segment {
            body: line.body,
            escaped: line.escape.is_some(),
        })
        .collect()
}

/// Result of flattening one tag's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flattened {
    pub value: String,
    /// From the first to the last non-blank fragment byte; `None` when empty.
    pub span: Option<Span>,
}

/// Flattens content starting at absolute offset `from` inside `segments[seg]`.
pub fn flatten(block: &Block, segments: &[Segment], seg: usize, from: usize) -> Flattened {
    let mut fragments: Vec<Span> = vec![];
    let mut seg = seg;
    let mut from = from;

    while let Some(current) = segments.get(seg) {
        let rest = Span::new(from, current.body.end.max(from));
        let (end, hit_terminator) = match Terminator::find(block.text(rest)) {
            Some(i) => (from + i, true),
            None => (rest.end, false),
        };

        let fragment = trim_span(block, Span::new(from, end));
        if !fragment.is_empty() {
            fragments.push(fragment);
        }

        if hit_terminator || !current.escaped {
            break;
        }
        seg += 1;
        if let Some(next) = segments.get(seg) {
            from = next.body.start;
        }
    }

    let value = fragments
        .iter()
        .map(|sp| block.text(*sp))
        .collect::<Vec<_>>()
        .join(" ");
    let span = match (fragments.first(), fragments.last()) {
        (Some(first), Some(last)) => Some(Span::new(first.start, last.end)),
        _ => None,
    };

    Flattened { value, span }
}

/// Narrows `sp` to exclude leading and trailing whitespace.
fn trim_span(block: &Block, sp: Span) -> Span {
    let text = block.text(sp);
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Span::new(sp.start, sp.start);
    }
    let lead = text.len() - trimmed.len();
    let trail = text.len() - text.trim_end().len();
    Span::new(sp.start + lead, sp.end - trail)
}

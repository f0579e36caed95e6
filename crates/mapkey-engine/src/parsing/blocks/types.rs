use serde::Serialize;

use crate::parsing::{rope::span::Span, tokens::Token};

/// The role a consumed line plays inside its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockLineKind {
    Declaration,
    Continuation,
    Comment,
}

/// One physical line of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockLine {
    pub kind: BlockLineKind,
    /// Line span in the rope, line break excluded.
    pub span: Span,
    /// Statement text after the keyword+name or continuation marker, trailing
    /// escape excluded. Empty for comment lines.
    pub body: Span,
    /// Trailing escape, if the line continues the statement.
    pub escape: Option<Span>,
}

impl BlockLine {
    pub fn is_comment(&self) -> bool {
        self.kind == BlockLineKind::Comment
    }
}

/// One segmented mapkey record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Position of the block in document order.
    pub id: usize,
    pub name: String,
    /// Declaration line through the last consumed line, final line break excluded.
    pub span: Span,
    pub name_span: Span,
    /// Exact source text of `span`.
    pub raw_text: String,
    pub lines: Vec<BlockLine>,
    /// Structural tokens found while segmenting, sorted by start.
    pub tokens: Vec<Token>,
    /// False when the record was cut off before an un-escaped final line.
    pub terminated: bool,
}

impl Block {
    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Source text for an absolute span lying inside this block.
    ///
    /// # Panics
    /// Panics if `sp` is not contained in the block span.
    pub fn text(&self, sp: Span) -> &str {
        &self.raw_text[sp.start - self.span.start..sp.end - self.span.start]
    }

    /// Lines carrying statement text, in order (comment lines skipped).
    pub fn statement_lines(&self) -> impl Iterator<Item = &BlockLine> {
        self.lines.iter().filter(|l| !l.is_comment())
    }
}

/// Segmenter output: records plus the comment and region tokens found
/// between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmented {
    pub blocks: Vec<Block>,
    /// Document-level tokens outside every block, sorted by start.
    pub tokens: Vec<Token>,
}

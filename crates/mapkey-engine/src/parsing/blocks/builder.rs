use crate::parsing::{
    rope::{lines::LineRef, span::Span},
    tokens::{Token, TokenKind, sort_tokens},
};

use super::{
    classify::{LineClass, LineKind},
    types::{Block, BlockLine, BlockLineKind, Segmented},
};

/// A record whose final line has not been seen yet.
#[derive(Debug)]
struct OpenBlock {
    id: usize,
    name: String,
    name_span: Span,
    start: usize,
    last_line_end: usize,
    /// The last consumed line ends its statement; only continuation
    /// lines may still extend the record.
    settled: bool,
    raw: String,
    lines: Vec<BlockLine>,
    tokens: Vec<Token>,
}

impl OpenBlock {
    fn open(id: usize, lr: &LineRef, c: &LineClass) -> Option<Self> {
        let LineKind::Declaration {
            keyword,
            name,
            name_text,
        } = &c.kind
        else {
            return None;
        };

        let mut block = Self {
            id,
            name: name_text.clone(),
            name_span: *name,
            start: c.line.start,
            last_line_end: c.line.end,
            settled: false,
            raw: String::new(),
            lines: vec![],
            tokens: vec![],
        };
        block.push_token(TokenKind::Keyword, *keyword, lr);
        block.push_token(TokenKind::Name, *name, lr);
        block.consume(lr, c);
        Some(block)
    }

    fn consume(&mut self, lr: &LineRef, c: &LineClass) {
        let kind = match c.kind {
            LineKind::Declaration { .. } => BlockLineKind::Declaration,
            LineKind::Continuation { marker } => {
                self.push_token(TokenKind::ContinuationMarker, marker, lr);
                BlockLineKind::Continuation
            }
            LineKind::Comment { text, .. } => {
                self.push_token(TokenKind::Comment, text, lr);
                BlockLineKind::Comment
            }
            _ => return,
        };
        if let Some(escape) = c.escape {
            self.push_token(TokenKind::Escape, escape, lr);
        }

        let body = c.body().unwrap_or(Span::new(c.line.end, c.line.end));
        self.lines.push(BlockLine {
            kind,
            span: c.line,
            body,
            escape: c.escape,
        });
        self.raw.push_str(&lr.text);
        self.last_line_end = c.line.end;
        self.settled = c.is_terminated();
    }

    /// Whether `c` extends this record.
    fn accepts(&self, c: &LineClass) -> bool {
        c.is_continuation() && (!self.settled || matches!(c.kind, LineKind::Continuation { .. }))
    }

    fn push_token(&mut self, kind: TokenKind, sp: Span, lr: &LineRef) {
        if sp.is_empty() {
            return;
        }
        let local = sp.start - lr.span.start..sp.end - lr.span.start;
        self.tokens
            .push(Token::new(kind, &lr.text[local], sp, Some(self.id)));
    }

    fn close(self, terminated: bool) -> Block {
        let span = Span::new(self.start, self.last_line_end);
        let mut raw_text = self.raw;
        raw_text.truncate(span.len());
        let mut tokens = self.tokens;
        sort_tokens(&mut tokens);

        Block {
            id: self.id,
            name: self.name,
            span,
            name_span: self.name_span,
            raw_text,
            lines: self.lines,
            tokens,
            terminated,
        }
    }
}

#[derive(Debug)]
enum State {
    Scanning,
    InContinuation(OpenBlock),
}

/// Line-driven state machine that groups classified lines into records.
///
/// States are `Scanning` (outside any record) and `InContinuation` (a record
/// is open and may absorb more lines). Closing emits the block and returns to
/// `Scanning`; a line that forced the close is then re-examined there.
pub struct BlockBuilder {
    state: State,
    out: Vec<Block>,
    doc_tokens: Vec<Token>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            state: State::Scanning,
            out: vec![],
            doc_tokens: vec![],
        }
    }

    pub fn push(&mut self, lr: &LineRef, c: &LineClass) {
        match std::mem::replace(&mut self.state, State::Scanning) {
            State::Scanning => self.scan(lr, c),
            State::InContinuation(mut open) => {
                if open.accepts(c) {
                    let settled = open.settled;
                    open.consume(lr, c);
                    if c.is_terminated() {
                        self.emit(open, true);
                    } else {
                        if settled {
                            log::trace!("record {:?} reopened at {}", open.name, c.line.start);
                        }
                        self.state = State::InContinuation(open);
                    }
                    return;
                }

                // Close at the previous line; terminated only if that line
                // ended its statement.
                let terminated = open.settled;
                self.emit(open, terminated);
                self.scan(lr, c);
            }
        }
    }

    pub fn finish(mut self) -> Segmented {
        // EOF flush
        if let State::InContinuation(open) = std::mem::replace(&mut self.state, State::Scanning) {
            let terminated = open.settled;
            self.emit(open, terminated);
        }
        sort_tokens(&mut self.doc_tokens);
        Segmented {
            blocks: self.out,
            tokens: self.doc_tokens,
        }
    }

    fn scan(&mut self, lr: &LineRef, c: &LineClass) {
        match &c.kind {
            LineKind::Declaration { .. } => {
                if let Some(open) = OpenBlock::open(self.out.len(), lr, c) {
                    self.state = State::InContinuation(open);
                }
            }
            LineKind::Comment { text, .. } => {
                self.push_doc_token(TokenKind::Comment, *text, lr);
            }
            LineKind::RegionStart { marker, .. } => {
                self.push_doc_token(TokenKind::RegionStart, *marker, lr);
            }
            LineKind::RegionEnd { marker } => {
                self.push_doc_token(TokenKind::RegionEnd, *marker, lr);
            }
            LineKind::Continuation { .. } => {
                log::trace!(
                    "continuation line at {} has no open record, ignoring",
                    c.line.start
                );
            }
            LineKind::Blank | LineKind::Other => {}
        }
    }

    fn push_doc_token(&mut self, kind: TokenKind, sp: Span, lr: &LineRef) {
        let local = sp.start - lr.span.start..sp.end - lr.span.start;
        self.doc_tokens
            .push(Token::new(kind, &lr.text[local], sp, None));
    }

    fn emit(&mut self, open: OpenBlock, terminated: bool) {
        let block = open.close(terminated);
        if terminated {
            log::trace!(
                "record {:?} closed at {}..{}",
                block.name,
                block.span.start,
                block.span.end
            );
        } else {
            log::debug!(
                "record {:?} has no terminating line, closed best-effort at {}",
                block.name,
                block.span.end
            );
        }
        self.out.push(block);
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

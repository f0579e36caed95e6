use crate::parsing::rope::{lines::LineRef, span::Span};

use super::kinds::{Comment, Continuation, Declaration, Escape, Region, RegionSig};

/// What a single line looks like, judged without any surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace only.
    Blank,
    /// `mapkey <name> ...` opening a record.
    Declaration {
        keyword: Span,
        name: Span,
        name_text: String,
    },
    /// `mapkey(continued) ...` extending the open record.
    Continuation { marker: Span },
    /// `! ...` comment; `continues` when it ends with `;\`.
    Comment { text: Span, continues: bool },
    /// `!#region <label>` folding marker.
    RegionStart { marker: Span, label: Option<String> },
    /// `!#endregion` folding marker.
    RegionEnd { marker: Span },
    /// Any other configuration line.
    Other,
}

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of segmentation: each line is classified independently,
/// the builder alone decides what the line means for the open record.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// Byte span of the line in the rope, line break excluded.
    pub line: Span,
    pub kind: LineKind,
    /// Absolute span of the trailing escape byte, if any.
    pub escape: Option<Span>,
}

impl LineClass {
    pub fn is_declaration(&self) -> bool {
        matches!(self.kind, LineKind::Declaration { .. })
    }

    /// Lines an open record may absorb: continuation markers and comments.
    pub fn is_continuation(&self) -> bool {
        matches!(
            self.kind,
            LineKind::Continuation { .. } | LineKind::Comment { .. }
        )
    }

    /// Whether this line closes the statement it belongs to.
    ///
    /// Comment lines only stay open with a `;\` suffix; every other line
    /// stays open with a bare trailing escape.
    pub fn is_terminated(&self) -> bool {
        match self.kind {
            LineKind::Comment { continues, .. } => !continues,
            LineKind::RegionStart { .. } | LineKind::RegionEnd { .. } => true,
            _ => self.escape.is_none(),
        }
    }

    /// Absolute span of the statement text after the keyword+name or the
    /// continuation marker, trailing escape excluded.
    pub fn body(&self) -> Option<Span> {
        let start = match self.kind {
            LineKind::Declaration { name, .. } => name.end,
            LineKind::Continuation { marker } => marker.end,
            _ => return None,
        };
        let end = self.escape.map_or(self.line.end, |e| e.start);
        Some(Span::new(start, end.max(start)))
    }
}

/// Classifies individual lines for the segmentation phase.
pub struct MapkeyLineClassifier;

impl MapkeyLineClassifier {
    /// Classifies a line into a [`LineClass`] containing local facts.
    ///
    /// Precedence: region markers over plain comments, continuation markers
    /// over declarations (`mapkey(continued)` also starts with `mapkey`).
    pub fn classify(&self, lr: &LineRef) -> LineClass {
        let text = lr.content();
        let base = lr.span.start;
        let line = lr.content_span();

        let kind = if text.trim().is_empty() {
            LineKind::Blank
        } else if let Some(region) = Region::sig(text) {
            match region {
                RegionSig::Start { marker, label } => LineKind::RegionStart {
                    marker: marker.offset_by(base),
                    label,
                },
                RegionSig::End { marker } => LineKind::RegionEnd {
                    marker: marker.offset_by(base),
                },
            }
        } else if let Some(comment) = Comment::text(text) {
            LineKind::Comment {
                text: comment.offset_by(base),
                continues: Comment::continues(text),
            }
        } else if let Some(marker) = Continuation::marker(text) {
            LineKind::Continuation {
                marker: marker.offset_by(base),
            }
        } else if let Some(sig) = Declaration::sig(text) {
            LineKind::Declaration {
                keyword: sig.keyword.offset_by(base),
                name: sig.name.offset_by(base),
                name_text: text[sig.name.start..sig.name.end].to_string(),
            }
        } else {
            LineKind::Other
        };

        let escape = match kind {
            LineKind::Declaration { .. } | LineKind::Continuation { .. } => {
                Escape::trailing(text).map(|i| Span::new(base + i, base + i + 1))
            }
            _ => None,
        };

        LineClass { line, kind, escape }
    }
}

use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
    /// The line text as a string, newline included.
    pub text: String,
}

impl LineRef {
    /// The line text without its trailing `\n` / `\r\n`.
    pub fn content(&self) -> &str {
        self.text.trim_end_matches(['\r', '\n'])
    }

    /// Span of [`LineRef::content`], i.e. the line minus its line break.
    pub fn content_span(&self) -> Span {
        Span {
            start: self.span.start,
            end: self.span.start + self.content().len(),
        }
    }
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` to preserve newline characters, which keeps every
/// offset exact during segmentation.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        let len = line.len();
        offset += len;
        LineRef {
            span: Span { start, end: offset },
            text: line.into_owned(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_cover_every_byte() {
        let rope = Rope::from("a\r\nbc\nd");
        let lines: Vec<_> = lines_with_spans(&rope).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].span, Span::new(0, 3));
        assert_eq!(lines[1].span, Span::new(3, 6));
        assert_eq!(lines[2].span, Span::new(6, 7));
    }

    #[test]
    fn content_strips_line_break() {
        let rope = Rope::from("mapkey a;\r\n");
        let line = lines_with_spans(&rope).next().unwrap();
        assert_eq!(line.content(), "mapkey a;");
        assert_eq!(line.content_span(), Span::new(0, 9));
    }
}

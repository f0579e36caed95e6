use xi_rope::Rope;

use crate::{
    graph::{AnalysisOptions, CallGraph, DepthCache, GraphIndex, build_call_graph},
    parsing::{
        blocks::Block,
        definition::{MapkeyDefinition, from_tokens},
        rope::{lines_with_spans, slice::preview, span::Span},
        segment,
        tokens::{Token, TokenKind, sort_tokens, tokenize_block},
    },
};

/// Failed position lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Offset {offset} is outside the document (length {len})")]
    OutOfRange { offset: usize, len: usize },
}

/// One parsed revision of a mapkey configuration file.
///
/// Parsing happens once in the constructor; every accessor is a read over
/// the stored results. A new revision means a new `MapkeyDocument`.
///
/// ```rust
/// # use mapkey_engine::MapkeyDocument;
/// let doc = MapkeyDocument::new("mapkey a %b;\nmapkey b @MAPKEY_LABELBee;\n");
/// assert_eq!(doc.definitions().len(), 2);
/// assert_eq!(doc.callers("b"), vec!["a"]);
/// assert_eq!(doc.find_definition("b").unwrap().label.as_deref(), Some("Bee"));
/// ```
#[derive(Debug, Clone)]
pub struct MapkeyDocument {
    buffer: Rope,
    blocks: Vec<Block>,
    /// Block and document-level tokens, globally sorted.
    tokens: Vec<Token>,
    definitions: Vec<MapkeyDefinition>,
    graph: CallGraph,
    /// Byte offset where each line starts; a trailing line break opens an
    /// empty last line.
    line_starts: Vec<usize>,
}

impl MapkeyDocument {
    pub fn new(text: &str) -> Self {
        let buffer = Rope::from(text);
        let seg = segment(&buffer);

        let mut tokens = seg.tokens;
        let mut definitions = Vec::with_capacity(seg.blocks.len());
        for block in &seg.blocks {
            let block_tokens = tokenize_block(block);
            definitions.push(from_tokens(block, &block_tokens));
            tokens.extend(block_tokens);
        }
        sort_tokens(&mut tokens);
        let graph = build_call_graph(&definitions);

        let mut line_starts = vec![0];
        line_starts.extend(
            lines_with_spans(&buffer)
                .filter(|lr| lr.text.ends_with('\n'))
                .map(|lr| lr.span.end),
        );

        log::debug!(
            "parsed {} records, {} tokens",
            definitions.len(),
            tokens.len()
        );

        Self {
            buffer,
            blocks: seg.blocks,
            tokens,
            definitions,
            graph,
            line_starts,
        }
    }

    /// Create a document from raw bytes, which must be UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    pub fn rope(&self) -> &Rope {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn definitions(&self) -> &[MapkeyDefinition] {
        &self.definitions
    }

    pub fn call_graph(&self) -> &CallGraph {
        &self.graph
    }

    /// Source text of `sp`, cut to `max` bytes for display.
    pub fn preview(&self, sp: Span, max: usize) -> String {
        preview(&self.buffer, sp, max)
    }

    fn check_offset(&self, offset: usize) -> Result<(), LookupError> {
        if offset > self.len() {
            return Err(LookupError::OutOfRange {
                offset,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// The definition whose range contains `offset`.
    pub fn definition_at(&self, offset: usize) -> Result<Option<&MapkeyDefinition>, LookupError> {
        self.check_offset(offset)?;
        Ok(self.definitions.iter().find(|d| d.range.contains(offset)))
    }

    /// The narrowest token containing `offset`; the earliest one on ties.
    pub fn token_at(&self, offset: usize) -> Result<Option<&Token>, LookupError> {
        self.check_offset(offset)?;
        let mut best: Option<&Token> = None;
        for t in self.tokens.iter().take_while(|t| t.start() <= offset) {
            if t.span.contains(offset) && best.is_none_or(|b| t.span.len() < b.span.len()) {
                best = Some(t);
            }
        }
        Ok(best)
    }

    /// Zero-based line and byte column of `offset`.
    pub fn line_col(&self, offset: usize) -> Result<(usize, usize), LookupError> {
        self.check_offset(offset)?;
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        Ok((line, offset - self.line_starts[line]))
    }

    /// First definition named `name`.
    pub fn find_definition(&self, name: &str) -> Option<&MapkeyDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    /// Every definition named `name`, in document order.
    pub fn definitions_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MapkeyDefinition> + 'a {
        self.definitions.iter().filter(move |d| d.name == name)
    }

    /// Nested-call tokens naming `name`.
    pub fn references<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Token> + 'a {
        self.tokens
            .iter()
            .filter(move |t| t.kind == TokenKind::NestedCall && t.value == name)
    }

    /// Distinct names of the records that call `name`, in document order.
    pub fn callers(&self, name: &str) -> Vec<&str> {
        self.graph.callers(name)
    }

    /// Node table for graph queries under the given options.
    pub fn analysis(&self, options: &AnalysisOptions) -> GraphIndex {
        GraphIndex::new(&self.graph, options.duplicate_policy)
    }

    /// Call depth of every definition, in definition order.
    pub fn depths(&self, options: &AnalysisOptions) -> Vec<usize> {
        let index = self.analysis(options);
        let mut cache = DepthCache::new(&index);
        (0..index.entry_count())
            .map(|i| cache.entry_depth(&index, i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SRC: &str = "! top\nmapkey a @MAPKEY_LABELAy;%b;\nmapkey b x;\nmapkey a %b;\n";

    #[test]
    fn offsets_past_end_fail() {
        let doc = MapkeyDocument::new(SRC);
        let len = SRC.len();
        assert!(doc.token_at(len).is_ok());
        assert_eq!(
            doc.definition_at(len + 1),
            Err(LookupError::OutOfRange {
                offset: len + 1,
                len
            })
        );
        assert!(doc.line_col(len + 5).is_err());
    }

    #[test]
    fn definition_at_offset() {
        let doc = MapkeyDocument::new(SRC);
        let offset = SRC.find("mapkey b").unwrap() + 3;
        assert_eq!(doc.definition_at(offset).unwrap().unwrap().name, "b");
        assert_eq!(doc.definition_at(2).unwrap(), None);
    }

    #[test]
    fn token_at_prefers_narrowest() {
        let doc = MapkeyDocument::new(SRC);
        let call = SRC.find("%b").unwrap() + 1;
        let t = doc.token_at(call).unwrap().unwrap();
        assert_eq!(t.kind, TokenKind::NestedCall);
        assert_eq!(t.value, "b");
    }

    #[test]
    fn line_col_counts_from_zero() {
        let doc = MapkeyDocument::new(SRC);
        assert_eq!(doc.line_col(0).unwrap(), (0, 0));
        assert_eq!(doc.line_col(SRC.find("mapkey b").unwrap() + 7).unwrap(), (2, 7));
        assert_eq!(doc.line_col(SRC.len()).unwrap(), (4, 0));
    }

    #[test]
    fn line_col_agrees_with_line_walk() {
        let src = "mapkey a x;\\\r\nmapkey(continued) %b;\r\n\n! tail";
        let doc = MapkeyDocument::new(src);
        let lines: Vec<_> = lines_with_spans(doc.rope()).collect();

        for offset in 0..src.len() {
            let line = lines
                .iter()
                .position(|lr| lr.span.contains(offset))
                .unwrap();
            assert_eq!(
                doc.line_col(offset).unwrap(),
                (line, offset - lines[line].span.start)
            );
        }
        assert_eq!(doc.line_col(src.len()).unwrap(), (3, 6));
        assert_eq!(MapkeyDocument::new("").line_col(0).unwrap(), (0, 0));
    }

    #[test]
    fn name_lookups() {
        let doc = MapkeyDocument::new(SRC);
        assert_eq!(doc.find_definition("a").unwrap().block_id, 0);
        assert_eq!(doc.definitions_named("a").count(), 2);
        assert_eq!(doc.references("b").count(), 2);
        assert_eq!(doc.callers("b"), vec!["a"]);
        assert_eq!(doc.find_definition("zzz"), None);
    }

    #[test]
    fn depths_follow_each_entry() {
        let doc = MapkeyDocument::new(SRC);
        assert_eq!(doc.depths(&AnalysisOptions::default()), vec![1, 0, 1]);
    }

    #[test]
    fn from_bytes_rejects_invalid_utf8() {
        assert!(MapkeyDocument::from_bytes(&[0xff, 0xfe]).is_err());
        assert!(MapkeyDocument::from_bytes(SRC.as_bytes()).is_ok());
    }
}

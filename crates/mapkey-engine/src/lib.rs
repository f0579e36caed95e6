/*!
 * # mapkey engine
 *
 * Text-to-graph pipeline for `mapkey` macro records:
 *
 * 1. **Segmentation** (`parsing::blocks`): lines are classified and grouped
 *    into ordered, non-overlapping blocks, one per record.
 * 2. **Tokenization** (`parsing::tokens`): each block yields typed tokens
 *    with exact byte spans.
 * 3. **Definitions** (`parsing::definition`): block plus tokens become a
 *    `MapkeyDefinition`.
 * 4. **Graph analysis** (`graph`): call graph, call depth, cycles and
 *    nesting-limit violations.
 *
 * Every stage is a pure function of its input. Malformed records and graph
 * anomalies are data (`lint`), never errors; the only fallible operations
 * are position lookups on a `MapkeyDocument`.
 */

pub mod document;
pub mod graph;
pub mod lint;
pub mod parsing;

pub use document::{LookupError, MapkeyDocument};
pub use graph::{
    AnalysisOptions, CallEntry, CallGraph, DuplicatePolicy, GraphIndex, NestingViolation,
};
pub use lint::{Diagnostic, LintCode, Severity, lint};
pub use parsing::{
    definition::MapkeyDefinition,
    rope::span::Span,
    tokens::{Token, TokenKind},
};

/// Every record in `text`, in document order.
pub fn parse(text: &str) -> Vec<MapkeyDefinition> {
    MapkeyDocument::new(text).definitions().to_vec()
}

/// Every token in `text`: block tokens and document-level comment and
/// region tokens, sorted by start.
pub fn tokenize(text: &str) -> Vec<Token> {
    parsing::document_tokens(&parsing::segment_str(text))
}

pub fn build_call_graph(text: &str) -> CallGraph {
    graph::build_call_graph(&parse(text))
}

/// Call cycles in `text`, each closed with its first name repeated.
pub fn find_circular_dependencies(text: &str) -> Vec<Vec<String>> {
    graph::find_cycles(&build_call_graph(text))
}

pub fn nesting_violations(text: &str, limit: usize) -> Vec<NestingViolation> {
    graph::nesting_violations(&parse(text), limit)
}

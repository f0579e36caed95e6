//! Structural and graph anomalies reported as diagnostics.
//!
//! Nothing here fails: malformed records, dangling calls and cycles are
//! ordinary data, and the caller decides what a diagnostic is worth.

use std::{collections::HashMap, fmt};

use serde::Serialize;

use crate::{
    document::MapkeyDocument,
    graph::{AnalysisOptions, find_cycles_in},
    parsing::{
        rope::span::Span,
        tokens::{TokenKind, tag_occurrences},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LintCode {
    UnterminatedRecord,
    DuplicateName,
    EmptyTag,
    DanglingCall,
    CallCycle,
    NestingLimit,
}

impl LintCode {
    pub fn as_str(self) -> &'static str {
        match self {
            LintCode::UnterminatedRecord => "unterminated-record",
            LintCode::DuplicateName => "duplicate-name",
            LintCode::EmptyTag => "empty-tag",
            LintCode::DanglingCall => "dangling-call",
            LintCode::CallCycle => "call-cycle",
            LintCode::NestingLimit => "nesting-limit",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            LintCode::CallCycle | LintCode::NestingLimit => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for LintCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: LintCode,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    fn new(code: LintCode, message: String, span: Span) -> Self {
        Self {
            severity: code.severity(),
            code,
            message,
            span,
        }
    }
}

/// Runs every check over one document; results sorted by span start.
pub fn lint(doc: &MapkeyDocument, options: &AnalysisOptions) -> Vec<Diagnostic> {
    let mut out = vec![];
    let blocks = doc.blocks();
    let defs = doc.definitions();

    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for block in blocks {
        if !block.terminated {
            out.push(Diagnostic::new(
                LintCode::UnterminatedRecord,
                format!("record `{}` ends without a terminating line", block.name),
                block.name_span,
            ));
        }

        match first_seen.get(block.name.as_str()) {
            Some(&first) => out.push(Diagnostic::new(
                LintCode::DuplicateName,
                format!(
                    "`{}` is already defined at offset {}",
                    block.name,
                    blocks[first].start()
                ),
                block.name_span,
            )),
            None => {
                first_seen.insert(&block.name, block.id);
            }
        }

        for occ in tag_occurrences(block).into_iter().filter(|o| o.content.is_none()) {
            out.push(Diagnostic::new(
                LintCode::EmptyTag,
                format!("`{}` has no content", occ.tag.literal()),
                occ.marker,
            ));
        }
    }

    if options.report_dangling_calls {
        let graph = doc.call_graph();
        for t in doc.tokens().iter().filter(|t| t.kind == TokenKind::NestedCall) {
            if !graph.defines(&t.value) {
                out.push(Diagnostic::new(
                    LintCode::DanglingCall,
                    format!("`{}` is called but never defined", t.value),
                    t.span,
                ));
            }
        }
    }

    let index = doc.analysis(options);
    for cycle in find_cycles_in(&index) {
        let Some(head) = cycle.first().and_then(|n| doc.find_definition(n)) else {
            continue;
        };
        out.push(Diagnostic::new(
            LintCode::CallCycle,
            format!("call cycle: {}", cycle.join(" -> ")),
            blocks[head.block_id].name_span,
        ));
    }

    let limit = options.nesting_limit;
    for (def, depth) in defs
        .iter()
        .zip(doc.depths(options))
        .filter(|(_, depth)| depth + 1 > limit)
    {
        out.push(Diagnostic::new(
            LintCode::NestingLimit,
            format!("`{}` nests {} records, limit is {limit}", def.name, depth + 1),
            blocks[def.block_id].name_span,
        ));
    }

    out.sort_by_key(|d| d.span.start);
    out
}

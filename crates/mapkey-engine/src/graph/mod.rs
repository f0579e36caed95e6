//! # Call Graph Analysis
//!
//! Name-based cross-references between records.
//!
//! ## Modules
//!
//! - **`index`**: `GraphIndex`, a name→node table with resolved edges
//! - **`depth`**: longest call chains with cycle-cutting, memoized in `DepthCache`
//! - **`cycles`**: DFS cycle detection
//! - **`nesting`**: records whose call chain exceeds a nesting limit
//!
//! ## Key Invariants
//!
//! - Duplicate record names stay separate entries; `DuplicatePolicy`
//!   decides which entries supply a name's outgoing edges
//! - Names that are called but never defined are dangling nodes: no outgoing
//!   edges, depth 0, never part of a cycle
//! - Every traversal uses an explicit stack

pub mod cycles;
pub mod depth;
pub mod index;
pub mod nesting;

use serde::{Deserialize, Serialize};

use crate::parsing::definition::MapkeyDefinition;

pub use cycles::{find_cycles, find_cycles_in};
pub use depth::{DepthCache, depth};
pub use index::GraphIndex;
pub use nesting::{NestingViolation, nesting_violations, violations_in};

/// Default limit on records in one nested call chain.
pub const DEFAULT_NESTING_LIMIT: usize = 5;

/// One record's outgoing calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallEntry {
    pub name: String,
    /// Called names in source order, duplicates kept.
    pub calls: Vec<String>,
}

/// Ordered call entries, one per definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallGraph {
    pub entries: Vec<CallEntry>,
}

impl CallGraph {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Calls of the first entry named `name`.
    pub fn calls_of(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.calls.as_slice())
    }

    /// Distinct names of the entries that call `name`, in entry order.
    pub fn callers(&self, name: &str) -> Vec<&str> {
        let mut out: Vec<&str> = vec![];
        for e in &self.entries {
            if e.calls.iter().any(|c| c == name) && !out.contains(&e.name.as_str()) {
                out.push(&e.name);
            }
        }
        out
    }

    /// Whether some entry defines `name`.
    pub fn defines(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }
}

pub fn build_call_graph(defs: &[MapkeyDefinition]) -> CallGraph {
    CallGraph {
        entries: defs
            .iter()
            .map(|d| CallEntry {
                name: d.name.clone(),
                calls: d.called_names.clone(),
            })
            .collect(),
    }
}

/// Which entries supply the outgoing edges of a duplicated name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The first definition in document order.
    #[default]
    FirstWins,
    /// The union of every definition's calls.
    KeepAll,
}

/// Knobs for graph analysis and linting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub nesting_limit: usize,
    pub duplicate_policy: DuplicatePolicy,
    pub report_dangling_calls: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            nesting_limit: DEFAULT_NESTING_LIMIT,
            duplicate_policy: DuplicatePolicy::default(),
            report_dangling_calls: true,
        }
    }
}

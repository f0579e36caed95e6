use serde::Serialize;

use crate::parsing::definition::MapkeyDefinition;

use super::{CallGraph, DepthCache, DuplicatePolicy, GraphIndex, build_call_graph};

/// A record whose longest call chain holds more records than allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NestingViolation {
    pub name: String,
    /// Call depth below the record; the chain holds `depth + 1` records.
    pub depth: usize,
}

/// Reports, in definition order, every definition whose nesting level
/// (`depth + 1`) exceeds `limit`.
pub fn nesting_violations(defs: &[MapkeyDefinition], limit: usize) -> Vec<NestingViolation> {
    let graph = build_call_graph(defs);
    let index = GraphIndex::new(&graph, DuplicatePolicy::default());
    violations_in(&graph, &index, limit)
}

pub fn violations_in(graph: &CallGraph, index: &GraphIndex, limit: usize) -> Vec<NestingViolation> {
    let mut cache = DepthCache::new(index);
    let mut out = vec![];
    for (i, entry) in graph.entries.iter().enumerate() {
        let depth = cache.entry_depth(index, i);
        if depth + 1 > limit {
            log::debug!("{} nests {} levels, limit {}", entry.name, depth + 1, limit);
            out.push(NestingViolation {
                name: entry.name.clone(),
                depth,
            });
        }
    }
    out
}

use std::collections::HashMap;

use super::{CallGraph, DuplicatePolicy};

/// Node table over a call graph.
///
/// Defined names come first in entry order, then dangling names in order of
/// first appearance. Edges are distinct targets in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphIndex {
    names: Vec<String>,
    lookup: HashMap<String, usize>,
    defined: usize,
    edges: Vec<Vec<usize>>,
    /// Node of each call-graph entry.
    entry_nodes: Vec<usize>,
    /// Each entry's own calls, independent of the duplicate policy.
    entry_edges: Vec<Vec<usize>>,
}

impl GraphIndex {
    pub fn new(graph: &CallGraph, policy: DuplicatePolicy) -> Self {
        let mut names: Vec<String> = vec![];
        let mut lookup: HashMap<String, usize> = HashMap::new();

        for e in &graph.entries {
            intern(&mut names, &mut lookup, &e.name);
        }
        let defined = names.len();
        for e in &graph.entries {
            for c in &e.calls {
                intern(&mut names, &mut lookup, c);
            }
        }

        let entry_nodes: Vec<usize> = graph.entries.iter().map(|e| lookup[&e.name]).collect();
        let entry_edges: Vec<Vec<usize>> = graph
            .entries
            .iter()
            .map(|e| {
                let mut out = vec![];
                for c in &e.calls {
                    push_distinct(&mut out, lookup[c]);
                }
                out
            })
            .collect();

        let mut edges = vec![Vec::new(); names.len()];
        let mut seen = vec![false; names.len()];
        for (i, &node) in entry_nodes.iter().enumerate() {
            let take = match policy {
                DuplicatePolicy::FirstWins => !seen[node],
                DuplicatePolicy::KeepAll => true,
            };
            seen[node] = true;
            if take {
                for &target in &entry_edges[i] {
                    push_distinct(&mut edges[node], target);
                }
            }
        }

        Self {
            names,
            lookup,
            defined,
            edges,
            entry_nodes,
            entry_edges,
        }
    }

    /// Number of nodes, dangling ones included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, node: usize) -> &str {
        &self.names[node]
    }

    pub fn node(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    pub fn edges(&self, node: usize) -> &[usize] {
        &self.edges[node]
    }

    pub fn is_dangling(&self, node: usize) -> bool {
        node >= self.defined
    }

    /// Called names no entry defines, in order of first appearance.
    pub fn dangling(&self) -> impl Iterator<Item = &str> {
        self.names[self.defined..].iter().map(String::as_str)
    }

    pub fn entry_count(&self) -> usize {
        self.entry_nodes.len()
    }

    pub fn entry_node(&self, entry: usize) -> usize {
        self.entry_nodes[entry]
    }

    pub fn entry_edges(&self, entry: usize) -> &[usize] {
        &self.entry_edges[entry]
    }
}

fn intern(names: &mut Vec<String>, lookup: &mut HashMap<String, usize>, name: &str) {
    if !lookup.contains_key(name) {
        lookup.insert(name.to_string(), names.len());
        names.push(name.to_string());
    }
}

fn push_distinct(v: &mut Vec<usize>, x: usize) {
    if !v.contains(&x) {
        v.push(x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_support::graph;
    use pretty_assertions::assert_eq;

    #[test]
    fn defined_names_precede_dangling() {
        let g = graph(&[("a", &["x", "b"]), ("b", &["y", "x"])]);
        let idx = GraphIndex::new(&g, DuplicatePolicy::FirstWins);
        let names: Vec<_> = (0..idx.len()).map(|i| idx.name(i)).collect();
        assert_eq!(names, vec!["a", "b", "x", "y"]);
        assert_eq!(idx.dangling().collect::<Vec<_>>(), vec!["x", "y"]);
        assert!(idx.is_dangling(2));
        assert!(idx.edges(2).is_empty());
    }

    #[test]
    fn first_wins_ignores_later_duplicates() {
        let g = graph(&[("a", &["b"]), ("b", &[]), ("a", &["c"])]);
        let idx = GraphIndex::new(&g, DuplicatePolicy::FirstWins);
        let a = idx.node("a").unwrap();
        assert_eq!(idx.edges(a), &[idx.node("b").unwrap()]);
        assert_eq!(idx.entry_edges(2), &[idx.node("c").unwrap()]);
        assert_eq!(idx.entry_node(2), a);
    }

    #[test]
    fn keep_all_unions_edges() {
        let g = graph(&[("a", &["b", "b"]), ("a", &["c", "b"])]);
        let idx = GraphIndex::new(&g, DuplicatePolicy::KeepAll);
        let a = idx.node("a").unwrap();
        assert_eq!(idx.edges(a), &[idx.node("b").unwrap(), idx.node("c").unwrap()]);
    }
}

use super::{CallGraph, DuplicatePolicy, GraphIndex};

/// Longest call chain below `name`, counted in edges.
///
/// An edge into a name already on the current chain contributes 0, so
/// cycles terminate. Unknown and dangling names have depth 0.
pub fn depth(graph: &CallGraph, name: &str) -> usize {
    let index = GraphIndex::new(graph, DuplicatePolicy::default());
    let Some(node) = index.node(name) else {
        return 0;
    };
    DepthCache::new(&index).node_depth(&index, node)
}

struct Frame<'a> {
    node: usize,
    edges: &'a [usize],
    next: usize,
    best: usize,
    /// Some edge below this frame was cut because it closed a cycle.
    cut: bool,
}

/// Memoized node depths for one [`GraphIndex`].
///
/// A depth is only cached when its subtree reached no cycle, since cut
/// results depend on the chain that led there.
#[derive(Debug, Clone)]
pub struct DepthCache {
    memo: Vec<Option<usize>>,
}

impl DepthCache {
    pub fn new(index: &GraphIndex) -> Self {
        Self {
            memo: vec![None; index.len()],
        }
    }

    pub fn node_depth(&mut self, index: &GraphIndex, node: usize) -> usize {
        if let Some(d) = self.memo[node] {
            return d;
        }
        self.walk(index, node, index.edges(node), true)
    }

    /// Depth of one call-graph entry, rooted at that entry's own calls.
    pub fn entry_depth(&mut self, index: &GraphIndex, entry: usize) -> usize {
        let node = index.entry_node(entry);
        let own = index.entry_edges(entry);
        if own == index.edges(node) {
            return self.node_depth(index, node);
        }
        self.walk(index, node, own, false)
    }

    fn walk(&mut self, index: &GraphIndex, root: usize, root_edges: &[usize], memo_root: bool) -> usize {
        let mut on_path = vec![false; index.len()];
        on_path[root] = true;
        let mut stack = vec![Frame {
            node: root,
            edges: root_edges,
            next: 0,
            best: 0,
            cut: false,
        }];

        while let Some(top) = stack.last_mut() {
            if let Some(&child) = top.edges.get(top.next) {
                top.next += 1;
                if on_path[child] {
                    top.cut = true;
                    continue;
                }
                if let Some(d) = self.memo[child] {
                    top.best = top.best.max(d + 1);
                    continue;
                }
                on_path[child] = true;
                stack.push(Frame {
                    node: child,
                    edges: index.edges(child),
                    next: 0,
                    best: 0,
                    cut: false,
                });
                continue;
            }

            let Some(done) = stack.pop() else { break };
            on_path[done.node] = false;
            let is_root = stack.is_empty();
            if !done.cut && (memo_root || !is_root) {
                self.memo[done.node] = Some(done.best);
            }
            match stack.last_mut() {
                Some(parent) => {
                    parent.best = parent.best.max(done.best + 1);
                    parent.cut |= done.cut;
                }
                None => return done.best,
            }
        }

        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_support::{chain, graph};
    use rstest::rstest;

    #[test]
    fn self_loop_has_depth_zero() {
        let g = graph(&[("A", &["A"])]);
        assert_eq!(depth(&g, "A"), 0);
    }

    #[test]
    fn mutual_recursion_is_finite() {
        let g = graph(&[("A", &["B"]), ("B", &["A"])]);
        assert_eq!(depth(&g, "A"), 1);
        assert_eq!(depth(&g, "B"), 1);
    }

    #[rstest]
    #[case::single(1, 0)]
    #[case::pair(2, 1)]
    #[case::five(5, 4)]
    #[case::six(6, 5)]
    fn chain_depth(#[case] n: usize, #[case] expected: usize) {
        assert_eq!(depth(&chain(n), "R1"), expected);
    }

    #[test]
    fn dangling_and_unknown_names_are_leaves() {
        let g = graph(&[("a", &["ghost"])]);
        assert_eq!(depth(&g, "a"), 1);
        assert_eq!(depth(&g, "ghost"), 0);
        assert_eq!(depth(&g, "nobody"), 0);
    }

    #[test]
    fn longest_branch_wins() {
        let g = graph(&[("a", &["b", "c"]), ("b", &[]), ("c", &["d"]), ("d", &["e"])]);
        assert_eq!(depth(&g, "a"), 3);
    }

    #[test]
    fn cycle_below_root_is_cut_without_poisoning_cache() {
        // Seen from `b`, `c` only closes a cycle; on its own it reaches `f`.
        let g = graph(&[("a", &["b"]), ("b", &["c", "e"]), ("c", &["b"]), ("e", &["f"]), ("f", &[])]);
        let index = GraphIndex::new(&g, DuplicatePolicy::FirstWins);
        let mut cache = DepthCache::new(&index);
        let node = |n: &str| index.node(n).unwrap();

        assert_eq!(cache.node_depth(&index, node("a")), 3);
        assert_eq!(cache.node_depth(&index, node("c")), 3);
        assert_eq!(cache.node_depth(&index, node("b")), 2);
        assert_eq!(cache.node_depth(&index, node("f")), 0);
    }

    #[test]
    fn entry_depth_uses_own_calls() {
        let g = graph(&[("a", &[]), ("b", &["c"]), ("c", &[]), ("a", &["b"])]);
        let index = GraphIndex::new(&g, DuplicatePolicy::FirstWins);
        let mut cache = DepthCache::new(&index);
        assert_eq!(cache.entry_depth(&index, 0), 0);
        assert_eq!(cache.entry_depth(&index, 3), 2);
        // The root of entry 3 must not have replaced the cached depth of `a`.
        assert_eq!(cache.node_depth(&index, index.node("a").unwrap()), 0);
    }
}

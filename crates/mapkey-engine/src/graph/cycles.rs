use std::collections::HashSet;

use super::{CallGraph, DuplicatePolicy, GraphIndex};

/// Finds call cycles with the default duplicate policy.
pub fn find_cycles(graph: &CallGraph) -> Vec<Vec<String>> {
    find_cycles_in(&GraphIndex::new(graph, DuplicatePolicy::default()))
}

/// Depth-first search from every unvisited node in node order.
///
/// Each edge back into the current path records the path from the revisited
/// node onward, closed with the revisited name again (`["A", "B", "A"]`).
/// Nodes are visited once globally, so not every elementary cycle of a dense
/// graph is listed; each reported cycle is distinct.
pub fn find_cycles_in(index: &GraphIndex) -> Vec<Vec<String>> {
    let n = index.len();
    let mut visited = vec![false; n];
    let mut path_pos: Vec<Option<usize>> = vec![None; n];
    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    let mut out = vec![];

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        path_pos[start] = Some(0);
        let mut path = vec![start];
        // (node, next edge)
        let mut stack = vec![(start, 0usize)];

        while let Some((node, next)) = stack.last_mut() {
            let Some(&child) = index.edges(*node).get(*next) else {
                path_pos[*node] = None;
                path.pop();
                stack.pop();
                continue;
            };
            *next += 1;

            if let Some(pos) = path_pos[child] {
                let mut cycle = path[pos..].to_vec();
                cycle.push(child);
                if seen.insert(cycle.clone()) {
                    let names: Vec<String> = cycle.iter().map(|&i| index.name(i).to_string()).collect();
                    log::debug!("call cycle: {}", names.join(" -> "));
                    out.push(names);
                }
                continue;
            }
            if visited[child] {
                continue;
            }

            visited[child] = true;
            path_pos[child] = Some(path.len());
            path.push(child);
            stack.push((child, 0));
        }
    }

    out
}

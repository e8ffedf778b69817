//! Depth-bounded reachability probe.
//!
//! This module is intentionally small and allocation-light:
//! - A "visited stamp" (`Vec<u32>`) makes the fresh-scratch-per-probe rule
//!   an O(1) generation bump instead of an O(n) clear.
//! - The DFS stack is reused across probes inside the reduction driver.
//!
//! Edges are interpreted as `u -> v` (directed).

use crate::graph::{ReducedGraph, TOMBSTONE};

/// Scratch marks for probes, sized to the node count.
///
/// One probe is one generation: [`reset`](Visited::reset) starts a fresh
/// generation, after which [`contains`](Visited::contains) answers for the
/// current probe only.
#[derive(Debug, Clone)]
pub struct Visited {
    marks: Vec<u32>,
    stamp: u32,
}

impl Visited {
    pub fn new(n: usize) -> Self {
        Self { marks: vec![0u32; n], stamp: 1 }
    }

    /// Forget all marks in O(1). The mark buffer is only rewritten for real
    /// when the stamp wraps.
    pub fn reset(&mut self) {
        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            self.marks.fill(0);
            self.stamp = 1;
        }
    }

    pub fn contains(&self, node: usize) -> bool {
        self.marks[node] == self.stamp
    }

    fn insert(&mut self, node: usize) {
        self.marks[node] = self.stamp;
    }
}

/// Mark every node reachable from `start` within `max_hops` edges.
///
/// `visited` must be freshly [`reset`](Visited::reset) (or newly built): the
/// probe only adds marks, so carried-over marks from an earlier probe would
/// change the result. On return it holds `start` plus every node reachable
/// from it along directed paths of at most `max_hops` edges. A node sitting
/// exactly at the hop boundary is marked but not expanded. Tombstoned slots
/// are skipped, and an already-marked node is never pushed again, so the
/// traversal also terminates on cyclic input.
///
/// Reads adjacency only; the graph is never written.
pub fn mark_reachable(graph: &ReducedGraph, start: usize, max_hops: usize, visited: &mut Visited) {
    let mut stack = Vec::new();
    probe(graph, start, max_hops, visited, &mut stack);
}

/// Worker behind [`mark_reachable`]; the driver passes its own stack so the
/// buffer survives across probes.
pub(crate) fn probe(
    graph: &ReducedGraph,
    start: usize,
    max_hops: usize,
    visited: &mut Visited,
    stack: &mut Vec<(usize, usize)>,
) {
    stack.clear();
    visited.insert(start);
    stack.push((start, 0));

    while let Some((node, depth)) = stack.pop() {
        if depth >= max_hops {
            // The node itself still counts as reached; only expansion stops.
            continue;
        }
        for &next in graph.out_neighbors(node) {
            if next != TOMBSTONE && !visited.contains(next) {
                visited.insert(next);
                stack.push((next, depth + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CscGraph;

    fn chain(n: usize) -> ReducedGraph {
        let edges: Vec<(usize, usize)> = (0..n - 1).map(|i| (i, i + 1)).collect();
        ReducedGraph::from_csc(&CscGraph::from_edges(n, &edges))
    }

    fn marked(g: &ReducedGraph, start: usize, max_hops: usize) -> Vec<usize> {
        let mut visited = Visited::new(g.node_count());
        mark_reachable(g, start, max_hops, &mut visited);
        (0..g.node_count()).filter(|&v| visited.contains(v)).collect()
    }

    #[test]
    fn test_probe_respects_hop_budget() {
        // 0 -> 1 -> 2 -> 3 -> 4
        let g = chain(5);
        assert_eq!(marked(&g, 0, 0), vec![0]);
        assert_eq!(marked(&g, 0, 2), vec![0, 1, 2]);
        assert_eq!(marked(&g, 0, 10), vec![0, 1, 2, 3, 4]);
        assert_eq!(marked(&g, 3, 2), vec![3, 4]);
    }

    #[test]
    fn test_probe_marks_start_even_without_edges() {
        let g = ReducedGraph::from_csc(&CscGraph::from_edges(3, &[]));
        assert_eq!(marked(&g, 1, 5), vec![1]);
    }

    #[test]
    fn test_probe_terminates_on_cycle() {
        // 0 -> 1 -> 2 -> 0
        let g = ReducedGraph::from_csc(&CscGraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]));
        assert_eq!(marked(&g, 0, 100), vec![0, 1, 2]);
    }

    #[test]
    fn test_probe_branches_share_the_budget_per_path() {
        // diamond: 0 -> {1, 2} -> 3, plus a long tail 3 -> 4
        let g = ReducedGraph::from_csc(&CscGraph::from_edges(
            5,
            &[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)],
        ));
        assert_eq!(marked(&g, 0, 2), vec![0, 1, 2, 3]);
        assert_eq!(marked(&g, 0, 3), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_reset_forgets_previous_probe() {
        let g = chain(4);
        let mut visited = Visited::new(4);
        mark_reachable(&g, 0, 10, &mut visited);
        assert!(visited.contains(3));

        visited.reset();
        mark_reachable(&g, 2, 10, &mut visited);
        assert!(!visited.contains(0));
        assert!(visited.contains(3));
    }

    #[test]
    fn test_reset_survives_stamp_wraparound() {
        let g = chain(2);
        let mut visited = Visited::new(2);
        // Drive the stamp all the way around; marks must stay per-generation.
        for _ in 0..3 {
            visited.stamp = u32::MAX - 1;
            visited.reset();
            mark_reachable(&g, 1, 10, &mut visited);
            assert!(visited.contains(1));
            assert!(!visited.contains(0));
            visited.reset();
            assert!(!visited.contains(1));
        }
    }
}

//! Approximate transitive reduction of a DAG in CSC form.
//!
//! The driver walks nodes from `n - 1` down to `0`. For each node it decides,
//! edge by edge, whether some *other* surviving out-edge of the same node
//! already reaches the edge's target within the hop budget; such edges are
//! tombstoned, and the node's slot range is compacted in place before the
//! pass moves on. Nodes above the current one are therefore always fully
//! reduced when probes run through them, so probes see shrinking
//! neighborhoods as the pass proceeds.
//!
//! With a finite hop budget the result is a sound over-approximation: every
//! removed edge keeps an alternate path in the output, but a redundant edge
//! whose witness paths all exceed the budget survives. With
//! [`DepthLimit::Unbounded`] the result is the exact minimal transitive
//! reduction of a simple DAG.
//!
//! The result is only meaningful for acyclic input. Cyclic input does not
//! hang or panic (the probe tracks visited nodes), but no reachability
//! guarantee is made for it.

use crate::graph::{CscGraph, ReducedGraph, TOMBSTONE};
use crate::probe::{probe, Visited};

/// Hop budget policy for witness probes, resolved against the node count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepthLimit {
    /// `max(5, floor(sqrt(n) / 10))`: a slow-growing budget that keeps
    /// probes local on large graphs while staying exhaustive on small ones.
    Scaled,
    /// The same hop budget regardless of graph size.
    Fixed(usize),
    /// No budget: probes see full reachability, and the reduction of a
    /// simple DAG is exact.
    Unbounded,
}

impl Default for DepthLimit {
    fn default() -> Self {
        DepthLimit::Scaled
    }
}

impl DepthLimit {
    /// Concrete hop budget for an `n`-node graph.
    pub fn hops(self, n: usize) -> usize {
        match self {
            DepthLimit::Scaled => (((n as f64).sqrt() / 10.0) as usize).max(5),
            DepthLimit::Fixed(hops) => hops,
            DepthLimit::Unbounded => usize::MAX,
        }
    }
}

/// Per-worker probe state: the stamped mark buffer plus the DFS stack, both
/// reused across every probe the worker runs.
struct Scratch {
    visited: Visited,
    stack: Vec<(usize, usize)>,
}

impl Scratch {
    fn new(n: usize) -> Self {
        Self { visited: Visited::new(n), stack: Vec::new() }
    }
}

/// Remove edges whose target is already reachable through a sibling edge.
///
/// Returns the surviving adjacency as a [`ReducedGraph`]; the input is not
/// mutated. Edge slots keep their original relative order per node, the
/// output never gains an edge the input lacked, and every removed edge
/// `(u, k)` has a directed path of length >= 2 from `u` to `k` in the
/// output. Reducing the repacked output again changes nothing.
pub fn transitive_reduction(graph: &CscGraph, depth_limit: DepthLimit) -> ReducedGraph {
    let n = graph.node_count();
    let max_hops = depth_limit.hops(n);
    let mut reduced = ReducedGraph::from_csc(graph);
    let mut scratch = Scratch::new(n);

    // Highest node first: probes through already-processed nodes then run
    // over minimal adjacency.
    for i in (0..n).rev() {
        let lo = reduced.begin[i];
        let hi = reduced.end[i];
        for k_idx in lo..hi {
            let k = reduced.targets[k_idx];
            if k == TOMBSTONE {
                continue;
            }
            if has_witness(&reduced, lo, hi, k_idx, k, max_hops, &mut scratch) {
                reduced.targets[k_idx] = TOMBSTONE;
            }
        }
        reduced.compact_node(i);
    }

    reduced
}

/// Parallel variant of [`transitive_reduction`]: per node, the per-edge
/// decisions run concurrently over private scratch, and the tombstones are
/// written only after the whole node is decided. Nodes still proceed
/// strictly from `n - 1` down to `0`.
///
/// Invariant: output is stable for a given input, independent of Rayon
/// thread count.
///
/// The deferred writes give every decision the full pre-phase sibling set,
/// so at a finite hop budget this can remove edges the sequential pass
/// keeps (there, a slot tombstoned early is gone from later witness sets).
/// Both results are sound, and they coincide under
/// [`DepthLimit::Unbounded`].
#[cfg(feature = "parallel")]
pub fn transitive_reduction_parallel(graph: &CscGraph, depth_limit: DepthLimit) -> ReducedGraph {
    use rayon::prelude::*;

    let n = graph.node_count();
    let max_hops = depth_limit.hops(n);
    let mut reduced = ReducedGraph::from_csc(graph);

    for i in (0..n).rev() {
        let lo = reduced.begin[i];
        let hi = reduced.end[i];

        // Decide phase: reads only.
        let doomed: Vec<usize> = (lo..hi)
            .into_par_iter()
            .map_init(
                || Scratch::new(n),
                |scratch, k_idx| {
                    let k = reduced.targets[k_idx];
                    if k != TOMBSTONE
                        && has_witness(&reduced, lo, hi, k_idx, k, max_hops, scratch)
                    {
                        Some(k_idx)
                    } else {
                        None
                    }
                },
            )
            .flatten()
            .collect();

        // Write phase.
        for k_idx in doomed {
            reduced.targets[k_idx] = TOMBSTONE;
        }
        reduced.compact_node(i);
    }

    reduced
}

/// Does some other live slot in `[lo, hi)` reach `k` within the budget?
///
/// Each probe starts from a fresh generation of marks; nothing carries over
/// between sibling probes.
fn has_witness(
    reduced: &ReducedGraph,
    lo: usize,
    hi: usize,
    k_idx: usize,
    k: usize,
    max_hops: usize,
    scratch: &mut Scratch,
) -> bool {
    for j_idx in lo..hi {
        if j_idx == k_idx {
            continue;
        }
        let j = reduced.targets[j_idx];
        if j == TOMBSTONE {
            continue;
        }
        scratch.visited.reset();
        probe(reduced, j, max_hops, &mut scratch.visited, &mut scratch.stack);
        if scratch.visited.contains(k) {
            return true;
        }
    }
    false
}

//! CSC-style adjacency storage for the reduction passes.
//!
//! Two layouts:
//! - [`CscGraph`]: the static input, a flat `targets` array plus per-node
//!   `offsets` into it.
//! - [`ReducedGraph`]: the working triple (`begin`/`end`/`targets`) that the
//!   reduction tombstones and compacts in place, and the value it returns.
//!
//! Edges are interpreted as `u -> v` (directed). The name is sparse-matrix
//! heritage: with nodes as columns, column `u`'s stored row indices are
//! exactly `u`'s out-neighbors.

/// Slot marker for a removed edge. Never a valid node index.
pub(crate) const TOMBSTONE: usize = usize::MAX;

/// A directed graph with each node's out-neighbors in one contiguous slice.
///
/// For node `i`, the out-neighbors are `targets[offsets[i] .. offsets[i + 1]]`.
/// Construction checks the shape invariants (`offsets` non-decreasing from 0
/// to `targets.len()`, every target in range) and panics on violation; there
/// is no recoverable error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CscGraph {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl CscGraph {
    /// Build from raw offset/target arrays. `offsets` holds `n + 1` entries.
    pub fn from_parts(offsets: Vec<usize>, targets: Vec<usize>) -> Self {
        assert!(!offsets.is_empty(), "offsets must hold n + 1 entries");
        let n = offsets.len() - 1;
        assert_eq!(offsets[0], 0, "offsets must start at 0");
        assert_eq!(offsets[n], targets.len(), "offsets must end at targets.len()");
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]), "offsets must be non-decreasing");
        assert!(targets.iter().all(|&t| t < n), "every target must be < n");
        Self { offsets, targets }
    }

    /// Build from `u -> v` edge pairs.
    ///
    /// Self-loops are stripped and out-of-range endpoints are ignored
    /// (callers should validate, but be robust); duplicate arcs collapse to
    /// one. Each node's targets come out sorted.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut list: Vec<(usize, usize)> = edges
            .iter()
            .copied()
            .filter(|&(u, v)| u != v && u < n && v < n)
            .collect();
        list.sort_unstable();
        list.dedup();

        let mut offsets = vec![0usize; n + 1];
        for &(u, _) in &list {
            offsets[u + 1] += 1;
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }
        let targets = list.into_iter().map(|(_, v)| v).collect();
        Self { offsets, targets }
    }

    /// Build from a `petgraph` directed graph, keeping node indices.
    #[cfg(feature = "petgraph")]
    pub fn from_petgraph<N, E, Ix>(graph: &petgraph::graph::DiGraph<N, E, Ix>) -> Self
    where
        Ix: petgraph::graph::IndexType,
    {
        use petgraph::visit::EdgeRef;

        let edges: Vec<(usize, usize)> = graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .collect();
        Self::from_edges(graph.node_count(), &edges)
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    pub fn out_neighbors(&self, node: usize) -> &[usize] {
        &self.targets[self.offsets[node]..self.offsets[node + 1]]
    }

    pub fn out_degree(&self, node: usize) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    /// All edges as `(source, target)` pairs, grouped by source.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.node_count())
            .flat_map(move |u| self.out_neighbors(u).iter().map(move |&v| (u, v)))
    }

    /// The raw `(offsets, targets)` pair.
    pub fn as_parts(&self) -> (&[usize], &[usize]) {
        (&self.offsets, &self.targets)
    }
}

/// A graph mid- or post-reduction: node `i`'s surviving out-edges sit in
/// `targets[begin[i] .. end[i])`, in their original relative order.
///
/// Removal overwrites a slot with a tombstone; compacting a node shifts the
/// survivors to the front of its range and pulls `end[i]` down, while
/// `begin[i]` never moves. Values returned by the reduction contain no
/// tombstones anywhere in the live ranges, so the accessors below only ever
/// see real node indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedGraph {
    pub(crate) begin: Vec<usize>,
    pub(crate) end: Vec<usize>,
    pub(crate) targets: Vec<usize>,
}

impl ReducedGraph {
    /// Seed the working triple from a static graph: full ranges, every edge
    /// live. The input is copied, never mutated.
    pub fn from_csc(graph: &CscGraph) -> Self {
        let n = graph.node_count();
        Self {
            begin: graph.offsets[..n].to_vec(),
            end: graph.offsets[1..].to_vec(),
            targets: graph.targets.clone(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.begin.len()
    }

    /// Total number of slots across the live ranges.
    pub fn edge_count(&self) -> usize {
        (0..self.node_count()).map(|i| self.out_degree(i)).sum()
    }

    pub fn out_neighbors(&self, node: usize) -> &[usize] {
        &self.targets[self.begin[node]..self.end[node]]
    }

    pub fn out_degree(&self, node: usize) -> usize {
        self.end[node] - self.begin[node]
    }

    /// All surviving edges as `(source, target)` pairs, grouped by source.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.node_count())
            .flat_map(move |u| self.out_neighbors(u).iter().map(move |&v| (u, v)))
    }

    /// The raw `(begin, end, targets)` triple.
    pub fn as_parts(&self) -> (&[usize], &[usize], &[usize]) {
        (&self.begin, &self.end, &self.targets)
    }

    /// Repack the surviving ranges into a fresh static graph.
    pub fn to_csc(&self) -> CscGraph {
        let n = self.node_count();
        let mut offsets = Vec::with_capacity(n + 1);
        let mut targets = Vec::with_capacity(self.edge_count());
        offsets.push(0);
        for i in 0..n {
            targets.extend_from_slice(self.out_neighbors(i));
            offsets.push(targets.len());
        }
        CscGraph { offsets, targets }
    }

    /// Drop tombstoned slots from node `i`'s range, keeping the survivors'
    /// order. Shrinks `end[i]`; `begin[i]` stays put.
    pub(crate) fn compact_node(&mut self, i: usize) {
        let mut write = self.begin[i];
        for read in self.begin[i]..self.end[i] {
            let t = self.targets[read];
            if t != TOMBSTONE {
                self.targets[write] = t;
                write += 1;
            }
        }
        self.end[i] = write;
    }
}

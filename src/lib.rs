//! Approximate transitive reduction for sparse DAGs in CSC-style adjacency.
//!
//! `tred` removes edges whose target is already reachable through a sibling
//! edge of the same node, shrinking the edge count while preserving the
//! graph's reachability relation. Witness searches are depth-bounded by a
//! pluggable [`DepthLimit`] policy so the pass stays local on large graphs;
//! an unbounded budget recovers the exact minimal reduction of a simple DAG.
//!
//! ```
//! use tred::{transitive_reduction, CscGraph, DepthLimit};
//!
//! // 0 -> 1 -> 2 with a shortcut 0 -> 2.
//! let graph = CscGraph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
//! let reduced = transitive_reduction(&graph, DepthLimit::default());
//! assert_eq!(reduced.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
//! ```
//!
//! Feature flags:
//! - `parallel`: Rayon-backed [`transitive_reduction_parallel`].
//! - `petgraph`: conversion from `petgraph` directed graphs.
//! - `serde`: `Serialize`/`Deserialize` on the policy types.

pub mod graph;
pub mod probe;
pub mod reduce;

pub use graph::{CscGraph, ReducedGraph};
pub use probe::{mark_reachable, Visited};
pub use reduce::{transitive_reduction, DepthLimit};

#[cfg(feature = "parallel")]
pub use reduce::transitive_reduction_parallel;

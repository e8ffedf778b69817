use stats_alloc::{Region, StatsAlloc, INSTRUMENTED_SYSTEM};
use std::alloc::System;

use tred::{transitive_reduction, CscGraph, DepthLimit};

#[global_allocator]
static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

fn chain_with_shortcuts(n: usize, stride: usize) -> CscGraph {
    let mut edges: Vec<(usize, usize)> = (0..n - 1).map(|u| (u, u + 1)).collect();
    for u in 0..n - stride {
        edges.push((u, u + stride));
    }
    CscGraph::from_edges(n, &edges)
}

#[test]
fn reduction_is_allocation_flat_across_probe_counts() {
    // This is a “resource consumption” test:
    // - the driver runs one witness probe per (edge, sibling) pair
    // - probes must reuse one mark buffer and one DFS stack, so the number of
    //   allocations stays fixed while the number of probes grows 10x
    //
    // We test this by counting allocations, not RSS (portable across OSes/CI).

    let small = chain_with_shortcuts(200, 3);
    let large = chain_with_shortcuts(2_000, 3);

    let r_small = Region::new(&GLOBAL);
    let reduced_small = transitive_reduction(&small, DepthLimit::default());
    let s_small = r_small.change();

    let r_large = Region::new(&GLOBAL);
    let reduced_large = transitive_reduction(&large, DepthLimit::default());
    let s_large = r_large.change();

    // Every stride shortcut has a two-hop spine witness, so both runs did
    // real work.
    assert_eq!(reduced_small.edge_count(), small.edge_count() - (200 - 3));
    assert_eq!(reduced_large.edge_count(), large.edge_count() - (2_000 - 3));

    let a_small = s_small.allocations;
    let a_large = s_large.allocations;

    // This is intentionally coarse: exact allocation counts vary by
    // allocator/platform. We care about the qualitative guarantee: the
    // working buffers are set up once, not once per probe.
    assert!(
        a_large < 64,
        "expected a handful of allocations for the whole reduction (got {a_large})"
    );
    assert!(
        a_large <= a_small + 16,
        "allocations must not scale with graph size (small={a_small}, large={a_large})"
    );
}

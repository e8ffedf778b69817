//! Reduce a Matrix-Market graph from disk.
//!
//! Coordinate entries `(r, c)` are read as arcs `c -> r` (row `r` sits in
//! column `c`'s adjacency). For the lower-triangular matrices this layout
//! usually comes from, every arc then points from a lower index to a higher
//! one, so the graph is a DAG out of the box. Diagonal entries are
//! self-loops and are skipped.

use std::path::Path;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tred::{transitive_reduction, CscGraph, DepthLimit};

/// Load a Matrix-Market coordinate file as a directed graph.
///
/// `%` lines are comments; the first data line is `rows cols nnz`; each
/// entry line carries `row col [value]` with 1-based indices.
fn from_matrix_market(path: &Path) -> Result<CscGraph, String> {
    let txt = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

    let mut n = 0usize;
    let mut edges: Vec<(usize, usize)> = Vec::new();
    let mut saw_header = false;

    for (line_no, raw) in txt.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let mut it = line.split_whitespace();
        if !saw_header {
            let rows = next_number(&mut it, line_no, "rows")?;
            let cols = next_number(&mut it, line_no, "cols")?;
            let _nnz = next_number(&mut it, line_no, "nnz")?;
            n = rows.max(cols);
            saw_header = true;
            continue;
        }

        let r = next_number(&mut it, line_no, "row")?;
        let c = next_number(&mut it, line_no, "col")?;
        if r == 0 || c == 0 || r > n || c > n {
            return Err(format!("line {}: entry ({r}, {c}) out of range", line_no + 1));
        }
        if r == c {
            continue;
        }
        edges.push((c - 1, r - 1));
    }

    if !saw_header {
        return Err(format!("{}: no size header found", path.display()));
    }
    Ok(CscGraph::from_edges(n, &edges))
}

fn next_number(
    it: &mut std::str::SplitWhitespace<'_>,
    line_no: usize,
    what: &str,
) -> Result<usize, String> {
    let tok = it
        .next()
        .ok_or_else(|| format!("line {}: missing {what}", line_no + 1))?;
    tok.parse()
        .map_err(|e| format!("line {}: bad {what} '{tok}': {e}", line_no + 1))
}

/// Seeded layered DAG used when no matrix is available: `width` nodes per
/// layer, three random arcs into the next layer per node.
fn layered_dag(n: usize, width: usize, seed: u64) -> CscGraph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut edges: Vec<(usize, usize)> = Vec::new();
    for u in 0..n {
        let next = (u / width + 1) * width;
        if next >= n {
            continue;
        }
        let hi = (next + width).min(n);
        for _ in 0..3 {
            edges.push((u, rng.random_range(next..hi)));
        }
    }
    CscGraph::from_edges(n, &edges)
}

fn main() {
    // If you have a real matrix, point to it:
    //
    // TRED_MTX=/path/to/matrix.mtx cargo run --example reduce_mtx
    //
    // TRED_HOPS=8 (or TRED_HOPS=unbounded) overrides the default hop budget.
    let graph = if let Ok(path) = std::env::var("TRED_MTX") {
        from_matrix_market(Path::new(&path)).expect("failed to load TRED_MTX")
    } else {
        // Prefer the small in-repo fixture if present.
        let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/band16.mtx");
        if fixture.exists() {
            from_matrix_market(&fixture).expect("failed to load testdata/band16.mtx")
        } else {
            layered_dag(2_000, 40, 123)
        }
    };

    let limit = match std::env::var("TRED_HOPS").ok().as_deref() {
        None => DepthLimit::Scaled,
        Some("unbounded") => DepthLimit::Unbounded,
        Some(s) => {
            DepthLimit::Fixed(s.parse().expect("TRED_HOPS must be a number or 'unbounded'"))
        }
    };

    let n = graph.node_count();
    let before = graph.edge_count();
    let budget = match limit {
        DepthLimit::Unbounded => "unbounded".to_string(),
        _ => limit.hops(n).to_string(),
    };

    let reduced = transitive_reduction(&graph, limit);
    let after = reduced.edge_count();

    println!("graph: n={n}, edges={before}");
    println!("hop budget: {budget}");
    println!("reduced: edges={after} ({} removed)", before - after);

    if n <= 32 {
        println!();
        println!("adjacency (before -> after):");
        for u in 0..n {
            println!("  {u:3}: {:?} -> {:?}", graph.out_neighbors(u), reduced.out_neighbors(u));
        }
    }
}

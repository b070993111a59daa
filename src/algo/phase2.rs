//! Phase II (spec §4.3): turning the zero-cost arc family `F` produced by
//! [`crate::algo::frank::phase_one`] into one concrete arborescence.
//!
//! `F` is an *ordered* sequence of edges — the order in which the
//! primal-dual iteration drove each one to reduced cost zero — and both
//! extractors here are greedy over that order, not over cost: whichever
//! edge of `F` was admitted earliest wins whenever more than one edge of
//! `F` could extend the tree to the same vertex. `v1` is the textbook
//! repeated linear scan; `v2` reaches the same result without the
//! O(n·|F|) rescans by tracking a priority queue keyed by position in
//! `F`.

use std::collections::BinaryHeap;

use crate::error::SolverError;
use crate::graph::{Arborescence, EdgeId, Graph, VertexId};
use crate::scored::MinScored;

/// Linear rescan: repeat up to `n - 1` times, each time scanning `f` from
/// the start for the first edge whose tail is already in the tree and
/// whose head is not, adding it, and restarting the scan. A pass that
/// adds nothing before the tree has `n - 1` edges means `f` does not
/// contain a spanning arborescence from `root`.
pub fn extract_v1(g: &Graph, root: VertexId, f: &[EdgeId]) -> Result<Arborescence, SolverError> {
    let n = g.vertex_count();
    let mut in_tree = vec![false; n];
    in_tree[root.index()] = true;
    let mut edges = Vec::with_capacity(n.saturating_sub(1));

    for _ in 0..n.saturating_sub(1) {
        let found = f.iter().find(|&&eid| {
            let e = g.edge(eid);
            in_tree[e.tail.index()] && !in_tree[e.head.index()]
        });
        match found {
            Some(&eid) => {
                let e = g.edge(eid);
                in_tree[e.head.index()] = true;
                edges.push(e);
            }
            None => {
                return Err(SolverError::IncompleteFamily {
                    root,
                    missing: n - 1 - edges.len(),
                });
            }
        }
    }
    Ok(Arborescence { root, edges })
}

/// Heap-guided extraction: each edge of `f` carries priority equal to its
/// position in `f` (earlier is lower). Grow the tree from `root`,
/// repeatedly taking the lowest-priority frontier edge whose head is
/// still unvisited.
pub fn extract_v2(g: &Graph, root: VertexId, f: &[EdgeId]) -> Result<Arborescence, SolverError> {
    let n = g.vertex_count();
    let mut out_in_f: Vec<Vec<(usize, EdgeId)>> = vec![Vec::new(); n];
    for (priority, &eid) in f.iter().enumerate() {
        let tail = g.edge(eid).tail;
        out_in_f[tail.index()].push((priority, eid));
    }

    let mut visited = vec![false; n];
    let mut parent: Vec<Option<EdgeId>> = vec![None; n];
    visited[root.index()] = true;

    let mut heap: BinaryHeap<MinScored<usize, EdgeId>> = BinaryHeap::new();
    for &(priority, eid) in &out_in_f[root.index()] {
        heap.push(MinScored(priority, eid));
    }

    while let Some(MinScored(_, eid)) = heap.pop() {
        let e = g.edge(eid);
        if visited[e.head.index()] {
            continue;
        }
        visited[e.head.index()] = true;
        parent[e.head.index()] = Some(eid);
        for &(priority, next_eid) in &out_in_f[e.head.index()] {
            heap.push(MinScored(priority, next_eid));
        }
    }

    let missing = (0..n).filter(|&i| !visited[i]).count();
    if missing > 0 {
        return Err(SolverError::IncompleteFamily { root, missing });
    }

    let edges = (0..n)
        .filter(|&i| i != root.index())
        .map(|i| g.edge(parent[i].unwrap()))
        .collect();
    Ok(Arborescence { root, edges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Cost, GraphBuilder};

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn chain_graph_and_family() -> (Graph, Vec<EdgeId>) {
        let mut b = GraphBuilder::new(4);
        b.add_edge(v(0), v(1), Cost(0));
        b.add_edge(v(1), v(2), Cost(0));
        b.add_edge(v(2), v(3), Cost(0));
        let g = b.build();
        let f = g.edges().map(|(id, _)| id).collect();
        (g, f)
    }

    #[test]
    fn v2_resolves_a_simple_chain() {
        let (g, f) = chain_graph_and_family();
        let arb = extract_v2(&g, v(0), &f).unwrap();
        assert_eq!(arb.edges.len(), 3);
    }

    #[test]
    fn v1_resolves_a_simple_chain() {
        let (g, f) = chain_graph_and_family();
        let arb = extract_v1(&g, v(0), &f).unwrap();
        assert_eq!(arb.edges.len(), 3);
    }

    #[test]
    fn v1_and_v2_agree_when_f_offers_two_valid_parents() {
        // vertex 3 has two candidate parents in F, (0,3) and (2,3); F's
        // admission order determines which wins for each extractor.
        let mut b = GraphBuilder::new(4);
        b.add_edge(v(0), v(2), Cost(0));
        b.add_edge(v(0), v(3), Cost(0));
        b.add_edge(v(2), v(3), Cost(0));
        let g = b.build();
        let f: Vec<EdgeId> = g.edges().map(|(id, _)| id).collect();

        let t1 = extract_v1(&g, v(0), &f).unwrap();
        let t2 = extract_v2(&g, v(0), &f).unwrap();
        assert_eq!(t1.cost().0, t2.cost().0);
        assert_eq!(t1.edges.len(), 3);
        assert_eq!(t2.edges.len(), 3);
    }

    #[test]
    fn incomplete_family_is_reported() {
        let mut b = GraphBuilder::new(3);
        b.add_edge(v(0), v(1), Cost(0));
        let g = b.build();
        let f: Vec<EdgeId> = g.edges().map(|(id, _)| id).collect();

        let err = extract_v2(&g, v(0), &f).unwrap_err();
        assert!(matches!(err, SolverError::IncompleteFamily { .. }));
        let err = extract_v1(&g, v(0), &f).unwrap_err();
        assert!(matches!(err, SolverError::IncompleteFamily { .. }));
    }
}

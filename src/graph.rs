//! The graph data structure: a directed, weighted, parallel-edge-tolerant
//! graph over a dense vertex id space `[0, n)`.
//!
//! `Graph` is the public, read-only container the rest of the crate
//! operates on: the solvers never mutate it, they build their own working
//! copies (see `working_graph`). It deliberately does not support adding
//! vertices once built — the solvers' internal contraction bookkeeping
//! needs a growable id space, but that need is private to `cle`.

use std::fmt;
use std::ops::{Add, Sub};

/// Dense vertex identifier in `[0, n)`.
///
/// Hashability and equality are the only operations the algorithms
/// require of a vertex; insertion order of vertices carries no meaning.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct VertexId(u32);

impl VertexId {
    #[inline]
    pub fn new(index: usize) -> Self {
        VertexId(index as u32)
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Stable identifier for an edge of a [`Graph`].
///
/// Edges never move once inserted, so an `EdgeId` stays valid for the
/// lifetime of the graph it was issued from — including through the
/// attribution tables the Chu-Liu/Edmonds solver builds during
/// contraction, which tag synthetic edges with the original `EdgeId`
/// they stand in for.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct EdgeId(u32);

impl EdgeId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Edge cost: a non-negative scalar with the ordered-additive-group
/// semantics the solvers need (zero, addition, subtraction that never
/// needs to go negative).
///
/// Concretely a `u64`-backed newtype rather than a type parameter — the
/// crate only ever needs one numeric cost domain, and a generic `C: Ord +
/// Add + Sub + Zero` earns its keep only once a second caller shows up.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Default)]
pub struct Cost(pub u64);

impl Cost {
    pub const ZERO: Cost = Cost(0);

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Cost {
    type Output = Cost;
    #[inline]
    fn add(self, rhs: Cost) -> Cost {
        Cost(self.0 + rhs.0)
    }
}

impl Sub for Cost {
    type Output = Cost;
    #[inline]
    fn sub(self, rhs: Cost) -> Cost {
        debug_assert!(
            self.0 >= rhs.0,
            "reduced cost would go negative: {self:?} - {rhs:?}"
        );
        Cost(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Cost {
        iter.fold(Cost::ZERO, Add::add)
    }
}

/// One directed edge: `tail -> head` at `cost`.
#[derive(Copy, Clone, Debug)]
pub struct Edge {
    pub tail: VertexId,
    pub head: VertexId,
    pub cost: Cost,
}

/// An immutable directed, weighted graph with O(1) in-edge and out-edge
/// lookup by endpoint.
///
/// Built once (via [`GraphBuilder`]) and never mutated afterwards. Parallel
/// edges between the same ordered pair are allowed as long as their costs
/// differ; the solvers only ever consult the cheapest one, so duplicates
/// with identical cost are collapsed at build time.
#[derive(Clone, Debug)]
pub struct Graph {
    edges: Vec<Edge>,
    out_adj: Vec<Vec<EdgeId>>,
    in_adj: Vec<Vec<EdgeId>>,
}

impl Graph {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.out_adj.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        (0..self.out_adj.len()).map(VertexId::new)
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> Edge {
        self.edges[id.index()]
    }

    #[inline]
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, &e)| (EdgeId(i as u32), e))
    }

    /// Out-edges of `v`, in insertion order.
    #[inline]
    pub fn out_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.out_adj[v.index()].iter().copied()
    }

    /// In-edges of `v`, in insertion order.
    #[inline]
    pub fn in_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.in_adj[v.index()].iter().copied()
    }

    /// Every vertex reachable from `root` by following directed edges,
    /// including `root` itself. Used once, at solver entry, to validate
    /// the precondition that an arborescence exists.
    pub fn reachable_from(&self, root: VertexId) -> fixedbitset::FixedBitSet {
        let mut seen = fixedbitset::FixedBitSet::with_capacity(self.vertex_count());
        let mut stack = vec![root];
        seen.insert(root.index());
        while let Some(v) = stack.pop() {
            for e in self.out_edges(v) {
                let head = self.edge(e).head;
                if !seen.contains(head.index()) {
                    seen.insert(head.index());
                    stack.push(head);
                }
            }
        }
        seen
    }
}

/// Builds a [`Graph`] from a vertex count and a list of edges, collapsing
/// exact (tail, head, cost) duplicates.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    n: usize,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    pub fn new(n: usize) -> Self {
        GraphBuilder {
            n,
            edges: Vec::new(),
        }
    }

    /// Add an edge. Panics if either endpoint is out of range or the edge
    /// is a self-loop — both are caller bugs, never recoverable input
    /// errors (the generator and the node-link loader are the only
    /// callers, and both must already uphold §3's invariants).
    pub fn add_edge(&mut self, tail: VertexId, head: VertexId, cost: Cost) -> &mut Self {
        assert!(tail.index() < self.n, "tail {tail:?} out of range");
        assert!(head.index() < self.n, "head {head:?} out of range");
        assert!(tail != head, "self-loops are not permitted");
        self.edges.push(Edge { tail, head, cost });
        self
    }

    pub fn build(self) -> Graph {
        let mut out_adj = vec![Vec::new(); self.n];
        let mut in_adj = vec![Vec::new(); self.n];
        let mut edges: Vec<Edge> = Vec::with_capacity(self.edges.len());
        let mut seen: std::collections::HashSet<(u32, u32, u64)> = std::collections::HashSet::new();
        for e in self.edges {
            let key = (e.tail.0, e.head.0, e.cost.0);
            if !seen.insert(key) {
                continue;
            }
            let id = EdgeId(edges.len() as u32);
            out_adj[e.tail.index()].push(id);
            in_adj[e.head.index()].push(id);
            edges.push(e);
        }
        Graph {
            edges,
            out_adj,
            in_adj,
        }
    }
}

/// A spanning out-tree rooted at `root`: exactly one incoming edge per
/// non-root vertex, all drawn from the original graph with their original
/// costs (§8 P3, edge provenance).
#[derive(Clone, Debug, Default)]
pub struct Arborescence {
    pub root: VertexId,
    pub edges: Vec<Edge>,
}

impl Arborescence {
    pub fn cost(&self) -> Cost {
        self.edges.iter().map(|e| e.cost).sum()
    }
}

//! The Chu-Liu/Edmonds solver's private mutable working graph.
//!
//! Unlike the public [`Graph`](crate::graph::Graph), a `WorkingGraph`
//! supports vertex removal (cascading to incident edges) and the
//! allocation of fresh supernode vertices during contraction — exactly
//! the two operations §4.5 says the public graph model deliberately does
//! not expose. Every working edge still carries the [`EdgeId`] of the
//! original-graph edge it descends from, so cost restoration at the end
//! of the solve (§4.1 step 9) is a lookup, not a re-derivation.

use crate::graph::{Cost, EdgeId, Graph, VertexId};

/// Id of an edge inside a [`WorkingGraph`]. Distinct from [`EdgeId`]
/// (which always names an edge of the original input graph) because one
/// working edge can be synthetic — created during contraction with no
/// single original edge of its own cost, only an attributed source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct WorkingEdgeId(u32);

#[derive(Copy, Clone, Debug)]
pub struct WorkingEdge {
    pub tail: VertexId,
    pub head: VertexId,
    pub reduced_cost: Cost,
    pub original_edge: EdgeId,
}

/// A monotonically increasing supernode id allocator, scoped to one
/// solver invocation and threaded by `&mut` through the whole recursion —
/// replacing the source's dynamic string-concatenated labels (§9) with an
/// integer space that is trivially disjoint from `[0, n)` and globally
/// unique across recursion depth.
pub struct SupernodeAllocator {
    next: u32,
}

impl SupernodeAllocator {
    pub fn starting_after(n: usize) -> Self {
        SupernodeAllocator { next: n as u32 }
    }

    pub fn alloc(&mut self) -> VertexId {
        let id = VertexId::new(self.next as usize);
        self.next += 1;
        id
    }
}

/// A mutable graph over a vertex id space that may extend past the
/// original `[0, n)` (to accommodate supernodes). Vertex and edge slots
/// are tombstoned rather than compacted on removal, so existing ids never
/// get reused or invalidated out from under a caller holding one.
#[derive(Clone, Debug, Default)]
pub struct WorkingGraph {
    vertex_alive: Vec<bool>,
    out_adj: Vec<Vec<WorkingEdgeId>>,
    in_adj: Vec<Vec<WorkingEdgeId>>,
    edges: Vec<Option<WorkingEdge>>,
}

impl WorkingGraph {
    /// Build a working graph from `g`, dropping every edge whose head is
    /// `root` (§4.1 step 1 — the root never has incoming edges considered
    /// by the algorithm).
    pub fn from_graph(g: &Graph, root: VertexId) -> Self {
        let n = g.vertex_count();
        let mut wg = WorkingGraph {
            vertex_alive: vec![true; n],
            out_adj: vec![Vec::new(); n],
            in_adj: vec![Vec::new(); n],
            edges: Vec::new(),
        };
        for (id, e) in g.edges() {
            if e.head == root {
                continue;
            }
            wg.insert_edge(e.tail, e.head, e.cost, id);
        }
        wg
    }

    fn ensure_capacity(&mut self, v: VertexId) {
        let idx = v.index();
        if idx >= self.vertex_alive.len() {
            self.vertex_alive.resize(idx + 1, false);
            self.out_adj.resize(idx + 1, Vec::new());
            self.in_adj.resize(idx + 1, Vec::new());
        }
    }

    /// Bring a freshly allocated supernode into the vertex set.
    pub fn add_vertex(&mut self, v: VertexId) {
        self.ensure_capacity(v);
        assert!(
            !self.vertex_alive[v.index()],
            "supernode id collision at {v:?}"
        );
        self.vertex_alive[v.index()] = true;
    }

    pub fn insert_edge(
        &mut self,
        tail: VertexId,
        head: VertexId,
        reduced_cost: Cost,
        original_edge: EdgeId,
    ) -> WorkingEdgeId {
        self.ensure_capacity(tail);
        self.ensure_capacity(head);
        let id = WorkingEdgeId(self.edges.len() as u32);
        self.edges.push(Some(WorkingEdge {
            tail,
            head,
            reduced_cost,
            original_edge,
        }));
        self.out_adj[tail.index()].push(id);
        self.in_adj[head.index()].push(id);
        id
    }

    pub fn edge(&self, id: WorkingEdgeId) -> WorkingEdge {
        self.edges[id.0 as usize].expect("dangling working edge id")
    }

    pub fn set_reduced_cost(&mut self, id: WorkingEdgeId, cost: Cost) {
        self.edges[id.0 as usize].as_mut().unwrap().reduced_cost = cost;
    }

    pub fn is_alive(&self, v: VertexId) -> bool {
        v.index() < self.vertex_alive.len() && self.vertex_alive[v.index()]
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertex_alive.len())
            .filter(move |&i| self.vertex_alive[i])
            .map(VertexId::new)
    }

    pub fn out_edges(&self, v: VertexId) -> impl Iterator<Item = WorkingEdgeId> + '_ {
        self.out_adj[v.index()].iter().copied()
    }

    pub fn in_edges(&self, v: VertexId) -> impl Iterator<Item = WorkingEdgeId> + '_ {
        self.in_adj[v.index()].iter().copied()
    }

    /// Remove `v` and every edge incident to it (§4.5: "vertex removal
    /// with cascading edge removal").
    pub fn remove_vertex(&mut self, v: VertexId) {
        for id in std::mem::take(&mut self.out_adj[v.index()]) {
            let head = self.edges[id.0 as usize].unwrap().head;
            self.in_adj[head.index()].retain(|&e| e != id);
            self.edges[id.0 as usize] = None;
        }
        for id in std::mem::take(&mut self.in_adj[v.index()]) {
            let tail = self.edges[id.0 as usize].unwrap().tail;
            self.out_adj[tail.index()].retain(|&e| e != id);
            self.edges[id.0 as usize] = None;
        }
        self.vertex_alive[v.index()] = false;
    }
}

//! The Chu-Liu/Edmonds solver (spec §4.1): recursive cycle contraction
//! over a mutable working graph.
//!
//! Each recursive frame reduces every non-root vertex's incoming edges,
//! picks one zero-cost parent per vertex, and either returns (the
//! resulting functional graph is already an arborescence) or finds a
//! cycle, contracts it into a fresh supernode, and recurses on the
//! smaller graph. Unwinding a contraction dereferences the attribution
//! tables built when it was created, so the final result is expressed
//! entirely in terms of the original graph's vertices and edges.

use std::collections::HashMap;

use crate::error::SolverError;
use crate::graph::{Arborescence, Cost, EdgeId, Graph, VertexId};
use crate::observer::{EventKind, Observer};
use crate::working_graph::{SupernodeAllocator, WorkingEdgeId, WorkingGraph};

/// The chosen incoming edge for one vertex, expressed in terms of the
/// *current recursion level's* tail vertex and the *original graph's*
/// edge id. Carrying the original `EdgeId` forward at every level (rather
/// than re-deriving it during expansion) is what makes restoring original
/// costs at the end (§4.1 step 9) a lookup instead of a walk back through
/// every contraction record.
#[derive(Copy, Clone, Debug)]
struct ParentEdge {
    tail: VertexId,
    original_edge: EdgeId,
}

type ParentMap = HashMap<VertexId, ParentEdge>;

/// Compute a minimum-cost arborescence rooted at `root` via recursive
/// cycle contraction.
///
/// # Errors
/// Returns [`SolverError::NoArborescence`] if `root` cannot reach every
/// vertex of `g`.
pub fn min_arborescence_cle(
    g: &Graph,
    root: VertexId,
    observer: Option<&dyn Observer>,
) -> Result<Arborescence, SolverError> {
    let reachable = g.reachable_from(root);
    if let Some(v) = g.vertices().find(|v| !reachable.contains(v.index())) {
        return Err(SolverError::NoArborescence {
            root,
            unreachable: v,
        });
    }

    if g.vertex_count() <= 1 {
        return Ok(Arborescence {
            root,
            edges: Vec::new(),
        });
    }

    let mut wg = WorkingGraph::from_graph(g, root);
    let mut alloc = SupernodeAllocator::starting_after(g.vertex_count());
    let max_depth = g.vertex_count();

    let parents = solve_level(&mut wg, root, &mut alloc, 0, max_depth, observer)?;

    let mut edges = Vec::with_capacity(g.vertex_count() - 1);
    for v in g.vertices() {
        if v == root {
            continue;
        }
        let pe = parents
            .get(&v)
            .ok_or_else(|| SolverError::invariant(0, format!("no parent assigned to {v:?}")))?;
        edges.push(g.edge(pe.original_edge));
    }
    Ok(Arborescence { root, edges })
}

/// One recursive frame: reduce, pick a zero-cost parent per vertex,
/// contract a cycle if one exists, recurse, and expand the result back
/// onto this level's vertex set.
fn solve_level(
    wg: &mut WorkingGraph,
    root: VertexId,
    alloc: &mut SupernodeAllocator,
    depth: usize,
    max_depth: usize,
    observer: Option<&dyn Observer>,
) -> Result<ParentMap, SolverError> {
    if depth > max_depth {
        return Err(SolverError::invariant(
            depth,
            "contraction recursion exceeded the number of vertices",
        ));
    }

    let mut parent: HashMap<VertexId, WorkingEdgeId> = HashMap::new();
    for v in wg.vertices() {
        if v == root {
            continue;
        }
        let chosen = reduce_and_pick(wg, v, depth)?;
        parent.insert(v, chosen);
    }

    match find_cycle(wg, root, &parent) {
        None => {
            let mut map = ParentMap::new();
            for (v, eid) in parent {
                let e = wg.edge(eid);
                map.insert(
                    v,
                    ParentEdge {
                        tail: e.tail,
                        original_edge: e.original_edge,
                    },
                );
            }
            Ok(map)
        }
        Some(cycle) => contract_and_recurse(wg, root, alloc, depth, max_depth, &parent, cycle, observer),
    }
}

/// Reduce `v`'s incoming edges by their minimum and return the chosen
/// zero-cost parent, breaking ties by the lexicographic order of
/// `(tail, head)` (spec §4.1, tie-breaking).
fn reduce_and_pick(
    wg: &mut WorkingGraph,
    v: VertexId,
    depth: usize,
) -> Result<WorkingEdgeId, SolverError> {
    let in_ids: Vec<WorkingEdgeId> = wg.in_edges(v).collect();
    if in_ids.is_empty() {
        return Err(SolverError::invariant(
            depth,
            format!("{v:?} has no incoming edges after root-reachability was confirmed"),
        ));
    }
    let delta = in_ids
        .iter()
        .map(|&id| wg.edge(id).reduced_cost)
        .min()
        .unwrap();
    for &id in &in_ids {
        let e = wg.edge(id);
        wg.set_reduced_cost(id, e.reduced_cost - delta);
    }
    in_ids
        .into_iter()
        .filter(|&id| wg.edge(id).reduced_cost.is_zero())
        .min_by_key(|&id| {
            let e = wg.edge(id);
            (e.tail.index(), e.head.index())
        })
        .ok_or_else(|| SolverError::invariant(depth, format!("{v:?} has no zero-cost parent after reduction")))
}

/// Follow `parent` pointers from the lowest-index non-root vertex that
/// hasn't been resolved yet, looking for a cycle. Deterministic: vertices
/// are tried in ascending id order (spec §5).
fn find_cycle(
    wg: &WorkingGraph,
    root: VertexId,
    parent: &HashMap<VertexId, WorkingEdgeId>,
) -> Option<Vec<VertexId>> {
    #[derive(Copy, Clone, PartialEq)]
    enum State {
        InProgress,
        Done,
    }
    let mut state: HashMap<VertexId, State> = HashMap::new();

    for start in wg.vertices() {
        if start == root || state.contains_key(&start) {
            continue;
        }
        let mut path = Vec::new();
        let mut cur = start;
        loop {
            match state.get(&cur) {
                Some(State::Done) => {
                    for v in path {
                        state.insert(v, State::Done);
                    }
                    break;
                }
                Some(State::InProgress) => {
                    let pos = path.iter().position(|&x| x == cur).unwrap();
                    let cycle = path[pos..].to_vec();
                    for v in &path[..pos] {
                        state.insert(*v, State::Done);
                    }
                    return Some(cycle);
                }
                None => {}
            }
            if cur == root {
                for v in path {
                    state.insert(v, State::Done);
                }
                break;
            }
            state.insert(cur, State::InProgress);
            path.push(cur);
            cur = wg.edge(parent[&cur]).tail;
        }
    }
    None
}

#[allow(clippy::too_many_arguments)]
fn contract_and_recurse(
    wg: &mut WorkingGraph,
    root: VertexId,
    alloc: &mut SupernodeAllocator,
    depth: usize,
    max_depth: usize,
    parent: &HashMap<VertexId, WorkingEdgeId>,
    cycle: Vec<VertexId>,
    observer: Option<&dyn Observer>,
) -> Result<ParentMap, SolverError> {
    use std::collections::HashSet;

    let in_cycle: HashSet<VertexId> = cycle.iter().copied().collect();

    // Preserve each cycle vertex's own F* parent before the vertex (and
    // its edges) are deleted below.
    let mut cycle_internal_parent: HashMap<VertexId, (VertexId, EdgeId)> = HashMap::new();
    for &c in &cycle {
        let e = wg.edge(parent[&c]);
        cycle_internal_parent.insert(c, (e.tail, e.original_edge));
    }

    // in_to_cycle[u] = the cycle vertex that u's cheapest edge into C
    // targets; tie-break by head index (spec §4.1).
    let mut best_in: HashMap<VertexId, (Cost, usize, VertexId, EdgeId)> = HashMap::new();
    for &c in &cycle {
        for eid in wg.in_edges(c).collect::<Vec<_>>() {
            let e = wg.edge(eid);
            if in_cycle.contains(&e.tail) {
                continue;
            }
            let key = (e.reduced_cost, e.head.index(), e.head, e.original_edge);
            best_in
                .entry(e.tail)
                .and_modify(|cur| {
                    if key < *cur {
                        *cur = key;
                    }
                })
                .or_insert(key);
        }
    }

    // out_from_cycle[z] = the cycle vertex that offers the cheapest edge
    // into z; tie-break by tail index (the symmetric rule).
    let mut best_out: HashMap<VertexId, (Cost, usize, VertexId, EdgeId)> = HashMap::new();
    for &c in &cycle {
        for eid in wg.out_edges(c).collect::<Vec<_>>() {
            let e = wg.edge(eid);
            if in_cycle.contains(&e.head) {
                continue;
            }
            let key = (e.reduced_cost, e.tail.index(), e.tail, e.original_edge);
            best_out
                .entry(e.head)
                .and_modify(|cur| {
                    if key < *cur {
                        *cur = key;
                    }
                })
                .or_insert(key);
        }
    }

    let ell = alloc.alloc();
    wg.add_vertex(ell);

    let mut in_to_cycle: HashMap<VertexId, VertexId> = HashMap::new();
    for (&u, &(cost, _, v_u, original_edge)) in &best_in {
        wg.insert_edge(u, ell, cost, original_edge);
        in_to_cycle.insert(u, v_u);
    }

    let mut out_from_cycle: HashMap<VertexId, VertexId> = HashMap::new();
    for (&z, &(cost, _, u_z, original_edge)) in &best_out {
        wg.insert_edge(ell, z, cost, original_edge);
        out_from_cycle.insert(z, u_z);
    }

    if let Some(obs) = observer {
        obs.emit_event(EventKind::CleContractionFound {
            recursion_depth: depth,
            supernode: ell,
            size: cycle.len(),
        });
    }

    for &c in &cycle {
        wg.remove_vertex(c);
    }

    let inner = solve_level(wg, root, alloc, depth + 1, max_depth, observer)?;

    if let Some(obs) = observer {
        obs.emit_event(EventKind::CleCycleExpanded {
            recursion_depth: depth,
            supernode: ell,
        });
    }

    let mut expanded = ParentMap::new();
    for (&w, &pe) in &inner {
        if w == ell {
            continue;
        }
        if pe.tail == ell {
            let u_z = *out_from_cycle
                .get(&w)
                .ok_or_else(|| SolverError::invariant(depth, format!("no out_from_cycle entry for {w:?}")))?;
            expanded.insert(
                w,
                ParentEdge {
                    tail: u_z,
                    original_edge: pe.original_edge,
                },
            );
        } else {
            expanded.insert(w, pe);
        }
    }

    let pe_ell = inner
        .get(&ell)
        .ok_or_else(|| SolverError::invariant(depth, format!("supernode {ell:?} has no parent")))?;
    let u_bar = pe_ell.tail;
    let v_bar = *in_to_cycle
        .get(&u_bar)
        .ok_or_else(|| SolverError::invariant(depth, format!("no in_to_cycle entry for {u_bar:?}")))?;
    expanded.insert(
        v_bar,
        ParentEdge {
            tail: u_bar,
            original_edge: pe_ell.original_edge,
        },
    );
    for &c in &cycle {
        if c == v_bar {
            continue;
        }
        let (tail, original_edge) = cycle_internal_parent[&c];
        expanded.insert(c, ParentEdge { tail, original_edge });
    }

    Ok(expanded)
}

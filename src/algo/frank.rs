//! The primal-dual solver after Andras Frank (spec §4.2).
//!
//! Phase I maintains a reduced-cost copy of every edge and a zero-arc
//! subgraph `D0` that starts empty. Each outer iteration takes the
//! condensation of `D0`, finds every source component other than the one
//! containing `root`, and pays down its in-cut by the cheapest edge
//! entering it — any edge that reaches reduced cost zero joins `D0` and is
//! appended to `F` in the order it was discovered. The loop stops the
//! moment `root`'s component is the condensation's only source: `F` by
//! then spans an arborescence, and Phase II (see
//! [`crate::algo::phase2`]) picks one out of it.

use std::collections::HashSet;

use crate::algo::phase2;
use crate::algo::scc::tarjan_scc_filtered;
use crate::error::SolverError;
use crate::graph::{Arborescence, Cost, EdgeId, Graph, VertexId};
use crate::observer::{EventKind, Observer};

/// One entry of the dual witness sequence `Sigma`: a non-root vertex
/// subset `X` whose in-cut was paid down by `increment` (`> 0`, per the
/// spec's resolution that zero-increment tightenings are never
/// recorded).
#[derive(Clone, Debug)]
pub struct DualStep {
    pub members: Vec<VertexId>,
    pub increment: Cost,
}

/// Phase I's output: the zero-cost arc family `F` (admission order
/// matters — Phase II v1's scan order and v2's heap priority both derive
/// from it) and the dual witness sequence `Sigma`.
pub struct PhaseOneResult {
    pub f: Vec<EdgeId>,
    pub sigma: Vec<DualStep>,
}

/// The full result of the Frank solver: both Phase-II extractions plus
/// the family and witness they were built from, so a caller can
/// cross-validate `t_v1` and `t_v2` against each other and against
/// `sigma` (spec §8 P1, P4).
pub struct FrankResult {
    pub t_v1: Arborescence,
    pub t_v2: Arborescence,
    pub f: Vec<EdgeId>,
    pub sigma: Vec<DualStep>,
}

/// Run Phase I to completion.
pub fn phase_one(
    g: &Graph,
    root: VertexId,
    observer: Option<&dyn Observer>,
) -> Result<PhaseOneResult, SolverError> {
    let n = g.vertex_count();
    let m = g.edge_count();
    let mut reduced: Vec<u64> = g.edges().map(|(_, e)| e.cost.0).collect();
    let mut active = vec![false; m];
    let mut f = Vec::new();
    let mut sigma = Vec::new();
    let max_iterations = n + 1;

    for iteration in 0..max_iterations {
        let sccs = tarjan_scc_filtered(g, |eid| active[eid.index()]);

        let component_of = {
            let mut c = vec![usize::MAX; n];
            for (idx, comp) in sccs.iter().enumerate() {
                for &v in comp {
                    c[v.index()] = idx;
                }
            }
            c
        };

        // A component is a source of the condensation iff no active edge
        // enters it from a different component.
        let mut has_incoming = vec![false; sccs.len()];
        for (eid, e) in g.edges() {
            if active[eid.index()] && component_of[e.tail.index()] != component_of[e.head.index()] {
                has_incoming[component_of[e.head.index()]] = true;
            }
        }

        let root_comp = component_of[root.index()];
        let sources: Vec<usize> = (0..sccs.len())
            .filter(|&idx| idx != root_comp && !has_incoming[idx])
            .collect();

        if sources.is_empty() {
            // Root's component is the condensation's only source: every
            // other component now has an entering arc, so F contains at
            // least one arborescence.
            return Ok(PhaseOneResult { f, sigma });
        }

        for &comp_idx in &sources {
            let mut members = sccs[comp_idx].clone();
            members.sort_by_key(|v| v.index());
            let member_set: HashSet<VertexId> = members.iter().copied().collect();

            let mut cut: Vec<EdgeId> = g
                .edges()
                .filter(|(eid, e)| {
                    !active[eid.index()]
                        && member_set.contains(&e.head)
                        && !member_set.contains(&e.tail)
                })
                .map(|(eid, _)| eid)
                .collect();
            cut.sort_by_key(|&eid| {
                let e = g.edge(eid);
                (e.tail.index(), e.head.index())
            });

            let y = cut
                .iter()
                .map(|&eid| reduced[eid.index()])
                .min()
                .ok_or_else(|| {
                    SolverError::invariant(
                        iteration,
                        format!("source component containing {:?} has an empty in-cut", members[0]),
                    )
                })?;

            for &eid in &cut {
                reduced[eid.index()] -= y;
                if reduced[eid.index()] == 0 {
                    active[eid.index()] = true;
                    f.push(eid);
                }
            }
            if y > 0 {
                sigma.push(DualStep {
                    members,
                    increment: Cost(y),
                });
            }
        }

        if let Some(obs) = observer {
            obs.emit_event(EventKind::FrankOuterIteration {
                iteration,
                source_components: sources.len(),
                zero_arcs_total: f.len(),
            });
        }
    }

    Err(SolverError::invariant(
        max_iterations,
        "Phase I failed to converge to a single source within n+1 outer iterations",
    ))
}

/// Run Phase I, then extract a spanning arborescence from `F` with both
/// Phase-II extractors.
pub fn min_arborescence_frank(
    g: &Graph,
    root: VertexId,
    observer: Option<&dyn Observer>,
) -> Result<FrankResult, SolverError> {
    let reachable = g.reachable_from(root);
    if let Some(v) = g.vertices().find(|v| !reachable.contains(v.index())) {
        return Err(SolverError::NoArborescence {
            root,
            unreachable: v,
        });
    }
    if g.vertex_count() <= 1 {
        let empty = Arborescence {
            root,
            edges: Vec::new(),
        };
        return Ok(FrankResult {
            t_v1: empty.clone(),
            t_v2: empty,
            f: Vec::new(),
            sigma: Vec::new(),
        });
    }

    let result = phase_one(g, root, observer)?;
    let t_v1 = phase2::extract_v1(g, root, &result.f)?;
    let t_v2 = phase2::extract_v2(g, root, &result.f)?;
    Ok(FrankResult {
        t_v1,
        t_v2,
        f: result.f,
        sigma: result.sigma,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Cost as C, GraphBuilder};

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn scenario_a_matches_cle() {
        let mut b = GraphBuilder::new(6);
        b.add_edge(v(0), v(1), C(2));
        b.add_edge(v(0), v(2), C(10));
        b.add_edge(v(0), v(3), C(10));
        b.add_edge(v(1), v(3), C(4));
        b.add_edge(v(2), v(1), C(1));
        b.add_edge(v(3), v(4), C(2));
        b.add_edge(v(4), v(2), C(2));
        b.add_edge(v(2), v(5), C(8));
        b.add_edge(v(3), v(5), C(4));
        let g = b.build();

        let result = min_arborescence_frank(&g, v(0), None).unwrap();
        assert_eq!(result.t_v1.cost().0, 14);
        assert_eq!(result.t_v2.cost().0, 14);
    }

    #[test]
    fn scenario_b_disjoint_two_cycles() {
        let mut b = GraphBuilder::new(5);
        b.add_edge(v(0), v(1), C(1));
        b.add_edge(v(1), v(2), C(2));
        b.add_edge(v(2), v(1), C(2));
        b.add_edge(v(1), v(3), C(3));
        b.add_edge(v(3), v(4), C(4));
        b.add_edge(v(4), v(3), C(1));
        let g = b.build();

        let result = min_arborescence_frank(&g, v(0), None).unwrap();
        assert_eq!(result.t_v1.cost().0, 10);
        assert_eq!(result.t_v2.cost().0, 10);
    }

    #[test]
    fn scenario_d_unreachable_vertex() {
        let mut b = GraphBuilder::new(3);
        b.add_edge(v(0), v(1), C(1));
        let g = b.build();

        let err = min_arborescence_frank(&g, v(0), None).unwrap_err();
        assert!(matches!(err, SolverError::NoArborescence { .. }));
    }

    #[test]
    fn sigma_only_records_positive_increments() {
        let mut b = GraphBuilder::new(3);
        b.add_edge(v(0), v(1), C(1));
        b.add_edge(v(1), v(2), C(1));
        let g = b.build();

        let result = phase_one(&g, v(0), None).unwrap();
        assert!(result.sigma.iter().all(|s| s.increment.0 > 0));
    }
}

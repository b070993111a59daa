//! Independent verification of a solver's output against LP duality (spec
//! §4.4): for every `(X, y)` the primal-dual phase tightened, a claimed
//! arborescence is optimal only if it crosses that cut exactly once. This
//! module never re-derives `Sigma` itself — it only checks an
//! already-produced `(T, Sigma)` pair, so a bug that corrupts `Sigma`
//! on the way out of Phase I is still caught here rather than silently
//! validated against itself.

use std::collections::HashSet;

use thiserror::Error;

use crate::algo::frank::DualStep;
use crate::graph::{Arborescence, VertexId};

#[derive(Debug, Error, Eq, PartialEq)]
pub enum CertificateError {
    /// `T` crosses `members` a number of times other than exactly once —
    /// violating complementary slackness for this `(X, y)` pair.
    #[error("tree crosses cut of size {cut_size} {crossings} times, expected exactly 1")]
    CutCrossingMismatch { cut_size: usize, crossings: usize },
}

/// Check that `arb` satisfies complementary slackness against every
/// `(X, y)` entry of `sigma`: exactly one edge of `arb` has its head in
/// `X` and its tail outside `X`.
pub fn check_dual_certificate(
    arb: &Arborescence,
    sigma: &[DualStep],
) -> Result<(), CertificateError> {
    for step in sigma {
        let members: HashSet<VertexId> = step.members.iter().copied().collect();
        let crossings = arb
            .edges
            .iter()
            .filter(|e| members.contains(&e.head) && !members.contains(&e.tail))
            .count();
        if crossings != 1 {
            return Err(CertificateError::CutCrossingMismatch {
                cut_size: members.len(),
                crossings,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::{min_arborescence_cle, min_arborescence_frank};
    use crate::graph::{Cost, GraphBuilder};

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn frank_certifies_both_of_its_own_extractions() {
        let mut b = GraphBuilder::new(6);
        b.add_edge(v(0), v(1), Cost(2));
        b.add_edge(v(0), v(2), Cost(10));
        b.add_edge(v(0), v(3), Cost(10));
        b.add_edge(v(1), v(3), Cost(4));
        b.add_edge(v(2), v(1), Cost(1));
        b.add_edge(v(3), v(4), Cost(2));
        b.add_edge(v(4), v(2), Cost(2));
        b.add_edge(v(2), v(5), Cost(8));
        b.add_edge(v(3), v(5), Cost(4));
        let g = b.build();

        let result = min_arborescence_frank(&g, v(0), None).unwrap();
        check_dual_certificate(&result.t_v1, &result.sigma).unwrap();
        check_dual_certificate(&result.t_v2, &result.sigma).unwrap();

        let cle_arb = min_arborescence_cle(&g, v(0), None).unwrap();
        assert_eq!(cle_arb.cost().0, result.t_v1.cost().0);
    }

    #[test]
    fn empty_sigma_is_trivially_accepted() {
        let arb = Arborescence {
            root: v(0),
            edges: Vec::new(),
        };
        check_dual_certificate(&arb, &[]).unwrap();
    }

    #[test]
    fn a_tree_missing_a_cut_crossing_is_rejected() {
        let arb = Arborescence {
            root: v(0),
            edges: Vec::new(),
        };
        let sigma = vec![DualStep {
            members: vec![v(1)],
            increment: Cost(3),
        }];
        let err = check_dual_certificate(&arb, &sigma).unwrap_err();
        assert!(matches!(
            err,
            CertificateError::CutCrossingMismatch { crossings: 0, .. }
        ));
    }
}

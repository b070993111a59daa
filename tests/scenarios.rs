//! Scenarios A-F: the fixed graphs and expected costs both solvers must
//! agree on, reproduced at the integration level so they run against the
//! public API rather than the crate's own internals.

use arborescence::algo::{
    check_dual_certificate, min_arborescence_cle, min_arborescence_frank,
};
use arborescence::{Cost, GraphBuilder, SolverError, VertexId};

fn v(i: usize) -> VertexId {
    VertexId::new(i)
}

#[test]
fn scenario_a_textbook_five_vertex() {
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

    let cle = min_arborescence_cle(&g, v(0), None).unwrap();
    assert_eq!(cle.cost().0, 14);

    let frank = min_arborescence_frank(&g, v(0), None).unwrap();
    assert_eq!(frank.t_v1.cost().0, 14);
    assert_eq!(frank.t_v2.cost().0, 14);
    check_dual_certificate(&frank.t_v1, &frank.sigma).unwrap();
    check_dual_certificate(&frank.t_v2, &frank.sigma).unwrap();
}

#[test]
fn scenario_b_disjoint_two_cycles() {
    let mut b = GraphBuilder::new(5);
    b.add_edge(v(0), v(1), Cost(1));
    b.add_edge(v(1), v(2), Cost(2));
    b.add_edge(v(2), v(1), Cost(2));
    b.add_edge(v(1), v(3), Cost(3));
    b.add_edge(v(3), v(4), Cost(4));
    b.add_edge(v(4), v(3), Cost(1));
    let g = b.build();

    let cle = min_arborescence_cle(&g, v(0), None).unwrap();
    assert_eq!(cle.cost().0, 10);

    let frank = min_arborescence_frank(&g, v(0), None).unwrap();
    assert_eq!(frank.t_v1.cost().0, 10);
    assert_eq!(frank.t_v2.cost().0, 10);
}

#[test]
fn scenario_c_nine_vertex_nested_cycle() {
    let mut b = GraphBuilder::new(9);
    b.add_edge(v(0), v(1), Cost(3));
    b.add_edge(v(0), v(2), Cost(6));
    b.add_edge(v(1), v(2), Cost(1));
    b.add_edge(v(2), v(1), Cost(1));
    b.add_edge(v(1), v(3), Cost(2));
    b.add_edge(v(1), v(4), Cost(10));
    b.add_edge(v(3), v(4), Cost(1));
    b.add_edge(v(4), v(2), Cost(10));
    b.add_edge(v(4), v(5), Cost(1));
    b.add_edge(v(5), v(6), Cost(1));
    b.add_edge(v(6), v(4), Cost(1));
    b.add_edge(v(6), v(7), Cost(8));
    b.add_edge(v(7), v(8), Cost(4));
    b.add_edge(v(8), v(6), Cost(5));
    b.add_edge(v(6), v(8), Cost(2));
    let g = b.build();

    let cle = min_arborescence_cle(&g, v(0), None).unwrap();
    let frank = min_arborescence_frank(&g, v(0), None).unwrap();
    assert_eq!(cle.cost().0, frank.t_v1.cost().0);
    assert_eq!(cle.cost().0, frank.t_v2.cost().0);
    check_dual_certificate(&frank.t_v1, &frank.sigma).unwrap();
    check_dual_certificate(&frank.t_v2, &frank.sigma).unwrap();
}

#[test]
fn scenario_d_unreachable_vertex() {
    let mut b = GraphBuilder::new(3);
    b.add_edge(v(0), v(1), Cost(1));
    let g = b.build();

    assert!(matches!(
        min_arborescence_cle(&g, v(0), None).unwrap_err(),
        SolverError::NoArborescence { .. }
    ));
    assert!(matches!(
        min_arborescence_frank(&g, v(0), None).unwrap_err(),
        SolverError::NoArborescence { .. }
    ));
}

#[test]
fn scenario_e_single_vertex() {
    let b = GraphBuilder::new(1);
    let g = b.build();

    let cle = min_arborescence_cle(&g, v(0), None).unwrap();
    assert_eq!(cle.edges.len(), 0);
    assert_eq!(cle.cost().0, 0);

    let frank = min_arborescence_frank(&g, v(0), None).unwrap();
    assert_eq!(frank.t_v1.edges.len(), 0);
    assert_eq!(frank.t_v2.edges.len(), 0);
}

/// Scenario F: a 2000-vertex random instance, run to completion within the
/// harness budget. Real wall-clock cost, so this is gated behind
/// `--ignored` rather than silently shrunk.
#[test]
#[ignore]
fn scenario_f_two_thousand_vertex_random() {
    use arborescence::generator::{generate, GeneratorConfig, GraphFamily};

    for family in [
        GraphFamily::Random,
        GraphFamily::Sparse,
        GraphFamily::Dense,
        GraphFamily::Layered,
    ] {
        let config = GeneratorConfig {
            vertex_count: 2000,
            family,
            cost_range: 1..=1000,
            seed: 2000,
        };
        let g = generate(&config);
        let root = v(0);

        let cle = min_arborescence_cle(&g, root, None).unwrap();
        let frank = min_arborescence_frank(&g, root, None).unwrap();
        assert_eq!(cle.cost().0, frank.t_v1.cost().0);
        assert_eq!(cle.cost().0, frank.t_v2.cost().0);
        check_dual_certificate(&frank.t_v1, &frank.sigma).unwrap();
        check_dual_certificate(&frank.t_v2, &frank.sigma).unwrap();
    }
}

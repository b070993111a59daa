//! Minimum-cost r-arborescence solvers.
//!
//! Two independent solvers share the same [`graph::Graph`] input and
//! [`graph::Arborescence`] output:
//!
//! - [`algo::min_arborescence_cle`] — recursive Chu-Liu/Edmonds cycle
//!   contraction.
//! - [`algo::min_arborescence_frank`] — Andras Frank's primal-dual
//!   algorithm, which in addition to an arborescence produces a zero-cost
//!   arc family and a dual witness sequence that
//!   [`algo::check_dual_certificate`] can verify independently of either
//!   solver.
//!
//! [`generator`] builds random rooted test instances, [`harness`] runs both
//! solvers across a batch of them and cross-validates the results, and
//! [`serial`] gives the harness a way to dump a failing instance to disk.

pub mod algo;
pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
pub mod harness;
pub mod observer;
pub mod scored;
pub mod serial;
mod working_graph;

pub use error::SolverError;
pub use graph::{Arborescence, Cost, Edge, EdgeId, Graph, GraphBuilder, VertexId};
pub use observer::{EventKind, GraphView, NullObserver, Observer, TracingObserver};

//! Typed observer interface (spec §9), replacing the polymorphic
//! logging/drawing hooks the original threaded through every function.
//!
//! Solvers accept an `Option<&dyn Observer>` once, at the top level, and
//! propagate it by reference through recursion. There is no localization
//! parameter anywhere in this crate: an observer renders `EventKind` and
//! `GraphView` however its caller likes (structured log line, `tracing`
//! span, a snapshot written to disk for later drawing) but the solver
//! itself never knows or cares which.

use crate::graph::VertexId;

/// A named occurrence during solving, with a small bag of numeric
/// context. Kept deliberately flat (no nested payload enum) so an
/// observer can log it as a single structured record without matching on
/// solver-internal types.
#[derive(Debug, Clone)]
pub enum EventKind {
    /// CLE found a cycle of `size` vertices at `recursion_depth` and is
    /// about to contract it into `supernode`.
    CleContractionFound {
        recursion_depth: usize,
        supernode: VertexId,
        size: usize,
    },
    /// CLE finished expanding a contraction back into the working graph.
    CleCycleExpanded {
        recursion_depth: usize,
        supernode: VertexId,
    },
    /// Frank Phase I completed one outer iteration.
    FrankOuterIteration {
        iteration: usize,
        source_components: usize,
        zero_arcs_total: usize,
    },
}

/// A caption plus the vertex/edge counts of the graph at a point in time,
/// for an observer that wants to render a snapshot (e.g. for drawing).
/// The crate never produces an actual drawing; it only ever hands this
/// struct to whoever asked for one.
#[derive(Debug, Clone)]
pub struct GraphView {
    pub caption: String,
    pub vertex_count: usize,
    pub edge_count: usize,
}

/// Two optional capabilities a caller can implement to watch a solve run.
/// Both methods have no-op defaults, so an observer that only cares about
/// events doesn't have to stub out snapshots.
pub trait Observer {
    fn emit_event(&self, _event: EventKind) {}
    fn emit_snapshot(&self, _view: GraphView) {}
}

/// An observer that discards everything. The default when no caller
/// supplies one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl Observer for NullObserver {}

/// Forwards every event to `tracing` at debug level. This is the harness
/// binary's observer (see `bin/volume_test.rs`); the solver library itself
/// never depends on `tracing` directly, matching the split petgraph's own
/// algorithm crates keep from the binaries that log their results.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn emit_event(&self, event: EventKind) {
        tracing::debug!(?event, "solver event");
    }

    fn emit_snapshot(&self, view: GraphView) {
        tracing::debug!(
            caption = %view.caption,
            vertices = view.vertex_count,
            edges = view.edge_count,
            "solver snapshot"
        );
    }
}

//! Error taxonomy (spec §7).
//!
//! `NoArborescence` is the only user-facing outcome: the input graph has a
//! non-root vertex unreachable from `r`, and both solvers return it as an
//! ordinary `Result` variant. `IncompleteFamily` and `InvariantViolation`
//! are internal — they indicate a bug in Phase I or in an assertion the
//! solvers maintain about their own state, never a malformed input.

use crate::graph::VertexId;
use thiserror::Error;

/// Context recorded when the Chu-Liu/Edmonds or Frank solver trips an
/// internal invariant. Printed by the harness (§7: "logged with the full
/// recursion context") before it halts.
#[derive(Debug, Clone)]
pub struct InvariantContext {
    pub message: String,
    pub recursion_depth: usize,
}

#[derive(Debug, Error)]
pub enum SolverError {
    /// `root` cannot reach every vertex of the input graph.
    #[error("vertex {unreachable:?} is not reachable from root {root:?}")]
    NoArborescence {
        root: VertexId,
        unreachable: VertexId,
    },

    /// A Phase-II extractor received a zero-cost family `F` that does not
    /// span every vertex from `root` — a Phase I bug, never a user error.
    #[error("zero-cost family does not span the graph from {root:?}: {missing} vertices unreached")]
    IncompleteFamily { root: VertexId, missing: usize },

    /// An internal assertion failed. This is a programming bug; the
    /// invocation that hit it cannot be trusted and must be aborted.
    #[error("invariant violated at recursion depth {}: {}", .context.recursion_depth, .context.message)]
    InvariantViolation { context: InvariantContext },
}

impl SolverError {
    pub(crate) fn invariant(depth: usize, message: impl Into<String>) -> Self {
        SolverError::InvariantViolation {
            context: InvariantContext {
                message: message.into(),
                recursion_depth: depth,
            },
        }
    }
}

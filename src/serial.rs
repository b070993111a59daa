//! Node-link serialization (spec §6) for test artifacts — never a
//! primary data path. The only format this crate persists to disk is a
//! failing [`crate::harness::volume_test`] case, dumped so it can be
//! replayed outside the harness; solving never reads or writes this
//! format directly.

use serde::{Deserialize, Serialize};

use crate::graph::{Cost, Graph, GraphBuilder, VertexId};

/// One edge in the node-link encoding. The cost field is spelled `cost`
/// literally, per spec §6's "edge cost is recorded under a single fixed
/// attribute name".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeLinkEdge {
    pub source: usize,
    pub target: usize,
    pub cost: u64,
}

/// A whole graph plus its distinguished root, in node-link form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeLink {
    pub vertex_count: usize,
    pub root: usize,
    pub edges: Vec<NodeLinkEdge>,
}

impl NodeLink {
    pub fn from_graph(g: &Graph, root: VertexId) -> Self {
        NodeLink {
            vertex_count: g.vertex_count(),
            root: root.index(),
            edges: g
                .edges()
                .map(|(_, e)| NodeLinkEdge {
                    source: e.tail.index(),
                    target: e.head.index(),
                    cost: e.cost.0,
                })
                .collect(),
        }
    }

    pub fn to_graph(&self) -> (Graph, VertexId) {
        let mut b = GraphBuilder::new(self.vertex_count);
        for e in &self.edges {
            b.add_edge(
                VertexId::new(e.source),
                VertexId::new(e.target),
                Cost(e.cost),
            );
        }
        (b.build(), VertexId::new(self.root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn round_trips_through_json() {
        let mut b = GraphBuilder::new(3);
        b.add_edge(v(0), v(1), Cost(4));
        b.add_edge(v(1), v(2), Cost(5));
        let g = b.build();

        let link = NodeLink::from_graph(&g, v(0));
        let json = serde_json::to_string(&link).unwrap();
        let parsed: NodeLink = serde_json::from_str(&json).unwrap();
        let (g2, root2) = parsed.to_graph();

        assert_eq!(g2.edge_count(), g.edge_count());
        assert_eq!(root2, v(0));
        assert!(json.contains("\"cost\":4"));
    }
}

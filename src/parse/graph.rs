//! petgraph-based directed index over a canvas graph.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use super::types::{FlowGraph, NodeKind};
use crate::error::CompilerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLabel {
    pub edge_id: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

/// Node weights are `(id, kind)`; edges keep their id and handles.
#[derive(Debug)]
pub struct GraphIndex {
    pub graph: DiGraph<(String, NodeKind), EdgeLabel>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl GraphIndex {
    pub fn build(flow: &FlowGraph) -> Result<Self, Vec<CompilerError>> {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut errors = Vec::new();

        for node in &flow.nodes {
            let id = node.id().to_string();
            let idx = graph.add_node((id.clone(), node.kind()));
            node_indices.insert(id, idx);
        }

        for edge in &flow.edges {
            let source_idx = node_indices.get(&edge.source);
            let target_idx = node_indices.get(&edge.target);

            match (source_idx, target_idx) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(
                        s,
                        t,
                        EdgeLabel {
                            edge_id: edge.id.clone(),
                            source_handle: edge.source_handle.clone(),
                            target_handle: edge.target_handle.clone(),
                        },
                    );
                }
                (None, _) => {
                    errors.push(CompilerError::parse(
                        "P002",
                        format!("Edge '{}' references unknown source node '{}'", edge.id, edge.source),
                    ));
                }
                (_, None) => {
                    errors.push(CompilerError::parse(
                        "P002",
                        format!("Edge '{}' references unknown target node '{}'", edge.id, edge.target),
                    ));
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(GraphIndex { graph, node_indices })
    }

    pub fn kind_of(&self, node_id: &str) -> Option<NodeKind> {
        self.node_indices.get(node_id).map(|&idx| self.graph[idx].1)
    }

    /// Ids of nodes with an edge into `node_id`.
    pub fn predecessors(&self, node_id: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .map(|n| self.graph[n].0.as_str())
            .collect()
    }
}

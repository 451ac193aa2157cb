//! Connection policy for the rule canvas (C001–C003).
//!
//! A rejected connection is never an error for the caller: the edge is left
//! out and the reason is reported next to the result.

use std::collections::HashMap;

use crate::error::CompilerError;
use crate::parse::types::{FlowEdge, FlowGraph, NodeKind};

/// `(source kind, target kind)` pairs an edge may join.
pub const ALLOWED_CONNECTIONS: [(NodeKind, NodeKind); 2] = [
    (NodeKind::Entity, NodeKind::Join),
    (NodeKind::Join, NodeKind::Action),
];

pub fn is_allowed(source: NodeKind, target: NodeKind) -> bool {
    ALLOWED_CONNECTIONS.contains(&(source, target))
}

/// Check one proposed edge against the graph's nodes and existing edges.
pub fn check_connection(graph: &FlowGraph, edge: &FlowEdge) -> Result<(), CompilerError> {
    check_edge(&node_kinds(graph), &graph.edges, edge)
}

/// Result of proposing one edge. `graph` includes the edge only when accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectOutcome {
    pub graph: FlowGraph,
    pub rejected: Option<CompilerError>,
}

impl ConnectOutcome {
    pub fn is_accepted(&self) -> bool {
        self.rejected.is_none()
    }
}

pub fn connect(graph: &FlowGraph, edge: FlowEdge) -> ConnectOutcome {
    let mut graph = graph.clone();
    match check_connection(&graph, &edge) {
        Ok(()) => {
            graph.edges.push(edge);
            ConnectOutcome {
                graph,
                rejected: None,
            }
        }
        Err(reason) => {
            tracing::debug!(edge = %edge.id, %reason, "connection rejected");
            ConnectOutcome {
                graph,
                rejected: Some(reason),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEdge {
    pub edge: FlowEdge,
    pub reason: CompilerError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredEdges {
    pub accepted: Vec<FlowEdge>,
    pub rejected: Vec<RejectedEdge>,
}

/// Apply the policy to the graph's edges in order; duplicates are judged
/// against the edges accepted so far.
pub fn filter_edges(graph: &FlowGraph) -> FilteredEdges {
    let kinds = node_kinds(graph);
    let mut filtered = FilteredEdges::default();

    for edge in &graph.edges {
        match check_edge(&kinds, &filtered.accepted, edge) {
            Ok(()) => filtered.accepted.push(edge.clone()),
            Err(reason) => {
                tracing::debug!(edge = %edge.id, %reason, "edge dropped");
                filtered.rejected.push(RejectedEdge {
                    edge: edge.clone(),
                    reason,
                });
            }
        }
    }

    filtered
}

fn node_kinds(graph: &FlowGraph) -> HashMap<&str, NodeKind> {
    graph.nodes.iter().map(|n| (n.id(), n.kind())).collect()
}

fn check_edge(
    kinds: &HashMap<&str, NodeKind>,
    existing: &[FlowEdge],
    edge: &FlowEdge,
) -> Result<(), CompilerError> {
    let source = kinds.get(edge.source.as_str()).copied().ok_or_else(|| {
        CompilerError::connect(
            "C002",
            format!("Edge '{}' references unknown source node '{}'", edge.id, edge.source),
            Some(edge.source.clone()),
        )
    })?;
    let target = kinds.get(edge.target.as_str()).copied().ok_or_else(|| {
        CompilerError::connect(
            "C002",
            format!("Edge '{}' references unknown target node '{}'", edge.id, edge.target),
            Some(edge.target.clone()),
        )
    })?;

    if !is_allowed(source, target) {
        return Err(CompilerError::connect(
            "C001",
            format!("Cannot connect {} to {}", source, target),
            Some(edge.source.clone()),
        ));
    }

    if existing.iter().any(|e| e.same_connection(edge)) {
        return Err(CompilerError::connect(
            "C003",
            format!(
                "Edge '{}' duplicates an existing connection from '{}' to '{}'",
                edge.id, edge.source, edge.target
            ),
            Some(edge.source.clone()),
        ));
    }

    Ok(())
}

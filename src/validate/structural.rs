//! Rule-graph completeness rules (G001–G003) and the disconnected-entity
//! warning (W001).

use crate::error::CompilerError;
use crate::parse::graph::GraphIndex;
use crate::parse::types::{FlowGraph, NodeKind};

/// Findings of the completeness check. `missing` blocks compilation,
/// `warnings` do not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuralReport {
    pub missing: Vec<CompilerError>,
    pub warnings: Vec<CompilerError>,
}

/// Run all completeness rules. `index` covers the accepted edges only.
pub fn validate_structural(graph: &FlowGraph, index: &GraphIndex) -> StructuralReport {
    let mut report = StructuralReport::default();

    g001_has_entity(graph, &mut report.missing);
    g002_exactly_one_join(graph, &mut report.missing);
    g003_exactly_one_action(graph, &mut report.missing);
    w001_entities_feed_join(graph, index, &mut report.warnings);

    report
}

/// At least one entity, exactly one join and exactly one action node.
pub fn is_complete(graph: &FlowGraph) -> bool {
    graph.count_of(NodeKind::Entity) >= 1
        && graph.count_of(NodeKind::Join) == 1
        && graph.count_of(NodeKind::Action) == 1
}

fn g001_has_entity(graph: &FlowGraph, errors: &mut Vec<CompilerError>) {
    if graph.count_of(NodeKind::Entity) == 0 {
        errors.push(CompilerError::compile(
            "G001",
            "Rule graph must have at least 1 entity node, found 0",
            None,
        ));
    }
}

fn g002_exactly_one_join(graph: &FlowGraph, errors: &mut Vec<CompilerError>) {
    let count = graph.count_of(NodeKind::Join);
    if count != 1 {
        errors.push(CompilerError::compile(
            "G002",
            format!("Rule graph must have exactly 1 join node, found {}", count),
            None,
        ));
    }
}

fn g003_exactly_one_action(graph: &FlowGraph, errors: &mut Vec<CompilerError>) {
    let count = graph.count_of(NodeKind::Action);
    if count != 1 {
        errors.push(CompilerError::compile(
            "G003",
            format!("Rule graph must have exactly 1 action node, found {}", count),
            None,
        ));
    }
}

fn w001_entities_feed_join(graph: &FlowGraph, index: &GraphIndex, warnings: &mut Vec<CompilerError>) {
    let Some(join) = graph.nodes_of(NodeKind::Join).next() else {
        return;
    };
    let feeding: Vec<&str> = index
        .predecessors(join.id())
        .into_iter()
        .filter(|id| index.kind_of(id) == Some(NodeKind::Entity))
        .collect();
    for entity in graph.nodes_of(NodeKind::Entity) {
        if !feeding.contains(&entity.id()) {
            warnings.push(CompilerError::compile(
                "W001",
                format!("Entity node is not connected to join node '{}'", join.id()),
                Some(entity.id().to_string()),
            ));
        }
    }
}

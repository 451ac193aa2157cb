//! Phase canvas → process document.
//!
//! Nesting travels inside each phase node's payload; edges carry no meaning
//! here.

use crate::model::{Phase, Process};
use crate::parse::types::{FlowGraph, FlowNode, PhaseNodeData};

pub fn process_from_graph(graph: &FlowGraph, id: &str, name: &str, description: &str) -> Process {
    let mut stations: Vec<&PhaseNodeData> = graph
        .nodes
        .iter()
        .filter_map(|n| match n {
            FlowNode::Phase(p) if p.data.level == 0 => Some(&p.data),
            _ => None,
        })
        .collect();
    stations.sort_by_key(|data| data.track_number);

    let action = graph.nodes.iter().find_map(|n| match n {
        FlowNode::Action(a) if a.data.is_destination || a.data.action.is_some() => a.data.action.clone(),
        _ => None,
    });

    let process = Process {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        phases: stations.into_iter().map(phase_of).collect(),
        action,
    };

    tracing::debug!(phases = process.phases.len(), has_action = process.action.is_some(), "assembled process");

    process
}

/// The node's phase, with the node-level calculator and sub-phase lists taking
/// precedence when the canvas edited them.
fn phase_of(data: &PhaseNodeData) -> Phase {
    let mut phase = data.phase.clone();
    if !data.sub_phases.is_empty() {
        phase.sub_phases = data.sub_phases.clone();
    }
    if !data.calculators.is_empty() {
        phase.calculators = data.calculators.clone();
    }
    phase
}

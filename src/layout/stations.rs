//! Station placement: one node per phase, branch edges to sub-phases and the
//! converging edges into the destination.

use super::{Convergence, LayoutOptions};
use crate::model::{Phase, ProcessAction};
use crate::parse::types::{
    ActionNodeData, EdgeStyle, FlowEdge, FlowNode, NodeBase, PhaseNodeData, Position,
};

pub const DESTINATION_ID: &str = "process-action";
pub const DESTINATION_NAME: &str = "Final Destination";
pub const TRACK_STROKE: &str = "#111827";
pub const TRACK_WIDTH: f64 = 3.0;

pub fn station_id(phase: &Phase) -> String {
    format!("phase-{}", phase.id)
}

pub(super) struct Placer<'a> {
    options: &'a LayoutOptions,
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    /// Ids of phases without sub-phases, in placement order.
    pub leaves: Vec<String>,
}

impl<'a> Placer<'a> {
    pub fn new(options: &'a LayoutOptions) -> Self {
        Self {
            options,
            nodes: Vec::new(),
            edges: Vec::new(),
            leaves: Vec::new(),
        }
    }

    /// Place a top-level phase and its subtree; returns the station id.
    pub fn place_top_level(&mut self, phase: &Phase, index: usize) -> String {
        let o = self.options;
        let at = Position::new(o.start_x + index as f64 * o.station_spacing, o.start_y);
        self.place(phase, index, 0, at)
    }

    fn place(&mut self, phase: &Phase, index: usize, level: usize, at: Position) -> String {
        let id = station_id(phase);
        self.nodes.push(FlowNode::Phase(NodeBase {
            id: id.clone(),
            position: at,
            data: PhaseNodeData {
                phase: phase.clone(),
                calculators: phase.calculators.clone(),
                sub_phases: phase.sub_phases.clone(),
                track_number: index + 1,
                level,
                is_junction: true,
                station_name: phase.name.clone(),
            },
        }));

        if phase.sub_phases.is_empty() {
            self.leaves.push(id.clone());
            return id;
        }

        let branch_spacing = self.options.track_spacing / (phase.sub_phases.len() + 1) as f64;
        for (j, sub) in phase.sub_phases.iter().enumerate() {
            let branch = Position::new(
                at.x + self.options.station_spacing,
                at.y + (j + 1) as f64 * branch_spacing,
            );
            let sub_id = self.place(sub, j, level + 1, branch);
            self.edges.push(track_edge(format!("edge-{}-to-{}", id, sub_id), &id, &sub_id));
        }

        id
    }

    /// Add the destination node and its converging edges.
    pub fn converge(&mut self, action: &ProcessAction, stations: &[String], phase_count: usize) {
        let o = self.options;
        let at = Position::new(
            o.start_x + (phase_count + 1) as f64 * o.station_spacing,
            o.start_y + (phase_count / 2) as f64 * o.track_spacing,
        );
        self.nodes.push(FlowNode::Action(NodeBase {
            id: DESTINATION_ID.into(),
            position: at,
            data: ActionNodeData {
                label: DESTINATION_NAME.into(),
                action: Some(action.clone()),
                is_destination: true,
                station_name: Some(DESTINATION_NAME.into()),
                ..Default::default()
            },
        }));

        let sources = match o.convergence {
            Convergence::Stations => stations.to_vec(),
            Convergence::Leaves => self.leaves.clone(),
        };
        for source in sources {
            let id = format!("edge-{}-to-destination", source);
            self.edges.push(track_edge(id, &source, DESTINATION_ID));
        }
    }
}

fn track_edge(id: String, source: &str, target: &str) -> FlowEdge {
    FlowEdge::smoothstep(id, source, target).with_style(EdgeStyle::solid(TRACK_STROKE, TRACK_WIDTH))
}

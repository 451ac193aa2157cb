//! Phase-hierarchy layout: statistics, station placement and edge synthesis
//! for a process, plus a quick phase sketch from prose.
//!
//! Everything here is a pure function of its input; the same process and
//! options always produce the same nodes and edges.

pub mod sketch;
pub mod stations;
pub mod stats;

use serde::{Deserialize, Serialize};

use crate::model::Process;
use crate::parse::types::{FlowEdge, FlowNode};

pub use sketch::{PhaseSketch, sketch};
pub use stats::{ProcessStatistics, statistics};

/// Which stations feed the destination node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Convergence {
    /// The station returned for each top-level phase (the phase itself).
    #[default]
    Stations,
    /// Every phase without sub-phases, anywhere in the tree.
    Leaves,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    pub station_spacing: f64,
    pub track_spacing: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub convergence: Convergence,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            station_spacing: 200.0,
            track_spacing: 100.0,
            start_x: 50.0,
            start_y: 100.0,
            convergence: Convergence::Stations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessLayout {
    pub statistics: ProcessStatistics,
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

pub fn layout(process: &Process, options: &LayoutOptions) -> ProcessLayout {
    let mut placer = stations::Placer::new(options);

    let station_ids: Vec<String> = process
        .phases
        .iter()
        .enumerate()
        .map(|(i, phase)| placer.place_top_level(phase, i))
        .collect();

    if let Some(action) = process.action.as_ref().filter(|a| a.defined_event_type().is_some()) {
        placer.converge(action, &station_ids, process.phases.len());
    }

    let mut stats = statistics(process);
    stats.total_edges = placer.edges.len();

    tracing::debug!(
        phases = stats.total_phases,
        nodes = placer.nodes.len(),
        edges = stats.total_edges,
        max_depth = stats.max_depth,
        "laid out process"
    );

    ProcessLayout {
        statistics: stats,
        nodes: placer.nodes,
        edges: placer.edges,
    }
}

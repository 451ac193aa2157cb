//! Process → event-correlation configuration.

use serde::{Deserialize, Serialize};

use crate::model::{ContextMapping, CorrelationConditions, Phase, Process, ProcessAction};

/// Event every calculator publishes when it finishes.
pub const COMPLETION_EVENT: &str = "task-completed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationConfig {
    pub process_id: String,
    pub business_process: String,
    pub phases: Vec<PhaseCorrelation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseCorrelation {
    pub phase_id: String,
    pub phase_name: String,
    pub calculators: Vec<CalculatorTask>,
    pub correlation_conditions: CorrelationConditions,
    pub phase_action: ProcessAction,
    pub completion_event: String,
    pub context_mapping: ContextMapping,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorTask {
    pub task_name: String,
}

pub fn correlation_config(process: &Process, process_id: &str) -> CorrelationConfig {
    CorrelationConfig {
        process_id: process_id.to_string(),
        business_process: process.name.clone(),
        phases: process.phases.iter().map(phase_correlation).collect(),
    }
}

fn phase_correlation(phase: &Phase) -> PhaseCorrelation {
    PhaseCorrelation {
        phase_id: phase.id.clone(),
        phase_name: phase.name.clone(),
        calculators: phase
            .calculators
            .iter()
            .map(|c| CalculatorTask {
                task_name: c.task_name.clone().unwrap_or_else(|| c.name.clone()),
            })
            .collect(),
        correlation_conditions: phase.correlation_conditions.clone().unwrap_or_default(),
        phase_action: phase
            .phase_action
            .clone()
            .unwrap_or_else(ProcessAction::phase_completed),
        completion_event: COMPLETION_EVENT.to_string(),
        context_mapping: ["businessDate", "region", "processId"]
            .into_iter()
            .map(|key| (key.to_string(), format!("${{{}}}", key)))
            .collect(),
    }
}

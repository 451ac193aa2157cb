//! Process documents: ordered phases, nested sub-phases, calculators, and the
//! correlation/action configuration attached to them.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::rule::Operator;

/// `key → template` mapping carried by actions, e.g. `businessDate → ${businessDate}`.
pub type ContextMapping = BTreeMap<String, String>;

// =============================================================================
// PROCESS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ProcessAction>,
}

/// A node in the process hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub calculators: Vec<Calculator>,
    #[serde(default)]
    pub sub_phases: Vec<Phase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_conditions: Option<CorrelationConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_action: Option<ProcessAction>,
}

impl Phase {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            calculators: Vec::new(),
            sub_phases: Vec::new(),
            correlation_conditions: None,
            phase_action: None,
        }
    }

    pub fn with_sub_phases(mut self, sub_phases: Vec<Phase>) -> Self {
        self.sub_phases = sub_phases;
        self
    }

    pub fn with_calculators(mut self, calculators: Vec<Calculator>) -> Self {
        self.calculators = calculators;
        self
    }
}

/// A leaf unit of work inside a phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculator {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub application: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
}

impl Calculator {
    pub fn new(id: impl Into<String>, name: impl Into<String>, application: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            application: application.into(),
            task_name: None,
        }
    }
}

// =============================================================================
// CORRELATION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationConditions {
    #[serde(default)]
    pub required_events: Vec<String>,
    #[serde(default)]
    pub context_conditions: Vec<ContextCondition>,
    #[serde(default)]
    pub cross_task_conditions: Vec<CrossTaskCondition>,
    #[serde(default)]
    pub completion_criteria: CompletionCriteria,
}

impl Default for CorrelationConditions {
    fn default() -> Self {
        Self {
            required_events: vec!["task-completed".into()],
            context_conditions: vec![
                ContextCondition {
                    field: "businessDate".into(),
                    operator: Operator::Equals,
                    value: "${businessDate}".into(),
                },
                ContextCondition {
                    field: "region".into(),
                    operator: Operator::Equals,
                    value: "APAC".into(),
                },
            ],
            cross_task_conditions: Vec::new(),
            completion_criteria: CompletionCriteria::AllCompleted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextCondition {
    pub field: String,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTaskCondition {
    pub source_task: String,
    pub source_field: String,
    #[serde(default)]
    pub operator: Operator,
    pub target_task: String,
    pub target_field: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionCriteria {
    #[default]
    AllCompleted,
    AnyCompleted,
    SpecificEvent,
}

// =============================================================================
// ACTIONS
// =============================================================================

/// Event published when a phase or the whole process completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub context_mapping: ContextMapping,
    #[serde(default)]
    pub custom_context: Vec<CustomContext>,
}

impl ProcessAction {
    /// Terminal action published when every phase of the process is done.
    pub fn process_completed() -> Self {
        Self::with_scope("business-process-completed", "processId")
    }

    /// Action published when a single phase is done.
    pub fn phase_completed() -> Self {
        Self::with_scope("phase-completed", "phaseId")
    }

    fn with_scope(event_type: &str, scope_key: &str) -> Self {
        let mut context_mapping = ContextMapping::new();
        for key in ["businessDate", "region", scope_key] {
            context_mapping.insert(key.to_string(), format!("${{{}}}", key));
        }
        Self {
            event_type: Some(event_type.to_string()),
            event_name: String::new(),
            context_mapping,
            custom_context: Vec::new(),
        }
    }

    /// The event type, treating a blank string as undefined.
    pub fn defined_event_type(&self) -> Option<&str> {
        self.event_type.as_deref().filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomContext {
    pub key: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub source_phase: String,
    #[serde(default)]
    pub source_field: String,
}

// =============================================================================
// ID DESERIALIZATION
// =============================================================================

/// The editor mints numeric ids (`Date.now()`); everything downstream treats
/// ids as strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Integer(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    })
}

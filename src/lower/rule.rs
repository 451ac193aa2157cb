//! Rule canvas → rule configuration.

use serde::{Deserialize, Serialize};

use crate::error::CompilerError;
use crate::model::{
    Action, ActionKind, Condition, ContextMapping, Entity, JoinCondition, Logic, Operator, Rule,
};
use crate::normalize::{JoinPolicy, derive_joins, fill_defaults};
use crate::parse::graph::GraphIndex;
use crate::parse::types::{FlowEdge, FlowGraph, FlowNode, JoinSpec};
use crate::validate::{RejectedEdge, filter_edges, validate_structural};

pub const GENERATED_RULE_NAME: &str = "Generated Business Rule";

/// Field used when a condition node leaves it blank.
const DEFAULT_FIELD: &str = "data";

/// The document stored for a rule built on the canvas. Keys are snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfiguration {
    pub rule: ConfiguredRule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredRule {
    pub name: String,
    pub entities: Vec<ConfiguredEntity>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub join_conditions: Vec<JoinSpec>,
    #[serde(default)]
    pub context_mapping: ContextMapping,
    #[serde(default)]
    pub custom_attributes: serde_json::Map<String, serde_json::Value>,
    pub action: ConfiguredAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredEntity {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredAction {
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub trigger_event: String,
    #[serde(default)]
    pub context_mapping: ContextMapping,
}

/// Everything learned from one compile of the rule canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleCompilation {
    pub accepted_edges: Vec<FlowEdge>,
    pub rejected_edges: Vec<RejectedEdge>,
    /// `None` while the canvas is missing an entity, the join or the action.
    pub configuration: Option<RuleConfiguration>,
    pub missing: Vec<CompilerError>,
    pub warnings: Vec<CompilerError>,
}

impl RuleCompilation {
    pub fn is_ready(&self) -> bool {
        self.configuration.is_some()
    }
}

pub fn compile_rule_graph(graph: &FlowGraph) -> RuleCompilation {
    let filtered = filter_edges(graph);
    let accepted_graph = FlowGraph {
        nodes: graph.nodes.clone(),
        edges: filtered.accepted,
    };

    let (missing, warnings) = match GraphIndex::build(&accepted_graph) {
        Ok(index) => {
            let report = validate_structural(graph, &index);
            (report.missing, report.warnings)
        }
        Err(errors) => (errors, Vec::new()),
    };

    let configuration = if missing.is_empty() {
        assemble(graph)
    } else {
        None
    };

    tracing::debug!(
        accepted = accepted_graph.edges.len(),
        rejected = filtered.rejected.len(),
        ready = configuration.is_some(),
        warnings = warnings.len(),
        "compiled rule graph"
    );

    RuleCompilation {
        accepted_edges: accepted_graph.edges,
        rejected_edges: filtered.rejected,
        configuration,
        missing,
        warnings,
    }
}

fn assemble(graph: &FlowGraph) -> Option<RuleConfiguration> {
    let mut entities = Vec::new();
    let mut conditions = Vec::new();
    let mut join = None;
    let mut action = None;

    for node in &graph.nodes {
        match node {
            FlowNode::Entity(n) => entities.push(ConfiguredEntity {
                name: n.data.label.clone(),
                entity_type: n.data.entity_type.clone(),
                dataset: n.data.dataset.clone(),
                attributes: n.data.selected_attributes.clone(),
            }),
            FlowNode::Condition(n) => conditions.push(Condition {
                name: if n.data.label.is_empty() {
                    n.data.field.clone()
                } else {
                    n.data.label.clone()
                },
                field: n.data.field.clone(),
                operator: n.data.operator,
                value: n.data.value.clone(),
            }),
            FlowNode::Join(n) => join = join.or(Some(&n.data)),
            FlowNode::Action(n) => action = action.or(Some(&n.data)),
            FlowNode::Phase(_) | FlowNode::Calculator(_) => {}
        }
    }

    let (join, action) = (join?, action?);
    Some(RuleConfiguration {
        rule: ConfiguredRule {
            name: GENERATED_RULE_NAME.to_string(),
            entities,
            conditions,
            join_conditions: join.join_conditions.clone(),
            context_mapping: join.context_mapping.clone(),
            custom_attributes: join.custom_attributes.clone(),
            action: ConfiguredAction {
                task: action.task_name.clone(),
                trigger_event: action.trigger_event.clone(),
                context_mapping: action.context_mapping.clone(),
            },
        },
    })
}

/// True when the canvas has the minimum shape to generate a rule.
pub fn can_generate(graph: &FlowGraph) -> bool {
    crate::validate::is_complete(graph)
}

impl ConfiguredRule {
    /// The canonical rule this configuration describes, defaults filled.
    pub fn to_rule(&self) -> Rule {
        let entities: Vec<Entity> = self
            .entities
            .iter()
            .map(|e| Entity {
                entity_type: e.entity_type.clone(),
                name: e.name.clone(),
                icon: String::new(),
                attributes: e.attributes.clone(),
                selected_attributes: e.attributes.clone(),
            })
            .collect();

        let known = |t: &str| entities.iter().any(|e| e.entity_type == t);
        let mut join_conditions: Vec<JoinCondition> = self
            .join_conditions
            .iter()
            .filter_map(join_from_spec)
            .filter(|j| known(&j.left_entity) && known(&j.right_entity))
            .collect();
        if !joins_first_pair(&entities, &join_conditions) {
            join_conditions.extend(derive_joins(&entities, JoinPolicy::FirstPair));
        }

        let conditions = self
            .conditions
            .iter()
            .map(|c| Condition {
                field: if c.field.trim().is_empty() {
                    DEFAULT_FIELD.to_string()
                } else {
                    c.field.clone()
                },
                ..c.clone()
            })
            .collect();

        let mut rule = Rule {
            entities,
            conditions,
            join_conditions,
            actions: vec![self.action.to_action()],
            logic: Logic::And,
            description: self.name.clone(),
        };
        fill_defaults(&mut rule);
        rule
    }
}

fn joins_first_pair(entities: &[Entity], joins: &[JoinCondition]) -> bool {
    let [first, second, ..] = entities else {
        return true;
    };
    let (a, b) = (first.entity_type.as_str(), second.entity_type.as_str());
    joins.iter().any(|j| {
        (j.left_entity == a && j.right_entity == b) || (j.left_entity == b && j.right_entity == a)
    })
}

impl ConfiguredAction {
    fn to_action(&self) -> Action {
        let task = self.task.trim();
        if task.is_empty() {
            return Action {
                name: "Action".into(),
                description: self.trigger_event.clone(),
                kind: ActionKind::Notification,
            };
        }
        Action {
            name: format!("Trigger {}", task),
            description: self.trigger_event.clone(),
            kind: ActionKind::TriggerJob {
                job_name: task.to_string(),
            },
        }
    }
}

/// Structured specs pass through; expressions of the form
/// `left.attr <op> right.attr` are parsed, anything else is skipped.
pub fn join_from_spec(spec: &JoinSpec) -> Option<JoinCondition> {
    match spec {
        JoinSpec::Structured(join) => Some(join.clone()),
        JoinSpec::Expression(text) => {
            let mut parts = text.split_whitespace();
            let (left, op, right) = (parts.next()?, parts.next()?, parts.next()?);
            if parts.next().is_some() {
                return None;
            }
            let operator = match op {
                "=" | "==" | "equals" => Operator::Equals,
                "!=" | "not_equals" => Operator::NotEquals,
                ">" | "greater_than" => Operator::GreaterThan,
                "<" | "less_than" => Operator::LessThan,
                _ => return None,
            };
            let (left_entity, left_attribute) = left.split_once('.')?;
            let (right_entity, right_attribute) = right.split_once('.')?;
            Some(JoinCondition {
                left_entity: left_entity.into(),
                left_attribute: left_attribute.into(),
                operator,
                right_entity: right_entity.into(),
                right_attribute: right_attribute.into(),
            })
        }
    }
}

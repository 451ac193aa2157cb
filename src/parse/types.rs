//! Rust types mirroring the editor's graph document (`{nodes, edges}`).
//!
//! These types are the serde target for the canvas JSON and also what the
//! layout engine and rule renderer emit, so field names follow the canvas
//! (camelCase, node kind in `type`).

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{Calculator, ContextMapping, JoinCondition, Operator, Phase, ProcessAction};

// =============================================================================
// TOP-LEVEL GRAPH
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &FlowNode> {
        self.nodes.iter().filter(move |n| n.kind() == kind)
    }

    pub fn count_of(&self, kind: NodeKind) -> usize {
        self.nodes_of(kind).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<EdgeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FlowEdge {
    /// A `smoothstep` edge with no handles, style or label.
    pub fn smoothstep(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            edge_type: Some("smoothstep".into()),
            style: None,
            label: None,
        }
    }

    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Same endpoints and handles as `other`.
    pub fn same_connection(&self, other: &FlowEdge) -> bool {
        self.source == other.source
            && self.target == other.target
            && self.source_handle == other.source_handle
            && self.target_handle == other.target_handle
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
}

impl EdgeStyle {
    pub fn solid(stroke: &str, stroke_width: f64) -> Self {
        Self {
            stroke: stroke.into(),
            stroke_width,
            stroke_dasharray: None,
        }
    }

    pub fn dashed(stroke: &str, stroke_width: f64, dasharray: &str) -> Self {
        Self {
            stroke_dasharray: Some(dasharray.into()),
            ..Self::solid(stroke, stroke_width)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// =============================================================================
// NODE BASE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBase<D> {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    pub data: D,
}

// =============================================================================
// FLOW NODE: tagged union over the six node kinds
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FlowNode {
    #[serde(rename = "entityNode")]
    Entity(NodeBase<EntityNodeData>),
    #[serde(rename = "joinNode")]
    Join(NodeBase<JoinNodeData>),
    #[serde(rename = "actionNode")]
    Action(NodeBase<ActionNodeData>),
    #[serde(rename = "conditionNode")]
    Condition(NodeBase<ConditionNodeData>),
    #[serde(rename = "phaseNode")]
    Phase(NodeBase<PhaseNodeData>),
    #[serde(rename = "calculatorNode")]
    Calculator(NodeBase<CalculatorNodeData>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Entity,
    Join,
    Action,
    Condition,
    Phase,
    Calculator,
}

impl NodeKind {
    /// The node's `type` string on the canvas.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Entity => "entityNode",
            NodeKind::Join => "joinNode",
            NodeKind::Action => "actionNode",
            NodeKind::Condition => "conditionNode",
            NodeKind::Phase => "phaseNode",
            NodeKind::Calculator => "calculatorNode",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FlowNode {
    pub fn id(&self) -> &str {
        match self {
            FlowNode::Entity(n) => &n.id,
            FlowNode::Join(n) => &n.id,
            FlowNode::Action(n) => &n.id,
            FlowNode::Condition(n) => &n.id,
            FlowNode::Phase(n) => &n.id,
            FlowNode::Calculator(n) => &n.id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            FlowNode::Entity(_) => NodeKind::Entity,
            FlowNode::Join(_) => NodeKind::Join,
            FlowNode::Action(_) => NodeKind::Action,
            FlowNode::Condition(_) => NodeKind::Condition,
            FlowNode::Phase(_) => NodeKind::Phase,
            FlowNode::Calculator(_) => NodeKind::Calculator,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            FlowNode::Entity(n) => n.position,
            FlowNode::Join(n) => n.position,
            FlowNode::Action(n) => n.position,
            FlowNode::Condition(n) => n.position,
            FlowNode::Phase(n) => n.position,
            FlowNode::Calculator(n) => n.position,
        }
    }
}

// =============================================================================
// NODE DATA
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityNodeData {
    pub label: String,
    pub entity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    /// Palette drops carry `{name, type, category}` objects; only names are kept.
    #[serde(deserialize_with = "attribute_names")]
    pub attributes: Vec<String>,
    pub selected_attributes: Vec<String>,
}

/// A join predicate as stored on a join node: structured, or a free-form
/// expression typed into the property panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JoinSpec {
    Structured(JoinCondition),
    Expression(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JoinNodeData {
    pub label: String,
    pub join_conditions: Vec<JoinSpec>,
    pub context_mapping: ContextMapping,
    pub custom_attributes: serde_json::Map<String, serde_json::Value>,
}

/// Data of an action node: either the rule graph's action (task + trigger
/// event) or the process destination (`isDestination` + `action`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionNodeData {
    pub label: String,
    pub task_name: String,
    pub trigger_event: String,
    pub context_mapping: ContextMapping,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ProcessAction>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_destination: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionNodeData {
    pub label: String,
    pub field: String,
    pub operator: Operator,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseNodeData {
    pub phase: Phase,
    #[serde(default)]
    pub calculators: Vec<Calculator>,
    #[serde(default)]
    pub sub_phases: Vec<Phase>,
    #[serde(default)]
    pub track_number: usize,
    #[serde(default)]
    pub level: usize,
    #[serde(default)]
    pub is_junction: bool,
    #[serde(default)]
    pub station_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorNodeData {
    #[serde(default)]
    pub label: String,
    pub calculator: Calculator,
}

fn attribute_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAttribute {
        Name(String),
        Described { name: String },
    }

    let raw = Vec::<RawAttribute>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|a| match a {
            RawAttribute::Name(name) | RawAttribute::Described { name } => name,
        })
        .collect())
}

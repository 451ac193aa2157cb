//! Rule → rule canvas. The generated canvas always compiles.

use crate::model::{ActionKind, Rule};
use crate::normalize::fill_defaults;
use crate::parse::types::{
    ActionNodeData, EntityNodeData, FlowEdge, FlowGraph, FlowNode, JoinNodeData, JoinSpec,
    NodeBase, Position,
};

pub const JOIN_NODE_ID: &str = "join";
pub const ACTION_NODE_ID: &str = "action";

pub fn rule_to_graph(rule: &Rule) -> FlowGraph {
    let mut rule = rule.clone();
    fill_defaults(&mut rule);

    let mut nodes = Vec::with_capacity(rule.entities.len() + 2);
    let mut edges = Vec::with_capacity(rule.entities.len() + 1);

    for (i, entity) in rule.entities.iter().enumerate() {
        let id = format!("entity-{}", i);
        edges.push(FlowEdge::smoothstep(format!("edge-entity-{}", i), &id, JOIN_NODE_ID));
        nodes.push(FlowNode::Entity(NodeBase {
            id,
            position: Position::new(100.0 + 200.0 * i as f64, 100.0),
            data: EntityNodeData {
                label: entity.name.clone(),
                entity_type: entity.entity_type.clone(),
                icon: Some(entity.icon.clone()).filter(|icon| !icon.is_empty()),
                dataset: None,
                attributes: entity.attributes.clone(),
                selected_attributes: entity.selected_attributes.clone(),
            },
        }));
    }

    nodes.push(FlowNode::Join(NodeBase {
        id: JOIN_NODE_ID.into(),
        position: Position::new(400.0, 200.0),
        data: JoinNodeData {
            label: "Join Condition".into(),
            join_conditions: rule
                .join_conditions
                .iter()
                .cloned()
                .map(JoinSpec::Structured)
                .collect(),
            ..Default::default()
        },
    }));

    if let Some(action) = rule.actions.first() {
        let task_name = match &action.kind {
            ActionKind::TriggerJob { job_name } => job_name.clone(),
            ActionKind::CreateRequest { request_type } => request_type.clone(),
            ActionKind::SendNotification { notification_type } => notification_type.clone(),
            ActionKind::Escalate { target } => target.clone(),
            ActionKind::Notification => action.name.clone(),
        };
        nodes.push(FlowNode::Action(NodeBase {
            id: ACTION_NODE_ID.into(),
            position: Position::new(600.0, 200.0),
            data: ActionNodeData {
                label: if action.name.is_empty() {
                    "Action".into()
                } else {
                    action.name.clone()
                },
                task_name,
                trigger_event: action.kind.type_name().to_string(),
                ..Default::default()
            },
        }));
        edges.push(FlowEdge::smoothstep("edge-join-action", JOIN_NODE_ID, ACTION_NODE_ID));
    }

    FlowGraph { nodes, edges }
}

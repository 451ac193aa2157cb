//! Conversational help for the flow builder.
//!
//! The crate never performs network I/O. Hosted providers build an
//! [`hosted::HttpRequest`] and hand it to a caller-supplied [`Transport`];
//! the local provider answers from a fixed keyword table.

pub mod hosted;
pub mod local;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::{AssistantConfig, Provider};
use crate::parse::types::{FlowGraph, FlowNode, NodeKind};

pub use hosted::{HostedAssistant, HttpRequest, Transport};
pub use local::LocalAssistant;

pub const DEFAULT_FLOW_TYPE: &str = "business-process";

pub const FALLBACK_REPLY: &str = "I'm having trouble connecting to my AI service right now. Here are some things you can try:\n\n\
• Check your internet connection\n\
• Try refreshing the page\n\
• Use the visual flow builder to create your process\n\
• Contact support if the issue persists\n\n\
You can still build your flow using the drag-and-drop interface!";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(String),
    #[error("unexpected status {0}")]
    Status(u16),
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("{0} configuration missing: {1}")]
    NotConfigured(&'static str, &'static str),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("response error: {0}")]
    Response(String),
}

/// What the assistant knows about the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssistantContext {
    pub node_count: usize,
    pub edge_count: usize,
    pub entity_types: Vec<String>,
    pub flow_type: String,
}

impl Default for AssistantContext {
    fn default() -> Self {
        Self {
            node_count: 0,
            edge_count: 0,
            entity_types: Vec::new(),
            flow_type: DEFAULT_FLOW_TYPE.to_string(),
        }
    }
}

impl AssistantContext {
    pub fn from_graph(graph: &FlowGraph) -> Self {
        let entity_types = graph
            .nodes_of(NodeKind::Entity)
            .filter_map(|node| match node {
                FlowNode::Entity(entity) => Some(entity.data.entity_type.clone()),
                _ => None,
            })
            .collect();
        Self {
            node_count: graph.nodes.len(),
            edge_count: graph.edges.len(),
            entity_types,
            ..Default::default()
        }
    }

    pub fn with_flow_type(mut self, flow_type: impl Into<String>) -> Self {
        self.flow_type = flow_type.into();
        self
    }
}

pub trait TextCompletion {
    fn complete(&self, message: &str, context: &AssistantContext) -> Result<String, AssistantError>;
}

/// Provider-selected assistant whose replies never fail.
pub enum Assistant<T: Transport> {
    Local(LocalAssistant),
    Hosted(HostedAssistant<T>),
}

impl<T: Transport> Assistant<T> {
    pub fn from_config(config: &AssistantConfig, transport: T) -> Self {
        match config.provider {
            Provider::Mock | Provider::Local => Assistant::Local(LocalAssistant),
            Provider::OpenAi | Provider::Anthropic | Provider::Azure => {
                Assistant::Hosted(HostedAssistant::new(config.clone(), transport))
            }
        }
    }

    pub fn reply(&self, message: &str, context: &AssistantContext) -> String {
        let result = match self {
            Assistant::Local(local) => local.complete(message, context),
            Assistant::Hosted(hosted) => hosted.complete(message, context),
        };
        result.unwrap_or_else(|err| {
            warn!(error = %err, "assistant unavailable, using fallback reply");
            FALLBACK_REPLY.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::{EntityNodeData, NodeBase, Position};

    fn entity(id: &str, entity_type: &str) -> FlowNode {
        FlowNode::Entity(NodeBase {
            id: id.into(),
            position: Position::default(),
            data: EntityNodeData {
                label: id.into(),
                entity_type: entity_type.into(),
                icon: None,
                dataset: None,
                attributes: vec![],
                selected_attributes: vec![],
            },
        })
    }

    #[test]
    fn context_lists_entity_types_in_order() {
        let graph = FlowGraph {
            nodes: vec![entity("a", "sales"), entity("b", "customer")],
            edges: vec![],
        };
        let context = AssistantContext::from_graph(&graph);
        assert_eq!(context.node_count, 2);
        assert_eq!(context.entity_types, vec!["sales", "customer"]);
        assert_eq!(context.flow_type, "business-process");
    }
}

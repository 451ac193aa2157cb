//! Wire types for the process-configuration store. The crate builds the
//! requests; the host sends them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parse::types::{FlowEdge, FlowGraph, FlowNode};

pub const COLLECTION: &str = "process-configs";
pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_CATEGORY: &str = "general";
pub const DEFAULT_AUTHOR: &str = "user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessType {
    #[default]
    BusinessProcess,
    EventCorrelation,
    DataFlow,
}

impl ProcessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessType::BusinessProcess => "BUSINESS_PROCESS",
            ProcessType::EventCorrelation => "EVENT_CORRELATION",
            ProcessType::DataFlow => "DATA_FLOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetadata {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Caller-chosen fields of a save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveOptions {
    pub process_type: ProcessType,
    pub execution_mode: ExecutionMode,
    pub tags: Vec<String>,
    pub category: Option<String>,
    /// Version to keep on update; create always starts at `1.0`.
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessConfigRequest {
    pub name: String,
    pub description: String,
    pub process_type: ProcessType,
    pub execution_mode: ExecutionMode,
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    pub metadata: ProcessMetadata,
}

impl ProcessConfigRequest {
    pub fn create(name: &str, description: &str, graph: &FlowGraph, options: SaveOptions) -> Self {
        let mut request = Self::build(name, description, graph, options);
        request.metadata.version = DEFAULT_VERSION.to_string();
        request.metadata.created_by = Some(DEFAULT_AUTHOR.to_string());
        request
    }

    pub fn update(name: &str, description: &str, graph: &FlowGraph, options: SaveOptions) -> Self {
        let mut request = Self::build(name, description, graph, options);
        request.metadata.updated_by = Some(DEFAULT_AUTHOR.to_string());
        request
    }

    fn build(name: &str, description: &str, graph: &FlowGraph, options: SaveOptions) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            process_type: options.process_type,
            execution_mode: options.execution_mode,
            nodes: graph.nodes.clone(),
            edges: graph.edges.clone(),
            metadata: ProcessMetadata {
                version: options
                    .version
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
                created_by: None,
                updated_by: None,
                tags: options.tags,
                category: options.category.unwrap_or_else(default_category),
            },
        }
    }
}

/// A stored configuration as the service returns it. Nodes stay loosely
/// typed since the store also holds BPM diagrams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessConfigDocument {
    pub id: Value,
    #[serde(default)]
    pub uuid: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub process_type: ProcessType,
    #[serde(default)]
    pub execution_mode: ExecutionMode,
    #[serde(default)]
    pub nodes: Vec<Value>,
    #[serde(default)]
    pub edges: Vec<Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub version: Option<u32>,
}

impl ProcessConfigDocument {
    /// Back to a render graph. Nodes the compiler does not know are dropped.
    pub fn to_graph(&self) -> FlowGraph {
        FlowGraph {
            nodes: self
                .nodes
                .iter()
                .filter_map(|n| serde_json::from_value(n.clone()).ok())
                .collect(),
            edges: self
                .edges
                .iter()
                .filter_map(|e| serde_json::from_value(e.clone()).ok())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Create,
    List { process_type: Option<ProcessType> },
    Get(String),
    Update(String),
    Delete(String),
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Create => Method::Post,
            Endpoint::List { .. } | Endpoint::Get(_) => Method::Get,
            Endpoint::Update(_) => Method::Put,
            Endpoint::Delete(_) => Method::Delete,
        }
    }

    pub fn url(&self, base: &str) -> String {
        let root = format!("{}/{}", base.trim_end_matches('/'), COLLECTION);
        match self {
            Endpoint::Create | Endpoint::List { process_type: None } => root,
            Endpoint::List {
                process_type: Some(t),
            } => format!("{}?processType={}", root, t.as_str()),
            Endpoint::Get(id) | Endpoint::Update(id) | Endpoint::Delete(id) => format!("{}/{}", root, id),
        }
    }
}

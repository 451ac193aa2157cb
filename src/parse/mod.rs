//! Parse phase: canvas JSON → Rust types + graph index.

pub mod graph;
pub mod types;

pub use graph::GraphIndex;
pub use types::*;

use crate::error::CompilerError;

/// Deserialize a canvas JSON string into a `FlowGraph`.
pub fn parse(json: &str) -> Result<FlowGraph, Vec<CompilerError>> {
    parse_document(json, "graph")
}

/// Deserialize any canvas-side document, reporting failures as `P001`.
pub fn parse_document<T: serde::de::DeserializeOwned>(
    json: &str,
    what: &str,
) -> Result<T, Vec<CompilerError>> {
    serde_json::from_str::<T>(json).map_err(|e| {
        vec![CompilerError::parse(
            "P001",
            format!("Failed to parse {} JSON: {}", what, e),
        )]
    })
}

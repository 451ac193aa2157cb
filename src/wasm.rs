//! WASM entry points for browser use.
//!
//! Every export returns `{status: "success", value}` or
//! `{status: "errors", errors: [...]}`; malformed input JSON is reported as
//! `P001`, never thrown.

use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use crate::assistant::{self, AssistantContext, HttpRequest, LocalAssistant};
use crate::config::AssistantConfig;
use crate::error::CompilerError;
use crate::layout::{LayoutOptions, PhaseSketch, ProcessLayout};
use crate::lower::{CorrelationConfig, RuleConfiguration};
use crate::model::{Process, Rule};
use crate::parse::parse_document;
use crate::parse::types::{FlowEdge, FlowGraph};

/// Natural-language text → normalised rule.
#[wasm_bindgen]
pub fn parse_rule(text: &str) -> JsValue {
    to_js(&parse_rule_inner(text))
}

fn parse_rule_inner(text: &str) -> Outcome<Rule> {
    Outcome::Success {
        value: crate::normalize::parse_rule(text),
    }
}

#[wasm_bindgen]
pub fn rule_to_graph(rule_json: &str) -> JsValue {
    to_js(&rule_to_graph_inner(rule_json))
}

fn rule_to_graph_inner(rule_json: &str) -> Outcome<FlowGraph> {
    let rule: Rule = match parse_document(rule_json, "rule") {
        Ok(r) => r,
        Err(errors) => return Outcome::errors(errors),
    };
    Outcome::Success {
        value: crate::lower::rule_to_graph(&rule),
    }
}

/// Try to add one edge to the canvas.
#[wasm_bindgen]
pub fn check_connection(graph_json: &str, edge_json: &str) -> JsValue {
    to_js(&check_connection_inner(graph_json, edge_json))
}

fn check_connection_inner(graph_json: &str, edge_json: &str) -> Outcome<ConnectionDto> {
    let graph: FlowGraph = match parse_document(graph_json, "graph") {
        Ok(g) => g,
        Err(errors) => return Outcome::errors(errors),
    };
    let edge: FlowEdge = match parse_document(edge_json, "edge") {
        Ok(e) => e,
        Err(errors) => return Outcome::errors(errors),
    };

    let outcome = crate::validate::connect(&graph, edge);
    Outcome::Success {
        value: ConnectionDto {
            accepted: outcome.is_accepted(),
            error: outcome.rejected.map(ErrorDto::from),
            graph: outcome.graph,
        },
    }
}

/// Rule canvas → configuration plus everything still missing.
#[wasm_bindgen]
pub fn compile_rule_graph(graph_json: &str) -> JsValue {
    to_js(&compile_rule_graph_inner(graph_json))
}

fn compile_rule_graph_inner(graph_json: &str) -> Outcome<CompilationDto> {
    let graph: FlowGraph = match parse_document(graph_json, "graph") {
        Ok(g) => g,
        Err(errors) => return Outcome::errors(errors),
    };

    let compiled = crate::lower::compile_rule_graph(&graph);
    Outcome::Success {
        value: CompilationDto {
            ready: compiled.is_ready(),
            configuration: compiled.configuration,
            accepted_edges: compiled.accepted_edges,
            rejected_edges: compiled
                .rejected_edges
                .into_iter()
                .map(|r| RejectedEdgeDto {
                    edge: r.edge,
                    error: r.reason.into(),
                })
                .collect(),
            missing: compiled.missing.into_iter().map(ErrorDto::from).collect(),
            warnings: compiled.warnings.into_iter().map(ErrorDto::from).collect(),
        },
    }
}

#[wasm_bindgen]
pub fn can_generate(graph_json: &str) -> JsValue {
    to_js(&can_generate_inner(graph_json))
}

fn can_generate_inner(graph_json: &str) -> Outcome<bool> {
    match parse_document::<FlowGraph>(graph_json, "graph") {
        Ok(graph) => Outcome::Success {
            value: crate::lower::can_generate(&graph),
        },
        Err(errors) => Outcome::errors(errors),
    }
}

/// Process → positioned station nodes and track edges. An empty options
/// string uses the default spacing.
#[wasm_bindgen]
pub fn layout_process(process_json: &str, options_json: &str) -> JsValue {
    to_js(&layout_process_inner(process_json, options_json))
}

fn layout_process_inner(process_json: &str, options_json: &str) -> Outcome<ProcessLayout> {
    let process: Process = match parse_document(process_json, "process") {
        Ok(p) => p,
        Err(errors) => return Outcome::errors(errors),
    };
    let options: LayoutOptions = match parse_or_default(options_json, "layout options") {
        Ok(o) => o,
        Err(errors) => return Outcome::errors(errors),
    };
    Outcome::Success {
        value: crate::layout::layout(&process, &options),
    }
}

#[wasm_bindgen]
pub fn sketch_process(text: &str) -> JsValue {
    to_js(&sketch_process_inner(text))
}

fn sketch_process_inner(text: &str) -> Outcome<PhaseSketch> {
    Outcome::Success {
        value: crate::layout::sketch(text),
    }
}

#[wasm_bindgen]
pub fn correlation_config(process_json: &str, process_id: &str) -> JsValue {
    to_js(&correlation_config_inner(process_json, process_id))
}

fn correlation_config_inner(process_json: &str, process_id: &str) -> Outcome<CorrelationConfig> {
    match parse_document::<Process>(process_json, "process") {
        Ok(process) => Outcome::Success {
            value: crate::lower::correlation_config(&process, process_id),
        },
        Err(errors) => Outcome::errors(errors),
    }
}

/// Offline assistant reply for the given canvas context.
#[wasm_bindgen]
pub fn local_assistant_reply(message: &str, context_json: &str) -> JsValue {
    to_js(&local_assistant_reply_inner(message, context_json))
}

fn local_assistant_reply_inner(message: &str, context_json: &str) -> Outcome<String> {
    match parse_or_default::<AssistantContext>(context_json, "assistant context") {
        Ok(context) => Outcome::Success {
            value: LocalAssistant.reply(message, &context).to_string(),
        },
        Err(errors) => Outcome::errors(errors),
    }
}

/// The HTTP request the host should send to the configured provider.
#[wasm_bindgen]
pub fn assistant_request(config_json: &str, message: &str, context_json: &str) -> JsValue {
    to_js(&assistant_request_inner(config_json, message, context_json))
}

fn assistant_request_inner(config_json: &str, message: &str, context_json: &str) -> Outcome<HttpRequest> {
    let config: AssistantConfig = match parse_document(config_json, "assistant config") {
        Ok(c) => c,
        Err(errors) => return Outcome::errors(errors),
    };
    let context: AssistantContext = match parse_or_default(context_json, "assistant context") {
        Ok(c) => c,
        Err(errors) => return Outcome::errors(errors),
    };
    match assistant::hosted::build_request(&config, message, &context) {
        Ok(request) => Outcome::Success { value: request },
        Err(e) => Outcome::Errors {
            errors: vec![ErrorDto::assistant("A001", e)],
        },
    }
}

/// Reply text from a provider response; the fallback reply when the
/// response has none.
#[wasm_bindgen]
pub fn assistant_reply_from_response(config_json: &str, response_json: &str) -> JsValue {
    to_js(&assistant_reply_from_response_inner(config_json, response_json))
}

fn assistant_reply_from_response_inner(config_json: &str, response_json: &str) -> Outcome<String> {
    let config: AssistantConfig = match parse_document(config_json, "assistant config") {
        Ok(c) => c,
        Err(errors) => return Outcome::errors(errors),
    };
    let value = parse_document::<serde_json::Value>(response_json, "assistant response")
        .map_err(|errors| errors.into_iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))
        .and_then(|response| {
            assistant::hosted::parse_response(config.provider, &response).map_err(|e| e.to_string())
        })
        .unwrap_or_else(|error| {
            tracing::warn!(%error, "assistant unavailable, using fallback reply");
            assistant::FALLBACK_REPLY.to_string()
        });
    Outcome::Success { value }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
    node_id: Option<String>,
}

impl From<CompilerError> for ErrorDto {
    fn from(e: CompilerError) -> Self {
        ErrorDto {
            code: e.code,
            phase: e.phase.to_string(),
            message: e.message,
            node_id: e.node_id,
        }
    }
}

impl ErrorDto {
    fn assistant(code: &str, error: impl std::fmt::Display) -> Self {
        ErrorDto {
            code: code.into(),
            phase: "Assistant".into(),
            message: error.to_string(),
            node_id: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ConnectionDto {
    accepted: bool,
    graph: FlowGraph,
    error: Option<ErrorDto>,
}

#[derive(Debug, Serialize)]
struct RejectedEdgeDto {
    edge: FlowEdge,
    error: ErrorDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompilationDto {
    ready: bool,
    configuration: Option<RuleConfiguration>,
    accepted_edges: Vec<FlowEdge>,
    rejected_edges: Vec<RejectedEdgeDto>,
    missing: Vec<ErrorDto>,
    warnings: Vec<ErrorDto>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Outcome<T> {
    Success { value: T },
    Errors { errors: Vec<ErrorDto> },
}

impl<T> Outcome<T> {
    fn errors(errors: Vec<CompilerError>) -> Self {
        Outcome::Errors {
            errors: errors.into_iter().map(ErrorDto::from).collect(),
        }
    }
}

fn parse_or_default<T: DeserializeOwned + Default>(json: &str, what: &str) -> Result<T, Vec<CompilerError>> {
    if json.trim().is_empty() {
        Ok(T::default())
    } else {
        parse_document(json, what)
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json<T: Serialize>(value: &T) -> serde_json::Value {
        serde_json::to_value(value).unwrap()
    }

    #[test]
    fn bad_json_is_reported_as_p001() {
        let out = json(&compile_rule_graph_inner("{not json"));
        assert_eq!(out["status"], "errors");
        assert_eq!(out["errors"][0]["code"], "P001");
        assert_eq!(out["errors"][0]["phase"], "Parse");
    }

    #[test]
    fn parse_rule_succeeds_on_any_text() {
        let out = json(&parse_rule_inner(""));
        assert_eq!(out["status"], "success");
        assert_eq!(out["value"]["entities"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn empty_options_use_default_layout() {
        let out = json(&layout_process_inner(r#"{"id": 1, "name": "p", "phases": []}"#, ""));
        assert_eq!(out["status"], "success");
        assert_eq!(out["value"]["statistics"]["totalPhases"], 0);
    }

    #[test]
    fn rejected_connection_carries_its_error() {
        let graph = r#"{"nodes": [
            {"id": "a", "type": "actionNode", "data": {"label": "A"}},
            {"id": "e", "type": "entityNode", "data": {"label": "E", "entityType": "sales"}}
        ], "edges": []}"#;
        let edge = r#"{"id": "x", "source": "a", "target": "e"}"#;
        let out = json(&check_connection_inner(graph, edge));
        assert_eq!(out["value"]["accepted"], false);
        assert_eq!(out["value"]["error"]["code"], "C001");
        assert_eq!(out["value"]["graph"]["edges"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn assistant_request_without_key_is_an_error() {
        let out = json(&assistant_request_inner(r#"{"provider": "openai"}"#, "hi", ""));
        assert_eq!(out["status"], "errors");
        assert_eq!(out["errors"][0]["code"], "A001");
    }

    #[test]
    fn unreadable_response_falls_back() {
        let out = json(&assistant_reply_from_response_inner(r#"{"provider": "anthropic"}"#, "{}"));
        assert_eq!(out["value"], assistant::FALLBACK_REPLY);
    }
}

//! Hosted chat-completion providers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{AssistantContext, AssistantError, TextCompletion, TransportError};
use crate::config::{AssistantConfig, Provider};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const AZURE_PATH: &str = "/openai/deployments/gpt-4/chat/completions?api-version=2024-02-15-preview";

const OPENAI_MODEL: &str = "gpt-4";
const ANTHROPIC_MODEL: &str = "claude-3-sonnet-20240229";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f64 = 0.7;

/// A POST with a JSON body, ready for whatever HTTP client the host has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
}

pub trait Transport {
    fn post_json(&self, request: &HttpRequest) -> Result<Value, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_json(&self, request: &HttpRequest) -> Result<Value, TransportError> {
        (**self).post_json(request)
    }
}

pub struct HostedAssistant<T: Transport> {
    pub config: AssistantConfig,
    pub transport: T,
}

impl<T: Transport> HostedAssistant<T> {
    pub fn new(config: AssistantConfig, transport: T) -> Self {
        Self { config, transport }
    }
}

impl<T: Transport> TextCompletion for HostedAssistant<T> {
    fn complete(&self, message: &str, context: &AssistantContext) -> Result<String, AssistantError> {
        let request = build_request(&self.config, message, context)?;
        tracing::debug!(url = %request.url, "sending assistant request");
        let response = self.transport.post_json(&request)?;
        parse_response(self.config.provider, &response)
    }
}

pub fn system_prompt(context: &AssistantContext) -> String {
    format!(
        "You are an AI assistant specialized in helping users build business process flows and event correlation rules. \n\
\n\
Current Context:\n\
- Flow Type: {flow_type}\n\
- Number of Entities: {entities}\n\
- Number of Connections: {edges}\n\
- Current Entities: {entity_list}\n\
\n\
Your role is to:\n\
1. Help users understand how to build business process flows\n\
2. Provide guidance on adding entities, conditions, and actions\n\
3. Explain best practices for event correlation\n\
4. Answer questions about the flow builder interface\n\
5. Suggest improvements to their current flow\n\
\n\
Keep responses helpful, concise, and focused on business process automation. Use bullet points and clear examples when appropriate.",
        flow_type = context.flow_type,
        entities = context.entity_types.len(),
        edges = context.edge_count,
        entity_list = context.entity_types.join(", "),
    )
}

/// Build the provider request. Fails when the provider is not hosted or its
/// credentials are missing.
pub fn build_request(
    config: &AssistantConfig,
    message: &str,
    context: &AssistantContext,
) -> Result<HttpRequest, AssistantError> {
    let key = |name: &'static str| {
        config
            .api_key
            .clone()
            .ok_or(AssistantError::NotConfigured(name, "API key"))
    };
    let system = system_prompt(context);

    let chat_body = || {
        json!({
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": message},
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        })
    };

    match config.provider {
        Provider::OpenAi => {
            let api_key = key("OpenAI")?;
            let mut body = chat_body();
            body["model"] = json!(OPENAI_MODEL);
            Ok(HttpRequest {
                url: OPENAI_URL.to_string(),
                headers: headers([
                    ("Authorization", format!("Bearer {}", api_key)),
                    ("Content-Type", "application/json".to_string()),
                ]),
                body,
            })
        }
        Provider::Anthropic => {
            let api_key = key("Anthropic")?;
            Ok(HttpRequest {
                url: ANTHROPIC_URL.to_string(),
                headers: headers([
                    ("x-api-key", api_key),
                    ("Content-Type", "application/json".to_string()),
                    ("anthropic-version", ANTHROPIC_VERSION.to_string()),
                ]),
                body: json!({
                    "model": ANTHROPIC_MODEL,
                    "max_tokens": MAX_TOKENS,
                    "messages": [
                        {"role": "user", "content": format!("{}\n\nUser: {}", system, message)},
                    ],
                }),
            })
        }
        Provider::Azure => {
            let api_key = key("Azure OpenAI")?;
            let base = config
                .base_url
                .as_deref()
                .ok_or(AssistantError::NotConfigured("Azure OpenAI", "base URL"))?;
            Ok(HttpRequest {
                url: format!("{}{}", base.trim_end_matches('/'), AZURE_PATH),
                headers: headers([
                    ("api-key", api_key),
                    ("Content-Type", "application/json".to_string()),
                ]),
                body: chat_body(),
            })
        }
        Provider::Mock | Provider::Local => Err(AssistantError::NotConfigured("hosted", "provider")),
    }
}

/// Pull the reply text out of a provider response body.
pub fn parse_response(provider: Provider, response: &Value) -> Result<String, AssistantError> {
    let text = match provider {
        Provider::Anthropic => response.pointer("/content/0/text"),
        _ => response.pointer("/choices/0/message/content"),
    };
    text.and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AssistantError::Response(format!("no reply text in {:?} response", provider)))
}

fn headers<const N: usize>(pairs: [(&str, String); N]) -> BTreeMap<String, String> {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

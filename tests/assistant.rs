//! Integration tests for the assistant façade: provider selection, request
//! building through a recording transport, and the fallback reply.

mod helpers;

use std::cell::RefCell;

use rule_compiler::assistant::local::DEFAULT_REPLY;
use rule_compiler::assistant::{
    Assistant, AssistantContext, FALLBACK_REPLY, HttpRequest, Transport, TransportError,
};
use rule_compiler::config::{AssistantConfig, Provider};
use serde_json::{Value, json};

/// Records every request and answers with a canned body or failure.
struct Recorder {
    response: Result<Value, u16>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl Recorder {
    fn answering(response: Value) -> Self {
        Self {
            response: Ok(response),
            sent: RefCell::new(Vec::new()),
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            response: Err(status),
            sent: RefCell::new(Vec::new()),
        }
    }
}

impl Transport for Recorder {
    fn post_json(&self, request: &HttpRequest) -> Result<Value, TransportError> {
        self.sent.borrow_mut().push(request.clone());
        self.response.clone().map_err(TransportError::Status)
    }
}

fn hosted(provider: Provider) -> AssistantConfig {
    AssistantConfig {
        provider,
        api_key: Some("test-key".into()),
        base_url: None,
    }
}

#[test]
fn openai_reply_comes_from_transport() {
    helpers::init_tracing();
    let transport = Recorder::answering(json!({
        "choices": [{"message": {"role": "assistant", "content": "Add a join node."}}]
    }));
    let assistant = Assistant::from_config(&hosted(Provider::OpenAi), &transport);

    let context = AssistantContext::from_graph(&helpers::canvas(helpers::RULE_CANVAS))
        .with_flow_type("event-correlation");
    let reply = assistant.reply("what next?", &context);
    assert_eq!(reply, "Add a join node.");

    let sent = transport.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "https://api.openai.com/v1/chat/completions");
    let system = sent[0].body["messages"][0]["content"].as_str().unwrap_or_default();
    assert!(system.contains("- Number of Entities: 2"));
    assert!(system.contains("- Current Entities: customer, sales"));
    assert!(system.contains("- Flow Type: event-correlation"));
}

#[test]
fn transport_failure_falls_back() {
    helpers::init_tracing();
    let transport = Recorder::failing(503);
    let assistant = Assistant::from_config(&hosted(Provider::Anthropic), &transport);
    assert_eq!(assistant.reply("help", &AssistantContext::default()), FALLBACK_REPLY);
    assert_eq!(transport.sent.borrow().len(), 1);
}

#[test]
fn missing_key_falls_back_without_sending() {
    let transport = Recorder::answering(json!({}));
    let config = AssistantConfig {
        provider: Provider::OpenAi,
        ..Default::default()
    };
    let assistant = Assistant::from_config(&config, &transport);
    assert_eq!(assistant.reply("help", &AssistantContext::default()), FALLBACK_REPLY);
    assert!(transport.sent.borrow().is_empty());
}

#[test]
fn unexpected_body_falls_back() {
    let transport = Recorder::answering(json!({"error": "overloaded"}));
    let assistant = Assistant::from_config(&hosted(Provider::OpenAi), &transport);
    assert_eq!(assistant.reply("hi", &AssistantContext::default()), FALLBACK_REPLY);
}

#[test]
fn mock_provider_answers_locally() {
    let transport = Recorder::answering(json!({}));
    let assistant = Assistant::from_config(&AssistantConfig::default(), &transport);
    assert!(matches!(assistant, Assistant::Local(_)));

    let context = AssistantContext::default();
    assert!(assistant.reply("Let's begin", &context).starts_with("Great! Let's start"));
    assert_eq!(assistant.reply("weather?", &context), DEFAULT_REPLY);
    assert!(transport.sent.borrow().is_empty());
}

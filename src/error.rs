//! Unified compiler error type used across all phases.

use thiserror::Error;

use crate::model::validate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parse,
    Connect,
    Compile,
    Validate,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Connect => write!(f, "Connect"),
            Phase::Compile => write!(f, "Compile"),
            Phase::Validate => write!(f, "Validate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{phase}:{code}] {message}{}", node_suffix(.node_id))]
pub struct CompilerError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    pub node_id: Option<String>,
}

fn node_suffix(node_id: &Option<String>) -> String {
    match node_id {
        Some(id) => format!(" (node '{}')", id),
        None => String::new(),
    }
}

impl From<ValidationError> for CompilerError {
    fn from(e: ValidationError) -> Self {
        CompilerError {
            code: e.code.to_string(),
            phase: Phase::Validate,
            message: e.message,
            node_id: e.subject,
        }
    }
}

impl CompilerError {
    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Parse,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn connect(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Connect,
            message: message.into(),
            node_id,
        }
    }

    pub fn compile(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Compile,
            message: message.into(),
            node_id,
        }
    }
}

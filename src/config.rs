//! Environment-driven configuration.
//!
//! Every struct here also deserializes from JSON so the browser can pass the
//! same settings it reads from its own build-time environment.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::LayoutOptions;

pub const ENV_PROVIDER: &str = "AI_PROVIDER";
pub const ENV_API_KEY: &str = "AI_API_KEY";
pub const ENV_BASE_URL: &str = "AI_BASE_URL";
pub const ENV_PROCESS_API_URL: &str = "PROCESS_API_URL";

pub const DEFAULT_PROCESS_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown assistant provider: {0}")]
    UnknownProvider(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Mock,
    Local,
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
    Azure,
}

impl Provider {
    pub fn is_hosted(&self) -> bool {
        matches!(self, Provider::OpenAi | Provider::Anthropic | Provider::Azure)
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "mock" => Ok(Provider::Mock),
            "local" => Ok(Provider::Local),
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            "azure" => Ok(Provider::Azure),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssistantConfig {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistenceConfig {
    pub base_url: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROCESS_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    pub layout: LayoutOptions,
    pub assistant: AssistantConfig,
    pub persistence: PersistenceConfig,
}

impl CompilerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match get(ENV_PROVIDER) {
            Some(raw) => raw.parse()?,
            None => Provider::Mock,
        };

        let persistence_url = get(ENV_PROCESS_API_URL).unwrap_or_else(|| DEFAULT_PROCESS_API_URL.to_string());
        if !persistence_url.starts_with("http://") && !persistence_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "{} must be an http(s) URL, got '{}'",
                ENV_PROCESS_API_URL, persistence_url
            )));
        }

        let config = CompilerConfig {
            layout: LayoutOptions::default(),
            assistant: AssistantConfig {
                provider,
                api_key: get(ENV_API_KEY),
                base_url: get(ENV_BASE_URL),
            },
            persistence: PersistenceConfig {
                base_url: persistence_url.trim_end_matches('/').to_string(),
            },
        };

        tracing::debug!(
            provider = ?config.assistant.provider,
            has_api_key = config.assistant.api_key.is_some(),
            persistence = %config.persistence.base_url,
            "loaded configuration"
        );

        Ok(config)
    }
}

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::domain::llm::tasks::Task;

/// Failure classes reported by an LLM provider transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("LLM provider rate limited the request: {0}")]
    RateLimited(String),

    #[error("LLM provider request timed out: {0}")]
    Timeout(String),

    #[error("LLM provider unavailable: {0}")]
    Unavailable(String),

    #[error("LLM provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("LLM provider returned a malformed response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Rate limits, timeouts and generic provider failures are retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited(_) | ProviderError::Timeout(_) | ProviderError::Unavailable(_)
        )
    }
}

/// A JSON Schema document plus the identifier sent to the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    pub name: &'static str,
    pub schema: Value,
}

/// One outbound provider call.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub schema_name: String,
    pub schema: Value,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub task: Task,
    pub system: String,
    pub user: String,
    pub schema: SchemaDocument,
    pub model_override: Option<String>,
    pub timeout: Option<Duration>,
    pub max_retries: Option<u32>,
}

impl StructuredRequest {
    pub fn new(task: Task, system: impl Into<String>, user: impl Into<String>, schema: SchemaDocument) -> Self {
        Self {
            task,
            system: system.into(),
            user: user.into(),
            schema,
            model_override: None,
            timeout: None,
            max_retries: None,
        }
    }

    pub fn with_model_override(mut self, model: Option<String>) -> Self {
        self.model_override = model;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructuredResult {
    pub data: Value,
    pub model: String,
}

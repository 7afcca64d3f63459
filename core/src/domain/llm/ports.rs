use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    llm::{
        entities::{ProviderError, ProviderRequest, StructuredRequest, StructuredResult},
        tasks::Task,
    },
};

/// Transport to an LLM provider: one schema-constrained completion per
/// call, returning the raw text of the answer.
pub trait LLMProvider: Send + Sync {
    fn complete_structured(
        &self,
        request: ProviderRequest,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

/// Structured generation with model routing and retry.
pub trait StructuredGenerator: Send + Sync {
    /// The model a call for `task` would use.
    fn resolve_model(&self, task: Task, model_override: Option<String>) -> String;

    fn structured(
        &self,
        request: StructuredRequest,
    ) -> impl Future<Output = Result<StructuredResult, CoreError>> + Send;
}

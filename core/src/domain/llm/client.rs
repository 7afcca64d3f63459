use std::time::Duration;

use tracing::{error, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    llm::{
        entities::{ProviderError, ProviderRequest, StructuredRequest, StructuredResult},
        model_router::ModelRouter,
        ports::{LLMProvider, StructuredGenerator},
        tasks::Task,
    },
};

/// Structured generation on top of a provider transport. Transient
/// provider failures are retried with exponential backoff; everything
/// else surfaces on the first occurrence.
#[derive(Debug, Clone)]
pub struct StructuredGenerationClient<P>
where
    P: LLMProvider,
{
    provider: P,
    router: ModelRouter,
    timeout: Duration,
    max_retries: u32,
    base_delay: Duration,
}

impl<P> StructuredGenerationClient<P>
where
    P: LLMProvider,
{
    pub fn new(
        provider: P,
        router: ModelRouter,
        timeout: Duration,
        max_retries: u32,
        base_delay: Duration,
    ) -> Self {
        Self {
            provider,
            router,
            timeout,
            max_retries,
            base_delay,
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(16))
    }
}

impl<P> StructuredGenerator for StructuredGenerationClient<P>
where
    P: LLMProvider,
{
    fn resolve_model(&self, task: Task, model_override: Option<String>) -> String {
        self.router.select(task, model_override.as_deref())
    }

    async fn structured(&self, request: StructuredRequest) -> Result<StructuredResult, CoreError> {
        let model = self
            .router
            .select(request.task, request.model_override.as_deref());
        let timeout = request.timeout.unwrap_or(self.timeout);
        let attempts = request.max_retries.unwrap_or(self.max_retries).max(1);

        let mut attempt = 0;
        loop {
            let provider_request = ProviderRequest {
                model: model.clone(),
                system: request.system.clone(),
                user: request.user.clone(),
                schema_name: request.schema.name.to_string(),
                schema: request.schema.schema.clone(),
                timeout,
            };

            match self.provider.complete_structured(provider_request).await {
                Ok(text) => {
                    let data = serde_json::from_str(&text).map_err(|e| {
                        error!(task = %request.task, model = %model, "Failed to parse structured output: {}", e);
                        ProviderError::MalformedResponse(e.to_string())
                    })?;

                    return Ok(StructuredResult { data, model });
                }
                Err(e) if e.is_transient() && attempt + 1 < attempts => {
                    let delay = self.backoff(attempt);
                    warn!(
                        task = %request.task,
                        model = %model,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "Transient LLM failure, retrying: {}",
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(task = %request.task, model = %model, attempts = attempt + 1, "LLM call failed: {}", e);
                    return Err(e.into());
                }
            }
        }
    }
}

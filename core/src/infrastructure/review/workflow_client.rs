use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, instrument};

use crate::domain::{
    common::{ReviewConfig, entities::app_errors::CoreError},
    rag::{
        entities::{GroundedAnswer, ReviewVerdict},
        ports::ReviewWorkflow,
    },
};

const REVIEW_TIMEOUT: Duration = Duration::from_secs(60);

/// Hosted review workflow. Without credentials every review is skipped.
#[derive(Debug, Clone)]
pub struct WorkflowReviewClient {
    config: Option<ReviewConfig>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    workflow_id: &'a str,
    input: RunInput<'a>,
}

#[derive(Debug, Serialize)]
struct RunInput<'a> {
    question: &'a str,
    base_answer: &'a GroundedAnswer,
}

impl WorkflowReviewClient {
    pub fn new(config: Option<ReviewConfig>) -> Self {
        let config = config.filter(|c| !c.api_key.is_empty() && !c.workflow_id.is_empty());
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }
}

/// Reads the verdict from the run result, which some runners nest
/// under `output`.
pub(crate) fn parse_verdict(body: Value) -> Result<ReviewVerdict, serde_json::Error> {
    let body = match body {
        Value::Object(mut map) if map.get("output").is_some_and(Value::is_object) => {
            map.remove("output").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(body)
}

impl ReviewWorkflow for WorkflowReviewClient {
    #[instrument(skip(self, question, base))]
    async fn review(
        &self,
        question: String,
        base: GroundedAnswer,
    ) -> Result<Option<ReviewVerdict>, CoreError> {
        let Some(config) = &self.config else {
            return Ok(None);
        };

        let body = RunRequest {
            workflow_id: &config.workflow_id,
            input: RunInput {
                question: &question,
                base_answer: &base,
            },
        };

        let response = self
            .client
            .post(&config.run_url)
            .bearer_auth(&config.api_key)
            .timeout(REVIEW_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Review workflow request failed: {}", e);
                CoreError::ExternalServiceError(format!("Review workflow error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Review workflow error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "Review workflow returned error: {} - {}",
                status, error_text
            )));
        }

        let raw: Value = response.json().await.map_err(|e| {
            error!("Failed to read review workflow response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to read review response: {}", e))
        })?;

        parse_verdict(raw).map(Some).map_err(|e| {
            error!("Failed to parse review verdict: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse review verdict: {}", e))
        })
    }
}

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, instrument};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    llm::{
        entities::{ProviderError, ProviderRequest},
        ports::LLMProvider,
    },
};

/// Chat-completions transport with `json_schema` response formatting.
#[derive(Debug, Clone)]
pub struct OpenAIProvider {
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    schema: &'a Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAIProvider {
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        if config.openai_api_key.trim().is_empty() {
            return Err(CoreError::MissingCredential("OPENAI_API_KEY".to_string()));
        }

        Ok(Self {
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        })
    }
}

/// Maps a non-success HTTP status to a provider failure class.
pub(crate) fn classify_status(status: StatusCode, body: String) -> ProviderError {
    match status.as_u16() {
        429 => ProviderError::RateLimited(body),
        408 | 504 => ProviderError::Timeout(body),
        code if code >= 500 => ProviderError::Unavailable(format!("{}: {}", status, body)),
        code => ProviderError::Rejected {
            status: code,
            message: body,
        },
    }
}

fn classify_transport(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(e.to_string())
    } else {
        ProviderError::Unavailable(e.to_string())
    }
}

impl LLMProvider for OpenAIProvider {
    #[instrument(skip(self, request), fields(model = %request.model, schema = %request.schema_name))]
    async fn complete_structured(&self, request: ProviderRequest) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: &request.schema_name,
                    schema: &request.schema,
                    strict: false,
                },
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("OpenAI request failed: {}", e);
                classify_transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("OpenAI API error: {} - {}", status, error_text);
            return Err(classify_status(status, error_text));
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            error!("Failed to parse OpenAI response: {}", e);
            ProviderError::MalformedResponse(e.to_string())
        })?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::MalformedResponse("response has no content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, time::Duration};

    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            ProviderError::RateLimited(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::GATEWAY_TIMEOUT, String::new()),
            ProviderError::Timeout(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, String::new()),
            ProviderError::Unavailable(_)
        ));
        assert_eq!(
            classify_status(StatusCode::BAD_REQUEST, "bad schema".to_string()),
            ProviderError::Rejected {
                status: 400,
                message: "bad schema".to_string()
            }
        );
    }

    #[test]
    fn test_rejected_is_not_retried() {
        assert!(!classify_status(StatusCode::UNAUTHORIZED, String::new()).is_transient());
        assert!(classify_status(StatusCode::SERVICE_UNAVAILABLE, String::new()).is_transient());
    }

    #[test]
    fn test_missing_key_fails_fast() {
        let config = LLMConfig {
            openai_api_key: "  ".to_string(),
            openai_base_url: "https://api.openai.com/v1/".to_string(),
            request_timeout: Duration::from_secs(30),
            max_retries: 2,
            retry_base_delay: Duration::from_millis(100),
            fast_model: "o3-mini".to_string(),
            quality_model: "gpt-4o".to_string(),
            task_models: HashMap::new(),
        };

        assert!(matches!(
            OpenAIProvider::new(&config),
            Err(CoreError::MissingCredential(_))
        ));
    }
}

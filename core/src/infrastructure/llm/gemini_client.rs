use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, instrument, warn};

use crate::domain::{
    common::{RagConfig, entities::app_errors::CoreError},
    rag::{
        entities::{Citation, ContextChunk, GroundedAnswer, UploadedFile},
        ports::{Embedder, GroundedAnswerer, TextExtractor},
        prompt::{EXTRACTION_PROMPT, GROUNDED_ANSWER_SYSTEM_PROMPT, grounded_user_prompt},
        schema::get_grounded_answer_schema,
    },
};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini adapter for document extraction, embeddings and grounded answers.
#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    text_model: String,
    embed_model: String,
    timeout: Duration,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Serialize)]
struct EmbedRequest {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Option<EmbeddingValues>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}

impl GeminiLLMClient {
    pub fn new(config: &RagConfig) -> Result<Self, CoreError> {
        if config.gemini_api_key.trim().is_empty() {
            return Err(CoreError::MissingCredential("GEMINI_API_KEY".to_string()));
        }

        Ok(Self {
            api_key: config.gemini_api_key.clone(),
            text_model: config.gemini_text_model.clone(),
            embed_model: config.gemini_embed_model.clone(),
            timeout: config.request_timeout,
            client: Client::new(),
        })
    }

    async fn post<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        model: &str,
        method: &str,
        body: &B,
    ) -> Result<R, CoreError> {
        let url = format!("{}/{}:{}?key={}", GEMINI_BASE_URL, model, method, self.api_key);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("Gemini API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "Gemini API returned error: {} - {}",
                status, error_text
            )));
        }

        response.json().await.map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse Gemini response: {}", e))
        })
    }

    async fn generate(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let response: GeminiResponse = self
            .post(&self.text_model, "generateContent", &request)
            .await?;

        Ok(response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
            .unwrap_or_default()
            .trim()
            .to_string())
    }
}

/// Removes a surrounding markdown code fence and a leading `json` tag.
pub(crate) fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.trim();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim();
    }
    if let Some(rest) = text.strip_prefix("json") {
        text = rest.trim();
    }
    text
}

/// Parses the model output field by field.
///
/// Text that is not a JSON object becomes the answer itself at confidence
/// 0.5. Within an object, a numeric string is accepted as a number, a
/// missing confidence is 0.0 and citations that cannot be read are skipped.
pub(crate) fn parse_grounded_answer(raw: &str) -> GroundedAnswer {
    let text = strip_code_fences(raw);
    let parsed = match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            warn!("grounded answer is not a JSON object, using raw text");
            return GroundedAnswer {
                answer: text.to_string(),
                confidence: 0.5,
                citations: Vec::new(),
            };
        }
    };

    let answer = match parsed.get("answer") {
        Some(Value::String(answer)) => answer.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    let confidence = parsed.get("confidence").and_then(lenient_f64).unwrap_or(0.0);

    let citations = parsed
        .get("citations")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(lenient_citation).collect())
        .unwrap_or_default();

    GroundedAnswer {
        answer,
        confidence,
        citations,
    }
}

fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_citation(value: &Value) -> Option<Citation> {
    let item = value.as_object()?;
    let source = item.get("source")?.as_str()?.to_string();
    let chunk_index = match item.get("chunk_index") {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        Some(Value::String(s)) => s.trim().parse().ok()?,
        _ => -1,
    };

    Some(Citation {
        source,
        chunk_index,
    })
}

impl TextExtractor for GeminiLLMClient {
    #[instrument(skip(self, file), fields(filename = %file.filename, bytes = file.data.len()))]
    async fn extract_text(&self, file: UploadedFile) -> Result<String, CoreError> {
        let mime_type = file
            .content_type
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type,
                            data: general_purpose::STANDARD.encode(&file.data),
                        },
                    },
                    Part::Text {
                        text: EXTRACTION_PROMPT.to_string(),
                    },
                ],
            }],
            system_instruction: None,
            generation_config: None,
        };

        self.generate(request).await
    }
}

impl Embedder for GeminiLLMClient {
    async fn embed(&self, text: String) -> Result<Vec<f32>, CoreError> {
        let request = EmbedRequest {
            content: Content {
                parts: vec![Part::Text { text }],
            },
        };

        let response: EmbedResponse = self
            .post(&self.embed_model, "embedContent", &request)
            .await?;

        Ok(response.embedding.map(|e| e.values).unwrap_or_default())
    }
}

impl GroundedAnswerer for GeminiLLMClient {
    #[instrument(skip(self, question, context), fields(chunks = context.len()))]
    async fn answer(
        &self,
        question: String,
        context: Vec<ContextChunk>,
    ) -> Result<GroundedAnswer, CoreError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part::Text {
                    text: grounded_user_prompt(&question, &context),
                }],
            }],
            system_instruction: Some(Content {
                parts: vec![Part::Text {
                    text: GROUNDED_ANSWER_SYSTEM_PROMPT.to_string(),
                }],
            }),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: get_grounded_answer_schema(),
            }),
        };

        let raw = self.generate(request).await?;
        Ok(parse_grounded_answer(&raw))
    }
}

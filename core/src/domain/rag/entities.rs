use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChunk {
    pub text: String,
    pub source: String,
    pub chunk_index: u32,
}

/// A chunk with its embedding, ready for the vector index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedChunk {
    pub id: Uuid,
    pub workspace_id: String,
    pub chunk: DocumentChunk,
    pub vector: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContextChunk {
    pub text: String,
    pub source: String,
    pub chunk_index: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Citation {
    #[serde(default)]
    pub source: String,
    #[serde(default = "missing_chunk_index")]
    pub chunk_index: i64,
}

fn missing_chunk_index() -> i64 {
    -1
}

impl Citation {
    pub fn refers_to(&self, chunk: &ContextChunk) -> bool {
        self.source == chunk.source && self.chunk_index == chunk.chunk_index
    }
}

/// Answer produced from retrieved context only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GroundedAnswer {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

/// Overrides returned by the external review workflow.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReviewVerdict {
    #[serde(default)]
    pub approved_answer: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub citations: Option<Vec<Citation>>,
    #[serde(default)]
    pub needs_human_review: bool,
    #[serde(default)]
    pub review_comment: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl ReviewVerdict {
    /// `review_comment`, or `explanation` when the comment is blank.
    pub fn comment(&self) -> String {
        [&self.review_comment, &self.explanation]
            .into_iter()
            .flatten()
            .map(|c| c.trim())
            .find(|c| !c.is_empty())
            .unwrap_or_default()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RagResult {
    pub answer: String,
    pub confidence: f64,
    pub citations: Vec<Citation>,
    pub needs_human_review: bool,
    pub review_comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AskResult {
    pub workspace_id: String,
    pub question: String,
    pub context_chunks: Vec<ContextChunk>,
    pub rag_result: RagResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngestReport {
    pub workspace_id: String,
    pub chunks_indexed: usize,
}

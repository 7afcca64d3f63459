use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::sync::OnceCell;
use tracing::{error, info, instrument};

use crate::domain::{
    common::{RagConfig, entities::app_errors::CoreError},
    rag::{
        entities::{ContextChunk, IndexedChunk},
        ports::VectorIndex,
    },
};

/// Qdrant REST adapter. All workspaces share one collection and are
/// separated by the `workspace_id` payload field.
#[derive(Debug)]
pub struct QdrantVectorIndex {
    base_url: String,
    api_key: Option<String>,
    collection: String,
    timeout: Duration,
    client: Client,
    collection_ready: OnceCell<()>,
}

#[derive(Debug, Serialize)]
struct Point {
    id: String,
    vector: Vec<f32>,
    payload: ChunkPayload,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChunkPayload {
    workspace_id: String,
    filename: String,
    chunk_index: i64,
    text: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<ScoredPoint>,
}

#[derive(Debug, Deserialize)]
struct ScoredPoint {
    payload: Option<ChunkPayload>,
}

impl From<ChunkPayload> for ContextChunk {
    fn from(payload: ChunkPayload) -> Self {
        ContextChunk {
            text: payload.text,
            source: payload.filename,
            chunk_index: payload.chunk_index,
        }
    }
}

impl QdrantVectorIndex {
    pub fn new(config: &RagConfig) -> Self {
        Self {
            base_url: config.qdrant_url.trim_end_matches('/').to_string(),
            api_key: config.qdrant_api_key.clone().filter(|k| !k.is_empty()),
            collection: config.collection.clone(),
            timeout: config.request_timeout,
            client: Client::new(),
            collection_ready: OnceCell::new(),
        }
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.timeout(self.timeout);
        match &self.api_key {
            Some(key) => builder.header("api-key", key),
            None => builder,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }

    async fn send(&self, builder: RequestBuilder, action: &str) -> Result<reqwest::Response, CoreError> {
        self.request(builder).send().await.map_err(|e| {
            error!("Qdrant {} request failed: {}", action, e);
            CoreError::ExternalServiceError(format!("Qdrant {} failed: {}", action, e))
        })
    }

    async fn fail(response: reqwest::Response, action: &str) -> CoreError {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        error!("Qdrant {} error: {} - {}", action, status, error_text);
        CoreError::ExternalServiceError(format!(
            "Qdrant {} returned error: {} - {}",
            action, status, error_text
        ))
    }

    /// Creates the collection with cosine distance unless it already exists.
    async fn ensure_collection(&self, vector_size: usize) -> Result<(), CoreError> {
        self.collection_ready
            .get_or_try_init(|| async {
                let response = self
                    .send(self.client.get(self.collection_url()), "get collection")
                    .await?;
                if response.status().is_success() {
                    return Ok(());
                }
                if response.status() != StatusCode::NOT_FOUND {
                    return Err(Self::fail(response, "get collection").await);
                }

                let body = json!({
                    "vectors": { "size": vector_size, "distance": "Cosine" }
                });
                let response = self
                    .send(self.client.put(self.collection_url()).json(&body), "create collection")
                    .await?;
                if !response.status().is_success() {
                    return Err(Self::fail(response, "create collection").await);
                }

                info!(collection = %self.collection, vector_size, "created Qdrant collection");
                Ok::<(), CoreError>(())
            })
            .await
            .map(|_| ())
    }
}

fn workspace_filter(workspace_id: &str) -> Value {
    json!({
        "must": [
            { "key": "workspace_id", "match": { "value": workspace_id } }
        ]
    })
}

impl VectorIndex for QdrantVectorIndex {
    #[instrument(skip(self, points), fields(points = points.len()))]
    async fn upsert(&self, points: Vec<IndexedChunk>) -> Result<(), CoreError> {
        let Some(first) = points.first() else {
            return Ok(());
        };
        self.ensure_collection(first.vector.len()).await?;

        let points: Vec<Point> = points
            .into_iter()
            .map(|point| Point {
                id: point.id.to_string(),
                vector: point.vector,
                payload: ChunkPayload {
                    workspace_id: point.workspace_id,
                    filename: point.chunk.source,
                    chunk_index: i64::from(point.chunk.chunk_index),
                    text: point.chunk.text,
                },
            })
            .collect();

        let response = self
            .send(
                self.client
                    .put(format!("{}/points?wait=true", self.collection_url()))
                    .json(&json!({ "points": points })),
                "upsert",
            )
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response, "upsert").await);
        }

        Ok(())
    }

    #[instrument(skip(self, vector))]
    async fn search(
        &self,
        workspace_id: String,
        vector: Vec<f32>,
        limit: usize,
    ) -> Result<Vec<ContextChunk>, CoreError> {
        let body = json!({
            "vector": vector,
            "limit": limit,
            "with_payload": true,
            "filter": workspace_filter(&workspace_id),
        });

        let response = self
            .send(
                self.client
                    .post(format!("{}/points/search", self.collection_url()))
                    .json(&body),
                "search",
            )
            .await?;

        // Nothing has been uploaded yet.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(Self::fail(response, "search").await);
        }

        let search: SearchResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Qdrant search response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse Qdrant response: {}", e))
        })?;

        Ok(search
            .result
            .into_iter()
            .filter_map(|point| point.payload)
            .map(ContextChunk::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_filter_matches_payload_key() {
        let filter = workspace_filter("ws-42");
        assert_eq!(filter["must"][0]["key"], "workspace_id");
        assert_eq!(filter["must"][0]["match"]["value"], "ws-42");
    }

    #[test]
    fn test_search_response_maps_payload() {
        let raw = json!({
            "result": [
                {
                    "id": "0b8f6c3e-0000-0000-0000-000000000000",
                    "score": 0.91,
                    "payload": {
                        "workspace_id": "ws-1",
                        "filename": "ayurveda.pdf",
                        "chunk_index": 3,
                        "text": "Pitta governs digestion."
                    }
                },
                { "id": "1", "score": 0.5 }
            ]
        });

        let response: SearchResponse = serde_json::from_value(raw).unwrap();
        let chunks: Vec<ContextChunk> = response
            .result
            .into_iter()
            .filter_map(|p| p.payload)
            .map(ContextChunk::from)
            .collect();

        assert_eq!(
            chunks,
            vec![ContextChunk {
                text: "Pitta governs digestion.".to_string(),
                source: "ayurveda.pdf".to_string(),
                chunk_index: 3,
            }]
        );
    }
}

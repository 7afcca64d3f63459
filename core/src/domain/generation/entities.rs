use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How a generated document was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenerationMeta {
    pub model: String,
    pub prompt_version: u32,
    pub cached: bool,
}

impl GenerationMeta {
    pub fn fresh(model: impl Into<String>, prompt_version: u32) -> Self {
        Self {
            model: model.into(),
            prompt_version,
            cached: false,
        }
    }

    pub fn into_cached(self) -> Self {
        Self {
            cached: true,
            ..self
        }
    }
}

/// Stored form of a cached generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub meta: GenerationMeta,
}

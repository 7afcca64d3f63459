use std::sync::Arc;

use tracing::info;

use crate::{
    domain::{
        common::{RagConfig, SwasthConfig, entities::app_errors::CoreError, services::Service},
        llm::{
            client::StructuredGenerationClient, model_router::ModelRouter,
            prompt_renderer::PromptRenderer,
        },
        rag::services::WorkspaceRagService,
    },
    infrastructure::{
        archive::repositories::archive_repository::PostgresArchiveRepository,
        cache::repositories::cache_repository::PostgresCacheStore,
        db::postgres::Postgres,
        llm::{gemini_client::GeminiLLMClient, openai_client::OpenAIProvider},
        review::workflow_client::WorkflowReviewClient,
        rotation::repositories::rotation_repository::PostgresRotationRepository,
        vector::qdrant::QdrantVectorIndex,
    },
};

pub type SwasthService = Service<
    StructuredGenerationClient<OpenAIProvider>,
    PostgresCacheStore,
    PostgresRotationRepository,
    PostgresArchiveRepository,
>;

pub type SwasthWorkspaceService = WorkspaceRagService<
    GeminiLLMClient,
    GeminiLLMClient,
    QdrantVectorIndex,
    GeminiLLMClient,
    WorkflowReviewClient,
>;

/// Wires the generation service. Fails fast on a missing OpenAI key, an
/// unreadable prompt directory, or an unreachable database.
pub async fn create_service(config: SwasthConfig) -> Result<SwasthService, CoreError> {
    let provider = OpenAIProvider::new(&config.llm)?;
    let router = ModelRouter::from_config(&config.llm, &config.features);
    let generator = StructuredGenerationClient::new(
        provider,
        router,
        config.llm.request_timeout,
        config.llm.max_retries,
        config.llm.retry_base_delay,
    );

    let prompt_renderer = PromptRenderer::load(config.prompts.directory.as_deref())?;

    let postgres = Postgres::new(&config.database).await?;
    let db = postgres.get_db();

    Ok(Service::new(
        generator,
        PostgresCacheStore::new(db.clone()),
        PostgresRotationRepository::new(db.clone()),
        PostgresArchiveRepository::new(db),
        prompt_renderer,
        config.features,
    ))
}

/// Wires the workspace pipeline, or `None` when it is disabled.
pub fn create_workspace_service(
    config: &RagConfig,
) -> Result<Option<SwasthWorkspaceService>, CoreError> {
    if !config.enabled {
        info!("workspace RAG pipeline disabled");
        return Ok(None);
    }

    let gemini = Arc::new(GeminiLLMClient::new(config)?);
    let reviewer = WorkflowReviewClient::new(config.review.clone());
    info!(review = reviewer.is_configured(), "workspace RAG pipeline enabled");

    Ok(Some(WorkspaceRagService::new(
        gemini.clone(),
        gemini.clone(),
        Arc::new(QdrantVectorIndex::new(config)),
        gemini,
        Arc::new(reviewer),
        config.top_k,
        config.max_chunk_chars,
    )))
}

use std::sync::Arc;

use clap::Parser;
use sea_orm::DatabaseConnection;
use swasth_core::{
    domain::{
        common::{SwasthConfig, services::Service},
        llm::{
            client::StructuredGenerationClient, model_router::ModelRouter,
            prompt_renderer::PromptRenderer,
        },
    },
    infrastructure::{
        archive::repositories::archive_repository::PostgresArchiveRepository,
        cache::repositories::cache_repository::PostgresCacheStore,
        llm::openai_client::OpenAIProvider,
        rotation::repositories::rotation_repository::PostgresRotationRepository,
    },
};

use crate::{application::http::server::app_state::AppState, args::Args};

pub fn test_args(extra: &[&str]) -> Args {
    let mut argv = vec!["swasth-api", "--openai-api-key", "sk-test"];
    argv.extend_from_slice(extra);
    Args::parse_from(argv)
}

/// State backed by a disconnected database and no workspace pipeline.
///
/// Routes that reach the model or the database fail; everything that is
/// answered from validation or static data works.
pub fn test_state(args: Args) -> AppState {
    let config = SwasthConfig::from(args.clone());
    let provider = OpenAIProvider::new(&config.llm).unwrap();
    let generator = StructuredGenerationClient::new(
        provider,
        ModelRouter::from_config(&config.llm, &config.features),
        config.llm.request_timeout,
        0,
        config.llm.retry_base_delay,
    );

    let db = DatabaseConnection::Disconnected;
    let service = Service::new(
        generator,
        PostgresCacheStore::new(db.clone()),
        PostgresRotationRepository::new(db.clone()),
        PostgresArchiveRepository::new(db),
        PromptRenderer::builtin(),
        config.features,
    );

    AppState::new(Arc::new(args), service, None)
}

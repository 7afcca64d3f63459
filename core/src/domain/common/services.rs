use std::sync::Arc;

use crate::domain::{
    archive::ports::ArchiveRepository, cache::ports::CacheStore, common::FeatureConfig,
    llm::{ports::StructuredGenerator, prompt_renderer::PromptRenderer},
    rotation::ports::RotationRepository,
};

/// Generation services for meal plans, recipes, grocery lists and
/// prakriti assessments.
pub struct Service<G, C, RO, AR>
where
    G: StructuredGenerator,
    C: CacheStore,
    RO: RotationRepository,
    AR: ArchiveRepository,
{
    pub(crate) generator: Arc<G>,
    pub(crate) cache_store: Arc<C>,
    pub(crate) rotation_repository: Arc<RO>,
    pub(crate) archive_repository: Arc<AR>,
    pub(crate) prompt_renderer: Arc<PromptRenderer>,
    pub(crate) features: FeatureConfig,
}

impl<G, C, RO, AR> Service<G, C, RO, AR>
where
    G: StructuredGenerator,
    C: CacheStore,
    RO: RotationRepository,
    AR: ArchiveRepository,
{
    pub fn new(
        generator: G,
        cache_store: C,
        rotation_repository: RO,
        archive_repository: AR,
        prompt_renderer: PromptRenderer,
        features: FeatureConfig,
    ) -> Self {
        Self {
            generator: Arc::new(generator),
            cache_store: Arc::new(cache_store),
            rotation_repository: Arc::new(rotation_repository),
            archive_repository: Arc::new(archive_repository),
            prompt_renderer: Arc::new(prompt_renderer),
            features,
        }
    }

    pub fn features(&self) -> &FeatureConfig {
        &self.features
    }
}

impl<G, C, RO, AR> Clone for Service<G, C, RO, AR>
where
    G: StructuredGenerator,
    C: CacheStore,
    RO: RotationRepository,
    AR: ArchiveRepository,
{
    fn clone(&self) -> Self {
        Self {
            generator: self.generator.clone(),
            cache_store: self.cache_store.clone(),
            rotation_repository: self.rotation_repository.clone(),
            archive_repository: self.archive_repository.clone(),
            prompt_renderer: self.prompt_renderer.clone(),
            features: self.features.clone(),
        }
    }
}

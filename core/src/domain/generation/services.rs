use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, error, warn};
use validator::Validate;

use crate::domain::{
    archive::{
        entities::{ArchiveCollection, ArchivedDocument},
        ports::ArchiveRepository,
    },
    cache::ports::CacheStore,
    common::{
        entities::app_errors::CoreError,
        fingerprint::cache_key,
        services::Service,
        side_effects::{SideEffect, WithSideEffects},
    },
    generation::{
        entities::{CacheEntry, GenerationMeta},
        value_objects::{GenerationOptions, ResolvedGeneration},
    },
    llm::{
        entities::StructuredRequest, ports::StructuredGenerator, schema_registry::schema_for,
        tasks::Task,
    },
    rotation::ports::RotationRepository,
};

impl<G, C, RO, AR> Service<G, C, RO, AR>
where
    G: StructuredGenerator,
    C: CacheStore,
    RO: RotationRepository,
    AR: ArchiveRepository,
{
    /// Header overrides win over body values; the configured version is
    /// the default. Whether a model override is honored is up to the
    /// generator's routing.
    pub(crate) fn resolve_generation(
        &self,
        task: Task,
        options: &GenerationOptions,
    ) -> ResolvedGeneration {
        let model_override = options
            .overrides
            .model
            .clone()
            .or_else(|| options.model.clone());

        let prompt_version = options
            .overrides
            .prompt_version
            .or(options.prompt_version)
            .unwrap_or_else(|| self.features.prompt_versions.for_task(task));

        ResolvedGeneration {
            model: self.generator.resolve_model(task, model_override.clone()),
            model_override,
            prompt_version,
            force: options.force,
        }
    }

    /// Unreadable entries and store failures count as a miss.
    pub(crate) async fn load_cached<T>(&self, key: &str, force: bool) -> Option<CacheEntry<T>>
    where
        T: DeserializeOwned + Validate,
    {
        if !self.features.enable_caching || force {
            return None;
        }

        match self.cache_store.get(key.to_string()).await {
            Ok(Some(value)) => match serde_json::from_value::<CacheEntry<T>>(value) {
                Ok(entry) if entry.data.validate().is_ok() => {
                    debug!(key, "cache hit");
                    Some(entry)
                }
                Ok(_) => {
                    warn!(key, "ignoring cache entry that fails validation");
                    None
                }
                Err(e) => {
                    warn!(key, error = %e, "ignoring unreadable cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    pub(crate) async fn store_cached<T>(
        &self,
        key: String,
        data: &T,
        meta: &GenerationMeta,
    ) -> SideEffect
    where
        T: Serialize + Sync,
    {
        if !self.features.enable_caching {
            return SideEffect::Skipped;
        }

        let value = match serde_json::to_value(CacheEntry {
            data,
            meta: meta.clone(),
        }) {
            Ok(value) => value,
            Err(e) => return SideEffect::from_result("cache", Err(CoreError::ExternalServiceError(e.to_string()))),
        };

        let result = self
            .cache_store
            .set(key, value, self.features.cache_ttl)
            .await;

        SideEffect::from_result("cache", result)
    }

    pub(crate) async fn archive_document<T>(
        &self,
        collection: ArchiveCollection,
        owner_id: Option<String>,
        document: &T,
        meta: Value,
    ) -> SideEffect
    where
        T: Serialize + Sync,
    {
        let document = match serde_json::to_value(document) {
            Ok(document) => document,
            Err(e) => return SideEffect::from_result("archive", Err(CoreError::ExternalServiceError(e.to_string()))),
        };

        let result = self
            .archive_repository
            .save(ArchivedDocument::new(collection, owner_id, document, meta))
            .await;

        SideEffect::from_result("archive", result)
    }

    /// One structured call, decoded and validated against `T`.
    pub(crate) async fn generate_document<T>(
        &self,
        task: Task,
        system_prompt: &str,
        user_prompt: String,
        model_override: Option<String>,
    ) -> Result<(T, String), CoreError>
    where
        T: DeserializeOwned + Validate,
    {
        let schema = schema_for(task);
        let schema_name = schema.name;

        let request = StructuredRequest::new(task, system_prompt, user_prompt, schema)
            .with_model_override(model_override);
        let result = self.generator.structured(request).await?;

        let document: T = serde_json::from_value(result.data).map_err(|e| {
            error!(task = %task, "Model output does not match {}: {}", schema_name, e);
            CoreError::invalid_schema(schema_name, e)
        })?;

        document.validate().map_err(|e| {
            error!(task = %task, "Model output violates {} constraints: {}", schema_name, e);
            CoreError::invalid_schema(schema_name, e)
        })?;

        Ok((document, result.model))
    }

    /// Cache probe, render, generate, cache write. The cache key covers the
    /// inputs, prompt version and resolved model.
    pub(crate) async fn cached_generation<T, P>(
        &self,
        task: Task,
        system_prompt: &'static str,
        resolved: &ResolvedGeneration,
        cache_inputs: Value,
        prompt_context: &P,
    ) -> Result<WithSideEffects<CacheEntry<T>>, CoreError>
    where
        T: Serialize + DeserializeOwned + Validate + Send + Sync,
        P: Serialize + Sync,
    {
        let key = cache_key(
            task,
            &json!({
                "inputs": cache_inputs,
                "pv": resolved.prompt_version,
                "model": resolved.model,
            }),
        )?;

        if let Some(entry) = self.load_cached::<T>(&key, resolved.force).await {
            return Ok(WithSideEffects::new(CacheEntry {
                data: entry.data,
                meta: entry.meta.into_cached(),
            }));
        }

        let user_prompt =
            self.prompt_renderer
                .render(task, resolved.prompt_version, prompt_context)?;

        let (data, model) = self
            .generate_document::<T>(
                task,
                system_prompt,
                user_prompt,
                resolved.model_override.clone(),
            )
            .await?;

        let meta = GenerationMeta::fresh(model, resolved.prompt_version);
        let cache = self.store_cached(key, &data, &meta).await;

        let mut outcome = WithSideEffects::new(CacheEntry { data, meta });
        outcome.record("cache", cache);
        Ok(outcome)
    }
}

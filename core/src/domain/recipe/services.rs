use serde::Serialize;
use serde_json::json;
use tracing::instrument;

use crate::domain::{
    archive::{entities::ArchiveCollection, ports::ArchiveRepository},
    cache::ports::CacheStore,
    common::{entities::app_errors::CoreError, services::Service, side_effects::WithSideEffects},
    llm::{ports::StructuredGenerator, tasks::Task},
    meal_plan::{entities::DietType, validators::ensure_non_empty},
    recipe::{
        entities::{GeneratedRecipe, RecipeResponse},
        ports::RecipeService,
        value_objects::GenerateRecipeInput,
    },
    rotation::ports::RotationRepository,
};

pub const RECIPE_SYSTEM_PROMPT: &str = "You are an expert Indian home-cooking chef. \
Generate precise, feasible recipes. Use metric units (g, kg, ml, L, pcs). \
Output ONLY valid JSON matching the schema.";

#[derive(Debug, Serialize)]
struct RecipePromptContext<'a> {
    dish: &'a str,
    region: &'a str,
    diet_type: DietType,
    servings: u32,
}

impl<G, C, RO, AR> RecipeService for Service<G, C, RO, AR>
where
    G: StructuredGenerator,
    C: CacheStore,
    RO: RotationRepository,
    AR: ArchiveRepository,
{
    #[instrument(skip(self, input), fields(dish = %input.dish, force = input.options.force))]
    async fn generate_recipe(
        &self,
        input: GenerateRecipeInput,
    ) -> Result<WithSideEffects<RecipeResponse>, CoreError> {
        ensure_non_empty("dish", &input.dish)?;
        ensure_non_empty("region", &input.region)?;
        if input.servings == 0 {
            return Err(CoreError::InvalidInput(
                "servings must be at least 1".to_string(),
            ));
        }

        let resolved = self.resolve_generation(Task::Recipe, &input.options);
        let context = RecipePromptContext {
            dish: input.dish.trim(),
            region: input.region.trim(),
            diet_type: input.diet_type,
            servings: input.servings,
        };

        let generated = self
            .cached_generation::<GeneratedRecipe, _>(
                Task::Recipe,
                RECIPE_SYSTEM_PROMPT,
                &resolved,
                json!({
                    "dish": context.dish,
                    "r": context.region,
                    "d": input.diet_type,
                    "s": input.servings,
                }),
                &context,
            )
            .await?;

        let cached = generated.value.meta.cached;
        let mut outcome = generated.map(|entry| RecipeResponse {
            recipe: entry.data,
            meta: entry.meta,
        });

        if !cached {
            let archive = self
                .archive_document(
                    ArchiveCollection::Recipes,
                    None,
                    &outcome.value.recipe,
                    json!(outcome.value.meta),
                )
                .await;
            outcome.record("archive", archive);
        }

        Ok(outcome)
    }
}

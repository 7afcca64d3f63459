use serde_json::json;
use validator::Validate;
use tracing::instrument;

use crate::domain::{
    archive::{entities::ArchiveCollection, ports::ArchiveRepository},
    cache::ports::CacheStore,
    common::{entities::app_errors::CoreError, services::Service, side_effects::WithSideEffects},
    grocery::{
        aggregator::aggregate_from_plan,
        entities::{GeneratedGroceryList, GroceryListResponse, GroceryListSource, HouseholdSummary},
        ports::GroceryService,
        value_objects::GenerateGroceryListInput,
    },
    llm::{ports::StructuredGenerator, tasks::Task},
    meal_plan::{entities::WeeklyMealPlan, validators::ensure_non_empty},
    rotation::ports::RotationRepository,
};

pub const GROCERY_SYSTEM_PROMPT: &str = "You are an organized Indian grocery planner. \
Aggregate a weekly grocery list with metric units. Use Indian market categories. \
Output ONLY valid JSON matching the schema.";

impl<G, C, RO, AR> Service<G, C, RO, AR>
where
    G: StructuredGenerator,
    C: CacheStore,
    RO: RotationRepository,
    AR: ArchiveRepository,
{
    /// Deterministic list for an existing plan; no model call, no cache.
    async fn grocery_list_from_plan(
        &self,
        plan: WeeklyMealPlan,
    ) -> Result<WithSideEffects<GroceryListResponse>, CoreError> {
        plan.validate()
            .map_err(|e| CoreError::InvalidInput(format!("mealPlan is invalid: {}", e)))?;

        let list = GeneratedGroceryList {
            items: aggregate_from_plan(&plan),
            region: plan.region,
            diet_type: plan.diet_type,
            household: HouseholdSummary {
                household_type: plan.household.household_type,
                size: plan.household.size,
            },
            notes: None,
        };
        let meta = GroceryListSource::ServerAggregator { cached: false };

        let archive = self
            .archive_document(ArchiveCollection::GroceryLists, None, &list, json!(meta))
            .await;

        let mut outcome = WithSideEffects::new(GroceryListResponse { list, meta });
        outcome.record("archive", archive);
        Ok(outcome)
    }
}

impl<G, C, RO, AR> GroceryService for Service<G, C, RO, AR>
where
    G: StructuredGenerator,
    C: CacheStore,
    RO: RotationRepository,
    AR: ArchiveRepository,
{
    #[instrument(skip(self, input), fields(from_plan = input.meal_plan.is_some()))]
    async fn generate_grocery_list(
        &self,
        input: GenerateGroceryListInput,
    ) -> Result<WithSideEffects<GroceryListResponse>, CoreError> {
        if let Some(plan) = input.meal_plan {
            return self.grocery_list_from_plan(plan).await;
        }

        ensure_non_empty("region", &input.region)?;
        input
            .household
            .validate()
            .map_err(|e| CoreError::InvalidInput(format!("household is invalid: {}", e)))?;

        let resolved = self.resolve_generation(Task::Grocery, &input.options);
        let context = json!({
            "region": input.region.trim(),
            "diet_type": input.diet_type,
            "household": input.household,
        });

        let generated = self
            .cached_generation::<GeneratedGroceryList, _>(
                Task::Grocery,
                GROCERY_SYSTEM_PROMPT,
                &resolved,
                json!({
                    "r": context["region"],
                    "d": input.diet_type,
                    "h": input.household,
                }),
                &context,
            )
            .await?;

        let cached = generated.value.meta.cached;
        let mut outcome = generated.map(|entry| GroceryListResponse {
            list: entry.data,
            meta: GroceryListSource::Llm(entry.meta),
        });

        if !cached {
            let archive = self
                .archive_document(
                    ArchiveCollection::GroceryLists,
                    None,
                    &outcome.value.list,
                    json!(outcome.value.meta),
                )
                .await;
            outcome.record("archive", archive);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{
        generation::value_objects::GenerationOptions,
        grocery::entities::GroceryItem,
        meal_plan::entities::{DietType, HouseholdType},
        testing::{TestContext, ingredient, unique_plan},
    };

    fn input(meal_plan: Option<WeeklyMealPlan>) -> GenerateGroceryListInput {
        GenerateGroceryListInput {
            region: "Punjab".to_string(),
            diet_type: DietType::EggsOk,
            household: HouseholdSummary {
                household_type: HouseholdType::Family,
                size: 4,
            },
            meal_plan,
            options: GenerationOptions::default(),
        }
    }

    fn list_json() -> Value {
        json!({
            "region": "Punjab",
            "dietType": "eggs_ok",
            "household": { "type": "family", "size": 4 },
            "items": [
                { "name": "Atta", "qty": 5.0, "unit": "kg", "category": "Flours & Atta" },
                { "name": "Eggs", "qty": 12.0, "unit": "pcs" }
            ]
        })
    }

    #[tokio::test]
    async fn test_meal_plan_is_aggregated_without_model_call() {
        let context = TestContext::new();
        let mut plan = unique_plan("dish");
        for day in plan.days.iter_mut() {
            for meal in [&mut day.breakfast, &mut day.lunch, &mut day.dinner] {
                meal.recipe.ingredients.clear();
            }
        }
        plan.days[0].lunch.recipe.ingredients = vec![ingredient("Rice", 200.0, "g", None)];
        plan.days[4].dinner.recipe.ingredients = vec![ingredient("Rice", 200.0, "g", None)];

        let outcome = context
            .service()
            .generate_grocery_list(input(Some(plan)))
            .await
            .unwrap();

        assert_eq!(
            outcome.value.list.items,
            vec![GroceryItem {
                name: "rice".to_string(),
                qty: 400.0,
                unit: "g".to_string(),
                category: None,
            }]
        );
        assert_eq!(
            outcome.value.meta,
            GroceryListSource::ServerAggregator { cached: false }
        );
        assert_eq!(outcome.value.list.region, "Maharashtra");
        assert_eq!(context.generator.calls(), 0);
        assert_eq!(context.archive.documents().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_meal_plan_is_rejected() {
        let context = TestContext::new();
        let mut plan = unique_plan("dish");
        plan.days.truncate(3);

        let error = context
            .service()
            .generate_grocery_list(input(Some(plan)))
            .await
            .unwrap_err();

        assert!(matches!(error, CoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_llm_list_then_cache_hit() {
        let context = TestContext::new();
        context.generator.push_ok(list_json());
        let service = context.service();

        let first = service.generate_grocery_list(input(None)).await.unwrap();
        let second = service.generate_grocery_list(input(None)).await.unwrap();

        assert_eq!(first.value.list.items.len(), 2);
        match (&first.value.meta, &second.value.meta) {
            (GroceryListSource::Llm(fresh), GroceryListSource::Llm(cached)) => {
                assert!(!fresh.cached);
                assert!(cached.cached);
                assert_eq!(fresh.model, "test-grocery");
            }
            other => panic!("unexpected meta {:?}", other),
        }
        assert_eq!(context.generator.calls(), 1);
        assert_eq!(context.generator.requests()[0].schema.name, "grocery_list");
    }

    #[test]
    fn test_meta_serializes_with_source_tag() {
        assert_eq!(
            json!(GroceryListSource::ServerAggregator { cached: false }),
            json!({"source": "server_aggregator", "cached": false})
        );
        assert_eq!(
            json!(GroceryListSource::Llm(crate::domain::generation::entities::GenerationMeta::fresh("gpt-4o", 1))),
            json!({"source": "llm", "model": "gpt-4o", "prompt_version": 1, "cached": false})
        );
    }
}

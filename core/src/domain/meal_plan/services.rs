use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::domain::{
    archive::{entities::ArchiveCollection, ports::ArchiveRepository},
    cache::ports::CacheStore,
    common::{
        entities::app_errors::CoreError,
        fingerprint::cache_key,
        services::Service,
        side_effects::{SideEffect, WithSideEffects},
    },
    generation::entities::GenerationMeta,
    grocery::aggregator::aggregate_from_plan,
    llm::{ports::StructuredGenerator, tasks::Task},
    meal_plan::{
        entities::{MealPlanResponse, WeeklyMealPlan},
        ports::MealPlanService,
        validators::{ensure_non_empty, infer_household, parse_week_start},
        value_objects::{GenerateMealPlanInput, HouseholdContext, MealPlanPromptContext},
        variety::{VarietyReport, collect_dish_names},
    },
    rotation::{
        entities::RotationRecord,
        ports::RotationRepository,
        services::{recent_dish_set, rotation_window},
    },
};

pub const MEAL_PLAN_SYSTEM_PROMPT: &str = "You are an expert Indian nutritionist and home-cooking planner. \
Create a 7-day plan with breakfast, lunch, dinner. Respect region, diet, and household doshas. \
Use metric units (g, kg, ml, L, pcs). Output ONLY valid JSON matching the provided schema.";

impl<G, C, RO, AR> Service<G, C, RO, AR>
where
    G: StructuredGenerator,
    C: CacheStore,
    RO: RotationRepository,
    AR: ArchiveRepository,
{
    /// Normalized dishes served to the user in the rotation window. An
    /// unreadable history counts as empty.
    async fn recent_dishes(&self, user_id: &str, week_start: NaiveDate) -> BTreeSet<String> {
        let variety = &self.features.variety;
        let Some(window) = rotation_window(week_start, variety) else {
            return BTreeSet::new();
        };

        match self
            .rotation_repository
            .recent_weeks(user_id.to_string(), window)
            .await
        {
            Ok(records) => recent_dish_set(records, variety.rotation_max_dishes),
            Err(e) => {
                warn!(user_id, error = %e, "failed to read dish rotation, continuing without it");
                BTreeSet::new()
            }
        }
    }

    async fn record_rotation(
        &self,
        user_id: &str,
        week_start: NaiveDate,
        plan: &WeeklyMealPlan,
    ) -> SideEffect {
        let record = RotationRecord {
            user_id: user_id.to_string(),
            week_start,
            dishes: collect_dish_names(plan),
            created_at: Utc::now(),
        };

        SideEffect::from_result("rotation", self.rotation_repository.record_week(record).await)
    }
}

impl<G, C, RO, AR> MealPlanService for Service<G, C, RO, AR>
where
    G: StructuredGenerator,
    C: CacheStore,
    RO: RotationRepository,
    AR: ArchiveRepository,
{
    #[instrument(skip(self, input), fields(user_id = %input.user_id, week_start = %input.week_start, force = input.options.force))]
    async fn generate_meal_plan(
        &self,
        input: GenerateMealPlanInput,
    ) -> Result<WithSideEffects<MealPlanResponse>, CoreError> {
        ensure_non_empty("userId", &input.user_id)?;
        ensure_non_empty("region", &input.region)?;
        let week_start = parse_week_start(&input.week_start)?;

        let (household_type, size) = infer_household(&input.members);
        let resolved = self.resolve_generation(Task::MealPlan, &input.options);
        let variety = self.features.variety.clone();

        let recent = if variety.enforce_rotation {
            self.recent_dishes(&input.user_id, week_start).await
        } else {
            BTreeSet::new()
        };

        let key = cache_key(
            Task::MealPlan,
            &json!({
                "w": input.week_start,
                "r": input.region,
                "d": input.diet_type,
                "m": input.members,
                "avoid": recent,
                "pv": resolved.prompt_version,
                "mo": resolved.model,
            }),
        )?;

        if let Some(entry) = self
            .load_cached::<WeeklyMealPlan>(&key, resolved.force)
            .await
        {
            let rotation = self
                .record_rotation(&input.user_id, week_start, &entry.data)
                .await;

            let mut outcome = WithSideEffects::new(MealPlanResponse {
                plan: entry.data,
                meta: entry.meta.into_cached(),
            });
            outcome.record("rotation", rotation);
            return Ok(outcome);
        }

        let household = HouseholdContext {
            household_type,
            size,
            members: input
                .members
                .iter()
                .map(|m| format!("{} ({})", m.name, m.dosha.as_str()))
                .collect(),
        };

        let mut avoid = recent.clone();
        let mut repairs = 0;
        let (mut plan, model) = loop {
            let context = MealPlanPromptContext {
                week_start: input.week_start.clone(),
                region: input.region.clone(),
                diet_type: input.diet_type,
                household: household.clone(),
                avoid_dishes: avoid.iter().cloned().collect(),
            };
            let user_prompt =
                self.prompt_renderer
                    .render(Task::MealPlan, resolved.prompt_version, &context)?;

            let (plan, model) = self
                .generate_document::<WeeklyMealPlan>(
                    Task::MealPlan,
                    MEAL_PLAN_SYSTEM_PROMPT,
                    user_prompt,
                    resolved.model_override.clone(),
                )
                .await?;

            let report = VarietyReport::inspect(&plan, &recent);
            let violations = report.violations(&variety);

            if violations.is_empty() {
                break (plan, model);
            }

            if repairs >= variety.repair_attempts {
                warn!(
                    user_id = %input.user_id,
                    duplicates = ?report.duplicates,
                    recent = ?report.recent_matches,
                    "accepting meal plan with variety violations after {} repair attempts",
                    repairs
                );
                break (plan, model);
            }

            repairs += 1;
            info!(
                user_id = %input.user_id,
                attempt = repairs,
                duplicates = ?report.duplicates,
                recent = ?report.recent_matches,
                "regenerating meal plan to repair variety"
            );
            avoid.extend(violations);
        };

        if self.features.deterministic_grocery_aggregation {
            plan.grocery_list = aggregate_from_plan(&plan);
        }

        let meta = GenerationMeta::fresh(model, resolved.prompt_version);

        let cache = self.store_cached(key, &plan, &meta).await;
        let rotation = self
            .record_rotation(&input.user_id, week_start, &plan)
            .await;
        let archive = self
            .archive_document(
                ArchiveCollection::MealPlans,
                Some(input.user_id.clone()),
                &plan,
                json!(meta),
            )
            .await;

        let mut outcome = WithSideEffects::new(MealPlanResponse { plan, meta });
        outcome.record("cache", cache);
        outcome.record("rotation", rotation);
        outcome.record("archive", archive);
        Ok(outcome)
    }
}

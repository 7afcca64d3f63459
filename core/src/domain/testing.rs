//! In-memory fakes and fixtures shared by the domain tests.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
    time::Duration,
};

use serde_json::Value;

use crate::domain::{
    archive::{entities::ArchivedDocument, ports::ArchiveRepository},
    cache::ports::CacheStore,
    common::{FeatureConfig, entities::app_errors::CoreError, services::Service},
    llm::{
        entities::{StructuredRequest, StructuredResult},
        ports::StructuredGenerator,
        prompt_renderer::PromptRenderer,
        tasks::Task,
    },
    meal_plan::entities::{
        DayPlan, DietType, Dosha, FamilyMember, Household, HouseholdType, Meal, WeeklyMealPlan,
    },
    recipe::entities::{Ingredient, RecipeDetail},
    rotation::{
        entities::{RotationRecord, RotationWindow},
        ports::RotationRepository,
    },
};

/// Replays scripted results in order and records every request.
#[derive(Clone, Default)]
pub struct FakeGenerator {
    responses: Arc<Mutex<VecDeque<Result<Value, CoreError>>>>,
    requests: Arc<Mutex<Vec<StructuredRequest>>>,
}

impl FakeGenerator {
    pub fn push_ok(&self, data: Value) {
        self.responses.lock().unwrap().push_back(Ok(data));
    }

    pub fn push_err(&self, error: CoreError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<StructuredRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl StructuredGenerator for FakeGenerator {
    fn resolve_model(&self, task: Task, model_override: Option<String>) -> String {
        model_override
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("test-{}", task.as_str()))
    }

    async fn structured(&self, request: StructuredRequest) -> Result<StructuredResult, CoreError> {
        let model = self.resolve_model(request.task, request.model_override.clone());
        self.requests.lock().unwrap().push(request);

        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| {
            Err(CoreError::ExternalServiceError(
                "no scripted response".to_string(),
            ))
        })
        .map(|data| StructuredResult { data, model })
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCache {
    entries: Arc<Mutex<HashMap<String, Value>>>,
    writes: Arc<Mutex<Vec<(String, Option<Duration>)>>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl InMemoryCache {
    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }

    pub fn writes(&self) -> Vec<(String, Option<Duration>)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn entry(&self, key: &str) -> Option<Value> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Stores `value` directly, bypassing the recorded writes.
    pub fn seed(&self, key: &str, value: Value) {
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }
}

impl CacheStore for InMemoryCache {
    async fn get(&self, key: String) -> Result<Option<Value>, CoreError> {
        if self.fail_reads {
            return Err(CoreError::DatabaseError("cache offline".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(&key).cloned())
    }

    async fn set(&self, key: String, value: Value, ttl: Option<Duration>) -> Result<(), CoreError> {
        if self.fail_writes {
            return Err(CoreError::DatabaseError("cache offline".to_string()));
        }
        self.writes.lock().unwrap().push((key.clone(), ttl));
        self.entries.lock().unwrap().insert(key, value);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryRotation {
    records: Arc<Mutex<Vec<RotationRecord>>>,
    pub fail_writes: bool,
}

impl InMemoryRotation {
    pub fn seed(&self, record: RotationRecord) {
        self.records.lock().unwrap().push(record);
    }

    pub fn records(&self) -> Vec<RotationRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl RotationRepository for InMemoryRotation {
    async fn record_week(&self, record: RotationRecord) -> Result<(), CoreError> {
        if self.fail_writes {
            return Err(CoreError::DatabaseError("rotation store offline".to_string()));
        }

        let mut records = self.records.lock().unwrap();
        records.retain(|r| !(r.user_id == record.user_id && r.week_start == record.week_start));
        records.push(record);
        Ok(())
    }

    async fn recent_weeks(
        &self,
        user_id: String,
        window: RotationWindow,
    ) -> Result<Vec<RotationRecord>, CoreError> {
        let mut records: Vec<RotationRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                r.user_id == user_id && r.week_start >= window.since && r.week_start < window.before
            })
            .cloned()
            .collect();

        records.sort_by(|a, b| b.week_start.cmp(&a.week_start));
        records.truncate(window.limit as usize);
        Ok(records)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryArchive {
    documents: Arc<Mutex<Vec<ArchivedDocument>>>,
}

impl InMemoryArchive {
    pub fn documents(&self) -> Vec<ArchivedDocument> {
        self.documents.lock().unwrap().clone()
    }
}

impl ArchiveRepository for InMemoryArchive {
    async fn save(&self, document: ArchivedDocument) -> Result<(), CoreError> {
        self.documents.lock().unwrap().push(document);
        Ok(())
    }
}

pub type TestService = Service<FakeGenerator, InMemoryCache, InMemoryRotation, InMemoryArchive>;

/// Fakes plus the service wired to them. The fakes share state with the
/// service so tests can inspect them afterwards.
#[derive(Clone, Default)]
pub struct TestContext {
    pub generator: FakeGenerator,
    pub cache: InMemoryCache,
    pub rotation: InMemoryRotation,
    pub archive: InMemoryArchive,
    pub features: FeatureConfig,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service(&self) -> TestService {
        Service::new(
            self.generator.clone(),
            self.cache.clone(),
            self.rotation.clone(),
            self.archive.clone(),
            PromptRenderer::builtin(),
            self.features.clone(),
        )
    }
}

pub fn ingredient(name: &str, qty: f64, unit: &str, category: Option<&str>) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        qty,
        unit: unit.to_string(),
        category: category.map(str::to_string),
    }
}

pub fn recipe_detail() -> RecipeDetail {
    RecipeDetail {
        ingredients: vec![ingredient("Rice", 100.0, "g", None)],
        steps: vec!["Rinse".to_string(), "Cook".to_string()],
        prep_mins: 5,
        cook_mins: 20,
    }
}

/// A valid seven-day plan; `name(day, meal)` names each meal.
pub fn plan_with_dishes(name: impl Fn(usize, usize) -> String) -> WeeklyMealPlan {
    let meal = |day: usize, slot: usize| Meal {
        name: name(day, slot),
        serving_size: 2,
        recipe: recipe_detail(),
    };

    WeeklyMealPlan {
        week_start: "2025-09-01".to_string(),
        region: "Maharashtra".to_string(),
        diet_type: DietType::Veg,
        household: Household {
            household_type: HouseholdType::Family,
            size: 2,
            members: vec![
                FamilyMember {
                    name: "Asha".to_string(),
                    dosha: Dosha::Pitta,
                },
                FamilyMember {
                    name: "Ravi".to_string(),
                    dosha: Dosha::Vata,
                },
            ],
        },
        days: (0..7)
            .map(|day| DayPlan {
                date: format!("2025-09-{:02}", day + 1),
                breakfast: meal(day, 0),
                lunch: meal(day, 1),
                dinner: meal(day, 2),
                notes: None,
            })
            .collect(),
        grocery_list: Vec::new(),
    }
}

pub fn unique_plan(prefix: &str) -> WeeklyMealPlan {
    plan_with_dishes(|day, slot| format!("{} {}-{}", prefix, day, slot))
}

use std::{collections::HashMap, path::PathBuf, time::Duration};

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

use crate::domain::llm::tasks::Task;

pub mod entities;
pub mod fingerprint;
pub mod services;
pub mod side_effects;

#[derive(Clone, Debug)]
pub struct SwasthConfig {
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
    pub features: FeatureConfig,
    pub prompts: PromptConfig,
    pub rag: RagConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    pub fast_model: String,
    pub quality_model: String,
    pub task_models: HashMap<Task, String>,
}

impl LLMConfig {
    /// Per-task defaults (quality for meal plans and recipes, fast for the
    /// rest) overlaid with the explicit `task_models` entries.
    pub fn model_map(&self) -> HashMap<Task, String> {
        let mut models: HashMap<Task, String> = Task::ALL
            .iter()
            .map(|task| {
                let model = match task {
                    Task::MealPlan | Task::Recipe => self.quality_model.clone(),
                    Task::Grocery | Task::Prakriti => self.fast_model.clone(),
                };
                (*task, model)
            })
            .collect();

        for (task, model) in &self.task_models {
            models.insert(*task, model.clone());
        }

        models
    }
}

#[derive(Clone, Debug)]
pub struct FeatureConfig {
    pub allow_model_override: bool,
    pub enable_caching: bool,
    pub cache_ttl: Option<Duration>,
    pub deterministic_grocery_aggregation: bool,
    pub prompt_versions: PromptVersions,
    pub variety: VarietyConfig,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            allow_model_override: true,
            enable_caching: true,
            cache_ttl: Some(Duration::from_secs(604_800)),
            deterministic_grocery_aggregation: true,
            prompt_versions: PromptVersions::default(),
            variety: VarietyConfig::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PromptVersions {
    pub meal_plan: u32,
    pub recipe: u32,
    pub grocery: u32,
    pub prakriti: u32,
}

impl PromptVersions {
    pub fn for_task(&self, task: Task) -> u32 {
        match task {
            Task::MealPlan => self.meal_plan,
            Task::Recipe => self.recipe,
            Task::Grocery => self.grocery,
            Task::Prakriti => self.prakriti,
        }
    }
}

impl Default for PromptVersions {
    fn default() -> Self {
        Self {
            meal_plan: 1,
            recipe: 1,
            grocery: 1,
            prakriti: 1,
        }
    }
}

/// Meal-plan variety enforcement.
#[derive(Clone, Debug)]
pub struct VarietyConfig {
    pub enforce_no_duplicates: bool,
    pub enforce_rotation: bool,
    pub repair_attempts: u32,
    /// How many weeks before the requested week are consulted.
    pub rotation_weeks: u32,
    pub rotation_max_weeks: u32,
    pub rotation_max_dishes: usize,
}

impl Default for VarietyConfig {
    fn default() -> Self {
        Self {
            enforce_no_duplicates: true,
            enforce_rotation: true,
            repair_attempts: 1,
            rotation_weeks: 4,
            rotation_max_weeks: 12,
            rotation_max_dishes: 2000,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PromptConfig {
    pub directory: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct RagConfig {
    pub enabled: bool,
    pub gemini_api_key: String,
    pub gemini_text_model: String,
    pub gemini_embed_model: String,
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub collection: String,
    pub top_k: usize,
    pub max_chunk_chars: usize,
    pub request_timeout: Duration,
    pub review: Option<ReviewConfig>,
}

#[derive(Clone, Debug)]
pub struct ReviewConfig {
    pub api_key: String,
    pub workflow_id: String,
    pub run_url: String,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config() -> LLMConfig {
        LLMConfig {
            openai_api_key: "sk-test".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            request_timeout: Duration::from_secs(45),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
            fast_model: "o3-mini".to_string(),
            quality_model: "gpt-4o".to_string(),
            task_models: HashMap::new(),
        }
    }

    #[test]
    fn test_model_map_defaults_by_task() {
        let models = llm_config().model_map();
        assert_eq!(models[&Task::MealPlan], "gpt-4o");
        assert_eq!(models[&Task::Recipe], "gpt-4o");
        assert_eq!(models[&Task::Grocery], "o3-mini");
        assert_eq!(models[&Task::Prakriti], "o3-mini");
    }

    #[test]
    fn test_model_map_explicit_entries_win() {
        let mut config = llm_config();
        config
            .task_models
            .insert(Task::Grocery, "gpt-4o-mini".to_string());
        let models = config.model_map();
        assert_eq!(models[&Task::Grocery], "gpt-4o-mini");
        assert_eq!(models[&Task::MealPlan], "gpt-4o");
    }
}

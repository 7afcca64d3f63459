use std::collections::HashMap;

use crate::domain::{
    common::{FeatureConfig, LLMConfig},
    llm::tasks::Task,
};

/// Picks the model for a task: a permitted explicit override, then the
/// per-task default, then the fallback.
#[derive(Debug, Clone)]
pub struct ModelRouter {
    models: HashMap<Task, String>,
    fallback: String,
    allow_override: bool,
}

impl ModelRouter {
    pub fn new(models: HashMap<Task, String>, fallback: String, allow_override: bool) -> Self {
        Self {
            models,
            fallback,
            allow_override,
        }
    }

    pub fn from_config(llm: &LLMConfig, features: &FeatureConfig) -> Self {
        Self::new(
            llm.model_map(),
            llm.quality_model.clone(),
            features.allow_model_override,
        )
    }

    pub fn select(&self, task: Task, model_override: Option<&str>) -> String {
        let requested = model_override.map(str::trim).filter(|m| !m.is_empty());

        if let Some(model) = requested {
            if self.allow_override {
                return model.to_string();
            }
            tracing::debug!(task = %task, model, "model override ignored: overrides disabled");
        }

        self.models
            .get(&task)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

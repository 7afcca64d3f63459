use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

/// A named generation use-case with its own schema, prompt family and
/// default model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    MealPlan,
    Recipe,
    Grocery,
    Prakriti,
}

impl Task {
    pub const ALL: [Task; 4] = [Task::MealPlan, Task::Recipe, Task::Grocery, Task::Prakriti];

    pub fn as_str(&self) -> &'static str {
        match self {
            Task::MealPlan => "meal_plan",
            Task::Recipe => "recipe",
            Task::Grocery => "grocery",
            Task::Prakriti => "prakriti",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(' ', "_");

        match normalized.as_str() {
            "meal" | "mealplan" | "meal_plan" => Ok(Task::MealPlan),
            "rec" | "recipes" | "recipe" => Ok(Task::Recipe),
            "groceries" | "grocery_list" | "grocery" => Ok(Task::Grocery),
            "prakruti" | "prakriti" | "dosha_assessment" | "prakriti_assessment" => {
                Ok(Task::Prakriti)
            }
            _ => Err(CoreError::UnknownTask(s.to_string())),
        }
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{generation::entities::GenerationMeta, meal_plan::entities::DietType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct Ingredient {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub qty: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct RecipeDetail {
    #[validate(nested)]
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    pub prep_mins: u32,
    pub cook_mins: u32,
}

/// Recipe document as produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    #[validate(length(min = 1))]
    pub dish: String,
    pub region: String,
    pub diet_type: DietType,
    #[validate(range(min = 1))]
    pub servings: u32,
    #[validate(nested)]
    pub recipe: RecipeDetail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeResponse {
    #[serde(flatten)]
    pub recipe: GeneratedRecipe,
    pub meta: GenerationMeta,
}

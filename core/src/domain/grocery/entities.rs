use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{
    generation::entities::GenerationMeta,
    meal_plan::entities::{DietType, HouseholdType},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct GroceryItem {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub qty: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct HouseholdSummary {
    #[serde(rename = "type")]
    pub household_type: HouseholdType,
    #[validate(range(min = 1))]
    pub size: u32,
}

/// Grocery list document as produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedGroceryList {
    pub region: String,
    pub diet_type: DietType,
    #[validate(nested)]
    pub household: HouseholdSummary,
    #[validate(nested)]
    pub items: Vec<GroceryItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Where a grocery list came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum GroceryListSource {
    Llm(GenerationMeta),
    ServerAggregator { cached: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GroceryListResponse {
    #[serde(flatten)]
    pub list: GeneratedGroceryList,
    pub meta: GroceryListSource,
}

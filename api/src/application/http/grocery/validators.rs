use serde::{Deserialize, Serialize};
use swasth_core::domain::{
    generation::value_objects::{GenerationOptions, GenerationOverrides},
    grocery::{entities::HouseholdSummary, value_objects::GenerateGroceryListInput},
    meal_plan::entities::{DietType, WeeklyMealPlan},
};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateGroceryListValidator {
    #[validate(length(min = 1, message = "region is required"))]
    pub region: String,

    pub diet_type: DietType,

    #[validate(nested)]
    pub household: HouseholdSummary,

    /// When given, the list is aggregated from this plan without a model call.
    #[serde(default)]
    #[validate(nested)]
    pub meal_plan: Option<WeeklyMealPlan>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default, rename = "prompt_version", alias = "promptVersion")]
    #[validate(range(min = 1))]
    pub prompt_version: Option<u32>,

    #[serde(default)]
    pub force: bool,
}

impl GenerateGroceryListValidator {
    pub fn into_input(self, overrides: GenerationOverrides) -> GenerateGroceryListInput {
        GenerateGroceryListInput {
            region: self.region,
            diet_type: self.diet_type,
            household: self.household,
            meal_plan: self.meal_plan,
            options: GenerationOptions {
                model: self.model,
                prompt_version: self.prompt_version,
                force: self.force,
                overrides,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_household_members_are_tolerated() {
        let payload: GenerateGroceryListValidator = serde_json::from_value(json!({
            "region": "south_indian",
            "dietType": "non_veg",
            "household": { "type": "family", "size": 4, "members": [] }
        }))
        .unwrap();

        assert!(payload.validate().is_ok());
        assert!(payload.meal_plan.is_none());
    }
}

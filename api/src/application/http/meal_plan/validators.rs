use serde::{Deserialize, Serialize};
use swasth_core::domain::{
    generation::value_objects::{GenerationOptions, GenerationOverrides},
    meal_plan::{
        entities::{DietType, FamilyMember},
        value_objects::GenerateMealPlanInput,
    },
};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMealPlanValidator {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,

    /// ISO date, e.g. `2025-06-02`.
    #[validate(length(min = 1, message = "weekStart is required"))]
    pub week_start: String,

    #[validate(length(min = 1, message = "region is required"))]
    pub region: String,

    pub diet_type: DietType,

    #[validate(nested)]
    pub members: Vec<FamilyMember>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default, rename = "prompt_version", alias = "promptVersion")]
    #[validate(range(min = 1, message = "prompt_version must be at least 1"))]
    pub prompt_version: Option<u32>,

    #[serde(default)]
    pub force: bool,
}

impl GenerateMealPlanValidator {
    pub fn into_input(self, overrides: GenerationOverrides) -> GenerateMealPlanInput {
        GenerateMealPlanInput {
            user_id: self.user_id,
            week_start: self.week_start,
            region: self.region,
            diet_type: self.diet_type,
            members: self.members,
            options: GenerationOptions {
                model: self.model,
                prompt_version: self.prompt_version,
                force: self.force,
                overrides,
            },
        }
    }
}

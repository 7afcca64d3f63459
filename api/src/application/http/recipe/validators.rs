use serde::{Deserialize, Serialize};
use swasth_core::domain::{
    generation::value_objects::{GenerationOptions, GenerationOverrides},
    meal_plan::entities::DietType,
    recipe::value_objects::GenerateRecipeInput,
};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipeValidator {
    #[validate(length(min = 1, message = "dish is required"))]
    pub dish: String,

    #[validate(length(min = 1, message = "region is required"))]
    pub region: String,

    pub diet_type: DietType,

    #[validate(range(min = 1, message = "servings must be at least 1"))]
    pub servings: u32,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default, rename = "prompt_version", alias = "promptVersion")]
    #[validate(range(min = 1))]
    pub prompt_version: Option<u32>,

    #[serde(default)]
    pub force: bool,
}

impl GenerateRecipeValidator {
    pub fn into_input(self, overrides: GenerationOverrides) -> GenerateRecipeInput {
        GenerateRecipeInput {
            dish: self.dish,
            region: self.region,
            diet_type: self.diet_type,
            servings: self.servings,
            options: GenerationOptions {
                model: self.model,
                prompt_version: self.prompt_version,
                force: self.force,
                overrides,
            },
        }
    }
}

use crate::domain::{generation::value_objects::GenerationOptions, meal_plan::entities::DietType};

#[derive(Debug, Clone)]
pub struct GenerateRecipeInput {
    pub dish: String,
    pub region: String,
    pub diet_type: DietType,
    pub servings: u32,
    pub options: GenerationOptions,
}

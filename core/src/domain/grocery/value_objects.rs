use crate::domain::{
    generation::value_objects::GenerationOptions,
    grocery::entities::HouseholdSummary,
    meal_plan::entities::{DietType, WeeklyMealPlan},
};

#[derive(Debug, Clone)]
pub struct GenerateGroceryListInput {
    pub region: String,
    pub diet_type: DietType,
    pub household: HouseholdSummary,
    /// When present the list is aggregated from this plan without a model call.
    pub meal_plan: Option<WeeklyMealPlan>,
    pub options: GenerationOptions,
}

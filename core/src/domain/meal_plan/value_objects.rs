use serde::Serialize;

use crate::domain::{
    generation::value_objects::GenerationOptions,
    meal_plan::entities::{DietType, FamilyMember, HouseholdType},
};

#[derive(Debug, Clone)]
pub struct GenerateMealPlanInput {
    pub user_id: String,
    pub week_start: String,
    pub region: String,
    pub diet_type: DietType,
    pub members: Vec<FamilyMember>,
    pub options: GenerationOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct HouseholdContext {
    #[serde(rename = "type")]
    pub household_type: HouseholdType,
    pub size: u32,
    /// `"<name> (<dosha>)"` per member.
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MealPlanPromptContext {
    pub week_start: String,
    pub region: String,
    pub diet_type: DietType,
    pub household: HouseholdContext,
    pub avoid_dishes: Vec<String>,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{
    generation::entities::GenerationMeta, grocery::entities::GroceryItem,
    recipe::entities::RecipeDetail,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
    Tridoshic,
}

impl Dosha {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dosha::Vata => "vata",
            Dosha::Pitta => "pitta",
            Dosha::Kapha => "kapha",
            Dosha::Tridoshic => "tridoshic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    Veg,
    NonVeg,
    EggsOk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HouseholdType {
    Single,
    Family,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct FamilyMember {
    #[validate(length(min = 1))]
    pub name: String,
    pub dosha: Dosha,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct Meal {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub serving_size: u32,
    #[validate(nested)]
    pub recipe: RecipeDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct DayPlan {
    pub date: String,
    #[validate(nested)]
    pub breakfast: Meal,
    #[validate(nested)]
    pub lunch: Meal,
    #[validate(nested)]
    pub dinner: Meal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DayPlan {
    /// Breakfast, lunch, dinner.
    pub fn meals(&self) -> [&Meal; 3] {
        [&self.breakfast, &self.lunch, &self.dinner]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct Household {
    #[serde(rename = "type")]
    pub household_type: HouseholdType,
    #[validate(range(min = 1))]
    pub size: u32,
    #[validate(nested)]
    pub members: Vec<FamilyMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMealPlan {
    pub week_start: String,
    pub region: String,
    pub diet_type: DietType,
    #[validate(nested)]
    pub household: Household,
    #[validate(length(equal = 7), nested)]
    pub days: Vec<DayPlan>,
    #[serde(default)]
    pub grocery_list: Vec<GroceryItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealPlanResponse {
    pub plan: WeeklyMealPlan,
    pub meta: GenerationMeta,
}

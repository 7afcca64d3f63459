use std::future::Future;

use crate::domain::{
    common::{entities::app_errors::CoreError, side_effects::WithSideEffects},
    meal_plan::{entities::MealPlanResponse, value_objects::GenerateMealPlanInput},
};

#[cfg_attr(test, mockall::automock)]
pub trait MealPlanService: Send + Sync {
    /// Side effects: `cache`, `rotation`, `archive`.
    fn generate_meal_plan(
        &self,
        input: GenerateMealPlanInput,
    ) -> impl Future<Output = Result<WithSideEffects<MealPlanResponse>, CoreError>> + Send;
}

use std::future::Future;

use crate::domain::{
    common::{entities::app_errors::CoreError, side_effects::WithSideEffects},
    recipe::{entities::RecipeResponse, value_objects::GenerateRecipeInput},
};

#[cfg_attr(test, mockall::automock)]
pub trait RecipeService: Send + Sync {
    fn generate_recipe(
        &self,
        input: GenerateRecipeInput,
    ) -> impl Future<Output = Result<WithSideEffects<RecipeResponse>, CoreError>> + Send;
}

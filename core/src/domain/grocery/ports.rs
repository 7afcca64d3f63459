use std::future::Future;

use crate::domain::{
    common::{entities::app_errors::CoreError, side_effects::WithSideEffects},
    grocery::{entities::GroceryListResponse, value_objects::GenerateGroceryListInput},
};

#[cfg_attr(test, mockall::automock)]
pub trait GroceryService: Send + Sync {
    fn generate_grocery_list(
        &self,
        input: GenerateGroceryListInput,
    ) -> impl Future<Output = Result<WithSideEffects<GroceryListResponse>, CoreError>> + Send;
}

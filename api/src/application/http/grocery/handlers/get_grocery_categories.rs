use serde::{Deserialize, Serialize};
use swasth_core::domain::grocery::categories::grocery_categories;
use utoipa::ToSchema;

use crate::application::http::server::api_entities::{api_error::ApiError, response::Response};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GroceryCategoriesResponse {
    pub categories: serde_json::Value,
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "grocery",
    summary = "List grocery categories",
    responses(
        (status = 200, body = GroceryCategoriesResponse)
    )
)]
pub async fn get_grocery_categories() -> Result<Response<GroceryCategoriesResponse>, ApiError> {
    let categories = grocery_categories().map_err(ApiError::from)?;

    Ok(Response::OK(GroceryCategoriesResponse { categories }))
}

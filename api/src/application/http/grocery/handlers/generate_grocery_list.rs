use axum::extract::State;
use swasth_core::domain::grocery::{entities::GroceryListResponse, ports::GroceryService};

use crate::application::http::{
    grocery::validators::GenerateGroceryListValidator,
    overrides::HeaderOverrides,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/list",
    tag = "grocery",
    summary = "Build a grocery list",
    description = "Aggregates the list from `mealPlan` when it is supplied; otherwise generates one with the model.",
    params(
        ("x-model" = Option<String>, Header, description = "Model override"),
        ("x-prompt-version" = Option<u32>, Header, description = "Prompt version override"),
    ),
    request_body = GenerateGroceryListValidator,
    responses(
        (status = 200, body = GroceryListResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 422, body = ApiErrorResponse)
    )
)]
pub async fn generate_grocery_list(
    State(state): State<AppState>,
    HeaderOverrides(overrides): HeaderOverrides,
    ValidateJson(payload): ValidateJson<GenerateGroceryListValidator>,
) -> Result<Response<GroceryListResponse>, ApiError> {
    let result = state
        .service
        .generate_grocery_list(payload.into_input(overrides))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result.into_value()))
}

use axum::extract::State;
use swasth_core::domain::recipe::{entities::RecipeResponse, ports::RecipeService};

use crate::application::http::{
    overrides::HeaderOverrides,
    recipe::validators::GenerateRecipeValidator,
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
    path = "/generate",
    tag = "recipe",
    summary = "Generate a recipe",
    params(
        ("x-model" = Option<String>, Header, description = "Model override"),
        ("x-prompt-version" = Option<u32>, Header, description = "Prompt version override"),
    ),
    request_body = GenerateRecipeValidator,
    responses(
        (status = 200, body = RecipeResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 422, body = ApiErrorResponse)
    )
)]
pub async fn generate_recipe(
    State(state): State<AppState>,
    HeaderOverrides(overrides): HeaderOverrides,
    ValidateJson(payload): ValidateJson<GenerateRecipeValidator>,
) -> Result<Response<RecipeResponse>, ApiError> {
    let result = state
        .service
        .generate_recipe(payload.into_input(overrides))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result.into_value()))
}

use axum::extract::State;
use swasth_core::domain::meal_plan::{entities::MealPlanResponse, ports::MealPlanService};

use crate::application::http::{
    meal_plan::validators::GenerateMealPlanValidator,
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
    path = "/generate",
    tag = "meal-plan",
    summary = "Generate a weekly meal plan",
    description = "Generates a 7-day family meal plan. Results are cached per input; `force` bypasses the cache read. Dishes served in recent weeks are avoided.",
    params(
        ("x-model" = Option<String>, Header, description = "Model override"),
        ("x-prompt-version" = Option<u32>, Header, description = "Prompt version override"),
    ),
    request_body = GenerateMealPlanValidator,
    responses(
        (status = 200, body = MealPlanResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 422, body = ApiErrorResponse),
        (status = 500, body = ApiErrorResponse)
    )
)]
pub async fn generate_meal_plan(
    State(state): State<AppState>,
    HeaderOverrides(overrides): HeaderOverrides,
    ValidateJson(payload): ValidateJson<GenerateMealPlanValidator>,
) -> Result<Response<MealPlanResponse>, ApiError> {
    let result = state
        .service
        .generate_meal_plan(payload.into_input(overrides))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result.into_value()))
}

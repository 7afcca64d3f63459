use axum::extract::State;
use swasth_core::domain::prakriti::{entities::PrakritiResponse, ports::PrakritiService};

use crate::application::http::{
    overrides::HeaderOverrides,
    prakriti::validators::AssessPrakritiValidator,
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
    path = "/assessment",
    tag = "prakriti",
    summary = "Assess prakriti",
    description = "Estimates the dosha distribution from a profile and up to 50 answered questions.",
    params(
        ("x-model" = Option<String>, Header, description = "Model override"),
        ("x-prompt-version" = Option<u32>, Header, description = "Prompt version override"),
    ),
    request_body = AssessPrakritiValidator,
    responses(
        (status = 200, body = PrakritiResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 422, body = ApiErrorResponse)
    )
)]
pub async fn assess_prakriti(
    State(state): State<AppState>,
    HeaderOverrides(overrides): HeaderOverrides,
    ValidateJson(payload): ValidateJson<AssessPrakritiValidator>,
) -> Result<Response<PrakritiResponse>, ApiError> {
    let result = state
        .service
        .assess_prakriti(payload.into_input(overrides))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result.into_value()))
}

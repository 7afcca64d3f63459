use axum::extract::{Path, State};
use swasth_core::domain::rag::{entities::AskResult, ports::WorkspaceService};

use crate::application::http::{
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
    workspace::validators::AskWorkspaceValidator,
};

#[utoipa::path(
    post,
    path = "/ask",
    tag = "workspace",
    summary = "Ask a question about workspace documents",
    description = "Answers only from the workspace's indexed chunks and returns them with citations and the review flag.",
    params(
        ("workspace_id" = String, Path, description = "Workspace id"),
    ),
    request_body = AskWorkspaceValidator,
    responses(
        (status = 200, body = AskResult),
        (status = 400, body = ApiErrorResponse),
        (status = 503, body = ApiErrorResponse)
    )
)]
pub async fn ask_workspace(
    Path(workspace_id): Path<String>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AskWorkspaceValidator>,
) -> Result<Response<AskResult>, ApiError> {
    let service = state
        .workspace_service
        .clone()
        .ok_or_else(|| ApiError::ServiceUnavailable("Workspace pipeline is disabled".to_string()))?;

    let result = service
        .ask(workspace_id, payload.question)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result))
}

use axum::extract::{Multipart, Path, State};
use swasth_core::domain::rag::{
    entities::{IngestReport, UploadedFile},
    ports::WorkspaceService,
};
use tracing::{error, info};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[utoipa::path(
    post,
    path = "/upload",
    tag = "workspace",
    summary = "Upload documents to a workspace",
    description = "Extracts, chunks, embeds and indexes every file in the multipart `files` field. Re-uploading a file replaces its chunks.",
    params(
        ("workspace_id" = String, Path, description = "Workspace id"),
    ),
    responses(
        (status = 200, body = IngestReport),
        (status = 400, body = ApiErrorResponse),
        (status = 503, body = ApiErrorResponse)
    )
)]
pub async fn upload_files(
    Path(workspace_id): Path<String>,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<IngestReport>, ApiError> {
    let service = state
        .workspace_service
        .clone()
        .ok_or_else(|| ApiError::ServiceUnavailable("Workspace pipeline is disabled".to_string()))?;

    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);

        let data = field.bytes().await.map_err(|e| {
            error!("Failed to read file bytes: {}", e);
            ApiError::BadRequest(format!("Failed to read file: {}", e))
        })?;

        files.push(UploadedFile {
            filename,
            content_type,
            data,
        });
    }

    info!(workspace_id = %workspace_id, files = files.len(), "workspace upload");

    let report = service
        .ingest_files(workspace_id, files)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(report))
}

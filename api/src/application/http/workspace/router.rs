use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

use super::handlers::ask_workspace::{__path_ask_workspace, ask_workspace};
use super::handlers::upload_files::{__path_upload_files, upload_files};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(upload_files, ask_workspace))]
pub struct WorkspaceApiDoc;

pub fn workspace_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!(
                "{}/api/workspaces/{{workspace_id}}/upload",
                state.args.server.root_path
            ),
            post(upload_files).layer(DefaultBodyLimit::max(state.args.server.max_upload_bytes)),
        )
        .route(
            &format!(
                "{}/api/workspaces/{{workspace_id}}/ask",
                state.args.server.root_path
            ),
            post(ask_workspace),
        )
}

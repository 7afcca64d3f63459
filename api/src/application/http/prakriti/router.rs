use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::assess_prakriti::{__path_assess_prakriti, assess_prakriti};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(assess_prakriti))]
pub struct PrakritiApiDoc;

pub fn prakriti_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/v1/prakriti/assessment", state.args.server.root_path),
        post(assess_prakriti),
    )
}

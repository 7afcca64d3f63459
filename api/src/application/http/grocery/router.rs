use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::generate_grocery_list::{__path_generate_grocery_list, generate_grocery_list};
use super::handlers::get_grocery_categories::{
    __path_get_grocery_categories, get_grocery_categories,
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(generate_grocery_list, get_grocery_categories))]
pub struct GroceryApiDoc;

pub fn grocery_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/v1/grocery/list", state.args.server.root_path),
            post(generate_grocery_list),
        )
        .route(
            &format!("{}/v1/grocery/categories", state.args.server.root_path),
            get(get_grocery_categories),
        )
}

use utoipa::OpenApi;

use crate::application::http::{
    grocery::router::GroceryApiDoc, health::HealthApiDoc, meal_plan::router::MealPlanApiDoc,
    prakriti::router::PrakritiApiDoc, recipe::router::RecipeApiDoc,
    workspace::router::WorkspaceApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Swasth API"
    ),
    nest(
        (path = "/v1/meal-plan", api = MealPlanApiDoc),
        (path = "/v1/recipe", api = RecipeApiDoc),
        (path = "/v1/grocery", api = GroceryApiDoc),
        (path = "/v1/prakriti", api = PrakritiApiDoc),
        (path = "/api/workspaces/{workspace_id}", api = WorkspaceApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;

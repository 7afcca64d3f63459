use crate::domain::{
    grocery::schema::get_grocery_list_schema,
    llm::{entities::SchemaDocument, tasks::Task},
    meal_plan::schema::get_meal_plan_schema,
    prakriti::schema::get_prakriti_schema,
    recipe::schema::get_recipe_schema,
};

/// Default output schema for each task.
pub fn schema_for(task: Task) -> SchemaDocument {
    match task {
        Task::MealPlan => SchemaDocument {
            name: "meal_plan_family",
            schema: get_meal_plan_schema(),
        },
        Task::Recipe => SchemaDocument {
            name: "recipe",
            schema: get_recipe_schema(),
        },
        Task::Grocery => SchemaDocument {
            name: "grocery_list",
            schema: get_grocery_list_schema(),
        },
        Task::Prakriti => SchemaDocument {
            name: "prakriti_assessment",
            schema: get_prakriti_schema(),
        },
    }
}

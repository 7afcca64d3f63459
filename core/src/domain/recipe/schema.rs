use serde_json::json;

/// Shared by recipe documents and the meals of a weekly plan.
pub fn get_recipe_detail_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "ingredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "qty": { "type": "number", "minimum": 0 },
                        "unit": { "type": "string" },
                        "category": { "type": "string" }
                    },
                    "required": ["name", "qty", "unit"]
                }
            },
            "steps": {
                "type": "array",
                "items": { "type": "string" }
            },
            "prep_mins": { "type": "integer", "minimum": 0 },
            "cook_mins": { "type": "integer", "minimum": 0 }
        },
        "required": ["ingredients", "steps", "prep_mins", "cook_mins"]
    })
}

/// Returns the JSON schema for generated recipes
pub fn get_recipe_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "dish": { "type": "string" },
            "region": { "type": "string" },
            "dietType": {
                "type": "string",
                "enum": ["veg", "non_veg", "eggs_ok"]
            },
            "servings": { "type": "integer", "minimum": 1 },
            "recipe": get_recipe_detail_schema(),
            "notes": { "type": "string" }
        },
        "required": ["dish", "region", "dietType", "servings", "recipe"]
    })
}

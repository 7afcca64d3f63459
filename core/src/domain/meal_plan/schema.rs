use serde_json::json;

use crate::domain::{grocery::schema::get_grocery_item_schema, recipe::schema::get_recipe_detail_schema};

fn meal_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "serving_size": { "type": "integer", "minimum": 1 },
            "recipe": get_recipe_detail_schema()
        },
        "required": ["name", "serving_size", "recipe"]
    })
}

/// Returns the JSON schema for a family weekly meal plan
pub fn get_meal_plan_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "weekStart": { "type": "string", "format": "date" },
            "region": { "type": "string" },
            "dietType": {
                "type": "string",
                "enum": ["veg", "non_veg", "eggs_ok"]
            },
            "household": {
                "type": "object",
                "properties": {
                    "type": { "type": "string", "enum": ["single", "family"] },
                    "size": { "type": "integer", "minimum": 1 },
                    "members": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string" },
                                "dosha": {
                                    "type": "string",
                                    "enum": ["vata", "pitta", "kapha", "tridoshic"]
                                }
                            },
                            "required": ["name", "dosha"]
                        }
                    }
                },
                "required": ["type", "size", "members"]
            },
            "days": {
                "type": "array",
                "minItems": 7,
                "maxItems": 7,
                "items": {
                    "type": "object",
                    "properties": {
                        "date": { "type": "string", "format": "date" },
                        "breakfast": meal_schema(),
                        "lunch": meal_schema(),
                        "dinner": meal_schema(),
                        "notes": { "type": "string" }
                    },
                    "required": ["date", "breakfast", "lunch", "dinner"]
                }
            },
            "groceryList": {
                "type": "array",
                "items": get_grocery_item_schema()
            }
        },
        "required": ["weekStart", "region", "dietType", "household", "days", "groceryList"]
    })
}

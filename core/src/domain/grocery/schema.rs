use serde_json::json;

pub fn get_grocery_item_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "qty": { "type": "number", "minimum": 0 },
            "unit": { "type": "string" },
            "category": { "type": "string" }
        },
        "required": ["name", "qty", "unit"]
    })
}

/// Returns the JSON schema for weekly grocery lists
pub fn get_grocery_list_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "region": { "type": "string" },
            "dietType": {
                "type": "string",
                "enum": ["veg", "non_veg", "eggs_ok"]
            },
            "household": {
                "type": "object",
                "properties": {
                    "type": { "type": "string", "enum": ["single", "family"] },
                    "size": { "type": "integer", "minimum": 1 }
                },
                "required": ["type", "size"]
            },
            "items": {
                "type": "array",
                "items": get_grocery_item_schema()
            },
            "notes": { "type": "string" }
        },
        "required": ["region", "dietType", "household", "items"]
    })
}

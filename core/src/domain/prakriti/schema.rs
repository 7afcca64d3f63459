use serde_json::json;

const DOSHAS: [&str; 4] = ["vata", "pitta", "kapha", "tridoshic"];

/// Returns the JSON schema for prakriti assessments
pub fn get_prakriti_schema() -> serde_json::Value {
    let percentage = json!({ "type": "number", "minimum": 0, "maximum": 100 });
    let string_list = json!({ "type": "array", "items": { "type": "string" } });

    json!({
        "type": "object",
        "properties": {
            "primaryDosha": { "type": "string", "enum": DOSHAS },
            "secondaryDosha": { "type": "string", "enum": DOSHAS },
            "distribution": {
                "type": "object",
                "properties": {
                    "vata": percentage,
                    "pitta": percentage,
                    "kapha": percentage
                },
                "required": ["vata", "pitta", "kapha"]
            },
            "guidance": {
                "type": "object",
                "properties": {
                    "foods_to_favor": string_list,
                    "foods_to_avoid": string_list,
                    "lifestyle_tips": string_list
                },
                "required": ["foods_to_favor", "foods_to_avoid", "lifestyle_tips"]
            },
            "notes": { "type": "string" }
        },
        "required": ["primaryDosha", "distribution", "guidance"]
    })
}

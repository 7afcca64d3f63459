use serde_json::json;

/// Returns the JSON schema for grounded answers
pub fn get_grounded_answer_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "answer": { "type": "string" },
            "confidence": { "type": "number", "minimum": 0, "maximum": 1 },
            "citations": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "source": { "type": "string" },
                        "chunk_index": { "type": "integer" }
                    },
                    "required": ["source", "chunk_index"]
                }
            }
        },
        "required": ["answer", "confidence", "citations"]
    })
}

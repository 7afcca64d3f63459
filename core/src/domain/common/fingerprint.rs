//! Deterministic cache keys.
//!
//! A key is `<task>:<sha256 hex>` over the canonical JSON form of every
//! input that affects the generated output. Canonical form sorts object keys
//! recursively, so field insertion order never changes the key.

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::domain::{common::entities::app_errors::CoreError, llm::tasks::Task};

pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            let mut sorted = Map::new();
            for (key, value) in entries {
                sorted.insert(key, canonicalize(value));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

pub fn cache_key<T: Serialize>(task: Task, inputs: &T) -> Result<String, CoreError> {
    let value = serde_json::to_value(inputs).map_err(|e| {
        tracing::error!("Failed to serialize cache key inputs: {}", e);
        CoreError::InternalServerError
    })?;
    let blob = serde_json::to_vec(&canonicalize(value)).map_err(|e| {
        tracing::error!("Failed to encode cache key inputs: {}", e);
        CoreError::InternalServerError
    })?;

    Ok(format!(
        "{}:{}",
        task.as_str(),
        hex::encode(Sha256::digest(&blob))
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_ignores_field_insertion_order() {
        let mut first = Map::new();
        first.insert("region".to_string(), json!("south"));
        first.insert("diet".to_string(), json!("veg"));
        first.insert(
            "household".to_string(),
            json!({ "size": 2, "type": "family" }),
        );

        let mut second = Map::new();
        let mut household = Map::new();
        household.insert("type".to_string(), json!("family"));
        household.insert("size".to_string(), json!(2));
        second.insert("household".to_string(), Value::Object(household));
        second.insert("diet".to_string(), json!("veg"));
        second.insert("region".to_string(), json!("south"));

        let a = cache_key(Task::Grocery, &Value::Object(first)).unwrap();
        let b = cache_key(Task::Grocery, &Value::Object(second)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_is_prefixed_by_task() {
        let inputs = json!({ "dish": "poha" });
        let recipe = cache_key(Task::Recipe, &inputs).unwrap();
        let grocery = cache_key(Task::Grocery, &inputs).unwrap();

        assert!(recipe.starts_with("recipe:"));
        assert!(grocery.starts_with("grocery:"));
        assert_ne!(recipe, grocery);
        assert_eq!(recipe.len(), "recipe:".len() + 64);
    }

    #[test]
    fn test_key_changes_with_prompt_version() {
        let v1 = cache_key(Task::Recipe, &json!({ "dish": "poha", "pv": 1 })).unwrap();
        let v2 = cache_key(Task::Recipe, &json!({ "dish": "poha", "pv": 2 })).unwrap();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_array_order_is_significant() {
        let a = canonicalize(json!({ "m": ["a", "b"] }));
        let b = canonicalize(json!({ "m": ["b", "a"] }));
        assert_ne!(a, b);
    }
}

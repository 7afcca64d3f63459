use serde_json::Value;

use crate::domain::common::entities::app_errors::CoreError;

const GROCERY_CATEGORIES: &str = include_str!("../../../data/grocery_categories.json");

/// The static Indian market category list.
pub fn grocery_categories() -> Result<Value, CoreError> {
    serde_json::from_str(GROCERY_CATEGORIES).map_err(|e| {
        tracing::error!("Failed to parse grocery categories: {}", e);
        CoreError::InternalServerError
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_a_non_empty_string_list() {
        let categories = grocery_categories().unwrap();
        let list = categories.as_array().unwrap();
        assert!(!list.is_empty());
        assert!(list.iter().all(Value::is_string));
    }
}

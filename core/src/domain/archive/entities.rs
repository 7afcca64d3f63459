use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::common::generate_uuid_v7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveCollection {
    MealPlans,
    Recipes,
    GroceryLists,
}

impl ArchiveCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveCollection::MealPlans => "meal_plans",
            ArchiveCollection::Recipes => "recipes",
            ArchiveCollection::GroceryLists => "grocery_lists",
        }
    }
}

/// A generated document kept for history.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedDocument {
    pub id: Uuid,
    pub collection: ArchiveCollection,
    pub owner_id: Option<String>,
    pub document: Value,
    pub meta: Value,
    pub created_at: DateTime<Utc>,
}

impl ArchivedDocument {
    pub fn new(
        collection: ArchiveCollection,
        owner_id: Option<String>,
        document: Value,
        meta: Value,
    ) -> Self {
        Self {
            id: generate_uuid_v7(),
            collection,
            owner_id,
            document,
            meta,
            created_at: Utc::now(),
        }
    }
}

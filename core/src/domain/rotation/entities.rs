use chrono::{DateTime, NaiveDate, Utc};

/// Dish names served to a user during one week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationRecord {
    pub user_id: String,
    pub week_start: NaiveDate,
    pub dishes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Weeks in `[since, before)`, newest first, at most `limit` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationWindow {
    pub since: NaiveDate,
    pub before: NaiveDate,
    pub limit: u32,
}

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::domain::{
    common::VarietyConfig, meal_plan::variety::normalize_dish, rotation::entities::{RotationRecord, RotationWindow},
};

/// `None` when rotation looks back zero weeks.
pub fn rotation_window(week_start: NaiveDate, config: &VarietyConfig) -> Option<RotationWindow> {
    if config.rotation_weeks == 0 || config.rotation_max_weeks == 0 {
        return None;
    }

    Some(RotationWindow {
        since: week_start - Duration::weeks(i64::from(config.rotation_weeks)),
        before: week_start,
        limit: config.rotation_max_weeks,
    })
}

/// Normalized dish names across the records, newest record first, capped
/// at `max_dishes` distinct names.
pub fn recent_dish_set(mut records: Vec<RotationRecord>, max_dishes: usize) -> BTreeSet<String> {
    records.sort_by(|a, b| b.week_start.cmp(&a.week_start));

    let mut recent = BTreeSet::new();
    for dish in records.iter().flat_map(|record| record.dishes.iter()) {
        if recent.len() >= max_dishes {
            break;
        }
        let dish = normalize_dish(dish);
        if !dish.is_empty() {
            recent.insert(dish);
        }
    }

    recent
}

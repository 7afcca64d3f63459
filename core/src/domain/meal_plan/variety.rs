use std::collections::{BTreeSet, HashSet};

use crate::domain::{common::VarietyConfig, meal_plan::entities::WeeklyMealPlan};

/// Dish identity used for duplicate and rotation checks.
pub fn normalize_dish(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Every meal name in day order, breakfast then lunch then dinner.
pub fn collect_dish_names(plan: &WeeklyMealPlan) -> Vec<String> {
    plan.days
        .iter()
        .flat_map(|day| day.meals().map(|meal| meal.name.clone()))
        .collect()
}

/// Normalized names that occur more than once, sorted.
pub fn find_duplicates(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();

    for name in names {
        let key = normalize_dish(name);
        if !seen.insert(key.clone()) {
            duplicates.insert(key);
        }
    }

    duplicates.into_iter().collect()
}

/// Names (as given) whose normalized form is in `recent`.
pub fn filter_recent(names: &[String], recent: &BTreeSet<String>) -> Vec<String> {
    names
        .iter()
        .filter(|name| recent.contains(&normalize_dish(name)))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarietyReport {
    pub duplicates: Vec<String>,
    pub recent_matches: Vec<String>,
}

impl VarietyReport {
    pub fn inspect(plan: &WeeklyMealPlan, recent: &BTreeSet<String>) -> Self {
        let names = collect_dish_names(plan);

        Self {
            duplicates: find_duplicates(&names),
            recent_matches: filter_recent(&names, recent),
        }
    }

    /// Normalized dish names violating the enabled variety rules.
    pub fn violations(&self, config: &VarietyConfig) -> BTreeSet<String> {
        let mut violations = BTreeSet::new();

        if config.enforce_no_duplicates {
            violations.extend(self.duplicates.iter().cloned());
        }
        if config.enforce_rotation {
            violations.extend(self.recent_matches.iter().map(|name| normalize_dish(name)));
        }

        violations
    }
}

use std::collections::HashMap;

use crate::domain::{
    grocery::entities::GroceryItem, meal_plan::entities::WeeklyMealPlan,
    recipe::entities::Ingredient,
};

fn round_qty(qty: f64) -> f64 {
    (qty * 10_000.0).round() / 10_000.0
}

/// Sums every ingredient of the plan by normalized `(name, unit)`.
///
/// Quantities are rounded to four decimals, the first non-empty category
/// seen for a key wins, and the result is sorted by category (uncategorized
/// last) then name.
pub fn aggregate_from_plan(plan: &WeeklyMealPlan) -> Vec<GroceryItem> {
    aggregate_ingredients(
        plan.days
            .iter()
            .flat_map(|day| day.meals())
            .flat_map(|meal| meal.recipe.ingredients.iter()),
    )
}

pub fn aggregate_ingredients<'a>(ingredients: impl Iterator<Item = &'a Ingredient>) -> Vec<GroceryItem> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut items: Vec<GroceryItem> = Vec::new();

    for ingredient in ingredients {
        let key = (
            ingredient.name.trim().to_lowercase(),
            ingredient.unit.trim().to_lowercase(),
        );
        let category = ingredient
            .category
            .as_ref()
            .filter(|c| !c.trim().is_empty())
            .cloned();

        match index.get(&key) {
            Some(&position) => {
                let item = &mut items[position];
                item.qty += ingredient.qty;
                if item.category.is_none() {
                    item.category = category;
                }
            }
            None => {
                index.insert(key.clone(), items.len());
                items.push(GroceryItem {
                    name: key.0,
                    qty: ingredient.qty,
                    unit: key.1,
                    category,
                });
            }
        }
    }

    for item in &mut items {
        item.qty = round_qty(item.qty);
    }

    items.sort_by(|a, b| {
        (a.category.is_none(), &a.category, &a.name)
            .cmp(&(b.category.is_none(), &b.category, &b.name))
    });

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{ingredient, plan_with_dishes};

    #[test]
    fn test_sums_same_name_and_unit() {
        let ingredients = [ingredient("Rice", 200.0, "g", None), ingredient("rice ", 200.0, "G", None)];

        let items = aggregate_ingredients(ingredients.iter());

        assert_eq!(
            items,
            vec![GroceryItem {
                name: "rice".to_string(),
                qty: 400.0,
                unit: "g".to_string(),
                category: None,
            }]
        );
    }

    #[test]
    fn test_different_units_stay_separate() {
        let ingredients = [ingredient("Milk", 500.0, "ml", None), ingredient("Milk", 1.0, "L", None)];
        assert_eq!(aggregate_ingredients(ingredients.iter()).len(), 2);
    }

    #[test]
    fn test_first_non_empty_category_is_kept() {
        let ingredients = [
            ingredient("Onion", 1.0, "pcs", Some("")),
            ingredient("onion", 2.0, "pcs", Some("Vegetables")),
            ingredient("ONION", 1.0, "pcs", Some("Produce")),
        ];

        let items = aggregate_ingredients(ingredients.iter());

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].qty, 4.0);
        assert_eq!(items[0].category.as_deref(), Some("Vegetables"));
    }

    #[test]
    fn test_sorted_by_category_with_uncategorized_last() {
        let ingredients = [
            ingredient("salt", 5.0, "g", None),
            ingredient("tomato", 2.0, "pcs", Some("Vegetables")),
            ingredient("ghee", 10.0, "g", Some("Dairy")),
            ingredient("carrot", 1.0, "pcs", Some("Vegetables")),
        ];

        let names: Vec<String> = aggregate_ingredients(ingredients.iter())
            .into_iter()
            .map(|item| item.name)
            .collect();

        assert_eq!(names, vec!["ghee", "carrot", "tomato", "salt"]);
    }

    #[test]
    fn test_quantities_rounded_to_four_decimals() {
        let ingredients = [
            ingredient("cumin", 0.1, "g", None),
            ingredient("cumin", 0.2, "g", None),
        ];
        assert_eq!(aggregate_ingredients(ingredients.iter())[0].qty, 0.3);
    }

    #[test]
    fn test_order_independent_and_idempotent() {
        let forward = [
            ingredient("Dal", 100.0, "g", Some("Pulses & Lentils")),
            ingredient("rice", 150.0, "g", Some("Grains & Cereals")),
            ingredient("dal", 50.0, "g", None),
        ];
        let backward: Vec<Ingredient> = forward.iter().rev().cloned().collect();

        let first = aggregate_ingredients(forward.iter());
        assert_eq!(first, aggregate_ingredients(backward.iter()));

        let as_ingredients: Vec<Ingredient> = first
            .iter()
            .map(|item| ingredient(&item.name, item.qty, &item.unit, item.category.as_deref()))
            .collect();
        assert_eq!(first, aggregate_ingredients(as_ingredients.iter()));
    }

    #[test]
    fn test_aggregate_from_plan_covers_every_meal() {
        let plan = plan_with_dishes(|day, meal| format!("dish-{}-{}", day, meal));

        let items = aggregate_from_plan(&plan);

        // each of the 21 meals uses 100 g rice
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].qty, 2100.0);
    }
}

//! Actual-intake portion estimation
//!
//! The inverse of plan synthesis: converts logged food quantities back into
//! estimated exchange portions per group, using each group's dominant macro
//! rather than a uniform calorie estimate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{
    exchange_standard, CartItem, Category, DailyRecord, FoodGroup, MealTime, NutrientRecord,
    PortionMatrix,
};

/// Estimated portion totals per exchange group, zero-filled
pub type PortionTotals = BTreeMap<FoodGroup, f64>;

/// Map a catalog category to its exchange-accounting group.
///
/// Coarser than the catalog classifier and kept separate from it: this
/// decides which exchange standard a logged item is counted against.
/// Protein-category foods split on fat content (above 5 g/100g counts as
/// medium-fat meat), dairy always counts as medium-fat, and anything
/// unmatched falls back to the fat group.
pub fn exchange_group_for(food: &NutrientRecord) -> FoodGroup {
    match food.category {
        Category::Grain => FoodGroup::Starch,
        Category::Vegetable => FoodGroup::Veg,
        Category::Fruit => FoodGroup::Fruit,
        Category::Seafood => FoodGroup::MeatLow,
        Category::Protein => {
            if food.f > 5.0 {
                FoodGroup::MeatMed
            } else {
                FoodGroup::MeatLow
            }
        }
        Category::Dairy => FoodGroup::DairyMed,
        Category::FatOther => FoodGroup::Fat,
    }
}

/// Portion contribution of one logged item within its group.
///
/// Starch and fruit derive portions from carbs, meat and dairy from
/// protein, fat and nut from fat. Vegetables pass the raw quantity through
/// (1 unit = 1 vegetable portion).
fn portion_count(item: &CartItem, group: FoodGroup) -> f64 {
    let std = exchange_standard(group);
    match group {
        FoodGroup::Starch | FoodGroup::Fruit => item.food.c * item.quantity / std.c,
        FoodGroup::Veg => item.quantity,
        FoodGroup::MeatLow | FoodGroup::MeatMed | FoodGroup::DairyLow | FoodGroup::DairyMed => {
            item.food.p * item.quantity / std.p
        }
        FoodGroup::Fat | FoodGroup::Nut => item.food.f * item.quantity / std.f,
    }
}

/// Estimate exchange portions consumed per group for a list of logged items
pub fn estimate_portions(items: &[CartItem]) -> PortionTotals {
    let mut totals: PortionTotals = FoodGroup::ALL.iter().map(|g| (*g, 0.0)).collect();

    for item in items {
        let group = exchange_group_for(&item.food);
        *totals.entry(group).or_insert(0.0) += portion_count(item, group);
    }

    totals
}

/// Meal-resolved variant: estimate each meal slot independently and merge
/// into a group x meal matrix matching the diet plan's shape.
pub fn estimate_portion_matrix(record: &DailyRecord) -> PortionMatrix {
    let mut matrix = PortionMatrix::default();

    for meal in MealTime::ALL {
        let totals = estimate_portions(record.items(meal));
        for (group, portions) in totals {
            matrix.set(group, meal, portions);
        }
    }

    matrix
}

/// Deviation of an actual cell against its planned value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deviation {
    /// Both planned and actual are exactly zero
    NoData,
    /// |actual - planned| < 0.3 (exclusive boundary)
    OnTarget,
    /// actual - planned > 1
    Over,
    /// actual - planned < -1
    Under,
    /// Between the on-target and over/under bands
    Neutral,
}

/// Classify an actual-vs-planned portion pair for display
pub fn classify_deviation(planned: f64, actual: f64) -> Deviation {
    if planned == 0.0 && actual == 0.0 {
        return Deviation::NoData;
    }
    let diff = actual - planned;
    if diff.abs() < 0.3 {
        Deviation::OnTarget
    } else if diff > 1.0 {
        Deviation::Over
    } else if diff < -1.0 {
        Deviation::Under
    } else {
        Deviation::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: Category, cal: f64, p: f64, f: f64, c: f64, quantity: f64) -> CartItem {
        CartItem::new(
            NutrientRecord::with_macros("t", "測試", category, cal, p, f, c),
            quantity,
        )
    }

    #[test]
    fn test_starch_portions_from_carbs() {
        // carb 30 g/100g at 1.5 units: 30*1.5/15 = 3.0 portions
        let items = vec![item(Category::Grain, 150.0, 3.0, 0.5, 30.0, 1.5)];
        let totals = estimate_portions(&items);
        assert!((totals[&FoodGroup::Starch] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_vegetable_quantity_passthrough() {
        // macros do not matter for vegetables, only units
        let items = vec![item(Category::Vegetable, 90.0, 4.0, 1.0, 18.0, 2.0)];
        let totals = estimate_portions(&items);
        assert_eq!(totals[&FoodGroup::Veg], 2.0);
    }

    #[test]
    fn test_protein_category_splits_on_fat() {
        let lean = item(Category::Protein, 120.0, 21.0, 4.0, 0.0, 1.0);
        assert_eq!(exchange_group_for(&lean.food), FoodGroup::MeatLow);
        // 21 g protein / 7 = 3 low-fat meat portions
        let totals = estimate_portions(&[lean]);
        assert!((totals[&FoodGroup::MeatLow] - 3.0).abs() < 1e-9);

        let fatty = item(Category::Protein, 250.0, 14.0, 18.0, 0.0, 1.0);
        assert_eq!(exchange_group_for(&fatty.food), FoodGroup::MeatMed);
        let totals = estimate_portions(&[fatty]);
        assert!((totals[&FoodGroup::MeatMed] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_seafood_counts_as_low_fat_meat() {
        let shrimp = item(Category::Seafood, 100.0, 21.0, 1.0, 0.0, 0.5);
        assert_eq!(exchange_group_for(&shrimp.food), FoodGroup::MeatLow);
        let totals = estimate_portions(&[shrimp]);
        assert!((totals[&FoodGroup::MeatLow] - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_dairy_uses_protein_against_medium_standard() {
        let milk = item(Category::Dairy, 63.0, 3.0, 3.6, 4.8, 2.6);
        let totals = estimate_portions(&[milk]);
        // 3.0 * 2.6 / 8 = 0.975
        assert!((totals[&FoodGroup::DairyMed] - 0.975).abs() < 1e-9);
    }

    #[test]
    fn test_fat_fallback_uses_fat_macro() {
        let oil = item(Category::FatOther, 884.0, 0.0, 100.0, 0.0, 0.05);
        let totals = estimate_portions(&[oil]);
        // 100 * 0.05 / 5 = 1.0 fat portion
        assert!((totals[&FoodGroup::Fat] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrepresented_groups_zero_filled() {
        let totals = estimate_portions(&[]);
        assert_eq!(totals.len(), 9);
        assert!(totals.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_matrix_buckets_per_meal() {
        let mut record = DailyRecord::new();
        record.add_items(
            MealTime::Breakfast,
            vec![item(Category::Grain, 150.0, 3.0, 0.5, 30.0, 1.0)],
        );
        record.add_items(
            MealTime::Dinner,
            vec![item(Category::Vegetable, 25.0, 1.0, 0.0, 5.0, 1.5)],
        );

        let matrix = estimate_portion_matrix(&record);
        assert!((matrix.get(FoodGroup::Starch, MealTime::Breakfast) - 2.0).abs() < 1e-9);
        assert_eq!(matrix.get(FoodGroup::Starch, MealTime::Dinner), 0.0);
        assert_eq!(matrix.get(FoodGroup::Veg, MealTime::Dinner), 1.5);
    }

    #[test]
    fn test_deviation_boundaries() {
        assert_eq!(classify_deviation(0.0, 0.0), Deviation::NoData);
        assert_eq!(classify_deviation(2.0, 2.29), Deviation::OnTarget);
        // the 0.3 boundary is exclusive
        assert_eq!(classify_deviation(2.0, 2.3), Deviation::Neutral);
        assert_eq!(classify_deviation(2.0, 3.0), Deviation::Neutral);
        assert_eq!(classify_deviation(2.0, 3.01), Deviation::Over);
        assert_eq!(classify_deviation(2.0, 1.0), Deviation::Neutral);
        assert_eq!(classify_deviation(2.0, 0.9), Deviation::Under);
        // planned zero with any intake is not "no data"
        assert_eq!(classify_deviation(0.0, 0.1), Deviation::OnTarget);
    }
}

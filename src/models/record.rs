//! Daily record model
//!
//! The actual food log: one ordered item list per meal slot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CartItem, MacroTotals, MealTime};

/// Logged intake for one day, bucketed by meal slot
///
/// Item order within a meal is insertion order (the chronological logging
/// order), which display and removal-by-index both rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyRecord {
    meals: BTreeMap<MealTime, Vec<CartItem>>,
}

impl Default for DailyRecord {
    fn default() -> Self {
        let mut meals = BTreeMap::new();
        for meal in MealTime::ALL {
            meals.insert(meal, Vec::new());
        }
        Self { meals }
    }
}

impl DailyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items logged for one meal slot
    pub fn items(&self, meal: MealTime) -> &[CartItem] {
        self.meals.get(&meal).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append logged items to a meal slot
    pub fn add_items(&mut self, meal: MealTime, items: Vec<CartItem>) {
        self.meals.entry(meal).or_default().extend(items);
    }

    /// Remove one item by position within its meal; out-of-range is a no-op
    pub fn remove_at(&mut self, meal: MealTime, index: usize) {
        if let Some(list) = self.meals.get_mut(&meal) {
            if index < list.len() {
                list.remove(index);
            }
        }
    }

    /// All logged items flattened in meal order
    pub fn all_items(&self) -> impl Iterator<Item = &CartItem> {
        MealTime::ALL
            .into_iter()
            .flat_map(move |meal| self.items(meal).iter())
    }

    /// Raw macro totals across every meal (quantity-weighted sums)
    pub fn macro_totals(&self) -> MacroTotals {
        self.all_items().map(|i| i.macro_total()).sum()
    }

    /// Total amount of any nutrient across every meal
    pub fn nutrient_total(&self, key: &str) -> f64 {
        self.all_items().map(|i| i.nutrient_total(key)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.values().all(|list| list.is_empty())
    }

    pub fn clear(&mut self) {
        for list in self.meals.values_mut() {
            list.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NutrientRecord};

    fn item(id: &str, cal: f64, quantity: f64) -> CartItem {
        CartItem::new(
            NutrientRecord::with_macros(id, id, Category::Grain, cal, 2.0, 1.0, 10.0),
            quantity,
        )
    }

    #[test]
    fn test_all_slots_start_empty() {
        let record = DailyRecord::new();
        assert!(record.is_empty());
        for meal in MealTime::ALL {
            assert!(record.items(meal).is_empty());
        }
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut record = DailyRecord::new();
        record.add_items(MealTime::Lunch, vec![item("a", 100.0, 1.0)]);
        record.add_items(MealTime::Lunch, vec![item("b", 50.0, 1.0), item("c", 70.0, 1.0)]);
        let ids: Vec<&str> = record
            .items(MealTime::Lunch)
            .iter()
            .map(|i| i.food.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_at_index() {
        let mut record = DailyRecord::new();
        record.add_items(
            MealTime::Dinner,
            vec![item("a", 100.0, 1.0), item("b", 50.0, 1.0)],
        );
        record.remove_at(MealTime::Dinner, 0);
        assert_eq!(record.items(MealTime::Dinner).len(), 1);
        assert_eq!(record.items(MealTime::Dinner)[0].food.id, "b");
        // out of range does nothing
        record.remove_at(MealTime::Dinner, 5);
        assert_eq!(record.items(MealTime::Dinner).len(), 1);
    }

    #[test]
    fn test_macro_totals_span_meals() {
        let mut record = DailyRecord::new();
        record.add_items(MealTime::Breakfast, vec![item("a", 100.0, 2.0)]);
        record.add_items(MealTime::EveningSnack, vec![item("b", 60.0, 0.5)]);
        let totals = record.macro_totals();
        assert_eq!(totals.cal, 230.0);
        assert_eq!(totals.p, 5.0);
    }

    #[test]
    fn test_all_items_meal_order() {
        let mut record = DailyRecord::new();
        record.add_items(MealTime::Dinner, vec![item("late", 10.0, 1.0)]);
        record.add_items(MealTime::Breakfast, vec![item("early", 10.0, 1.0)]);
        let ids: Vec<&str> = record.all_items().map(|i| i.food.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }
}

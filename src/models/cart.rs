//! Cart model
//!
//! A staged or logged food item with a quantity, where 1.0 unit equals
//! 100 g edible portion (or one label serving).

use serde::{Deserialize, Serialize};

use super::{MacroTotals, NutrientRecord};

/// Minimum quantity reachable through increment/decrement
const MIN_ADJUST_QUANTITY: f64 = 0.1;

/// A food item plus a quantity in 100 g units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub food: NutrientRecord,
    pub quantity: f64,
}

impl CartItem {
    pub fn new(food: NutrientRecord, quantity: f64) -> Self {
        Self { food, quantity }
    }

    /// Total macros consumed for this item (per-100g values x quantity)
    pub fn macro_total(&self) -> MacroTotals {
        self.food.macros().scale(self.quantity)
    }

    /// Total amount of any nutrient for this item
    pub fn nutrient_total(&self, key: &str) -> f64 {
        self.food.nutrient(key) * self.quantity
    }

    /// Quantity expressed in grams for display
    pub fn grams(&self) -> f64 {
        (self.quantity * 100.0).round()
    }
}

/// Staging list of selected foods, keyed by food id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Add a food with the given quantity; a food already in the cart has
    /// its quantity increased instead of appearing twice.
    pub fn add(&mut self, food: NutrientRecord, quantity: f64) {
        if !quantity.is_finite() || quantity <= 0.0 {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.food.id == food.id) {
            item.quantity += quantity;
        } else {
            self.items.push(CartItem::new(food, quantity));
        }
    }

    /// Increment or decrement a quantity; the result never drops below 0.1
    pub fn adjust_quantity(&mut self, id: &str, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.food.id == id) {
            item.quantity = (item.quantity + delta).max(MIN_ADJUST_QUANTITY);
        }
    }

    /// Set a quantity directly; clamps to 0. An explicit 0 keeps the item
    /// in the cart, removal is a separate action.
    pub fn set_quantity(&mut self, id: &str, quantity: f64) {
        if !quantity.is_finite() {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.food.id == id) {
            item.quantity = quantity.max(0.0);
        }
    }

    /// Set a quantity from a gram entry (1 unit = 100 g)
    pub fn set_grams(&mut self, id: &str, grams: f64) {
        self.set_quantity(id, grams / 100.0);
    }

    /// Remove an item by food id
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|i| i.food.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drain the staged items out of the cart (logging them to a meal)
    pub fn take_items(&mut self) -> Vec<CartItem> {
        std::mem::take(&mut self.items)
    }

    /// Summed macros across all staged items
    pub fn totals(&self) -> MacroTotals {
        self.items.iter().map(|i| i.macro_total()).sum()
    }

    /// Summed amount of any nutrient across all staged items
    pub fn nutrient_total(&self, key: &str) -> f64 {
        self.items.iter().map(|i| i.nutrient_total(key)).sum()
    }
}

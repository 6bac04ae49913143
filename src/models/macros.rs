//! Shared macronutrient totals structure
//!
//! Used across cart items, daily records, and case summaries.

use serde::{Deserialize, Serialize};

/// Aggregate calories and macronutrients
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub cal: f64, // kcal
    pub p: f64,   // protein, grams
    pub f: f64,   // fat, grams
    pub c: f64,   // carbohydrate, grams
}

impl MacroTotals {
    /// Create a new MacroTotals with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale totals by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            cal: self.cal * multiplier,
            p: self.p * multiplier,
            f: self.f * multiplier,
            c: self.c * multiplier,
        }
    }

    /// Add another set of totals to this one
    pub fn add(&self, other: &MacroTotals) -> Self {
        Self {
            cal: self.cal + other.cal,
            p: self.p + other.p,
            f: self.f + other.f,
            c: self.c + other.c,
        }
    }
}

impl std::ops::Add for MacroTotals {
    type Output = MacroTotals;

    fn add(self, other: MacroTotals) -> MacroTotals {
        MacroTotals::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for MacroTotals {
    type Output = MacroTotals;

    fn mul(self, multiplier: f64) -> MacroTotals {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for MacroTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MacroTotals::zero(), |acc, m| acc + m)
    }
}

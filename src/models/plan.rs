//! Exchange-list plan model
//!
//! Food-exchange groups, meal slots, per-portion standards, and the
//! portions-by-group-by-meal diet plan.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::nutrition::plan_calc::synthesize_targets;

/// One of the 9 fine-grained exchange subgroups
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FoodGroup {
    Starch,
    MeatLow,
    MeatMed,
    DairyLow,
    DairyMed,
    Veg,
    Fruit,
    Fat,
    Nut,
}

impl FoodGroup {
    /// All groups in fixed display order
    pub const ALL: [FoodGroup; 9] = [
        FoodGroup::Starch,
        FoodGroup::MeatLow,
        FoodGroup::MeatMed,
        FoodGroup::DairyLow,
        FoodGroup::DairyMed,
        FoodGroup::Veg,
        FoodGroup::Fruit,
        FoodGroup::Fat,
        FoodGroup::Nut,
    ];

    /// Traditional-Chinese display label
    pub fn label(&self) -> &'static str {
        match self {
            FoodGroup::Starch => "全榖雜糧類",
            FoodGroup::MeatLow => "豆魚蛋肉(低脂)",
            FoodGroup::MeatMed => "豆魚蛋肉(中脂)",
            FoodGroup::DairyLow => "乳品類(低脂)",
            FoodGroup::DairyMed => "乳品類(中脂)",
            FoodGroup::Veg => "蔬菜類",
            FoodGroup::Fruit => "水果類",
            FoodGroup::Fat => "油脂類",
            FoodGroup::Nut => "堅果種子類",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodGroup::Starch => "starch",
            FoodGroup::MeatLow => "meat_low",
            FoodGroup::MeatMed => "meat_med",
            FoodGroup::DairyLow => "dairy_low",
            FoodGroup::DairyMed => "dairy_med",
            FoodGroup::Veg => "veg",
            FoodGroup::Fruit => "fruit",
            FoodGroup::Fat => "fat",
            FoodGroup::Nut => "nut",
        }
    }
}

/// One of the 6 fixed daily meal slots
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MealTime {
    Breakfast,
    MorningSnack,
    Lunch,
    AfternoonSnack,
    Dinner,
    EveningSnack,
}

impl MealTime {
    /// All meal slots in chronological order
    pub const ALL: [MealTime; 6] = [
        MealTime::Breakfast,
        MealTime::MorningSnack,
        MealTime::Lunch,
        MealTime::AfternoonSnack,
        MealTime::Dinner,
        MealTime::EveningSnack,
    ];

    /// Traditional-Chinese display label
    pub fn label(&self) -> &'static str {
        match self {
            MealTime::Breakfast => "早餐",
            MealTime::MorningSnack => "早點",
            MealTime::Lunch => "午餐",
            MealTime::AfternoonSnack => "午點",
            MealTime::Dinner => "晚餐",
            MealTime::EveningSnack => "晚點",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealTime::Breakfast => "breakfast",
            MealTime::MorningSnack => "morning_snack",
            MealTime::Lunch => "lunch",
            MealTime::AfternoonSnack => "afternoon_snack",
            MealTime::Dinner => "dinner",
            MealTime::EveningSnack => "evening_snack",
        }
    }
}

/// Per-portion macro and energy content of one exchange group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeStandard {
    pub p: f64,   // grams protein per portion
    pub f: f64,   // grams fat per portion
    pub c: f64,   // grams carbohydrate per portion
    pub cal: f64, // kcal per portion
}

/// Fixed exchange-standards table (not configurable at runtime)
pub const fn exchange_standard(group: FoodGroup) -> ExchangeStandard {
    match group {
        FoodGroup::Starch => ExchangeStandard { p: 2.0, f: 0.0, c: 15.0, cal: 70.0 },
        FoodGroup::MeatLow => ExchangeStandard { p: 7.0, f: 3.0, c: 0.0, cal: 55.0 },
        FoodGroup::MeatMed => ExchangeStandard { p: 7.0, f: 5.0, c: 0.0, cal: 75.0 },
        FoodGroup::DairyLow => ExchangeStandard { p: 8.0, f: 4.0, c: 12.0, cal: 120.0 },
        FoodGroup::DairyMed => ExchangeStandard { p: 8.0, f: 8.0, c: 12.0, cal: 150.0 },
        FoodGroup::Veg => ExchangeStandard { p: 1.0, f: 0.0, c: 5.0, cal: 25.0 },
        FoodGroup::Fruit => ExchangeStandard { p: 0.0, f: 0.0, c: 15.0, cal: 60.0 },
        FoodGroup::Fat => ExchangeStandard { p: 0.0, f: 5.0, c: 0.0, cal: 45.0 },
        FoodGroup::Nut => ExchangeStandard { p: 0.0, f: 5.0, c: 0.0, cal: 45.0 },
    }
}

/// Fully-enumerated 9x6 grid of portion counts
///
/// Every (group, meal) cell exists from construction, defaulting to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortionMatrix {
    cells: BTreeMap<FoodGroup, BTreeMap<MealTime, f64>>,
}

impl Default for PortionMatrix {
    fn default() -> Self {
        let mut cells = BTreeMap::new();
        for group in FoodGroup::ALL {
            let mut row = BTreeMap::new();
            for meal in MealTime::ALL {
                row.insert(meal, 0.0);
            }
            cells.insert(group, row);
        }
        Self { cells }
    }
}

impl PortionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, group: FoodGroup, meal: MealTime) -> f64 {
        self.cells
            .get(&group)
            .and_then(|row| row.get(&meal))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, group: FoodGroup, meal: MealTime, portions: f64) {
        self.cells.entry(group).or_default().insert(meal, portions);
    }

    /// Add to an existing cell
    pub fn add(&mut self, group: FoodGroup, meal: MealTime, portions: f64) {
        let current = self.get(group, meal);
        self.set(group, meal, current + portions);
    }

    /// Sum of a group's portions across all meal slots
    pub fn group_total(&self, group: FoodGroup) -> f64 {
        MealTime::ALL.iter().map(|m| self.get(group, *m)).sum()
    }
}

/// The dietitian's allocated daily plan
///
/// The four target fields are always the synthesized sum over the portions
/// matrix; they are recomputed from scratch on every cell edit and must not
/// be set directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    pub target_calories: f64,
    pub target_p: f64,
    pub target_f: f64,
    pub target_c: f64,
    pub portions: PortionMatrix,
}

impl Default for DietPlan {
    fn default() -> Self {
        Self {
            target_calories: 0.0,
            target_p: 0.0,
            target_f: 0.0,
            target_c: 0.0,
            portions: PortionMatrix::default(),
        }
    }
}

impl DietPlan {
    /// Edit one cell and recompute all four targets from the whole matrix
    pub fn set_portion(&mut self, group: FoodGroup, meal: MealTime, portions: f64) {
        self.portions.set(group, meal, portions);
        self.resynthesize();
    }

    /// Recompute the target fields from the current portions matrix
    pub fn resynthesize(&mut self) {
        let targets = synthesize_targets(&self.portions);
        self.target_calories = targets.cal;
        self.target_p = targets.p;
        self.target_f = targets.f;
        self.target_c = targets.c;
    }

    /// Macro energy split as rounded percentages (P, F, C) of target kcal.
    /// All zeros when target kcal is zero.
    pub fn macro_ratios(&self) -> (i64, i64, i64) {
        if self.target_calories <= 0.0 {
            return (0, 0, 0);
        }
        let pct = |kcal: f64| (kcal / self.target_calories * 100.0).round() as i64;
        (
            pct(self.target_p * 4.0),
            pct(self.target_f * 9.0),
            pct(self.target_c * 4.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_fully_enumerated_at_construction() {
        let matrix = PortionMatrix::default();
        for group in FoodGroup::ALL {
            for meal in MealTime::ALL {
                assert_eq!(matrix.get(group, meal), 0.0);
            }
        }
    }

    #[test]
    fn test_group_total_sums_meals() {
        let mut matrix = PortionMatrix::default();
        matrix.set(FoodGroup::Starch, MealTime::Breakfast, 2.0);
        matrix.set(FoodGroup::Starch, MealTime::Lunch, 2.5);
        matrix.set(FoodGroup::Starch, MealTime::Dinner, 1.5);
        assert_eq!(matrix.group_total(FoodGroup::Starch), 6.0);
        assert_eq!(matrix.group_total(FoodGroup::Veg), 0.0);
    }

    #[test]
    fn test_exchange_standards_table() {
        let starch = exchange_standard(FoodGroup::Starch);
        assert_eq!((starch.p, starch.f, starch.c, starch.cal), (2.0, 0.0, 15.0, 70.0));
        let dairy = exchange_standard(FoodGroup::DairyMed);
        assert_eq!((dairy.p, dairy.f, dairy.c, dairy.cal), (8.0, 8.0, 12.0, 150.0));
        // fat and nut share the same standard
        assert_eq!(
            exchange_standard(FoodGroup::Fat),
            exchange_standard(FoodGroup::Nut)
        );
    }

    #[test]
    fn test_macro_ratios_zero_guard() {
        let plan = DietPlan::default();
        assert_eq!(plan.macro_ratios(), (0, 0, 0));
    }

    #[test]
    fn test_matrix_serde_round_trip() {
        let mut matrix = PortionMatrix::default();
        matrix.set(FoodGroup::Fruit, MealTime::AfternoonSnack, 1.5);
        let json = serde_json::to_string(&matrix).unwrap();
        assert!(json.contains("\"fruit\""));
        assert!(json.contains("\"afternoon_snack\""));
        let back: PortionMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, matrix);
    }
}

//! Consultation session
//!
//! The single mutable state of a running consultation: the loaded food
//! catalog, the patient profile with its derived energy budget, the
//! exchange-plan grid, the intake log, and the saved-case history backed
//! by SQLite. Everything downstream reads from here.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{normalize_rows, RawRow};
use crate::db::{migrations, Database, DbResult};
use crate::models::{
    CartItem, CaseRecord, Category, DailyRecord, DietPlan, FoodGroup, MealTime, NutrientRecord,
    UserProfile,
};
use crate::nutrition::{classify_deviation, estimate_portion_matrix, tdee, Deviation};

/// Starting energy budget before a usable profile exists
pub const DEFAULT_TDEE: i64 = 2000;

/// One flattened intake-log line for tabular export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRow {
    pub meal: &'static str,
    pub name: String,
    pub quantity: f64,
    pub grams: f64,
    pub cal: f64,
    pub p: f64,
    pub f: f64,
    pub c: f64,
}

pub struct Session {
    catalog: Vec<NutrientRecord>,
    extra_foods: Vec<NutrientRecord>,
    pub is_loading: bool,
    pub profile: UserProfile,
    pub tdee: i64,
    pub plan: DietPlan,
    pub record: DailyRecord,
    saved_cases: Vec<CaseRecord>,
    db: Database,
}

impl Session {
    /// Start a session over the given database, running migrations and
    /// loading the saved-case history.
    pub fn new(db: Database) -> DbResult<Self> {
        db.with_conn(migrations::run_migrations)?;
        let saved_cases = db.with_conn(CaseRecord::list)?;
        info!(cases = saved_cases.len(), "session started");

        Ok(Self {
            catalog: Vec::new(),
            extra_foods: Vec::new(),
            is_loading: true,
            profile: UserProfile::default(),
            tdee: DEFAULT_TDEE,
            plan: DietPlan::default(),
            record: DailyRecord::default(),
            saved_cases,
            db,
        })
    }

    /// Replace the base catalog (clears the loading flag)
    pub fn set_catalog(&mut self, foods: Vec<NutrientRecord>) {
        info!(count = foods.len(), "catalog set");
        self.catalog = foods;
        self.is_loading = false;
    }

    /// Normalize raw imported rows and prepend them to the food pool.
    ///
    /// Imported ids carry the import timestamp so successive imports never
    /// collide with each other or with the base catalog. Returns the number
    /// of foods that survived normalization.
    pub fn import_foods(&mut self, rows: &[RawRow], now_ms: i64) -> usize {
        let prefix = format!("imported_{}", now_ms);
        let mut foods = normalize_rows(rows, &prefix);
        let count = foods.len();
        if count < rows.len() {
            warn!(
                dropped = rows.len() - count,
                "import skipped rows without a name or calories"
            );
        }
        foods.extend(std::mem::take(&mut self.extra_foods));
        self.extra_foods = foods;
        count
    }

    /// All searchable foods, imported ones first
    pub fn all_foods(&self) -> impl Iterator<Item = &NutrientRecord> {
        self.extra_foods.iter().chain(self.catalog.iter())
    }

    pub fn find_food(&self, id: &str) -> Option<&NutrientRecord> {
        self.all_foods().find(|food| food.id == id)
    }

    /// Case-insensitive name/alias search over the whole pool
    pub fn search_foods(&self, query: &str) -> Vec<&NutrientRecord> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        self.all_foods()
            .filter(|food| food.matches_query(query))
            .collect()
    }

    pub fn foods_in_category(&self, category: Category) -> Vec<&NutrientRecord> {
        self.all_foods()
            .filter(|food| food.category == category)
            .collect()
    }

    /// Update the patient profile and recompute the energy budget.
    ///
    /// When the profile is too incomplete to evaluate (any of height,
    /// weight or age still zero) the previous budget is kept rather than
    /// collapsing to zero.
    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = profile;
        let computed = tdee(&self.profile);
        if computed > 0 {
            self.tdee = computed;
        }
    }

    /// Edit one plan cell; targets are resynthesized inside the plan
    pub fn set_portion(&mut self, group: FoodGroup, meal: MealTime, portions: f64) {
        self.plan.set_portion(group, meal, portions);
    }

    /// Move items into the intake log under the given meal
    pub fn add_to_log(&mut self, meal: MealTime, items: Vec<CartItem>) {
        self.record.add_items(meal, items);
    }

    pub fn remove_from_log(&mut self, meal: MealTime, index: usize) {
        self.record.remove_at(meal, index);
    }

    /// Planned vs estimated-actual portion deviation per exchange group
    pub fn group_deviations(&self) -> BTreeMap<FoodGroup, Deviation> {
        let actual = estimate_portion_matrix(&self.record);
        FoodGroup::ALL
            .iter()
            .map(|group| {
                (
                    *group,
                    classify_deviation(
                        self.plan.portions.group_total(*group),
                        actual.group_total(*group),
                    ),
                )
            })
            .collect()
    }

    pub fn saved_cases(&self) -> &[CaseRecord] {
        &self.saved_cases
    }

    /// Snapshot the current state as a case, persist it, and prepend it
    /// to the in-memory history
    pub fn save_case(&mut self, now_ms: i64) -> DbResult<&CaseRecord> {
        let case = CaseRecord::build(&self.profile, &self.plan, &self.record, now_ms);
        self.db.with_conn(|conn| case.insert(conn))?;
        info!(id = %case.id, "case saved");
        self.saved_cases.insert(0, case);
        Ok(&self.saved_cases[0])
    }

    pub fn delete_case(&mut self, id: &str) -> DbResult<bool> {
        let deleted = self.db.with_conn(|conn| CaseRecord::delete(conn, id))?;
        if deleted {
            self.saved_cases.retain(|case| case.id != id);
            info!(id, "case deleted");
        }
        Ok(deleted)
    }

    /// Restore a saved case into the working state.
    ///
    /// The case itself stays untouched in the history; the session gets
    /// clones, and the energy budget is recomputed from the restored
    /// profile. Returns false when the id is unknown.
    pub fn load_case(&mut self, id: &str) -> bool {
        let Some(case) = self.saved_cases.iter().find(|case| case.id == id) else {
            return false;
        };
        self.profile = case.profile.clone();
        self.plan = case.plan.clone();
        self.record = case.record.clone();
        let computed = tdee(&self.profile);
        self.tdee = if computed > 0 { computed } else { DEFAULT_TDEE };
        info!(id, "case loaded");
        true
    }

    /// Persist a prebuilt case only when the store is empty.
    ///
    /// Used for first-run demo seeding; a store with any history is left
    /// alone. Returns whether the case was inserted.
    pub fn seed_demo_if_empty(&mut self, case: CaseRecord) -> DbResult<bool> {
        if !self.saved_cases.is_empty() {
            return Ok(false);
        }
        self.db.with_conn(|conn| case.insert(conn))?;
        info!(id = %case.id, "demo case seeded");
        self.saved_cases.push(case);
        Ok(true)
    }

    /// Flatten the intake log for tabular export, in meal order
    pub fn export_log_rows(&self) -> Vec<LogRow> {
        let mut rows = Vec::new();
        for meal in MealTime::ALL {
            for item in self.record.items(meal) {
                let totals = item.macro_total();
                rows.push(LogRow {
                    meal: meal.label(),
                    name: item.food.name.clone(),
                    quantity: item.quantity,
                    grams: item.grams(),
                    cal: totals.cal,
                    p: totals.p,
                    f: totals.f,
                    c: totals.c,
                });
            }
        }
        rows
    }
}

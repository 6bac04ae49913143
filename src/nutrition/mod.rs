//! Nutrition calculation module
//!
//! Metabolic math, plan target synthesis, and actual-intake portion
//! estimation.

pub mod estimate;
pub mod metabolic;
pub mod plan_calc;

pub use estimate::{
    classify_deviation, estimate_portion_matrix, estimate_portions, exchange_group_for,
    Deviation, PortionTotals,
};
pub use metabolic::{abw, bmi, bmi_status, bmr, ibw, ibw_range, tdee, BmiStatus};
pub use plan_calc::{synthesize_targets, MacroTargets};

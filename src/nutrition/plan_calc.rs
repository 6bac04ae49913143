//! Plan target synthesis
//!
//! Converts a portions-by-group-by-meal matrix into aggregate macro and
//! energy targets using the fixed exchange-standards table.

use crate::models::{exchange_standard, FoodGroup, PortionMatrix};

/// Synthesized aggregate targets for a diet plan
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MacroTargets {
    pub cal: f64,
    pub p: f64,
    pub f: f64,
    pub c: f64,
}

/// Compute the four aggregate targets from scratch over the whole matrix.
///
/// Each group's portions are summed across all meal slots, multiplied by
/// that group's per-portion standard, and accumulated. Callers re-run this
/// on every cell edit rather than patching targets incrementally.
pub fn synthesize_targets(portions: &PortionMatrix) -> MacroTargets {
    let mut targets = MacroTargets::default();

    for group in FoodGroup::ALL {
        let group_portions = portions.group_total(group);
        let std = exchange_standard(group);
        targets.p += group_portions * std.p;
        targets.f += group_portions * std.f;
        targets.c += group_portions * std.c;
        targets.cal += group_portions * std.cal;
    }

    targets
}

//! Metabolic reference calculations
//!
//! BMR (Mifflin-St Jeor), TDEE, BMI with status bands, and ideal/adjusted
//! body weight. All functions are pure; degenerate inputs (zero height,
//! incomplete profiles) yield defined placeholders rather than NaN.

use serde::{Deserialize, Serialize};

use crate::models::UserProfile;

/// Basal metabolic rate in kcal/day (Mifflin-St Jeor)
///
/// Returns 0 unless height, weight, and age are all non-zero.
pub fn bmr(profile: &UserProfile) -> f64 {
    if profile.height == 0.0 || profile.weight == 0.0 || profile.age == 0 {
        return 0.0;
    }
    10.0 * profile.weight + 6.25 * profile.height - 5.0 * profile.age as f64
        + profile.gender.bmr_constant()
}

/// Total daily energy expenditure in kcal/day, rounded to an integer
pub fn tdee(profile: &UserProfile) -> i64 {
    (bmr(profile) * profile.activity_level.multiplier()).round() as i64
}

/// Body mass index, or None when height is zero
pub fn bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if height_cm == 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

/// BMI status band (Taiwanese cut points)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiStatus {
    Underweight,
    Normal,
    Overweight,
    MildObesity,
    ModerateObesity,
    SevereObesity,
}

impl BmiStatus {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiStatus::Underweight
        } else if bmi < 24.0 {
            BmiStatus::Normal
        } else if bmi < 27.0 {
            BmiStatus::Overweight
        } else if bmi < 30.0 {
            BmiStatus::MildObesity
        } else if bmi < 35.0 {
            BmiStatus::ModerateObesity
        } else {
            BmiStatus::SevereObesity
        }
    }

    /// Traditional-Chinese display label
    pub fn label(&self) -> &'static str {
        match self {
            BmiStatus::Underweight => "過輕",
            BmiStatus::Normal => "正常",
            BmiStatus::Overweight => "過重",
            BmiStatus::MildObesity => "輕度肥胖",
            BmiStatus::ModerateObesity => "中度肥胖",
            BmiStatus::SevereObesity => "重度肥胖",
        }
    }
}

/// BMI status for a profile, or None when height is zero
pub fn bmi_status(height_cm: f64, weight_kg: f64) -> Option<BmiStatus> {
    bmi(height_cm, weight_kg).map(BmiStatus::from_bmi)
}

/// Ideal body weight in kg (BMI 22), or None when height is zero
pub fn ibw(height_cm: f64) -> Option<f64> {
    if height_cm == 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(22.0 * height_m * height_m)
}

/// Ideal body weight range in kg (BMI 18.5 to 23.9)
pub fn ibw_range(height_cm: f64) -> Option<(f64, f64)> {
    if height_cm == 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some((18.5 * height_m * height_m, 23.9 * height_m * height_m))
}

/// Adjusted body weight in kg, for obesity-adjusted dosing
pub fn abw(height_cm: f64, weight_kg: f64) -> Option<f64> {
    ibw(height_cm).map(|ideal| (weight_kg - ideal) * 0.25 + ideal)
}

//! User profile model
//!
//! Anthropometric and session data for the current client.

use serde::{Deserialize, Serialize};

/// Biological sex for the Mifflin-St Jeor equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "female" => Gender::Female,
            _ => Gender::Male,
        }
    }

    /// The sex constant of the Mifflin-St Jeor equation
    pub fn bmr_constant(&self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
        }
    }
}

/// Physical activity level tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// All tiers, lowest to highest
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "sedentary" => ActivityLevel::Sedentary,
            "light" => ActivityLevel::Light,
            "active" => ActivityLevel::Active,
            "very_active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Moderate,
        }
    }

    /// TDEE multiplier over BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Anthropometric profile for the current session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub height: f64, // cm
    pub weight: f64, // kg
    pub age: u32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub notes: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            height: 0.0,
            weight: 0.0,
            age: 30,
            gender: Gender::Male,
            activity_level: ActivityLevel::Moderate,
            name: String::new(),
            notes: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_multipliers() {
        assert_eq!(ActivityLevel::Sedentary.multiplier(), 1.2);
        assert_eq!(ActivityLevel::Light.multiplier(), 1.375);
        assert_eq!(ActivityLevel::Moderate.multiplier(), 1.55);
        assert_eq!(ActivityLevel::Active.multiplier(), 1.725);
        assert_eq!(ActivityLevel::VeryActive.multiplier(), 1.9);
    }

    #[test]
    fn test_enum_string_round_trip() {
        for level in ActivityLevel::ALL {
            assert_eq!(ActivityLevel::from_str(level.as_str()), level);
        }
        assert_eq!(ActivityLevel::from_str("unknown"), ActivityLevel::Moderate);
        assert_eq!(Gender::from_str("female"), Gender::Female);
        assert_eq!(Gender::from_str("other"), Gender::Male);
    }

    #[test]
    fn test_default_profile_matches_session_start() {
        let profile = UserProfile::default();
        assert_eq!(profile.age, 30);
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.activity_level, ActivityLevel::Moderate);
        assert_eq!(profile.height, 0.0);
    }
}

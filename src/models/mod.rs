//! Data models
//!
//! Rust structs representing session state and catalog entities.

mod cart;
mod case;
mod food;
mod macros;
mod plan;
mod profile;
mod record;

pub use cart::{Cart, CartItem};
pub use case::{CaseRecord, CaseSummary, MacroPair};
pub use food::{Category, NutrientRecord};
pub use macros::MacroTotals;
pub use plan::{
    exchange_standard, DietPlan, ExchangeStandard, FoodGroup, MealTime, PortionMatrix,
};
pub use profile::{ActivityLevel, Gender, UserProfile};
pub use record::DailyRecord;

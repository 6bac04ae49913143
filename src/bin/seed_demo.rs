//! Utility to seed a demo case into an empty case store
//!
//! Loads the food catalog (EXDIET_CATALOG_URL takes precedence over
//! EXDIET_CATALOG_PATH), builds a reference consultation, and saves it.
//! Does nothing when cases already exist.

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use exdiet::catalog;
use exdiet::db::Database;
use exdiet::models::{
    ActivityLevel, Cart, CaseRecord, Category, FoodGroup, Gender, MealTime, NutrientRecord,
    UserProfile,
};
use exdiet::session::Session;

fn get_database_path() -> PathBuf {
    std::env::var("EXDIET_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            std::fs::create_dir_all(&path).ok();
            path.push("exdiet.db");
            path
        })
}

fn load_catalog() -> Vec<NutrientRecord> {
    if let Ok(url) = std::env::var("EXDIET_CATALOG_URL") {
        match catalog::fetch_from_url(&url) {
            Ok(foods) => return foods,
            Err(e) => eprintln!("Catalog fetch failed ({}), falling back", e),
        }
    }
    if let Ok(path) = std::env::var("EXDIET_CATALOG_PATH") {
        match catalog::load_from_file(Path::new(&path)) {
            Ok(foods) => return foods,
            Err(e) => eprintln!("Catalog load failed ({}), using built-in foods", e),
        }
    }
    demo_foods()
}

/// Minimal built-in foods so the demo works without a catalog
fn demo_foods() -> Vec<NutrientRecord> {
    vec![
        NutrientRecord::with_macros(
            "demo_1".to_string(),
            "白飯".to_string(),
            Category::Grain,
            183.0,
            3.1,
            0.3,
            41.0,
        ),
        NutrientRecord::with_macros(
            "demo_2".to_string(),
            "雞胸肉".to_string(),
            Category::Protein,
            109.0,
            23.3,
            0.9,
            0.0,
        ),
        NutrientRecord::with_macros(
            "demo_3".to_string(),
            "高麗菜".to_string(),
            Category::Vegetable,
            23.0,
            1.3,
            0.1,
            4.8,
        ),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("exdiet=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    exdiet::build_info::print_startup_banner();

    let db_path = get_database_path();
    eprintln!("Database path: {}", db_path.display());

    let database = Database::new(&db_path)?;
    let mut session = Session::new(database)?;
    session.set_catalog(load_catalog());

    session.set_profile(UserProfile {
        height: 170.0,
        weight: 70.0,
        age: 30,
        gender: Gender::Male,
        activity_level: ActivityLevel::Moderate,
        name: "示範個案".to_string(),
        notes: "展示用資料".to_string(),
    });

    session.set_portion(FoodGroup::Starch, MealTime::Breakfast, 2.0);
    session.set_portion(FoodGroup::Starch, MealTime::Lunch, 3.0);
    session.set_portion(FoodGroup::Starch, MealTime::Dinner, 3.0);
    session.set_portion(FoodGroup::MeatLow, MealTime::Lunch, 2.0);
    session.set_portion(FoodGroup::MeatMed, MealTime::Dinner, 2.0);
    session.set_portion(FoodGroup::Veg, MealTime::Lunch, 1.5);
    session.set_portion(FoodGroup::Veg, MealTime::Dinner, 1.5);
    session.set_portion(FoodGroup::Fruit, MealTime::AfternoonSnack, 2.0);
    session.set_portion(FoodGroup::Fat, MealTime::Lunch, 2.0);
    session.set_portion(FoodGroup::Fat, MealTime::Dinner, 2.0);
    session.set_portion(FoodGroup::DairyMed, MealTime::Breakfast, 1.0);

    let mut cart = Cart::new();
    for food in demo_foods() {
        cart.add(food, 1.0);
    }
    session.add_to_log(MealTime::Lunch, cart.take_items());

    let now_ms = chrono::Utc::now().timestamp_millis();
    let case = CaseRecord::build(&session.profile, &session.plan, &session.record, now_ms);
    let id = case.id.clone();
    let summary = case.summary;
    let targets = (
        case.plan.target_calories,
        case.plan.target_p,
        case.plan.target_f,
        case.plan.target_c,
    );

    if !session.seed_demo_if_empty(case)? {
        eprintln!(
            "Case store already has {} case(s), nothing to seed",
            session.saved_cases().len()
        );
        return Ok(());
    }

    eprintln!("Seeded demo case {}", id);
    eprintln!(
        "  Plan: {:.0} kcal / P {:.0} g / F {:.0} g / C {:.0} g",
        targets.0, targets.1, targets.2, targets.3
    );
    eprintln!(
        "  Logged: {:.0} kcal / P {:.1} g / F {:.1} g / C {:.1} g",
        summary.calories, summary.protein, summary.fat, summary.carb
    );

    Ok(())
}

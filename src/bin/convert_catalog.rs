//! Catalog conversion tool
//!
//! Turns a JSON dump of raw nutrition-table rows (Traditional-Chinese
//! headers, one object per row) into the normalized catalog the engine
//! loads at startup.
//!
//! Usage: convert_catalog <raw_rows.json> <catalog.json>

use std::collections::BTreeMap;

use tracing_subscriber::EnvFilter;

use exdiet::catalog::{normalize_rows, RawRow};
use exdiet::models::Category;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("exdiet=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    exdiet::build_info::print_startup_banner();

    let mut args = std::env::args().skip(1);
    let (input, output) = match (args.next(), args.next()) {
        (Some(input), Some(output)) => (input, output),
        _ => {
            eprintln!("Usage: convert_catalog <raw_rows.json> <catalog.json>");
            std::process::exit(2);
        }
    };

    eprintln!("Reading raw rows from {}...", input);
    let data = std::fs::read_to_string(&input)?;
    let rows: Vec<RawRow> = serde_json::from_str(&data)?;
    eprintln!("Parsed {} rows", rows.len());

    let foods = normalize_rows(&rows, "food");
    eprintln!(
        "Normalized {} foods ({} rows dropped)",
        foods.len(),
        rows.len() - foods.len()
    );

    let mut by_category: BTreeMap<&str, usize> = BTreeMap::new();
    for food in &foods {
        *by_category.entry(food.category.label()).or_insert(0) += 1;
    }
    for category in Category::ALL {
        let count = by_category.get(category.label()).copied().unwrap_or(0);
        eprintln!("  {:<12} {}", category.label(), count);
    }

    std::fs::write(&output, serde_json::to_string(&foods)?)?;
    eprintln!("Wrote catalog to {}", output);

    Ok(())
}

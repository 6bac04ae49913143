//! Food catalog module
//!
//! Classifies raw category labels, normalizes raw spreadsheet rows into
//! nutrient records, and performs the one-shot catalog load.

pub mod classify;
pub mod loader;
pub mod normalize;

pub use classify::classify_category;
pub use loader::{fetch_from_url, load_from_file, CatalogError};
pub use normalize::{normalize_rows, RawRow};

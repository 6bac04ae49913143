//! Catalog loading from local files and HTTP
//!
//! The normalized catalog is distributed as a JSON array of records
//! (the output of the `convert_catalog` tool). Loading is strict: a
//! malformed catalog file is an error, unlike the row-level tolerance
//! of the normalizer.

use std::path::Path;

use tracing::info;

use crate::models::NutrientRecord;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a normalized catalog from a JSON file on disk
pub fn load_from_file(path: &Path) -> Result<Vec<NutrientRecord>, CatalogError> {
    let data = std::fs::read_to_string(path)?;
    let foods: Vec<NutrientRecord> = serde_json::from_str(&data)?;
    info!(count = foods.len(), path = %path.display(), "loaded food catalog");
    Ok(foods)
}

/// Fetch a normalized catalog over HTTP
pub fn fetch_from_url(url: &str) -> Result<Vec<NutrientRecord>, CatalogError> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let foods: Vec<NutrientRecord> = response.json()?;
    info!(count = foods.len(), url, "fetched food catalog");
    Ok(foods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join("exdiet_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.json");

        let foods = vec![NutrientRecord::with_macros(
            "food_1".to_string(),
            "白飯".to_string(),
            Category::Grain,
            183.0,
            3.1,
            0.3,
            41.0,
        )];
        std::fs::write(&path, serde_json::to_string(&foods).unwrap()).unwrap();

        let loaded = load_from_file(&path).unwrap();
        assert_eq!(loaded, foods);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_from_file(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = std::env::temp_dir().join("exdiet_loader_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_from_file(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));

        std::fs::remove_dir_all(&dir).ok();
    }
}

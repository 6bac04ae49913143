//! Nutrient record model
//!
//! One food item from the catalog, with per-100g nutrient values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::MacroTotals;

/// Canonical food category (Taiwanese exchange-list taxonomy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Category {
    /// 全穀雜糧 (grains and starches)
    #[serde(rename = "全穀雜糧")]
    Grain,
    /// 豆魚蛋肉 (legumes, fish, eggs, meat)
    #[serde(rename = "豆魚蛋肉")]
    Protein,
    /// 海鮮 (seafood)
    #[serde(rename = "海鮮")]
    Seafood,
    /// 蔬菜 (vegetables)
    #[serde(rename = "蔬菜")]
    Vegetable,
    /// 水果 (fruit)
    #[serde(rename = "水果")]
    Fruit,
    /// 乳品 (dairy)
    #[serde(rename = "乳品")]
    Dairy,
    /// 油脂/其他 (fats and everything else)
    #[default]
    #[serde(rename = "油脂/其他")]
    FatOther,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 7] = [
        Category::Grain,
        Category::Protein,
        Category::Seafood,
        Category::Vegetable,
        Category::Fruit,
        Category::Dairy,
        Category::FatOther,
    ];

    /// The Traditional-Chinese display label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Grain => "全穀雜糧",
            Category::Protein => "豆魚蛋肉",
            Category::Seafood => "海鮮",
            Category::Vegetable => "蔬菜",
            Category::Fruit => "水果",
            Category::Dairy => "乳品",
            Category::FatOther => "油脂/其他",
        }
    }

    /// Parse from a display label, falling back to FatOther
    pub fn from_label(s: &str) -> Self {
        match s {
            "全穀雜糧" => Category::Grain,
            "豆魚蛋肉" => Category::Protein,
            "海鮮" => Category::Seafood,
            "蔬菜" => Category::Vegetable,
            "水果" => Category::Fruit,
            "乳品" => Category::Dairy,
            _ => Category::FatOther,
        }
    }
}

/// A normalized food item, keyed by a stable id
///
/// Every numeric field is an amount per 100 g edible portion. Units follow
/// the source table: macros and fiber/sugar/fats in grams, sodium and other
/// minerals plus cholesterol in milligrams, vitamins in mg or ug as noted.
///
/// Only the catalog normalizer constructs these; `name` is always non-empty
/// and `cal` is always greater than zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientRecord {
    pub id: String,
    pub name: String,
    /// Comma-joined synonyms (俗名), cleaned by the normalizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub category: Category,

    // Macros
    pub cal: f64,
    pub p: f64,
    pub f: f64,
    pub c: f64,

    // Details
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub sugar: f64,
    #[serde(default)]
    pub sat_fat: f64,
    #[serde(default)]
    pub trans_fat: f64, // grams (converted from mg at normalization)
    #[serde(default)]
    pub cholesterol: f64, // mg

    // Minerals (mg)
    #[serde(default)]
    pub sodium: f64,
    #[serde(default)]
    pub k: f64,
    #[serde(default)]
    pub ca: f64,
    #[serde(default)]
    pub mg: f64,
    #[serde(default)]
    pub fe: f64,
    #[serde(default)]
    pub zn: f64,
    #[serde(default)]
    pub p_min: f64,
    #[serde(default)]
    pub cu: f64,
    #[serde(default)]
    pub mn: f64,

    // Vitamins
    #[serde(default)]
    pub vit_a: f64, // RE (ug)
    #[serde(default)]
    pub vit_b1: f64, // mg
    #[serde(default)]
    pub vit_b2: f64, // mg
    #[serde(default)]
    pub vit_b6: f64, // mg
    #[serde(default)]
    pub vit_b12: f64, // ug
    #[serde(default)]
    pub vit_c: f64, // mg
    #[serde(default)]
    pub vit_e: f64, // alpha-TE (mg)
    #[serde(default)]
    pub folic_acid: f64, // ug
    #[serde(default)]
    pub niacin: f64, // mg

    /// Side-map for nutrients outside the typed set (sugars, fatty acids,
    /// amino acids, vitamin D/K variants from the richer source tables).
    /// Flattened so every nutrient serializes as a top-level scalar.
    #[serde(flatten)]
    pub extra: BTreeMap<String, f64>,
}

impl NutrientRecord {
    /// Construct a record with the four core macros set and every other
    /// nutrient zeroed. Used by seed data and tests; catalog records come
    /// from the normalizer instead.
    pub fn with_macros(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        cal: f64,
        p: f64,
        f: f64,
        c: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            alias: None,
            category,
            cal,
            p,
            f,
            c,
            fiber: 0.0,
            sugar: 0.0,
            sat_fat: 0.0,
            trans_fat: 0.0,
            cholesterol: 0.0,
            sodium: 0.0,
            k: 0.0,
            ca: 0.0,
            mg: 0.0,
            fe: 0.0,
            zn: 0.0,
            p_min: 0.0,
            cu: 0.0,
            mn: 0.0,
            vit_a: 0.0,
            vit_b1: 0.0,
            vit_b2: 0.0,
            vit_b6: 0.0,
            vit_b12: 0.0,
            vit_c: 0.0,
            vit_e: 0.0,
            folic_acid: 0.0,
            niacin: 0.0,
            extra: BTreeMap::new(),
        }
    }

    /// Look up any nutrient value by key, typed fields first, then the
    /// side-map. Unknown keys read as 0.
    pub fn nutrient(&self, key: &str) -> f64 {
        match key {
            "cal" => self.cal,
            "p" => self.p,
            "f" => self.f,
            "c" => self.c,
            "fiber" => self.fiber,
            "sugar" => self.sugar,
            "sat_fat" => self.sat_fat,
            "trans_fat" => self.trans_fat,
            "cholesterol" => self.cholesterol,
            "sodium" => self.sodium,
            "k" => self.k,
            "ca" => self.ca,
            "mg" => self.mg,
            "fe" => self.fe,
            "zn" => self.zn,
            "p_min" => self.p_min,
            "cu" => self.cu,
            "mn" => self.mn,
            "vit_a" => self.vit_a,
            "vit_b1" => self.vit_b1,
            "vit_b2" => self.vit_b2,
            "vit_b6" => self.vit_b6,
            "vit_b12" => self.vit_b12,
            "vit_c" => self.vit_c,
            "vit_e" => self.vit_e,
            "folic_acid" => self.folic_acid,
            "niacin" => self.niacin,
            other => self.extra.get(other).copied().unwrap_or(0.0),
        }
    }

    /// The four core macros per 100 g
    pub fn macros(&self) -> MacroTotals {
        MacroTotals {
            cal: self.cal,
            p: self.p,
            f: self.f,
            c: self.c,
        }
    }

    /// Case-insensitive match against name or alias (catalog search)
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        if q.is_empty() {
            return true;
        }
        if self.name.to_lowercase().contains(&q) {
            return true;
        }
        self.alias
            .as_deref()
            .map(|a| a.to_lowercase().contains(&q))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NutrientRecord {
        let mut item =
            NutrientRecord::with_macros("food_1", "白飯", Category::Grain, 183.0, 3.1, 0.3, 41.0);
        item.alias = Some("米飯, 蓬萊米飯".to_string());
        item.fiber = 0.6;
        item.sodium = 2.0;
        item.p_min = 39.0;
        item
    }

    #[test]
    fn test_category_label_round_trip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_label(cat.label()), cat);
        }
        assert_eq!(Category::from_label("不存在的分類"), Category::FatOther);
    }

    #[test]
    fn test_nutrient_lookup_typed_and_extra() {
        let mut item = sample();
        item.extra.insert("dha".to_string(), 120.0);
        assert_eq!(item.nutrient("cal"), 183.0);
        assert_eq!(item.nutrient("p_min"), 39.0);
        assert_eq!(item.nutrient("dha"), 120.0);
        assert_eq!(item.nutrient("no_such_key"), 0.0);
    }

    #[test]
    fn test_matches_query_name_and_alias() {
        let item = sample();
        assert!(item.matches_query("白飯"));
        assert!(item.matches_query("蓬萊"));
        assert!(item.matches_query(""));
        assert!(!item.matches_query("牛奶"));
    }

    #[test]
    fn test_serde_flatten_extra_is_top_level() {
        let mut item = sample();
        item.extra.insert("oleic_acid".to_string(), 88.0);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["category"], "全穀雜糧");
        assert_eq!(value["oleic_acid"], 88.0);
        let back: NutrientRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back.nutrient("oleic_acid"), 88.0);
        assert_eq!(back.category, Category::Grain);
    }
}

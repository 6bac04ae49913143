//! Food catalog normalization
//!
//! Turns raw tabular rows (string-keyed maps with Traditional-Chinese
//! headers, as produced by an external spreadsheet parser) into validated
//! nutrient records. Malformed rows are expected noisy input and are
//! silently skipped, never surfaced as errors.

use serde_json::Value;
use tracing::debug;

use crate::models::NutrientRecord;
use super::classify_category;

/// One raw row: arbitrary header strings to raw cell values
pub type RawRow = serde_json::Map<String, Value>;

const NAME_HEADER: &str = "樣品名稱";
const ALIAS_HEADER: &str = "俗名";
const CATEGORY_HEADER: &str = "食品分類";

/// Trans fat arrives in milligrams and is stored in grams
const TRANS_FAT_HEADER: &str = "反式脂肪(mg)";

/// The recognized header set mapped onto typed record fields
const NUMERIC_HEADERS: [(&str, &str); 27] = [
    ("熱量(kcal)", "cal"),
    ("粗蛋白(g)", "p"),
    ("粗脂肪(g)", "f"),
    ("總碳水化合物(g)", "c"),
    ("膳食纖維(g)", "fiber"),
    ("糖質總量(g)", "sugar"),
    ("飽和脂肪(g)", "sat_fat"),
    ("反式脂肪(mg)", "trans_fat"),
    ("膽固醇(mg)", "cholesterol"),
    ("鈉(mg)", "sodium"),
    ("鉀(mg)", "k"),
    ("鈣(mg)", "ca"),
    ("鎂(mg)", "mg"),
    ("鐵(mg)", "fe"),
    ("鋅(mg)", "zn"),
    ("磷(mg)", "p_min"),
    ("銅(mg)", "cu"),
    ("錳(mg)", "mn"),
    ("視網醇當量(RE)(ug)", "vit_a"),
    ("維生素B1(mg)", "vit_b1"),
    ("維生素B2(mg)", "vit_b2"),
    ("維生素B6(mg)", "vit_b6"),
    ("維生素B12(ug)", "vit_b12"),
    ("維生素C(mg)", "vit_c"),
    ("α-維生素E當量(α-TE)(mg)", "vit_e"),
    ("葉酸(ug)", "folic_acid"),
    ("菸鹼素(mg)", "niacin"),
];

/// Extended headers from the richer source table, routed into the
/// record's side-map. Fatty acids and amino acids stay in mg, sugars
/// and alcohol in grams, as supplied.
const EXTRA_HEADERS: [(&str, &str); 70] = [
    ("水分(g)", "water"),
    ("灰分(g)", "ash"),
    ("葡萄糖(g)", "glucose"),
    ("果糖(g)", "fructose"),
    ("半乳糖(g)", "galactose"),
    ("麥芽糖(g)", "maltose"),
    ("蔗糖(g)", "sucrose"),
    ("乳糖(g)", "lactose"),
    ("維生素A總量(IU)", "vit_a_iu"),
    ("視網醇(ug)", "retinol"),
    ("α-胡蘿蔔素(ug)", "alpha_carotene"),
    ("β-胡蘿蔔素(ug)", "beta_carotene"),
    ("維生素D總量(IU)", "vit_d_iu"),
    ("維生素D總量(ug)", "vit_d_ug"),
    ("維生素D2(ug)", "vit_d2"),
    ("維生素D3(ug)", "vit_d3"),
    ("維生素E總量(mg)", "vit_e_total"),
    ("α-生育酚(mg)", "alpha_tocopherol"),
    ("β-生育酚(mg)", "beta_tocopherol"),
    ("γ-生育酚(mg)", "gamma_tocopherol"),
    ("δ-生育酚(mg)", "delta_tocopherol"),
    ("維生素K1(ug)", "vit_k1"),
    ("維生素K2 (MK-4)(ug)", "vit_k2_mk4"),
    ("維生素K2 (MK-7)(ug)", "vit_k2_mk7"),
    ("脂肪酸S總量(mg)", "sfa_total"),
    ("酪酸(4:0)(mg)", "butyric_acid"),
    ("己酸(6:0)(mg)", "caproic_acid"),
    ("辛酸(8:0)(mg)", "caprylic_acid"),
    ("癸酸(10:0)(mg)", "capric_acid"),
    ("月桂酸(12:0)(mg)", "lauric_acid"),
    ("十三酸(13:0)(mg)", "tridecanoic_acid"),
    ("肉豆蔻酸(14:0)(mg)", "myristic_acid"),
    ("十五酸(15:0)(mg)", "pentadecanoic_acid"),
    ("棕櫚酸(16:0)(mg)", "palmitic_acid"),
    ("十七酸(17:0)(mg)", "heptadecanoic_acid"),
    ("硬脂酸(18:0)(mg)", "stearic_acid"),
    ("十九酸(19:0)(mg)", "nonadecanoic_acid"),
    ("花生酸(20:0)(mg)", "arachidic_acid"),
    ("山酸(22:0)(mg)", "behenic_acid"),
    ("廿四酸(24:0)(mg)", "lignoceric_acid"),
    ("脂肪酸M總量(mg)", "mufa_total"),
    ("肉豆蔻烯酸(14:1)(mg)", "myristoleic_acid"),
    ("棕櫚烯酸(16:1)(mg)", "palmitoleic_acid"),
    ("油酸(18:1)(mg)", "oleic_acid"),
    ("鱈烯酸(20:1)(mg)", "eicosenoic_acid"),
    ("芥子酸(22:1)(mg)", "erucic_acid"),
    ("脂肪酸P總量(mg)", "pufa_total"),
    ("亞麻油酸(18:2)(mg)", "linoleic_acid"),
    ("次亞麻油酸(18:3)(mg)", "linolenic_acid"),
    ("十八碳四烯酸(18:4)(mg)", "stearidonic_acid"),
    ("花生油酸(20:4)(mg)", "arachidonic_acid"),
    ("廿碳五烯酸(20:5)(mg)", "epa"),
    ("廿二碳五烯酸(22:5)(mg)", "dpa"),
    ("廿二碳六烯酸(22:6)(mg)", "dha"),
    ("其他脂肪酸(mg)", "other_fatty_acids"),
    ("水解胺基酸總量(mg)", "total_amino_acids"),
    ("天門冬胺酸(Asp)(mg)", "aspartic_acid"),
    ("酥胺酸(Thr)(mg)", "threonine"),
    ("絲胺酸(Ser)(mg)", "serine"),
    ("麩胺酸(Glu)(mg)", "glutamic_acid"),
    ("脯胺酸(Pro)(mg)", "proline"),
    ("甘胺酸(Gly)(mg)", "glycine"),
    ("丙胺酸(Ala)(mg)", "alanine"),
    ("胱胺酸(Cys)(mg)", "cystine"),
    ("纈胺酸(Val)(mg)", "valine"),
    ("甲硫胺酸(Met)(mg)", "methionine"),
    ("異白胺酸(Ile)(mg)", "isoleucine"),
    ("白胺酸(Leu)(mg)", "leucine"),
    ("酪胺酸(Tyr)(mg)", "tyrosine"),
    ("酒精含量(g)", "alcohol"),
];

/// Placeholder markers treated as "no value"
fn is_blank_marker(s: &str) -> bool {
    s.is_empty() || s == "N/A" || s == "-"
}

/// Read a cell as trimmed text; None for missing/null/blank markers
fn cell_text(row: &RawRow, header: &str) -> Option<String> {
    match row.get(header) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if is_blank_marker(trimmed) {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    }
}

/// Read a cell as a number, substituting 0 for missing/blank/unparsable
fn cell_number(row: &RawRow, header: &str) -> f64 {
    match row.get(header) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if is_blank_marker(trimmed) {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        _ => 0.0,
    }
}

/// Clean a raw alias cell: split on commas, trim each segment, drop empty
/// segments, rejoin with ", ". None when nothing survives.
fn clean_alias(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Assign a parsed numeric value to its typed field or the side-map
fn apply_numeric(record: &mut NutrientRecord, key: &str, value: f64) {
    match key {
        "cal" => record.cal = value,
        "p" => record.p = value,
        "f" => record.f = value,
        "c" => record.c = value,
        "fiber" => record.fiber = value,
        "sugar" => record.sugar = value,
        "sat_fat" => record.sat_fat = value,
        "trans_fat" => record.trans_fat = value,
        "cholesterol" => record.cholesterol = value,
        "sodium" => record.sodium = value,
        "k" => record.k = value,
        "ca" => record.ca = value,
        "mg" => record.mg = value,
        "fe" => record.fe = value,
        "zn" => record.zn = value,
        "p_min" => record.p_min = value,
        "cu" => record.cu = value,
        "mn" => record.mn = value,
        "vit_a" => record.vit_a = value,
        "vit_b1" => record.vit_b1 = value,
        "vit_b2" => record.vit_b2 = value,
        "vit_b6" => record.vit_b6 = value,
        "vit_b12" => record.vit_b12 = value,
        "vit_c" => record.vit_c = value,
        "vit_e" => record.vit_e = value,
        "folic_acid" => record.folic_acid = value,
        "niacin" => record.niacin = value,
        other => {
            // zero side-map entries add nothing over the default
            if value != 0.0 {
                record.extra.insert(other.to_string(), value);
            }
        }
    }
}

/// Normalize one raw row; None when the row is invalid (no usable name)
fn normalize_row(row: &RawRow, id: String) -> Option<NutrientRecord> {
    let name = cell_text(row, NAME_HEADER)?;
    if name.is_empty() || name == "0" {
        return None;
    }

    // classify over the raw category cell, pre-substitution
    let raw_category = cell_text(row, CATEGORY_HEADER).unwrap_or_default();
    let category = classify_category(&raw_category);

    let mut record = NutrientRecord::with_macros(id, name, category, 0.0, 0.0, 0.0, 0.0);
    record.alias = cell_text(row, ALIAS_HEADER).and_then(|raw| clean_alias(&raw));

    for &(header, key) in NUMERIC_HEADERS.iter().chain(EXTRA_HEADERS.iter()) {
        let mut value = cell_number(row, header);
        if header == TRANS_FAT_HEADER {
            value /= 1000.0; // mg to g
        }
        apply_numeric(&mut record, key, value);
    }

    Some(record)
}

/// Normalize a batch of raw rows into catalog records.
///
/// Ids are sequential (`{prefix}_{n}`, 1-based). Rows without a name or
/// with a resolved calorie value of zero are dropped; this is the expected
/// filter for placeholder and header rows, not an error path.
pub fn normalize_rows(rows: &[RawRow], id_prefix: &str) -> Vec<NutrientRecord> {
    let records: Vec<NutrientRecord> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| normalize_row(row, format!("{}_{}", id_prefix, index + 1)))
        .filter(|record| record.cal > 0.0)
        .collect();

    debug!(
        total_rows = rows.len(),
        kept = records.len(),
        "normalized catalog rows"
    );

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn row(pairs: &[(&str, Value)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn num(v: f64) -> Value {
        Value::from(v)
    }

    fn text(s: &str) -> Value {
        Value::String(s.to_string())
    }

    #[test]
    fn test_basic_row_normalizes() {
        let rows = vec![row(&[
            (NAME_HEADER, text("白飯")),
            (CATEGORY_HEADER, text("穀物類")),
            ("熱量(kcal)", num(183.0)),
            ("粗蛋白(g)", num(3.1)),
            ("粗脂肪(g)", num(0.3)),
            ("總碳水化合物(g)", num(41.0)),
            ("鈉(mg)", num(2.0)),
        ])];

        let records = normalize_rows(&rows, "food");
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, "food_1");
        assert_eq!(record.name, "白飯");
        assert_eq!(record.category, Category::Grain);
        assert_eq!(record.cal, 183.0);
        assert_eq!(record.c, 41.0);
        assert_eq!(record.sodium, 2.0);
        assert_eq!(record.fiber, 0.0);
    }

    #[test]
    fn test_row_without_name_dropped() {
        let rows = vec![
            row(&[("熱量(kcal)", num(100.0))]),
            row(&[(NAME_HEADER, text("")), ("熱量(kcal)", num(100.0))]),
            row(&[(NAME_HEADER, text("N/A")), ("熱量(kcal)", num(100.0))]),
            row(&[(NAME_HEADER, text("-")), ("熱量(kcal)", num(100.0))]),
            row(&[(NAME_HEADER, Value::Null), ("熱量(kcal)", num(100.0))]),
        ];
        assert!(normalize_rows(&rows, "food").is_empty());
    }

    #[test]
    fn test_zero_calorie_row_dropped() {
        let rows = vec![
            row(&[(NAME_HEADER, text("開水"))]),
            row(&[(NAME_HEADER, text("茶")), ("熱量(kcal)", num(0.0))]),
            row(&[(NAME_HEADER, text("可樂")), ("熱量(kcal)", text("N/A"))]),
        ];
        assert!(normalize_rows(&rows, "food").is_empty());
    }

    #[test]
    fn test_ids_are_sequential_over_input_rows() {
        let rows = vec![
            row(&[(NAME_HEADER, text("甲")), ("熱量(kcal)", num(10.0))]),
            row(&[("熱量(kcal)", num(10.0))]), // dropped
            row(&[(NAME_HEADER, text("乙")), ("熱量(kcal)", num(20.0))]),
        ];
        let records = normalize_rows(&rows, "food");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "food_1");
        // ids follow the source row position, so row 3 is food_3
        assert_eq!(records[1].id, "food_3");
    }

    #[test]
    fn test_trans_fat_mg_to_g() {
        let rows = vec![row(&[
            (NAME_HEADER, text("奶油")),
            ("熱量(kcal)", num(717.0)),
            (TRANS_FAT_HEADER, num(2000.0)),
        ])];
        let records = normalize_rows(&rows, "food");
        assert_eq!(records[0].trans_fat, 2.0);
    }

    #[test]
    fn test_alias_cleanup() {
        let rows = vec![row(&[
            (NAME_HEADER, text("某食物")),
            ("熱量(kcal)", num(50.0)),
            (ALIAS_HEADER, text(" 俗名A ,俗名B,  俗名C ")),
        ])];
        let records = normalize_rows(&rows, "food");
        assert_eq!(records[0].alias.as_deref(), Some("俗名A, 俗名B, 俗名C"));
    }

    #[test]
    fn test_alias_blank_markers_become_none() {
        for marker in ["", "N/A", "-", " , ,"] {
            let rows = vec![row(&[
                (NAME_HEADER, text("某食物")),
                ("熱量(kcal)", num(50.0)),
                (ALIAS_HEADER, text(marker)),
            ])];
            let records = normalize_rows(&rows, "food");
            assert_eq!(records[0].alias, None, "marker {:?}", marker);
        }
    }

    #[test]
    fn test_unparsable_numeric_defaults_to_zero() {
        let rows = vec![row(&[
            (NAME_HEADER, text("某食物")),
            ("熱量(kcal)", num(50.0)),
            ("粗蛋白(g)", text("abc")),
            ("鈣(mg)", text("-")),
        ])];
        let records = normalize_rows(&rows, "food");
        assert_eq!(records[0].p, 0.0);
        assert_eq!(records[0].ca, 0.0);
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        let rows = vec![row(&[
            (NAME_HEADER, text("某食物")),
            ("熱量(kcal)", text(" 88.5 ")),
        ])];
        let records = normalize_rows(&rows, "food");
        assert_eq!(records[0].cal, 88.5);
    }

    #[test]
    fn test_missing_category_falls_back() {
        let rows = vec![row(&[(NAME_HEADER, text("某食物")), ("熱量(kcal)", num(50.0))])];
        let records = normalize_rows(&rows, "food");
        assert_eq!(records[0].category, Category::FatOther);
    }

    #[test]
    fn test_extended_headers_land_in_side_map() {
        let rows = vec![row(&[
            (NAME_HEADER, text("鮭魚")),
            (CATEGORY_HEADER, text("魚貝類")),
            ("熱量(kcal)", num(158.0)),
            ("廿二碳六烯酸(22:6)(mg)", num(1000.0)),
            ("水分(g)", num(0.0)), // zero extras are omitted
        ])];
        let records = normalize_rows(&rows, "food");
        assert_eq!(records[0].nutrient("dha"), 1000.0);
        assert!(!records[0].extra.contains_key("water"));
        assert_eq!(records[0].nutrient("water"), 0.0);
    }

    #[test]
    fn test_id_prefix_for_incremental_import() {
        let rows = vec![row(&[(NAME_HEADER, text("甲")), ("熱量(kcal)", num(10.0))])];
        let records = normalize_rows(&rows, "imported_1700000000000");
        assert_eq!(records[0].id, "imported_1700000000000_1");
    }
}

//! Category classification
//!
//! Maps a free-text source category label (食品分類) to one of the
//! canonical catalog categories.

use crate::models::Category;

/// Classify a raw category label.
///
/// Total function: empty input maps straight to 油脂/其他 without running
/// any keyword test. Rules are ordered substring matches and the first hit
/// wins; order matters because keywords overlap (堅果 would otherwise match
/// the fruit rule through 果).
pub fn classify_category(raw: &str) -> Category {
    if raw.is_empty() {
        return Category::FatOther;
    }
    if raw.contains('穀') || raw.contains("澱粉") || raw.contains('米') || raw.contains('麵') {
        return Category::Grain;
    }
    if raw.contains('肉') || raw.contains('蛋') || raw.contains('豆') {
        return Category::Protein;
    }
    if raw.contains('魚') || raw.contains('貝') || raw.contains('蝦') || raw.contains('蟹') {
        return Category::Seafood;
    }
    if raw.contains('菜') || raw.contains('菇') || raw.contains('藻') {
        return Category::Vegetable;
    }
    if raw.contains('果') && !raw.contains("堅果") {
        return Category::Fruit;
    }
    if raw.contains('乳') || raw.contains('奶') {
        return Category::Dairy;
    }
    Category::FatOther
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_label_is_fallback() {
        assert_eq!(classify_category(""), Category::FatOther);
    }

    #[test]
    fn test_keyword_rules() {
        assert_eq!(classify_category("穀物類"), Category::Grain);
        assert_eq!(classify_category("澱粉類"), Category::Grain);
        assert_eq!(classify_category("米及米製品"), Category::Grain);
        assert_eq!(classify_category("麵食"), Category::Grain);
        assert_eq!(classify_category("肉類"), Category::Protein);
        assert_eq!(classify_category("蛋類"), Category::Protein);
        assert_eq!(classify_category("豆類製品"), Category::Protein);
        assert_eq!(classify_category("魚貝類"), Category::Seafood);
        assert_eq!(classify_category("蝦蟹類"), Category::Seafood);
        assert_eq!(classify_category("蔬菜類"), Category::Vegetable);
        assert_eq!(classify_category("菇類"), Category::Vegetable);
        assert_eq!(classify_category("藻類"), Category::Vegetable);
        assert_eq!(classify_category("水果類"), Category::Fruit);
        assert_eq!(classify_category("乳品類"), Category::Dairy);
        assert_eq!(classify_category("奶類"), Category::Dairy);
        assert_eq!(classify_category("油脂類"), Category::FatOther);
        assert_eq!(classify_category("調味料"), Category::FatOther);
    }

    #[test]
    fn test_nut_exclusion_from_fruit() {
        // 堅果 contains 果 but must not classify as fruit
        assert_eq!(classify_category("堅果類"), Category::FatOther);
        assert_eq!(classify_category("堅果及種子類"), Category::FatOther);
    }

    #[test]
    fn test_rule_order_first_match_wins() {
        // the protein rule runs before seafood, so 魚肉 classifies as protein
        assert_eq!(classify_category("魚肉鬆"), Category::Protein);
        // the vegetable rule runs before fruit, so 果菜 classifies as vegetable
        assert_eq!(classify_category("果菜汁"), Category::Vegetable);
    }

    #[test]
    fn test_deterministic() {
        for label in ["蔬菜", "水果", "亂七八糟", ""] {
            assert_eq!(classify_category(label), classify_category(label));
        }
    }
}

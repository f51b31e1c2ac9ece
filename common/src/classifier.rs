//! カテゴリ分類器
//!
//! 品目名をルール表の優先順に照合し、最初に一致したルールのカテゴリを返す。
//! 一致しなければフォールバックカテゴリ。分類は失敗しない（不正キーワードは不一致扱い）。

use crate::matcher::compile_keyword;
use crate::registry::{AllCategories, KnownCategories};
use crate::rules::RuleTable;
use crate::types::{CategoryRule, ClassificationResult};
use regex::Regex;

lazy_static::lazy_static! {
    static ref BUILTIN_CLASSIFIER: CategoryClassifier = CategoryClassifier::new(RuleTable::builtin());
}

/// コンパイルできなかったキーワード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKeyword {
    pub category: String,
    pub keyword: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: CategoryRule,
    patterns: Vec<Regex>,
}

/// パターンを事前コンパイルした分類器
///
/// 構築後は読み取り専用なので、複数スレッドから同時に使える。
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: Vec<CompiledRule>,
    invalid_keywords: Vec<InvalidKeyword>,
}

impl CategoryClassifier {
    pub fn new(table: RuleTable) -> Self {
        let mut rules = Vec::with_capacity(table.len());
        let mut invalid_keywords = Vec::new();

        for rule in table.rules() {
            let mut patterns = Vec::with_capacity(rule.keywords.len());
            for keyword in &rule.keywords {
                match compile_keyword(keyword) {
                    Ok(re) => patterns.push(re),
                    Err(reason) => invalid_keywords.push(InvalidKeyword {
                        category: rule.category.clone(),
                        keyword: keyword.clone(),
                        reason,
                    }),
                }
            }
            rules.push(CompiledRule {
                rule: rule.clone(),
                patterns,
            });
        }

        Self { rules, invalid_keywords }
    }

    /// 組み込みルール表の分類器（初回利用時に一度だけコンパイル）
    pub fn builtin() -> &'static CategoryClassifier {
        &BUILTIN_CLASSIFIER
    }

    /// すべてのカテゴリを既知として分類
    pub fn classify(&self, item_name: &str, fallback: &str) -> ClassificationResult {
        self.classify_with(item_name, fallback, &AllCategories)
    }

    /// 既知カテゴリに含まれないルールを飛ばして分類
    pub fn classify_with<K>(&self, item_name: &str, fallback: &str, known: &K) -> ClassificationResult
    where
        K: KnownCategories + ?Sized,
    {
        if item_name.trim().is_empty() {
            return ClassificationResult::fallback(fallback);
        }

        let lower = item_name.to_lowercase();

        for compiled in &self.rules {
            if !known.is_known(&compiled.rule.category) {
                continue;
            }
            if compiled.patterns.iter().any(|re| re.is_match(&lower)) {
                return ClassificationResult::matched(&compiled.rule);
            }
        }

        ClassificationResult::fallback(fallback)
    }

    /// コンパイルに失敗したキーワード
    pub fn invalid_keywords(&self) -> &[InvalidKeyword] {
        &self.invalid_keywords
    }

    /// ルールを優先順に取得
    pub fn rules(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter().map(|c| &c.rule)
    }
}

/// ルール列で品目名を分類する
///
/// 呼び出しごとにキーワードをコンパイルする。大量の行を処理する場合は
/// [`CategoryClassifier`] を使う。
pub fn classify(item_name: &str, rules: &[CategoryRule], fallback: &str) -> ClassificationResult {
    classify_known(item_name, rules, fallback, &AllCategories)
}

/// 既知カテゴリでフィルタしつつ分類する
pub fn classify_known<K>(
    item_name: &str,
    rules: &[CategoryRule],
    fallback: &str,
    known: &K,
) -> ClassificationResult
where
    K: KnownCategories + ?Sized,
{
    if item_name.trim().is_empty() {
        return ClassificationResult::fallback(fallback);
    }

    let lower = item_name.to_lowercase();

    for rule in rules {
        if !known.is_known(&rule.category) {
            continue;
        }
        let hit = rule.keywords.iter().any(|k| match compile_keyword(k) {
            Ok(re) => re.is_match(&lower),
            Err(_) => false,
        });
        if hit {
            return ClassificationResult::matched(rule);
        }
    }

    ClassificationResult::fallback(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CategoryRegistry;

    const FALLBACK: &str = "Pantry (Default)";

    fn builtin(name: &str) -> String {
        CategoryClassifier::builtin().classify(name, FALLBACK).matched_category
    }

    #[test]
    fn test_peanut_butter_follows_list_order() {
        // 組み込み表では Pantry が Fridge より前
        assert_eq!(builtin("Peanut Butter"), "Pantry");

        let fridge_first = vec![
            CategoryRule::new("Fridge", &["butter"]),
            CategoryRule::new("Pantry", &["peanut butter"]),
        ];
        assert_eq!(classify("Peanut Butter", &fridge_first, FALLBACK).matched_category, "Fridge");

        let pantry_first = vec![
            CategoryRule::new("Pantry", &["peanut butter"]),
            CategoryRule::new("Fridge", &["butter"]),
        ];
        assert_eq!(classify("Peanut Butter", &pantry_first, FALLBACK).matched_category, "Pantry");
    }

    #[test]
    fn test_fallback() {
        let result = CategoryClassifier::builtin().classify("Unobtainium Powder", FALLBACK);
        assert_eq!(result.matched_category, FALLBACK);
        assert!(result.matched_rule.is_none());
    }

    #[test]
    fn test_nappies() {
        assert_eq!(builtin("Nappies"), "Baby / Kids");
    }

    #[test]
    fn test_dish_soap() {
        let rules = vec![
            CategoryRule::new("Cleaning & Home", &["clean", "dish", "sponge"]),
            CategoryRule::new("Pantry", &["soap", "rice"]),
        ];
        let result = classify("Dish Soap", &rules, FALLBACK);
        assert_eq!(result.matched_category, "Cleaning & Home");

        // 組み込み表では Toiletries ("soap") が Cleaning & Home より前
        assert_eq!(builtin("Dish Soap"), "Toiletries");
    }

    #[test]
    fn test_builtin_samples() {
        assert_eq!(builtin("Tomatoes"), "Fresh Produce");
        assert_eq!(builtin("Free Range Eggs"), "Fridge");
        assert_eq!(builtin("Orange Juice"), "Drinks");
        assert_eq!(builtin("Frozen Peas"), "Freezer");
        assert_eq!(builtin("Sourdough Bread"), "Bread & Bakery");
        assert_eq!(builtin("Ground Cumin"), "Herbs & Spices");
        assert_eq!(builtin("Eggplant"), FALLBACK);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(builtin("NAPPIES"), "Baby / Kids");
        assert_eq!(builtin("tomatoes"), "Fresh Produce");
    }

    #[test]
    fn test_blank_name_is_fallback() {
        let result = CategoryClassifier::builtin().classify("   ", FALLBACK);
        assert!(result.is_fallback());
        assert_eq!(classify("", &[CategoryRule::new("Fridge", &["milk"])], FALLBACK).matched_category, FALLBACK);
    }

    #[test]
    fn test_deterministic() {
        let classifier = CategoryClassifier::builtin();
        for name in ["Peanut Butter", "Dish Soap", "Chicken Wings", "Unobtainium Powder"] {
            assert_eq!(classifier.classify(name, FALLBACK), classifier.classify(name, FALLBACK));
        }
    }

    #[test]
    fn test_invalid_keyword_skipped() {
        let rules = vec![
            CategoryRule::new("Drinks", &["choc(", "milk"]),
            CategoryRule::new("Fridge", &["milk"]),
        ];
        let result = classify("Chocolate Milk", &rules, FALLBACK);
        assert_eq!(result.matched_category, "Drinks");

        let table = RuleTable::from_pairs(rules.iter().map(|r| (r.category.clone(), r.keywords.clone()))).unwrap();
        let classifier = CategoryClassifier::new(table);
        assert_eq!(classifier.invalid_keywords().len(), 1);
        assert_eq!(classifier.invalid_keywords()[0].keyword, "choc(");
        assert_eq!(classifier.classify("Chocolate Milk", FALLBACK).matched_category, "Drinks");
    }

    #[test]
    fn test_only_invalid_keyword_falls_through() {
        let rules = vec![
            CategoryRule::new("Broken", &["["]),
            CategoryRule::new("Fridge", &["milk"]),
        ];
        assert_eq!(classify("[ milk", &rules, FALLBACK).matched_category, "Fridge");
    }

    #[test]
    fn test_blank_keyword_is_not_catch_all() {
        let rules = vec![
            CategoryRule::new("Junk", &["  "]),
            CategoryRule::new("Fridge", &["milk"]),
        ];
        assert_eq!(classify("Milk", &rules, FALLBACK).matched_category, "Fridge");

        let rules = vec![
            CategoryRule::new("Junk", &[""]),
            CategoryRule::new("Fridge", &["milk"]),
        ];
        assert!(classify("Unobtainium Powder", &rules, FALLBACK).is_fallback());
    }

    #[test]
    fn test_unknown_category_skipped() {
        let registry = CategoryRegistry::from_pairs(vec![("Fridge", 7), ("Pantry", 10)]);
        let classifier = CategoryClassifier::builtin();

        // Pantry が登録済みなら Pantry
        let result = classifier.classify_with("Peanut Butter", FALLBACK, &registry);
        assert_eq!(result.matched_category, "Pantry");

        // Baby / Kids が未登録なら Nappies は一致しない
        let result = classifier.classify_with("Nappies", FALLBACK, &registry);
        assert!(result.is_fallback());

        // Pantry が未登録なら "butter" で Fridge
        let registry = CategoryRegistry::from_pairs(vec![("Fridge", 7)]);
        let result = classifier.classify_with("Peanut Butter", FALLBACK, &registry);
        assert_eq!(result.matched_category, "Fridge");
    }

    #[test]
    fn test_known_slice() {
        let rules = vec![
            CategoryRule::new("Toiletries", &["soap"]),
            CategoryRule::new("Cleaning & Home", &["dish"]),
        ];
        let known: &[&str] = &["Cleaning & Home"];
        let result = classify_known("Dish Soap", &rules, FALLBACK, known);
        assert_eq!(result.matched_category, "Cleaning & Home");
    }

    #[test]
    fn test_compiled_matches_free_function() {
        let table = RuleTable::builtin();
        let classifier = CategoryClassifier::new(table.clone());
        for name in ["Baby Wipes", "Dog Food", "Fish Fingers", "Green Tea", "Basmati Rice", "Cheddar", "Bagels"] {
            assert_eq!(
                classifier.classify(name, FALLBACK),
                classify(name, table.rules(), FALLBACK),
                "{}",
                name
            );
        }
    }

    #[test]
    fn test_matched_rule_carries_priority() {
        let result = CategoryClassifier::builtin().classify("Nappies", FALLBACK);
        let rule = result.matched_rule.unwrap();
        assert_eq!(rule.priority, 0);
        assert_eq!(rule.category, "Baby / Kids");
    }
}

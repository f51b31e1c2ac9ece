//! カテゴリルール表
//!
//! ルールは単一の順序付きリストで保持する。照合順とキーワード表を
//! 別々に持つとずれるため、(カテゴリ, キーワード列) の並びそのものを優先順位とする。
//!
//! ## JSON形式
//!
//! ```json
//! [
//!   {"category": "Baby / Kids", "keywords": ["nappy", "wipes"]},
//!   {"category": "Pantry", "keywords": ["peanut butter", "rice"]}
//! ]
//! ```

use crate::error::{Error, Result};
use crate::types::CategoryRule;
use serde::Deserialize;
use std::collections::HashSet;

/// 組み込みルール表（照合順）
///
/// 先頭ほど優先。Pantry は Fridge より前に置き、"peanut butter" を
/// Fridge の "butter" より先に拾う。Drinks を Pantry の前に置くかは未確定だが、現状の順を維持する。
pub const BUILTIN_RULES: &[(&str, &[&str])] = &[
    ("Baby / Kids", &["nappy", "nappies", "wipes", "formula", "baby", "kid"]),
    (
        "Toiletries",
        &[
            "shampoo", "conditioner", "toothpaste", "brush", "floss", "razor", "shave",
            "deodorant", "lotion", "cream", "sun", "repellent", "vitamin", "medicine",
            "plaster", "bandage", "tissue", "toilet paper", "cotton", "perfume", "serum",
            "wash", "soap",
        ],
    ),
    (
        "Cleaning & Home",
        &[
            "clean", "detergent", "bag", "foil", "wrap", "bin", "batteries", "bulb", "match",
            "lighter", "charcoal", "fire", "wood", "pool", "garden", "pet", "dog", "cat", "food",
            "litter", "liner", "sponge", "cloth", "mop", "broom", "bucket", "bleach", "softener",
            "polish", "dish", "laundry", "paper towel", "vanish", "dishwasher",
        ],
    ),
    (
        "Freezer",
        &[
            "frozen", "ice", "ice cream", "pizza", "pie", "chips", "fry", "waffle", "mixed veg",
            "fish finger", "fish cake", "chicken strip", "nugget", "quick meal",
        ],
    ),
    (
        "Drinks",
        &[
            "juice", "water", "soda", "coke", "tea", "coffee", "wine", "beer", "alcohol", "drink",
            "beverage", "squash", "cordial",
        ],
    ),
    (
        "Pantry",
        &[
            "peanut butter", "rice", "pasta", "flour", "sugar", "oil", "sauce", "can", "tin",
            "jar", "cereal", "oats", "nut", "biscuit", "cracker", "chip", "chocolate", "sweet",
            "candy", "bar", "jam", "honey", "syrup", "vinegar", "mayo", "lentil", "bean",
            "chickpea", "couscous", "quinoa", "noodle", "soup", "cake", "cookie", "rusk", "mix",
            "jelly", "custard", "yeast", "baking",
        ],
    ),
    (
        "Fridge",
        &[
            // 肉・魚
            "chicken", "beef", "pork", "lamb", "steak", "mince", "sausage", "bacon", "ham",
            "salami", "chorizo", "fish", "salmon", "tuna", "prawn", "shrimp", "calamari",
            "mussel", "crab", "oyster", "meat", "rib", "burger", "patty", "fillet", "chop",
            "drumstick", "wing", "thigh", "breast", "schnitzel", "hake", "haddock", "sardine",
            "anchovy", "poloney", "vienna", "russain", "boerewors", "braai",
            // 乳製品・卵
            "milk", "cheese", "yoghurt", "butter", "cream", "egg", "cheddar", "mozzarella",
            "feta", "parmesan", "gouda", "brie", "camembert", "ricotta", "mascarpone", "paneer",
            "halloumi", "custard", "margarine",
            "hummus", "dip", "olive", "pesto",
        ],
    ),
    (
        "Fresh Produce",
        &[
            "apple", "banana", "orange", "fruit", "vegetable", "spinach", "corn", "pea",
            "avocado", "tomato", "potato", "onion", "garlic", "carrot", "broccoli", "lettuce",
            "cucumber", "pepper", "ginger", "lime", "lemon", "berry", "cherry", "grape", "melon",
            "mushroom", "squash", "zucchini", "brinjal", "aubergine", "cauliflower", "cabbage",
            "kale", "celery", "chili", "salad", "rocket", "baby marrow", "butternut", "pumpkin",
            "sweet potato", "gem", "bean", "sprout", "slaw", "mango", "watermelon", "naartjie",
            "clemengold", "granadilla", "pineapple", "kiwi", "pear", "peach", "plum",
            "nectarine", "apricot", "fig", "guava", "litchi", "papaya", "pomegranate", "quince",
            "raspberry", "strawberry", "blueberry", "lemon", "asparagus", "artichoke", "herb",
            "basil", "parsley", "coriander", "mint", "thyme", "rosemary", "oregano",
        ],
    ),
    (
        "Bread & Bakery",
        &[
            "bread", "bagel", "roll", "tortilla", "wrap", "bun", "muffin", "croissant", "pita",
            "panini", "toast", "loaf", "bake", "dough", "pastry", "pancake", "sourdough",
        ],
    ),
    (
        "Herbs & Spices",
        &[
            "salt", "pepper", "cumin", "paprika", "spice", "cinnamon", "nutmeg", "turmeric",
            "curry", "garlic powder", "onion powder", "stock", "broth", "bullion",
        ],
    ),
];

/// 一致しなかった場合の既定カテゴリ
pub const DEFAULT_FALLBACK_CATEGORY: &str = "Pantry";

/// 順序付きルール表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<CategoryRule>,
}

#[derive(Deserialize)]
struct RuleEntry {
    category: String,
    #[serde(default)]
    keywords: Vec<String>,
}

impl RuleTable {
    /// (カテゴリ, キーワード列) の並びから構築
    ///
    /// キーワードは小文字化・trimし、空文字は捨てる。カテゴリ名の重複はエラー。
    pub fn from_pairs<I, S, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<K>)>,
        S: Into<String>,
        K: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut rules = Vec::new();

        for (priority, (category, keywords)) in pairs.into_iter().enumerate() {
            let category: String = category.into();
            let category = category.trim().to_string();
            if category.is_empty() {
                return Err(Error::Rules(format!("{}番目のルールのカテゴリ名が空です", priority + 1)));
            }
            if !seen.insert(category.clone()) {
                return Err(Error::Rules(format!("カテゴリ '{}' が重複しています", category)));
            }

            let keywords = keywords
                .iter()
                .map(|k| {
                    let k: &str = k.as_ref();
                    k.trim().to_lowercase()
                })
                .filter(|k| !k.is_empty())
                .collect();

            rules.push(CategoryRule { category, keywords, priority });
        }

        Ok(Self { rules })
    }

    /// 組み込みルール表
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .enumerate()
            .map(|(priority, (category, keywords))| CategoryRule {
                category: category.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
                priority,
            })
            .collect();
        Self { rules }
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<RuleEntry> = serde_json::from_str(json)?;
        Self::from_pairs(entries.into_iter().map(|e| (e.category, e.keywords)))
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// ルールを優先順に取得
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// カテゴリ名を優先順に取得
    pub fn categories(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.category.as_str()).collect()
    }

    pub fn get(&self, category: &str) -> Option<&CategoryRule> {
        self.rules.iter().find(|r| r.category == category)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

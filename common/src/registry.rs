//! カテゴリレジストリ
//!
//! 保存先のカテゴリ名 → ID の対応を実行開始時に一度だけ取り込み、
//! 以降は変更しないスナップショットとして分類器・取り込み処理に渡す。

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// カテゴリID
pub type CategoryId = u64;

/// 標準カテゴリ一覧（名前, 表示順）
pub const CURATED_CATEGORIES: &[(&str, u32)] = &[
    ("Baby / Kids", 1),
    ("Bread & Bakery", 2),
    ("Cleaning & Home", 3),
    ("Drinks", 4),
    ("Freezer", 5),
    ("Fresh Produce", 6),
    ("Fridge", 7),
    ("Herbs & Spices", 8),
    ("Other", 9),
    ("Pantry", 10),
    ("Toiletries", 11),
];

/// 分類時に「存在するカテゴリ」を判定するためのトレイト
pub trait KnownCategories {
    fn is_known(&self, category: &str) -> bool;
}

/// すべてのカテゴリを既知として扱う
#[derive(Debug, Clone, Copy, Default)]
pub struct AllCategories;

impl KnownCategories for AllCategories {
    fn is_known(&self, _category: &str) -> bool {
        true
    }
}

impl KnownCategories for HashSet<String> {
    fn is_known(&self, category: &str) -> bool {
        self.contains(category)
    }
}

impl KnownCategories for [&str] {
    fn is_known(&self, category: &str) -> bool {
        self.iter().any(|c| *c == category)
    }
}

/// カテゴリ名 → ID の不変スナップショット
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRegistry {
    ids: HashMap<String, CategoryId>,
}

impl CategoryRegistry {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, CategoryId)>,
        S: Into<String>,
    {
        Self {
            ids: pairs.into_iter().map(|(name, id)| (name.into(), id)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<CategoryId> {
        self.ids.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// カテゴリ名一覧（名前順）
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.ids.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl KnownCategories for CategoryRegistry {
    fn is_known(&self, category: &str) -> bool {
        self.contains(category)
    }
}

//! Pantry Common Library
//!
//! 品目名のカテゴリ自動分類（ルール表・キーワード照合・分類器）。
//! I/Oを持たない純粋なライブラリで、取り込みCLIから利用される。

pub mod types;
pub mod error;
pub mod rules;
pub mod matcher;
pub mod registry;
pub mod classifier;

pub use types::{CategoryRule, ClassificationRequest, ClassificationResult};
pub use error::{Error, Result};
pub use rules::{RuleTable, BUILTIN_RULES, DEFAULT_FALLBACK_CATEGORY};
pub use registry::{AllCategories, CategoryId, CategoryRegistry, KnownCategories, CURATED_CATEGORIES};
pub use classifier::{classify, classify_known, CategoryClassifier, InvalidKeyword};

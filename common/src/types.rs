//! 分類の型定義

use serde::{Deserialize, Serialize};

/// カテゴリルール（カテゴリ名 + キーワード列）
///
/// `priority` はルール表内の位置。小さいほど先に照合される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub priority: usize,
}

impl CategoryRule {
    pub fn new(category: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            category: category.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            priority: 0,
        }
    }
}

/// 分類リクエスト（1行分の品目名）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub item_name: String,
}

impl ClassificationRequest {
    pub fn new(item_name: impl Into<String>) -> Self {
        Self { item_name: item_name.into() }
    }

    /// 空白のみの品目名か
    pub fn is_blank(&self) -> bool {
        self.item_name.trim().is_empty()
    }
}

/// 分類結果
///
/// どのルールにも一致しなかった場合は `matched_category` がフォールバック、
/// `matched_rule` は `None`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub matched_category: String,
    pub matched_rule: Option<CategoryRule>,
}

impl ClassificationResult {
    pub fn fallback(category: &str) -> Self {
        Self {
            matched_category: category.to_string(),
            matched_rule: None,
        }
    }

    pub fn matched(rule: &CategoryRule) -> Self {
        Self {
            matched_category: rule.category.clone(),
            matched_rule: Some(rule.clone()),
        }
    }

    /// フォールバックが使われたか
    pub fn is_fallback(&self) -> bool {
        self.matched_rule.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_request() {
        assert!(ClassificationRequest::new("   ").is_blank());
        assert!(ClassificationRequest::new("").is_blank());
        assert!(!ClassificationRequest::new("Milk").is_blank());
    }

    #[test]
    fn test_result_fallback_flag() {
        let rule = CategoryRule::new("Fridge", &["milk"]);
        assert!(!ClassificationResult::matched(&rule).is_fallback());
        assert!(ClassificationResult::fallback("Pantry").is_fallback());
    }
}

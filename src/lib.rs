pub mod categories;
pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod report;
pub mod source;
pub mod store;

use error::Result;
use pantry_common::{CategoryClassifier, RuleTable};
use std::path::Path;

/// ルール表を読み込んで分類器を作る（パス省略時は組み込み表）
///
/// コンパイルできなかったキーワードは警告ログに出す。
pub fn load_classifier(rules_path: Option<&Path>) -> Result<CategoryClassifier> {
    let table = match rules_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading rule table");
            RuleTable::from_file(path)?
        }
        None => RuleTable::builtin(),
    };

    let classifier = CategoryClassifier::new(table);
    for invalid in classifier.invalid_keywords() {
        tracing::warn!(
            category = %invalid.category,
            keyword = %invalid.keyword,
            reason = %invalid.reason,
            "invalid keyword pattern, ignored"
        );
    }
    Ok(classifier)
}

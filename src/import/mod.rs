//! 品目種別の一括取り込み
//!
//! ## 処理フロー
//! 1. 保存先からカテゴリのスナップショットを取得し、フォールバックカテゴリを解決
//! 2. 品目名が空の行をスキップ
//! 3. 全行を並列に分類（入力順は保持）
//! 4. 保存先へ順に登録（カテゴリが変わった場合のみ更新）
//!
//! 行単位の書き込み失敗はログに残して続行する。

mod types;

pub use types::{ImportOptions, ImportReport, ImportRow, ImportSummary, RowOutcome};

use crate::error::{PantryImportError, Result};
use crate::source::SourceRow;
use crate::store::{registry_snapshot, upsert_type, GroceryStore, UpsertOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use pantry_common::{CategoryClassifier, ClassificationRequest, ClassificationResult};
use rayon::prelude::*;

/// 取り込み元の行を分類して保存先へ登録する
///
/// # Arguments
/// * `store` - 保存先
/// * `classifier` - 分類器
/// * `source` - 取り込み元の表示名（レポート用）
/// * `rows` - 取り込み元の行
/// * `options` - 取り込みオプション
pub fn import_rows<S: GroceryStore + ?Sized>(
    store: &mut S,
    classifier: &CategoryClassifier,
    source: &str,
    rows: &[SourceRow],
    options: &ImportOptions,
) -> Result<ImportReport> {
    let registry = registry_snapshot(store);
    let fallback_id = registry
        .get(&options.fallback)
        .ok_or_else(|| PantryImportError::FallbackCategoryMissing(options.fallback.clone()))?;

    for rule in classifier.rules() {
        if !registry.contains(&rule.category) {
            tracing::warn!(category = %rule.category, "category not in store, rule skipped");
        }
    }

    let mut summary = ImportSummary {
        total: rows.len(),
        ..Default::default()
    };

    let named: Vec<(&SourceRow, ClassificationRequest)> = rows
        .iter()
        .map(|row| (row, ClassificationRequest::new(row.name.trim())))
        .filter(|(row, request)| {
            if request.is_blank() {
                tracing::debug!(source, row = row.row_number, "blank name, skipped");
            }
            !request.is_blank()
        })
        .collect();
    summary.skipped_blank = rows.len() - named.len();

    let results: Vec<ClassificationResult> = named
        .par_iter()
        .map(|(_, request)| classifier.classify_with(&request.item_name, &options.fallback, &registry))
        .collect();

    let progress = progress_bar(named.len() as u64, options.show_progress);
    let mut report_rows = Vec::with_capacity(named.len());

    for ((row, request), result) in named.iter().zip(&results) {
        let name = request.item_name.as_str();
        let category_id = if result.is_fallback() {
            tracing::info!(source, row = row.row_number, name, "no rule matched, using fallback");
            fallback_id
        } else {
            registry.get(&result.matched_category).unwrap_or(fallback_id)
        };

        let outcome = if options.dry_run {
            RowOutcome::Planned
        } else {
            match upsert_type(store, name, category_id) {
                Ok(UpsertOutcome::Inserted) => RowOutcome::Inserted,
                Ok(UpsertOutcome::Updated { previous }) => RowOutcome::Updated {
                    previous_category_id: previous,
                },
                Ok(UpsertOutcome::Unchanged) => RowOutcome::Unchanged,
                Err(e) => {
                    tracing::warn!(source, row = row.row_number, name, error = %e, "write failed");
                    RowOutcome::Failed { message: e.to_string() }
                }
            }
        };

        let import_row = ImportRow::new(source, row.row_number, name, result, category_id, outcome);
        progress.set_message(import_row.name.clone());
        progress.inc(1);
        summary.record(&import_row);
        report_rows.push(import_row);
    }

    progress.finish_and_clear();

    Ok(ImportReport {
        rows: report_rows,
        summary,
    })
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("  [{bar:30}] {pos}/{len} {wide_msg}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

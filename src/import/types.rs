use pantry_common::{CategoryId, ClassificationResult};
use serde::Serialize;

/// 取り込みオプション
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// 一致しなかった品目のカテゴリ（保存先に存在すること）
    pub fallback: String,
    /// 分類のみ行い保存先へは書き込まない
    pub dry_run: bool,
    /// 進捗バーを表示
    pub show_progress: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            fallback: pantry_common::DEFAULT_FALLBACK_CATEGORY.into(),
            dry_run: false,
            show_progress: false,
        }
    }
}

/// 1行の処理結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    Inserted,
    Updated { previous_category_id: CategoryId },
    Unchanged,
    /// ドライラン（書き込みなし）
    Planned,
    Failed { message: String },
}

impl std::fmt::Display for RowOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowOutcome::Inserted => write!(f, "追加"),
            RowOutcome::Updated { .. } => write!(f, "更新"),
            RowOutcome::Unchanged => write!(f, "変更なし"),
            RowOutcome::Planned => write!(f, "未書き込み"),
            RowOutcome::Failed { .. } => write!(f, "失敗"),
        }
    }
}

/// 取り込んだ1行
#[derive(Debug, Clone, Serialize)]
pub struct ImportRow {
    /// 取り込み元ファイル名
    pub source: String,
    pub row_number: usize,
    pub name: String,
    pub category: String,
    pub category_id: CategoryId,
    /// フォールバックが使われたか
    pub fallback: bool,
    pub outcome: RowOutcome,
}

impl ImportRow {
    pub(crate) fn new(
        source: &str,
        row_number: usize,
        name: &str,
        result: &ClassificationResult,
        category_id: CategoryId,
        outcome: RowOutcome,
    ) -> Self {
        Self {
            source: source.to_string(),
            row_number,
            name: name.to_string(),
            category: result.matched_category.clone(),
            category_id,
            fallback: result.is_fallback(),
            outcome,
        }
    }

    /// 表示用カテゴリ名（フォールバック時は "(Default)" 付き）
    pub fn category_label(&self) -> String {
        if self.fallback {
            format!("{} (Default)", self.category)
        } else {
            self.category.clone()
        }
    }
}

/// 取り込みの統計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// 読み込んだ行数（空行を含む）
    pub total: usize,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub planned: usize,
    pub failed: usize,
    /// 品目名が空でスキップした行数
    pub skipped_blank: usize,
    /// フォールバックカテゴリになった行数
    pub fallback: usize,
}

impl ImportSummary {
    pub(crate) fn record(&mut self, row: &ImportRow) {
        match row.outcome {
            RowOutcome::Inserted => self.inserted += 1,
            RowOutcome::Updated { .. } => self.updated += 1,
            RowOutcome::Unchanged => self.unchanged += 1,
            RowOutcome::Planned => self.planned += 1,
            RowOutcome::Failed { .. } => self.failed += 1,
        }
        if row.fallback {
            self.fallback += 1;
        }
    }

    pub fn merge(&mut self, other: &ImportSummary) {
        self.total += other.total;
        self.inserted += other.inserted;
        self.updated += other.updated;
        self.unchanged += other.unchanged;
        self.planned += other.planned;
        self.failed += other.failed;
        self.skipped_blank += other.skipped_blank;
        self.fallback += other.fallback;
    }

    /// 保存先に変更があったか
    pub fn has_changes(&self) -> bool {
        self.inserted > 0 || self.updated > 0
    }
}

/// 取り込み結果（行ごとの結果 + 統計）
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub rows: Vec<ImportRow>,
    pub summary: ImportSummary,
}

impl ImportReport {
    pub fn merge(&mut self, other: ImportReport) {
        self.summary.merge(&other.summary);
        self.rows.extend(other.rows);
    }
}

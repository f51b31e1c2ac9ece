//! カテゴリ同期
//!
//! 保存先のカテゴリを標準カテゴリ一覧（名前・表示順）に合わせる。
//!
//! ## 処理フロー
//! 1. 旧カテゴリ "Produce" を "Fresh Produce" に改名
//! 2. 標準カテゴリを追加、既存カテゴリの表示順を更新
//! 3. 一覧にないカテゴリを削除（品目種別が残っている場合は "Other" へ付け替えてから削除）

use crate::error::{PantryImportError, Result};
use crate::store::{GroceryCategory, GroceryStore};

const LEGACY_PRODUCE: &str = "Produce";
const FRESH_PRODUCE: &str = "Fresh Produce";
/// 削除するカテゴリの品目種別の付け替え先
pub const REASSIGN_CATEGORY: &str = "Other";

/// 同期結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub renamed: Option<(String, String)>,
    pub inserted: Vec<String>,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
    /// 削除が承認されず残したカテゴリ
    pub kept: Vec<String>,
    /// 付け替えた品目種別の件数
    pub reassigned: usize,
}

/// カテゴリを標準一覧に同期する
///
/// # Arguments
/// * `store` - 保存先
/// * `curated` - (カテゴリ名, 表示順) の一覧
/// * `confirm_delete` - 削除前の確認（false を返すと削除しない）
pub fn sync_categories<S, F>(store: &mut S, curated: &[(&str, u32)], mut confirm_delete: F) -> Result<SyncSummary>
where
    S: GroceryStore + ?Sized,
    F: FnMut(&GroceryCategory) -> bool,
{
    let mut summary = SyncSummary::default();
    let fresh_produce_order = curated.iter().find(|(name, _)| *name == FRESH_PRODUCE).map(|(_, order)| *order);

    // 1. Produce → Fresh Produce（表示順も標準値にする）
    let current = store.categories();
    let produce = current.iter().find(|c| c.name == LEGACY_PRODUCE);
    let has_fresh = current.iter().any(|c| c.name == FRESH_PRODUCE);
    if let (Some(produce), Some(sort_order), false) = (produce, fresh_produce_order, has_fresh) {
        tracing::info!(id = produce.id, "renaming Produce to Fresh Produce");
        store.update_category(produce.id, FRESH_PRODUCE, sort_order)?;
        summary.renamed = Some((LEGACY_PRODUCE.to_string(), FRESH_PRODUCE.to_string()));
    }

    // 2. 追加・表示順の更新
    let current = store.categories();
    for (name, sort_order) in curated {
        match current.iter().find(|c| c.name == *name) {
            Some(existing) => {
                if existing.sort_order != *sort_order {
                    store.update_category(existing.id, name, *sort_order)?;
                    summary.updated.push(name.to_string());
                }
            }
            None => {
                store.insert_category(name, *sort_order)?;
                summary.inserted.push(name.to_string());
            }
        }
    }

    // 3. 一覧にないカテゴリの削除
    let current = store.categories();
    let to_delete: Vec<GroceryCategory> = current
        .iter()
        .filter(|c| !curated.iter().any(|(name, _)| *name == c.name))
        .cloned()
        .collect();

    for category in to_delete {
        if !confirm_delete(&category) {
            summary.kept.push(category.name);
            continue;
        }

        if let Err(e) = store.delete_category(category.id) {
            tracing::warn!(category = %category.name, error = %e, "delete failed, reassigning items to Other");
            let other = current
                .iter()
                .find(|c| c.name == REASSIGN_CATEGORY)
                .ok_or_else(|| {
                    PantryImportError::Store(format!(
                        "'{}' を削除できません。付け替え先 '{}' がありません",
                        category.name, REASSIGN_CATEGORY
                    ))
                })?;
            summary.reassigned += store.reassign_types(category.id, other.id)?;
            store.delete_category(category.id)?;
        }
        summary.deleted.push(category.name);
    }

    Ok(summary)
}

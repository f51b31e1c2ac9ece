//! 保存先（カテゴリ・品目種別）
//!
//! 取り込み処理は `GroceryStore` トレイト越しに保存先を扱う。
//! 標準実装はローカルのJSONファイル（[`JsonStore`]）。

mod json_store;

pub use json_store::JsonStore;

use crate::error::Result;
use pantry_common::{CategoryId, CategoryRegistry};
use serde::{Deserialize, Serialize};

/// 品目種別ID
pub type TypeId = u64;

/// カテゴリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryCategory {
    pub id: CategoryId,
    pub name: String,
    pub sort_order: u32,
}

/// 品目種別
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryType {
    pub id: TypeId,
    pub name: String,
    pub category_id: CategoryId,
    #[serde(default)]
    pub default_store_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// 保存先の操作
pub trait GroceryStore {
    /// 全カテゴリ（表示順）
    fn categories(&self) -> Vec<GroceryCategory>;

    /// 品目種別を名前（完全一致）で検索
    fn find_type(&self, name: &str) -> Option<GroceryType>;

    /// 全品目種別
    fn types(&self) -> Vec<GroceryType>;

    fn insert_type(&mut self, name: &str, category_id: CategoryId) -> Result<GroceryType>;

    fn update_type_category(&mut self, type_id: TypeId, category_id: CategoryId) -> Result<()>;

    fn insert_category(&mut self, name: &str, sort_order: u32) -> Result<GroceryCategory>;

    /// カテゴリの名前・表示順を更新
    fn update_category(&mut self, id: CategoryId, name: &str, sort_order: u32) -> Result<()>;

    /// カテゴリを削除（品目種別から参照されている場合はエラー）
    fn delete_category(&mut self, id: CategoryId) -> Result<()>;

    /// `from` に属する品目種別を `to` へ付け替え、件数を返す
    fn reassign_types(&mut self, from: CategoryId, to: CategoryId) -> Result<usize>;

    fn save(&self) -> Result<()>;
}

/// 保存先からカテゴリのスナップショットを作る
pub fn registry_snapshot<S: GroceryStore + ?Sized>(store: &S) -> CategoryRegistry {
    CategoryRegistry::from_pairs(store.categories().into_iter().map(|c| (c.name, c.id)))
}

/// 品目種別の登録結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Updated { previous: CategoryId },
    Unchanged,
}

/// 品目種別を追加、またはカテゴリが変わった場合のみ更新
pub fn upsert_type<S: GroceryStore + ?Sized>(
    store: &mut S,
    name: &str,
    category_id: CategoryId,
) -> Result<UpsertOutcome> {
    match store.find_type(name) {
        Some(existing) if existing.category_id == category_id => Ok(UpsertOutcome::Unchanged),
        Some(existing) => {
            store.update_type_category(existing.id, category_id)?;
            Ok(UpsertOutcome::Updated {
                previous: existing.category_id,
            })
        }
        None => {
            store.insert_type(name, category_id)?;
            Ok(UpsertOutcome::Inserted)
        }
    }
}

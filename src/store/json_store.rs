//! JSONファイル保存先
//!
//! ファイル全体を読み込み、変更後に `save` で書き戻す。
//! 書き戻しは同じディレクトリの一時ファイルに書いてから置き換える。

use super::{GroceryCategory, GroceryStore, GroceryType, TypeId};
use crate::error::{PantryImportError, Result};
use pantry_common::CategoryId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreDocument {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 次に払い出すID
    next_id: u64,
    categories: Vec<GroceryCategory>,
    grocery_types: Vec<GroceryType>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: JsonStore::CURRENT_VERSION,
            next_id: 1,
            categories: Vec::new(),
            grocery_types: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JsonStore {
    /// `None` ならメモリ上のみ（保存しない）
    path: Option<PathBuf>,
    doc: StoreDocument,
    /// 品目種別名 → `doc.grocery_types` の位置
    type_index: HashMap<String, usize>,
}

impl JsonStore {
    pub const CURRENT_VERSION: u32 = 1;

    /// 保存先ファイルを開く（存在しなければ空）
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "store not found, starting empty");
            return Ok(Self::with_document(Some(path.to_path_buf()), StoreDocument::default()));
        }

        let file = File::open(path)?;
        let doc: StoreDocument = serde_json::from_reader(BufReader::new(file))?;

        if doc.version != Self::CURRENT_VERSION {
            return Err(PantryImportError::StoreVersion {
                found: doc.version,
                expected: Self::CURRENT_VERSION,
            });
        }

        Ok(Self::with_document(Some(path.to_path_buf()), doc))
    }

    /// メモリ上のみの保存先
    pub fn in_memory() -> Self {
        Self::with_document(None, StoreDocument::default())
    }

    fn with_document(path: Option<PathBuf>, doc: StoreDocument) -> Self {
        let type_index = doc
            .grocery_types
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.clone(), i))
            .collect();
        Self { path, doc, type_index }
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }

    fn next_id(&mut self) -> u64 {
        let id = self.doc.next_id;
        self.doc.next_id += 1;
        id
    }

    fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}

impl GroceryStore for JsonStore {
    fn categories(&self) -> Vec<GroceryCategory> {
        let mut categories = self.doc.categories.clone();
        categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
        categories
    }

    fn find_type(&self, name: &str) -> Option<GroceryType> {
        self.type_index.get(name).map(|&i| self.doc.grocery_types[i].clone())
    }

    fn types(&self) -> Vec<GroceryType> {
        self.doc.grocery_types.clone()
    }

    fn insert_type(&mut self, name: &str, category_id: CategoryId) -> Result<GroceryType> {
        if self.type_index.contains_key(name) {
            return Err(PantryImportError::Store(format!("品目種別 '{}' は既に存在します", name)));
        }
        if !self.doc.categories.iter().any(|c| c.id == category_id) {
            return Err(PantryImportError::Store(format!("カテゴリID {} が存在しません", category_id)));
        }

        let now = Self::now();
        let record = GroceryType {
            id: self.next_id(),
            name: name.to_string(),
            category_id,
            default_store_id: None,
            created_at: now.clone(),
            updated_at: now,
        };
        self.type_index.insert(record.name.clone(), self.doc.grocery_types.len());
        self.doc.grocery_types.push(record.clone());
        Ok(record)
    }

    fn update_type_category(&mut self, type_id: TypeId, category_id: CategoryId) -> Result<()> {
        if !self.doc.categories.iter().any(|c| c.id == category_id) {
            return Err(PantryImportError::Store(format!("カテゴリID {} が存在しません", category_id)));
        }
        let record = self
            .doc
            .grocery_types
            .iter_mut()
            .find(|t| t.id == type_id)
            .ok_or_else(|| PantryImportError::Store(format!("品目種別ID {} が存在しません", type_id)))?;

        record.category_id = category_id;
        record.updated_at = Self::now();
        Ok(())
    }

    fn insert_category(&mut self, name: &str, sort_order: u32) -> Result<GroceryCategory> {
        if self.doc.categories.iter().any(|c| c.name == name) {
            return Err(PantryImportError::Store(format!("カテゴリ '{}' は既に存在します", name)));
        }
        let category = GroceryCategory {
            id: self.next_id(),
            name: name.to_string(),
            sort_order,
        };
        self.doc.categories.push(category.clone());
        Ok(category)
    }

    fn update_category(&mut self, id: CategoryId, name: &str, sort_order: u32) -> Result<()> {
        if self.doc.categories.iter().any(|c| c.name == name && c.id != id) {
            return Err(PantryImportError::Store(format!("カテゴリ '{}' は既に存在します", name)));
        }
        let category = self
            .doc
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| PantryImportError::Store(format!("カテゴリID {} が存在しません", id)))?;

        category.name = name.to_string();
        category.sort_order = sort_order;
        Ok(())
    }

    fn delete_category(&mut self, id: CategoryId) -> Result<()> {
        let in_use = self.doc.grocery_types.iter().filter(|t| t.category_id == id).count();
        if in_use > 0 {
            return Err(PantryImportError::Store(format!(
                "カテゴリID {} は {}件の品目種別から参照されています",
                id, in_use
            )));
        }

        let before = self.doc.categories.len();
        self.doc.categories.retain(|c| c.id != id);
        if self.doc.categories.len() == before {
            return Err(PantryImportError::Store(format!("カテゴリID {} が存在しません", id)));
        }
        Ok(())
    }

    fn reassign_types(&mut self, from: CategoryId, to: CategoryId) -> Result<usize> {
        if !self.doc.categories.iter().any(|c| c.id == to) {
            return Err(PantryImportError::Store(format!("カテゴリID {} が存在しません", to)));
        }
        let now = Self::now();
        let mut count = 0;
        for record in self.doc.grocery_types.iter_mut().filter(|t| t.category_id == from) {
            record.category_id = to;
            record.updated_at = now.clone();
            count += 1;
        }
        Ok(count)
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let temp = Self::temp_path(path);
        let file = File::create(&temp)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.doc)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        drop(writer);

        std::fs::rename(&temp, path)?;
        tracing::debug!(path = %path.display(), "store saved");
        Ok(())
    }
}

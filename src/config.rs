use crate::error::{PantryImportError, Result};
use pantry_common::DEFAULT_FALLBACK_CATEGORY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 保存先パスを上書きする環境変数
pub const STORE_PATH_ENV: &str = "PANTRY_STORE_PATH";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 保存先JSONファイル（未設定なら設定ディレクトリ内）
    pub store_path: Option<PathBuf>,
    /// カスタムルール表JSON（未設定なら組み込み表）
    pub rules_path: Option<PathBuf>,
    /// 一致しなかった品目のカテゴリ
    pub fallback_category: String,
    /// 品目名の列見出し
    pub name_column: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PantryImportError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("pantry-import"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            store_path: None,
            rules_path: None,
            fallback_category: DEFAULT_FALLBACK_CATEGORY.into(),
            name_column: "name".into(),
        }
    }

    /// 保存先パスを解決（CLI引数 > 環境変数 > 設定ファイル > 既定）
    pub fn resolve_store_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(STORE_PATH_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("store.json")),
        }
    }

    /// ルール表パスを解決（CLI引数 > 設定ファイル）
    pub fn resolve_rules_path<'a>(&'a self, cli_override: Option<&'a Path>) -> Option<&'a Path> {
        cli_override.or(self.rules_path.as_deref())
    }

    /// フォールバックカテゴリを解決（CLI引数 > 設定ファイル）
    pub fn resolve_fallback<'a>(&'a self, cli_override: Option<&'a str>) -> &'a str {
        cli_override.unwrap_or(&self.fallback_category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.fallback_category, "Pantry");
        assert_eq!(config.name_column, "name");
        assert!(config.rules_path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.fallback_category = "Other".into();
        config.rules_path = Some(PathBuf::from("rules.json"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.fallback_category, "Other");
        assert_eq!(loaded.rules_path, Some(PathBuf::from("rules.json")));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"fallback_category": "Other"}"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.fallback_category, "Other");
        assert_eq!(loaded.name_column, "name");
    }

    #[test]
    fn test_cli_override_wins() {
        let config = Config::default();
        let path = config.resolve_store_path(Some(Path::new("/tmp/x.json"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/x.json"));
        assert_eq!(config.resolve_fallback(Some("Other")), "Other");
        assert_eq!(config.resolve_fallback(None), "Pantry");
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PantryImportError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("対応していない入力形式です: {0}（xlsx/xls/ods/csv/tsv）")]
    UnsupportedSource(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    Spreadsheet(String),

    #[error("列 '{column}' がありません: {path}")]
    MissingColumn { column: String, path: String },

    #[error("フォールバックカテゴリ '{0}' が保存先にありません。`pantry-import categories` で作成してください")]
    FallbackCategoryMissing(String),

    #[error("保存先エラー: {0}")]
    Store(String),

    #[error("保存先のバージョンが不正です: {found}（対応: {expected}）")]
    StoreVersion { found: u32, expected: u32 },

    #[error("レポート出力エラー: {0}")]
    ReportExport(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] pantry_common::Error),
}

pub type Result<T> = std::result::Result<T, PantryImportError>;

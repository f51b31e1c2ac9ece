//! 取り込み元（表形式データ）の読み込み
//!
//! 拡張子で読み込み方法を切り替える。ヘッダー行は必須で、品目名の列は
//! 見出し名（大文字小文字無視）で探す。

mod delimited;
mod spreadsheet;

pub use delimited::{parse_delimited, parse_line};
pub use spreadsheet::cell_text;

use crate::error::{PantryImportError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 取り込み元の1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// シート/ファイル上の行番号（1始まり、ヘッダー含む）
    pub row_number: usize,
    /// 品目名（空の場合あり）
    pub name: String,
}

/// 読み込みオプション
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// シート名（スプレッドシートのみ、省略時は先頭シート）
    pub sheet: Option<String>,
    /// 品目名の列見出し
    pub column: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            sheet: None,
            column: "name".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Spreadsheet,
    Csv,
    Tsv,
}

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
            Some(SourceKind::Spreadsheet)
        } else if ext == "csv" {
            Some(SourceKind::Csv)
        } else if ext == "tsv" || ext == "txt" {
            Some(SourceKind::Tsv)
        } else {
            None
        }
    }
}

/// ファイルから品目行を読み込む
pub fn read_rows(path: &Path, options: &SourceOptions) -> Result<Vec<SourceRow>> {
    if !path.exists() {
        return Err(PantryImportError::FileNotFound(path.display().to_string()));
    }

    let kind = SourceKind::from_path(path)
        .ok_or_else(|| PantryImportError::UnsupportedSource(path.display().to_string()))?;

    tracing::debug!(path = %path.display(), ?kind, "reading source");

    match kind {
        SourceKind::Spreadsheet => spreadsheet::read_spreadsheet(path, options.sheet.as_deref(), &options.column),
        SourceKind::Csv => delimited::read_delimited(path, ',', &options.column),
        SourceKind::Tsv => delimited::read_delimited(path, '\t', &options.column),
    }
}

/// フォルダ直下の取り込み可能ファイルを列挙（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(PantryImportError::FolderNotFound(folder.display().to_string()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && SourceKind::from_path(p).is_some())
        // Excelのロックファイル
        .filter(|p| !p.file_name().map(|n| n.to_string_lossy().starts_with("~$")).unwrap_or(false))
        .collect();

    files.sort();
    Ok(files)
}

/// パスがフォルダならその中のファイル、ファイルならそれ自身
pub fn resolve_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        scan_folder(path)
    } else if path.exists() {
        Ok(vec![path.to_path_buf()])
    } else {
        Err(PantryImportError::FileNotFound(path.display().to_string()))
    }
}

/// 見出しから品目名の列番号を探す
fn find_name_column<'a>(headers: impl Iterator<Item = &'a str>, column: &str) -> Option<usize> {
    let column = column.trim();
    headers
        .into_iter()
        .position(|h| h.trim().eq_ignore_ascii_case(column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_source_kind() {
        assert_eq!(SourceKind::from_path(Path::new("a.XLSX")), Some(SourceKind::Spreadsheet));
        assert_eq!(SourceKind::from_path(Path::new("a.csv")), Some(SourceKind::Csv));
        assert_eq!(SourceKind::from_path(Path::new("a.tsv")), Some(SourceKind::Tsv));
        assert_eq!(SourceKind::from_path(Path::new("a.json")), None);
        assert_eq!(SourceKind::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_read_rows_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("types.csv");
        fs::write(&path, "name\nMilk\nNappies\n").unwrap();

        let rows = read_rows(&path, &SourceOptions::default()).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Nappies"]);
    }

    #[test]
    fn test_read_rows_missing_file() {
        let result = read_rows(Path::new("/nonexistent/types.csv"), &SourceOptions::default());
        assert!(matches!(result, Err(PantryImportError::FileNotFound(_))));
    }

    #[test]
    fn test_read_rows_unsupported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("types.json");
        fs::write(&path, "[]").unwrap();
        let result = read_rows(&path, &SourceOptions::default());
        assert!(matches!(result, Err(PantryImportError::UnsupportedSource(_))));
    }

    #[test]
    fn test_read_rows_missing_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("types.csv");
        fs::write(&path, "title\nMilk\n").unwrap();
        let result = read_rows(&path, &SourceOptions::default());
        assert!(matches!(result, Err(PantryImportError::MissingColumn { .. })));
    }

    #[test]
    fn test_scan_folder() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "name\n").unwrap();
        fs::write(dir.path().join("a.tsv"), "name\n").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();
        fs::write(dir.path().join("~$lock.xlsx"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.csv"), "name\n").unwrap();

        let files = scan_folder(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.tsv", "b.csv"]);
    }

    #[test]
    fn test_scan_nonexistent_folder() {
        let result = scan_folder(Path::new("/nonexistent/path/12345"));
        assert!(matches!(result, Err(PantryImportError::FolderNotFound(_))));
    }
}

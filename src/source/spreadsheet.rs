//! スプレッドシート（xlsx/xls/ods）の読み込み

use super::{find_name_column, SourceRow};
use crate::error::{PantryImportError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// 指定シート（省略時は先頭シート）から品目行を読み込む
pub fn read_spreadsheet(path: &Path, sheet: Option<&str>, column: &str) -> Result<Vec<SourceRow>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| PantryImportError::Spreadsheet(format!("{}: {}", path.display(), e)))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| PantryImportError::Spreadsheet(format!("シートがありません: {}", path.display())))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| PantryImportError::Spreadsheet(format!("シート '{}': {}", sheet_name, e)))?;

    let mut rows = range.rows().enumerate();

    let (_, header) = rows.next().ok_or_else(|| PantryImportError::MissingColumn {
        column: column.to_string(),
        path: path.display().to_string(),
    })?;
    let headers: Vec<String> = header.iter().map(cell_text).collect();
    let index = find_name_column(headers.iter().map(|h| h.as_str()), column).ok_or_else(|| {
        PantryImportError::MissingColumn {
            column: column.to_string(),
            path: path.display().to_string(),
        }
    })?;

    // 行番号はシート上の見た目に合わせる
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

    Ok(rows
        .filter(|(_, cells)| cells.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|(i, cells)| SourceRow {
            row_number: first_row + i + 1,
            name: cells.get(index).map(cell_text).unwrap_or_default(),
        })
        .collect())
}

/// セルの値を文字列化
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}

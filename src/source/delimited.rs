//! 区切りテキスト（CSV/TSV）の読み込み

use super::{find_name_column, SourceRow};
use crate::error::{PantryImportError, Result};
use std::path::Path;

/// 区切りテキストを読み込んで品目行を返す
pub fn read_delimited(path: &Path, delimiter: char, column: &str) -> Result<Vec<SourceRow>> {
    let content = std::fs::read_to_string(path)?;
    parse_delimited(&content, delimiter, column).ok_or_else(|| PantryImportError::MissingColumn {
        column: column.to_string(),
        path: path.display().to_string(),
    })
}

/// 区切りテキスト文字列をパース（列が見つからなければ `None`）
pub fn parse_delimited(content: &str, delimiter: char, column: &str) -> Option<Vec<SourceRow>> {
    // BOM付きUTF-8に対応
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines().enumerate();

    let (_, header) = lines.find(|(_, line)| !line.trim().is_empty())?;
    let headers = parse_line(header, delimiter);
    let index = find_name_column(headers.iter().copied(), column)?;

    let rows = lines
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let fields = parse_line(line, delimiter);
            SourceRow {
                row_number: i + 1,
                name: fields.get(index).map(|f| f.to_string()).unwrap_or_default(),
            }
        })
        .collect();

    Some(rows)
}

/// 1行をフィールドに分割（ダブルクォート内の区切り文字は無視）
pub fn parse_line(line: &str, delimiter: char) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut field_start = 0;

    for (i, c) in line.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == delimiter && !in_quotes {
            fields.push(trim_quotes(&line[field_start..i]));
            field_start = i + c.len_utf8();
        }
    }

    fields.push(trim_quotes(&line[field_start..]));
    fields
}

fn trim_quotes(s: &str) -> &str {
    let s = s.trim();
    if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

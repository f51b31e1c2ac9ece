//! Excel形式の分類レポート

use crate::error::{PantryImportError, Result};
use crate::import::{ImportReport, RowOutcome};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

const HEADERS: &[(&str, f64)] = &[
    ("ファイル", 24.0),
    ("行", 6.0),
    ("品目名", 32.0),
    ("カテゴリ", 22.0),
    ("フォールバック", 14.0),
    ("結果", 12.0),
    ("メッセージ", 40.0),
];

pub fn generate_excel(report: &ImportReport, output_path: &Path) -> Result<()> {
    build_workbook(report, output_path)
        .map_err(|e| PantryImportError::ReportExport(format!("Excel生成エラー: {}", e)))
}

fn build_workbook(report: &ImportReport, output_path: &Path) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let fallback_format = Format::new().set_italic();

    let sheet = workbook.add_worksheet();
    sheet.set_name("分類結果")?;

    for (col, (title, width)) in HEADERS.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *title, &header_format)?;
        sheet.set_column_width(col, *width)?;
    }

    for (i, row) in report.rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, &row.source)?;
        sheet.write_number(r, 1, row.row_number as f64)?;
        sheet.write_string(r, 2, &row.name)?;
        if row.fallback {
            sheet.write_string_with_format(r, 3, &row.category_label(), &fallback_format)?;
            sheet.write_string(r, 4, "Yes")?;
        } else {
            sheet.write_string(r, 3, &row.category)?;
        }
        sheet.write_string(r, 5, row.outcome.to_string())?;
        if let RowOutcome::Failed { message } = &row.outcome {
            sheet.write_string(r, 6, message)?;
        }
    }

    let summary = &report.summary;
    let stats = workbook.add_worksheet();
    stats.set_name("集計")?;
    stats.set_column_width(0, 20.0)?;
    let items: &[(&str, usize)] = &[
        ("読み込み行数", summary.total),
        ("追加", summary.inserted),
        ("更新", summary.updated),
        ("変更なし", summary.unchanged),
        ("ドライラン", summary.planned),
        ("失敗", summary.failed),
        ("空行スキップ", summary.skipped_blank),
        ("フォールバック", summary.fallback),
    ];
    for (i, (label, value)) in items.iter().enumerate() {
        stats.write_string_with_format(i as u32, 0, *label, &header_format)?;
        stats.write_number(i as u32, 1, *value as f64)?;
    }

    workbook.save(output_path)?;
    Ok(())
}

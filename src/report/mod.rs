//! 分類レポート出力
//!
//! 拡張子で形式を切り替える（.xlsx / .json）。

mod excel;

pub use excel::generate_excel;

use crate::error::{PantryImportError, Result};
use crate::import::ImportReport;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Excel,
    Json,
}

impl ReportFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "xlsx" => Some(ReportFormat::Excel),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// レポートを書き出す
pub fn export_report(report: &ImportReport, output: &Path) -> Result<()> {
    let format = ReportFormat::from_path(output).ok_or_else(|| {
        PantryImportError::ReportExport(format!("拡張子は .xlsx か .json を指定してください: {}", output.display()))
    })?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ReportFormat::Excel => generate_excel(report, output),
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(report)?;
            std::fs::write(output, json)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format() {
        assert_eq!(ReportFormat::from_path(Path::new("r.XLSX")), Some(ReportFormat::Excel));
        assert_eq!(ReportFormat::from_path(Path::new("r.json")), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::from_path(Path::new("r.pdf")), None);
    }

    #[test]
    fn test_unknown_extension_is_error() {
        let result = export_report(&ImportReport::default(), Path::new("report.pdf"));
        assert!(matches!(result, Err(PantryImportError::ReportExport(_))));
    }
}

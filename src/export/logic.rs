// src/export/logic.rs

use crate::core::producer::ProducedReport;
use crate::errors::{AppError, AppResult};
use crate::export::csv::write_table;
use crate::export::fs_utils::ensure_writable;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, notify_export_success};
use crate::models::report_kind::ReportKind;
use crate::ui::messages::{info, warning};
use std::fs;
use std::path::Path;

/// High-level export of one produced report.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `report` to `file` in `format`.
    ///
    /// - `csv`: BOM-prefixed UTF-8, flattened table (grand total row last)
    /// - `json`: the typed report, pretty-printed
    /// - `xlsx`: styled sheet named after the report
    ///
    /// An empty report still produces a file so downstream jobs see the run.
    pub fn export(
        kind: ReportKind,
        report: &ProducedReport,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            return Err(AppError::Export(format!(
                "output directory does not exist: {}",
                parent.display()
            )));
        }

        ensure_writable(path, force)?;

        if report.is_empty() {
            warning(format!("{} report is empty, exporting headers only.", kind.title()));
        }

        let headers = report.headers();
        let rows = report.rows();

        match format {
            ExportFormat::Csv => {
                info(format!("Exporting to CSV: {}", path.display()));
                write_table(path, &headers, &rows)?;
                notify_export_success("CSV", path);
            }
            ExportFormat::Json => {
                info(format!("Exporting to JSON: {}", path.display()));
                let json = serde_json::to_string_pretty(report)?;
                fs::write(path, json)?;
                notify_export_success("JSON", path);
            }
            ExportFormat::Xlsx => {
                let total_last = matches!(report, ProducedReport::Entity(t) if t.grand_total.is_some());
                export_xlsx(kind.as_str(), &headers, &rows, total_last, path)?;
            }
        }

        Ok(())
    }
}

mod common;
use chrono::NaiveDate;
use common::{StaticSource, table, test_config};
use opsboard::core::producer::{ProducedReport, ReportService};
use opsboard::export::xlsx::numeric_cell;
use opsboard::export::{ExportFormat, ExportLogic};
use opsboard::models::report_kind::ReportKind;
use std::fs;
use std::sync::Arc;

#[test]
fn test_identity_column_always_text() {
    assert_eq!(numeric_cell(0, "00123"), None);
    assert_eq!(numeric_cell(0, "42"), None);
    assert_eq!(numeric_cell(0, "Ali"), None);
}

#[test]
fn test_non_finite_values_stay_text() {
    for s in ["inf", "-inf", "NaN", "infinity"] {
        assert_eq!(numeric_cell(3, s), None, "{s}");
    }
}

#[test]
fn test_value_columns_written_as_numbers() {
    assert_eq!(numeric_cell(1, "75"), Some(75.0));
    assert_eq!(numeric_cell(2, "100"), Some(100.0));
    assert_eq!(numeric_cell(5, ""), None);
}

#[test]
fn test_export_xlsx_writes_workbook() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = test_config(tmp.path());
    let source = StaticSource::new(vec![(
        ReportKind::Placement,
        table(&["Kullanıcı", "09:00"], &[&["00123", "40"], &["Zeynep", "10"]]),
    )]);
    let service = ReportService::new(Arc::new(source), &cfg);
    let nine = NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let report = service.produce(ReportKind::Placement, nine);
    assert!(matches!(&report, ProducedReport::Entity(t) if t.rows[0].identity == "00123"));

    let out = tmp.path().join("placement.xlsx");
    ExportLogic::export(
        ReportKind::Placement,
        &report,
        ExportFormat::Xlsx,
        &out.to_string_lossy(),
        true,
    )
    .expect("xlsx export");

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"PK"), "xlsx is a zip container");
}

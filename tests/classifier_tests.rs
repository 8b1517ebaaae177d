mod common;
use chrono::NaiveDate;
use common::{StaticSource, table, test_config};
use opsboard::core::classifier::{ColumnClassifier, parse_hour};
use opsboard::core::producer::ReportService;
use opsboard::core::shift::shift_for_hour;
use opsboard::errors::AppError;
use opsboard::models::raw_table::RawTable;
use opsboard::models::report_kind::ReportKind;
use std::sync::Arc;

#[test]
fn test_parse_hour_accepts_leading_hour_tokens() {
    assert_eq!(parse_hour("08:00"), Some(8));
    assert_eq!(parse_hour("8"), Some(8));
    assert_eq!(parse_hour(" 23:00 - 00:00"), Some(23));
    assert_eq!(parse_hour("0"), Some(0));
}

#[test]
fn test_parse_hour_rejects_non_hours() {
    for name in ["Personel", "TOPLAM", "24:00", "100", "Toplam 10", "", ":30"] {
        assert_eq!(parse_hour(name), None, "{name:?}");
    }
}

#[test]
fn test_non_hour_columns_never_selected() {
    let t = table(
        &["Personel", "09:00", "Toplam 10", "25", "Depo", "10:00"],
        &[&["Ali", "1", "2", "3", "D1", "4"]],
    );
    let cols = ColumnClassifier::for_report(ReportKind::Placement)
        .classify(&t)
        .expect("hour columns");

    let names: Vec<&str> = cols.hours.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["09:00", "10:00"]);
    assert_eq!(cols.identity, 0);
    assert_eq!(cols.passthrough, vec![2, 3, 4]);
}

#[test]
fn test_no_hour_columns_is_no_usable_columns() {
    let t = table(&["Personel", "Depo"], &[&["Ali", "D1"]]);
    let err = ColumnClassifier::for_report(ReportKind::Placement)
        .classify(&t)
        .unwrap_err();
    assert!(matches!(err, AppError::NoUsableColumns(ReportKind::Placement)));
}

#[test]
fn test_no_hour_columns_in_active_shift() {
    let t = table(&["Personel", "02:00"], &[&["Ali", "5"]]);
    let cols = ColumnClassifier::for_report(ReportKind::Placement)
        .classify(&t)
        .expect("hour columns");
    let err = cols
        .in_shift(ReportKind::Placement, &shift_for_hour(ReportKind::Placement, 10))
        .unwrap_err();
    assert!(matches!(err, AppError::NoUsableColumns(_)));
}

#[test]
fn test_picking_drops_structural_second_column() {
    let t = table(&["Personel", "3", "08:00"], &[&["Ali", "x", "5"]]);
    let c = ColumnClassifier::for_report(ReportKind::Picking);
    let prepared = c.prepare(t);
    assert_eq!(prepared.headers(), ["Personel", "08:00"]);

    let cols = c.classify(&prepared).expect("hour columns");
    assert_eq!(cols.hours.len(), 1);
    assert_eq!(cols.hours[0].hour, 8);
}

#[test]
fn test_raw_table_truncates_to_shortest_row() {
    let t = RawTable::new(
        vec!["a".into(), "b".into(), "c".into(), "d".into()],
        vec![
            vec!["1".into(), "2".into(), "3".into()],
            vec!["4".into(), "5".into(), "6".into(), "7".into()],
        ],
    );
    assert_eq!(t.width(), 3);
    assert_eq!(t.headers(), ["a", "b", "c"]);
    assert!(t.rows().iter().all(|r| r.len() == 3));
    assert_eq!(t.cell(1, 3), "");
}

#[test]
fn test_short_footer_row_narrows_whole_table() {
    let raw = RawTable::new(
        vec!["Personel".into(), "Depo".into(), "08:00".into(), "09:00".into()],
        vec![
            vec!["Ali".into(), "D1".into(), "10".into(), "20".into()],
            vec!["Can".into(), "D1".into(), "5".into(), "5".into()],
            vec!["Toplam".into()],
        ],
    );
    assert_eq!(raw.width(), 1);
    assert_eq!(raw.headers(), ["Personel"]);

    let tmp = tempfile::tempdir().unwrap();
    let cfg = test_config(tmp.path());
    let service = ReportService::new(
        Arc::new(StaticSource::new(vec![(ReportKind::Picking, raw)])),
        &cfg,
    );
    let nine = NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    assert!(matches!(
        service.try_entity_report(ReportKind::Picking, nine),
        Err(AppError::NoUsableColumns(ReportKind::Picking))
    ));
    let degraded = service.entity_report(ReportKind::Picking, nine);
    assert!(degraded.is_empty());
    assert_eq!(degraded.shift, "GÜNDÜZ");
}

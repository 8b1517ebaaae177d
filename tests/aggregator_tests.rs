mod common;
use chrono::NaiveDate;
use common::table;
use opsboard::core::aggregator::{EntityProfile, aggregate_entities, build_pivot, kpi, parse_quantity};
use opsboard::core::classifier::ColumnClassifier;
use opsboard::core::shift::shift_for_hour;
use opsboard::core::status::normalize_status;
use opsboard::models::backlog::BacklogRecord;
use opsboard::models::raw_table::RawTable;
use opsboard::models::report::ReportTable;
use opsboard::models::report_kind::ReportKind;

fn placement_report(t: &RawTable, hour: u32) -> ReportTable {
    let c = ColumnClassifier::for_report(ReportKind::Placement);
    let cols = c.classify(t).expect("classify");
    let shift = shift_for_hour(ReportKind::Placement, hour);
    let hours = cols.in_shift(ReportKind::Placement, &shift).expect("shift hours");
    aggregate_entities(t, cols.identity, &hours, &EntityProfile::placement(100), shift.name)
}

fn sample() -> RawTable {
    table(
        &["Kullanıcı", "08:00", "09:00", "Not"],
        &[
            &["Ali", "10", "20", "-"],
            &["Ayşe", "1,200", "0", "-"],
            &["Veli", "", "abc", "-"],
            &["Can", "30", "0", "-"],
            &["Deniz", "-5", "12.9", "-"],
        ],
    )
}

#[test]
fn test_kpi_clamped_percentage() {
    assert_eq!(kpi(75, 50), 100);
    assert_eq!(kpi(25, 50), 50);
    assert_eq!(kpi(0, 50), 0);
    assert_eq!(kpi(49, 100), 49);
    assert_eq!(kpi(1, 3), 33);
}

#[test]
fn test_parse_quantity_coerces_bad_cells() {
    assert_eq!(parse_quantity("1,234"), 1234);
    assert_eq!(parse_quantity(" 7 "), 7);
    assert_eq!(parse_quantity("12.9"), 12);
    assert_eq!(parse_quantity("-3"), 0);
    assert_eq!(parse_quantity("n/a"), 0);
    assert_eq!(parse_quantity(""), 0);
}

#[test]
fn test_rows_sorted_and_zero_rows_dropped() {
    let r = placement_report(&sample(), 9);

    let names: Vec<&str> = r.rows.iter().map(|e| e.identity.as_str()).collect();
    // Ali and Can tie at 30; extraction order decides.
    assert_eq!(names, ["Ayşe", "Ali", "Can", "Deniz"]);
    assert_eq!(r.rows[0].total, 1200);
    assert_eq!(r.rows[3].hours, vec![0, 12]);
    assert_eq!(r.shift, "Sabah");
    assert_eq!(r.hour_columns, ["08:00", "09:00"]);
}

#[test]
fn test_grand_total_last_and_equal_to_sum() {
    let r = placement_report(&sample(), 9);
    let gt = r.grand_total.as_ref().expect("grand total");

    let sum: u64 = r.rows.iter().map(|e| e.total).sum();
    assert_eq!(gt.total, sum);
    assert_eq!(gt.label, "TOPLAM");

    let rows = r.to_rows();
    let last = rows.last().expect("rows");
    assert_eq!(last[0], "TOPLAM");
    assert_eq!(last.last().map(String::as_str), Some("1272"));
    assert!(last[1..last.len() - 1].iter().all(|c| c.is_empty()));
}

#[test]
fn test_grand_total_stays_last_after_resort() {
    let mut r = placement_report(&sample(), 9);
    r.rows.reverse();
    r.sort_by_total();

    let rows = r.to_rows();
    assert_eq!(rows.len(), r.rows.len() + 1);
    assert_eq!(rows.last().unwrap()[0], "TOPLAM");
    assert_eq!(rows[0][0], "Ayşe");
}

#[test]
fn test_kpi_columns_interleaved_with_hours() {
    let r = placement_report(&sample(), 9);
    assert_eq!(
        r.headers(),
        ["Kullanıcı", "08:00", "08:00 KPI", "09:00", "09:00 KPI", "Toplam Adet"]
    );
    // Ali: 10 -> 10%, 20 -> 20%
    let ali = &r.to_rows()[1];
    assert_eq!(ali, &["Ali", "10", "10", "20", "20", "30"]);
    // Ayşe: 1200 against capacity 100 clamps to 100
    assert_eq!(r.rows[0].kpi, vec![100, 0]);
}

#[test]
fn test_picking_capacity_50() {
    let t = table(&["Personel", "08:00"], &[&["Ali", "75"], &["Can", "25"]]);
    let cols = ColumnClassifier::for_report(ReportKind::Placement)
        .classify(&t)
        .expect("classify");
    let r = aggregate_entities(&t, 0, &cols.hours, &EntityProfile::picking(50), "GÜNDÜZ");
    assert_eq!(r.rows[0].kpi, vec![100]);
    assert_eq!(r.rows[1].kpi, vec![50]);
    assert_eq!(r.grand_total.unwrap().label, "GENEL TOPLAM");
}

#[test]
fn test_all_zero_rows_give_empty_report() {
    let t = table(&["Personel", "08:00"], &[&["Ali", "0"], &["Can", "x"]]);
    let r = placement_report(&t, 8);
    assert!(r.is_empty());
    assert!(r.grand_total.is_none());
    assert!(r.to_rows().is_empty());
    assert_eq!(r.summary().total_quantity, 0);
}

#[test]
fn test_aggregation_is_deterministic() {
    let a = placement_report(&sample(), 9);
    let b = placement_report(&sample(), 9);
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_summary_excludes_grand_total() {
    let r = placement_report(&sample(), 9);
    let s = r.summary();
    assert_eq!(s.total_quantity, 1272);
    assert_eq!(s.headcount, 4);
    // KPIs: Ayşe 100,0  Ali 10,20  Can 30,0  Deniz 0,12 -> 172 / 8
    assert_eq!(s.average_kpi, 22);
}

fn rec(y: i32, m: u32, d: u32, status: &str, qty: u64) -> BacklogRecord {
    BacklogRecord {
        order_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        status: normalize_status(status).expect("known status"),
        quantity: qty,
        cells: Vec::new(),
    }
}

#[test]
fn test_backlog_pivot_example() {
    let records = vec![
        rec(2024, 1, 2, "Toplandı", 3),
        rec(2024, 1, 1, "Henüz aktif edilmedi", 10),
        rec(2024, 1, 1, "Toplandı", 5),
    ];
    let (pivot, totals) = build_pivot(&records);

    assert_eq!(pivot.len(), 2);
    assert_eq!(pivot[0].date_label(), "01.01.2024");
    assert_eq!(
        (pivot[0].pending, pivot[0].work_order_created, pivot[0].picked, pivot[0].daily_total),
        (10, 0, 5, 15)
    );
    assert_eq!(pivot[1].date_label(), "02.01.2024");
    assert_eq!(
        (pivot[1].pending, pivot[1].work_order_created, pivot[1].picked, pivot[1].daily_total),
        (0, 0, 3, 3)
    );

    assert_eq!(totals.pending, 10);
    assert_eq!(totals.work_order_created, 0);
    assert_eq!(totals.picked, 8);
    assert_eq!(totals.overall, 18);
}

#[test]
fn test_backlog_pivot_of_nothing_is_zeroed() {
    let (pivot, totals) = build_pivot(&[]);
    assert!(pivot.is_empty());
    assert_eq!(totals.overall, 0);
}

//! Backlog status normalization and record extraction.

use crate::core::aggregator::parse_quantity;
use crate::errors::{AppError, AppResult};
use crate::models::backlog::{BacklogRecord, CanonicalStatus};
use crate::models::raw_table::RawTable;
use crate::models::report_kind::ReportKind;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

pub const DATE_COLUMN: usize = 1;
pub const QUANTITY_COLUMN: usize = 6;
pub const STATUS_COLUMN: usize = 11;

const STATUS_TABLE: &[(&str, CanonicalStatus)] = &[
    ("Henüz aktif edilmedi", CanonicalStatus::Pending),
    ("İşlem Bekliyor", CanonicalStatus::Pending),
    ("Toplama iş emri oluşturuldu", CanonicalStatus::WorkOrderCreated),
    ("Toplama İş Emri Oluşturuldu", CanonicalStatus::WorkOrderCreated),
    ("Toplandı", CanonicalStatus::Picked),
];

/// Literal lookup after trimming; anything else is not part of the backlog.
pub fn normalize_status(raw: &str) -> Option<CanonicalStatus> {
    let trimmed = raw.trim();
    STATUS_TABLE
        .iter()
        .find(|(literal, _)| *literal == trimmed)
        .map(|(_, status)| *status)
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        })
}

/// Rows with an unknown status or an unreadable order date are dropped.
pub fn extract_records(table: &RawTable) -> AppResult<Vec<BacklogRecord>> {
    if table.width() <= STATUS_COLUMN {
        return Err(AppError::MissingColumn {
            kind: ReportKind::Backlog,
            index: STATUS_COLUMN,
        });
    }

    let mut records = Vec::with_capacity(table.rows().len());
    let mut dropped = 0usize;

    for (i, row) in table.rows().iter().enumerate() {
        let Some(status) = normalize_status(table.cell(i, STATUS_COLUMN)) else {
            dropped += 1;
            continue;
        };
        let Some(order_date) = parse_order_date(table.cell(i, DATE_COLUMN)) else {
            dropped += 1;
            continue;
        };

        records.push(BacklogRecord {
            order_date,
            status,
            quantity: parse_quantity(table.cell(i, QUANTITY_COLUMN)) as u64,
            cells: row.clone(),
        });
    }

    debug!(kept = records.len(), dropped, "backlog rows normalized");
    Ok(records)
}

// src/export/csv.rs

use crate::core::status::{DATE_COLUMN, QUANTITY_COLUMN, STATUS_COLUMN};
use crate::errors::AppResult;
use crate::models::backlog::BacklogRecord;
use chrono::NaiveDateTime;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Open `path` for CSV writing with a UTF-8 BOM already in place, so
/// spreadsheet tools pick up the Turkish characters.
pub(crate) fn bom_writer(path: &Path) -> AppResult<csv::Writer<File>> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;
    Ok(csv::Writer::from_writer(file))
}

pub fn detail_file_name(now: NaiveDateTime) -> String {
    format!("Backlog_Detail_{}.csv", now.format("%Y%m%d_%H%M"))
}

/// Record-level audit file for one backlog run: the extracted rows that
/// survived normalization, with date/quantity/status columns rewritten to
/// their normalized values.
pub fn write_backlog_detail(
    dir: &Path,
    headers: &[String],
    records: &[BacklogRecord],
    now: NaiveDateTime,
) -> AppResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(detail_file_name(now));
    let mut wtr = bom_writer(&path)?;

    let mut header_row: Vec<String> = headers.to_vec();
    for (idx, name) in [
        (DATE_COLUMN, "SiparisTarihi"),
        (QUANTITY_COLUMN, "Miktar"),
        (STATUS_COLUMN, "Statu"),
    ] {
        if let Some(h) = header_row.get_mut(idx) {
            *h = name.to_string();
        }
    }
    wtr.write_record(&header_row)?;

    for rec in records {
        let mut row = rec.cells.clone();
        row.resize(header_row.len(), String::new());
        row[DATE_COLUMN] = rec.order_date.format("%Y-%m-%d").to_string();
        row[QUANTITY_COLUMN] = rec.quantity.to_string();
        row[STATUS_COLUMN] = rec.status.label().to_string();
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(path)
}

/// Generic table export (header row + string rows).
pub(crate) fn write_table(path: &Path, headers: &[String], rows: &[Vec<String>]) -> AppResult<()> {
    let mut wtr = bom_writer(path)?;
    wtr.write_record(headers)?;
    for r in rows {
        wtr.write_record(r)?;
    }
    wtr.flush()?;
    Ok(())
}

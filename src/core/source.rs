//! Raw table sources.
//!
//! The portal automation that produces the extracts lives outside this crate;
//! everything here sees it only through [`RawTableSource`]. A failed fetch is
//! an `Err`, a fetch that worked but found nothing is an empty `RawTable`.

use crate::errors::{AppError, AppResult};
use crate::models::raw_table::RawTable;
use crate::models::report_kind::ReportKind;
use chrono::{Duration, NaiveDate};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// `[end - days, end]`
    pub fn trailing_days(end: NaiveDate, days: u32) -> Self {
        Self {
            start: end - Duration::days(days as i64),
            end,
        }
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        self.start <= d && d <= self.end
    }
}

pub trait RawTableSource: Send + Sync {
    fn fetch(&self, kind: ReportKind, range: &DateRange) -> AppResult<RawTable>;
}

/// Reads `<dir>/<kind>.csv` files dropped by the portal exporter.
#[derive(Debug, Clone)]
pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn file_for(&self, kind: ReportKind) -> PathBuf {
        self.dir.join(format!("{}.csv", kind.as_str()))
    }
}

impl RawTableSource for CsvDirSource {
    fn fetch(&self, kind: ReportKind, range: &DateRange) -> AppResult<RawTable> {
        let path = self.file_for(kind);
        debug!(%kind, path = %path.display(), start = %range.start, end = %range.end, "reading export");

        let extraction = |reason: String| AppError::Extraction { kind, reason };

        if !path.is_file() {
            return Err(extraction(format!("export not found: {}", path.display())));
        }

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_path(&path)
            .map_err(|e| extraction(e.to_string()))?;

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| extraction(e.to_string()))?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
                h.trim().to_string()
            })
            .collect();

        let mut rows = Vec::new();
        for rec in rdr.records() {
            let rec = rec.map_err(|e| extraction(e.to_string()))?;
            rows.push(rec.iter().map(|c| c.trim().to_string()).collect());
        }

        Ok(RawTable::new(headers, rows))
    }
}

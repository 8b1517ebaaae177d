//! Column classification for entity-hour extracts.

use crate::core::shift::ActiveShift;
use crate::errors::{AppError, AppResult};
use crate::models::raw_table::RawTable;
use crate::models::report_kind::ReportKind;
use regex::Regex;
use std::sync::LazyLock;

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourColumn {
    pub index: usize,
    pub name: String,
    pub hour: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedColumns {
    pub identity: usize,
    pub hours: Vec<HourColumn>,
    pub passthrough: Vec<usize>,
}

impl ClassifiedColumns {
    /// Hour columns that belong to `shift`, in extraction order.
    pub fn in_shift(&self, kind: ReportKind, shift: &ActiveShift) -> AppResult<Vec<HourColumn>> {
        let selected: Vec<HourColumn> = self
            .hours
            .iter()
            .filter(|c| shift.covers(c.hour))
            .cloned()
            .collect();

        if selected.is_empty() {
            return Err(AppError::NoUsableColumns(kind));
        }
        Ok(selected)
    }
}

/// Hour-of-day named by the leading numeric token of a header
/// (`"08:00"`, `"8"`, `"08:00 - 09:00"`), when it lies in `0..=23`.
pub fn parse_hour(name: &str) -> Option<u32> {
    let caps = LEADING_NUMBER.captures(name)?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    (hour <= 23).then_some(hour)
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnClassifier {
    kind: ReportKind,
    /// Fixed structural column removed before classification.
    structural: Option<usize>,
}

impl ColumnClassifier {
    pub fn for_report(kind: ReportKind) -> Self {
        let structural = match kind {
            ReportKind::Picking => Some(1),
            ReportKind::Placement | ReportKind::Backlog => None,
        };
        Self { kind, structural }
    }

    pub fn prepare(&self, mut table: RawTable) -> RawTable {
        if let Some(col) = self.structural
            && table.width() >= 2
        {
            table.drop_column(col);
        }
        table
    }

    pub fn classify(&self, table: &RawTable) -> AppResult<ClassifiedColumns> {
        let mut hours = Vec::new();
        let mut passthrough = Vec::new();

        for (index, name) in table.headers().iter().enumerate().skip(1) {
            match parse_hour(name) {
                Some(hour) => hours.push(HourColumn {
                    index,
                    name: name.clone(),
                    hour,
                }),
                None => passthrough.push(index),
            }
        }

        if hours.is_empty() {
            return Err(AppError::NoUsableColumns(self.kind));
        }

        Ok(ClassifiedColumns {
            identity: 0,
            hours,
            passthrough,
        })
    }
}

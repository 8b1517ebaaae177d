//! Backlog report data: canonical statuses, normalized records, pivot.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CanonicalStatus {
    Pending,
    WorkOrderCreated,
    Picked,
}

impl CanonicalStatus {
    /// Fixed output order of the pivot columns.
    pub const ORDER: [CanonicalStatus; 3] = [Self::Pending, Self::WorkOrderCreated, Self::Picked];

    pub fn label(&self) -> &'static str {
        match self {
            CanonicalStatus::Pending => "İşlem Bekliyor",
            CanonicalStatus::WorkOrderCreated => "Toplama İş Emri Oluşturuldu",
            CanonicalStatus::Picked => "Toplandı",
        }
    }
}

/// One normalized order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacklogRecord {
    pub order_date: NaiveDate,
    pub status: CanonicalStatus,
    pub quantity: u64,
    /// The extracted row as-is, kept for the detail export.
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BacklogPivotRow {
    #[serde(serialize_with = "serialize_day")]
    pub date: NaiveDate,
    pub pending: u64,
    pub work_order_created: u64,
    pub picked: u64,
    pub daily_total: u64,
}

impl BacklogPivotRow {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            pending: 0,
            work_order_created: 0,
            picked: 0,
            daily_total: 0,
        }
    }

    pub fn add(&mut self, status: CanonicalStatus, qty: u64) {
        match status {
            CanonicalStatus::Pending => self.pending += qty,
            CanonicalStatus::WorkOrderCreated => self.work_order_created += qty,
            CanonicalStatus::Picked => self.picked += qty,
        }
        self.daily_total = self.pending + self.work_order_created + self.picked;
    }

    pub fn date_label(&self) -> String {
        format_day(self.date)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BacklogTotals {
    pub pending: u64,
    pub work_order_created: u64,
    pub picked: u64,
    pub overall: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BacklogReport {
    pub pivot: Vec<BacklogPivotRow>,
    pub totals: BacklogTotals,
    /// Where this run's record-level CSV went, if it was written.
    pub detail_csv: Option<PathBuf>,
}

impl BacklogReport {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pivot.is_empty()
    }

    pub fn headers() -> Vec<String> {
        let mut h = vec!["Sipariş Tarihi".to_string()];
        h.extend(CanonicalStatus::ORDER.iter().map(|s| s.label().to_string()));
        h.push("Günlük Toplam".to_string());
        h
    }

    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.pivot
            .iter()
            .map(|r| {
                vec![
                    r.date_label(),
                    r.pending.to_string(),
                    r.work_order_created.to_string(),
                    r.picked.to_string(),
                    r.daily_total.to_string(),
                ]
            })
            .collect()
    }
}

pub fn format_day(d: NaiveDate) -> String {
    d.format("%d.%m.%Y").to_string()
}

fn serialize_day<S: serde::Serializer>(d: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_day(*d))
}

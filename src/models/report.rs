//! Display-ready entity-hour report (picking / placement).

use crate::models::report_kind::ReportKind;
use serde::Serialize;

/// One person's line in an entity-hour report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRow {
    pub identity: String,
    /// One quantity per hour column, same order as `ReportTable::hour_columns`.
    pub hours: Vec<u32>,
    /// KPI percentage per hour column, always in `0..=100`.
    pub kpi: Vec<u8>,
    pub total: u64,
}

/// The synthetic last row. Hour cells render blank; only the total is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrandTotalRow {
    pub label: String,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    pub kind: ReportKind,
    pub shift: String,
    pub identity_header: String,
    pub hour_columns: Vec<String>,
    pub total_header: String,
    pub rows: Vec<EntityRow>,
    /// `Some` exactly when `rows` is non-empty.
    pub grand_total: Option<GrandTotalRow>,
}

/// Header metrics for an entity report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub shift: String,
    pub total_quantity: u64,
    pub average_kpi: u32,
    pub headcount: usize,
}

impl ReportTable {
    /// The explicitly-empty "no data" result.
    pub fn empty(kind: ReportKind, shift: &str) -> Self {
        Self {
            kind,
            shift: shift.to_string(),
            identity_header: String::new(),
            hour_columns: Vec::new(),
            total_header: String::new(),
            rows: Vec::new(),
            grand_total: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Re-sort the real rows by total descending. The grand total lives
    /// outside `rows`, so it stays last no matter how often this runs.
    pub fn sort_by_total(&mut self) {
        self.rows.sort_by(|a, b| b.total.cmp(&a.total));
    }

    pub fn kpi_header(hour_col: &str) -> String {
        format!("{hour_col} KPI")
    }

    /// Flattened headers: identity, then `hour, hour KPI` pairs, then total.
    pub fn headers(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(2 + self.hour_columns.len() * 2);
        out.push(self.identity_header.clone());
        for h in &self.hour_columns {
            out.push(h.clone());
            out.push(Self::kpi_header(h));
        }
        out.push(self.total_header.clone());
        out
    }

    /// Flattened string rows matching [`ReportTable::headers`], grand total last.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut out: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                let mut line = Vec::with_capacity(2 + r.hours.len() * 2);
                line.push(r.identity.clone());
                for (q, k) in r.hours.iter().zip(&r.kpi) {
                    line.push(q.to_string());
                    line.push(k.to_string());
                }
                line.push(r.total.to_string());
                line
            })
            .collect();

        if let Some(gt) = &self.grand_total {
            let mut line = vec![gt.label.clone()];
            line.extend(std::iter::repeat_n(String::new(), self.hour_columns.len() * 2));
            line.push(gt.total.to_string());
            out.push(line);
        }

        out
    }

    pub fn summary(&self) -> ReportSummary {
        let total_quantity = self
            .rows
            .iter()
            .flat_map(|r| r.hours.iter())
            .map(|&q| q as u64)
            .sum();

        let kpis: Vec<u32> = self
            .rows
            .iter()
            .flat_map(|r| r.kpi.iter())
            .map(|&k| k as u32)
            .collect();
        let average_kpi = if kpis.is_empty() {
            0
        } else {
            let sum: u32 = kpis.iter().sum();
            (sum as f64 / kpis.len() as f64).round() as u32
        };

        let mut names: Vec<&str> = self.rows.iter().map(|r| r.identity.as_str()).collect();
        names.sort_unstable();
        names.dedup();

        ReportSummary {
            shift: self.shift.clone(),
            total_quantity,
            average_kpi,
            headcount: names.len(),
        }
    }
}

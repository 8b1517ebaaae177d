//! Entity-hour aggregation and the backlog date x status pivot.

use crate::core::classifier::HourColumn;
use crate::models::backlog::{BacklogPivotRow, BacklogRecord, BacklogTotals};
use crate::models::raw_table::RawTable;
use crate::models::report::{EntityRow, GrandTotalRow, ReportTable};
use crate::models::report_kind::ReportKind;
use std::collections::BTreeMap;

/// Per-report presentation constants for the entity-hour table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityProfile {
    pub kind: ReportKind,
    pub total_header: &'static str,
    pub total_label: &'static str,
    pub capacity: u32,
}

impl EntityProfile {
    pub fn picking(capacity: u32) -> Self {
        Self {
            kind: ReportKind::Picking,
            total_header: "TOPLAM",
            total_label: "GENEL TOPLAM",
            capacity,
        }
    }

    pub fn placement(capacity: u32) -> Self {
        Self {
            kind: ReportKind::Placement,
            total_header: "Toplam Adet",
            total_label: "TOPLAM",
            capacity,
        }
    }
}

/// Cell text to a non-negative count. Thousands separators and blanks are
/// stripped; decimals truncate; anything unreadable or negative is 0.
pub fn parse_quantity(raw: &str) -> u32 {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return 0;
    }

    if let Ok(n) = cleaned.parse::<u64>() {
        return n.min(u32::MAX as u64) as u32;
    }

    match cleaned.parse::<f64>() {
        Ok(f) if f.is_finite() && f > 0.0 => f.trunc().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// `floor(quantity / capacity * 100)` clamped to `0..=100`.
pub fn kpi(quantity: u32, capacity: u32) -> u8 {
    if quantity == 0 {
        return 0;
    }
    if capacity == 0 {
        return 100;
    }
    let pct = (quantity as u64 * 100) / capacity as u64;
    pct.min(100) as u8
}

/// Build the display table from a classified extract.
///
/// Rows totalling 0 are discarded, the rest sorted by total descending with
/// extraction order breaking ties, and the grand total appended last.
pub fn aggregate_entities(
    table: &RawTable,
    identity: usize,
    hours: &[HourColumn],
    profile: &EntityProfile,
    shift: &str,
) -> ReportTable {
    let mut rows: Vec<EntityRow> = (0..table.rows().len())
        .map(|i| {
            let quantities: Vec<u32> = hours
                .iter()
                .map(|c| parse_quantity(table.cell(i, c.index)))
                .collect();
            let kpis = quantities.iter().map(|&q| kpi(q, profile.capacity)).collect();
            let total = quantities.iter().map(|&q| q as u64).sum();

            EntityRow {
                identity: table.cell(i, identity).to_string(),
                hours: quantities,
                kpi: kpis,
                total,
            }
        })
        .filter(|r| r.total > 0)
        .collect();

    if rows.is_empty() {
        return ReportTable::empty(profile.kind, shift);
    }

    rows.sort_by(|a, b| b.total.cmp(&a.total));

    let grand_total = GrandTotalRow {
        label: profile.total_label.to_string(),
        total: rows.iter().map(|r| r.total).sum(),
    };

    ReportTable {
        kind: profile.kind,
        shift: shift.to_string(),
        identity_header: table
            .headers()
            .get(identity)
            .cloned()
            .unwrap_or_default(),
        hour_columns: hours.iter().map(|c| c.name.clone()).collect(),
        total_header: profile.total_header.to_string(),
        rows,
        grand_total: Some(grand_total),
    }
}

/// Date x status pivot plus the per-status grand totals.
pub fn build_pivot(records: &[BacklogRecord]) -> (Vec<BacklogPivotRow>, BacklogTotals) {
    let mut by_date: BTreeMap<_, BacklogPivotRow> = BTreeMap::new();

    for rec in records {
        by_date
            .entry(rec.order_date)
            .or_insert_with(|| BacklogPivotRow::new(rec.order_date))
            .add(rec.status, rec.quantity);
    }

    let pivot: Vec<BacklogPivotRow> = by_date.into_values().collect();

    let mut totals = BacklogTotals::default();
    for row in &pivot {
        totals.pending += row.pending;
        totals.work_order_created += row.work_order_created;
        totals.picked += row.picked;
    }
    totals.overall = totals.pending + totals.work_order_created + totals.picked;

    (pivot, totals)
}

//! Report producers: source -> classify -> shift -> aggregate.
//!
//! The `try_*` functions surface every stage failure. The plain functions are
//! the producer boundary: they apply the single "degrade to empty" policy and
//! never fail.

use crate::config::Config;
use crate::core::aggregator::{EntityProfile, aggregate_entities, build_pivot};
use crate::core::classifier::ColumnClassifier;
use crate::core::shift::active_shift;
use crate::core::source::{DateRange, RawTableSource};
use crate::core::status::extract_records;
use crate::errors::{AppError, AppResult};
use crate::export::csv::write_backlog_detail;
use crate::models::backlog::BacklogReport;
use crate::models::report::ReportTable;
use crate::models::report_kind::ReportKind;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Output of any of the three producers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProducedReport {
    Entity(ReportTable),
    Backlog(BacklogReport),
}

impl ProducedReport {
    pub fn is_empty(&self) -> bool {
        match self {
            ProducedReport::Entity(t) => t.is_empty(),
            ProducedReport::Backlog(b) => b.is_empty(),
        }
    }

    pub fn headers(&self) -> Vec<String> {
        match self {
            ProducedReport::Entity(t) => t.headers(),
            ProducedReport::Backlog(_) => BacklogReport::headers(),
        }
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        match self {
            ProducedReport::Entity(t) => t.to_rows(),
            ProducedReport::Backlog(b) => b.to_rows(),
        }
    }
}

#[derive(Clone)]
pub struct ReportService {
    source: Arc<dyn RawTableSource>,
    picking_capacity: u32,
    placement_capacity: u32,
    backlog_days: u32,
    report_dir: PathBuf,
}

impl ReportService {
    pub fn new(source: Arc<dyn RawTableSource>, cfg: &Config) -> Self {
        Self {
            source,
            picking_capacity: cfg.picking_capacity,
            placement_capacity: cfg.placement_capacity,
            backlog_days: cfg.backlog_days,
            report_dir: PathBuf::from(&cfg.report_dir),
        }
    }

    fn profile(&self, kind: ReportKind) -> AppResult<EntityProfile> {
        match kind {
            ReportKind::Picking => Ok(EntityProfile::picking(self.picking_capacity)),
            ReportKind::Placement => Ok(EntityProfile::placement(self.placement_capacity)),
            ReportKind::Backlog => Err(AppError::Other(
                "backlog is not an entity-hour report".to_string(),
            )),
        }
    }

    pub fn try_entity_report(&self, kind: ReportKind, now: NaiveDateTime) -> AppResult<ReportTable> {
        let profile = self.profile(kind)?;
        let shift = active_shift(kind, now);
        info!(%kind, shift = shift.name, "building report");

        let raw = self
            .source
            .fetch(kind, &DateRange::single(now.date()))?;
        if raw.is_empty() {
            info!(%kind, "extract has no rows");
            return Ok(ReportTable::empty(kind, shift.name));
        }

        let classifier = ColumnClassifier::for_report(kind);
        let table = classifier.prepare(raw);
        let columns = classifier.classify(&table)?;
        let hours = columns.in_shift(kind, &shift)?;

        let report = aggregate_entities(&table, columns.identity, &hours, &profile, shift.name);
        info!(%kind, rows = report.rows.len(), "report ready");
        Ok(report)
    }

    pub fn entity_report(&self, kind: ReportKind, now: NaiveDateTime) -> ReportTable {
        self.try_entity_report(kind, now).unwrap_or_else(|e| {
            warn!(%kind, error = %e, "report degraded to empty");
            ReportTable::empty(kind, active_shift(kind, now).name)
        })
    }

    pub fn try_backlog(&self, now: NaiveDateTime) -> AppResult<BacklogReport> {
        let range = DateRange::trailing_days(now.date(), self.backlog_days);
        info!(start = %range.start, end = %range.end, "building backlog");

        let raw = self.source.fetch(ReportKind::Backlog, &range)?;
        if raw.is_empty() {
            info!("backlog extract has no rows");
            return Ok(BacklogReport::empty());
        }

        let (records, outside): (Vec<_>, Vec<_>) = extract_records(&raw)?
            .into_iter()
            .partition(|r| range.contains(r.order_date));
        if !outside.is_empty() {
            debug!(dropped = outside.len(), "backlog rows outside date range");
        }

        let detail_csv = match write_backlog_detail(&self.report_dir, raw.headers(), &records, now) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "backlog detail export failed");
                None
            }
        };

        let (pivot, totals) = build_pivot(&records);
        info!(days = pivot.len(), overall = totals.overall, "backlog ready");

        Ok(BacklogReport {
            pivot,
            totals,
            detail_csv,
        })
    }

    pub fn backlog(&self, now: NaiveDateTime) -> BacklogReport {
        self.try_backlog(now).unwrap_or_else(|e| {
            warn!(error = %e, "backlog degraded to empty");
            BacklogReport::empty()
        })
    }

    pub fn produce(&self, kind: ReportKind, now: NaiveDateTime) -> ProducedReport {
        match kind {
            ReportKind::Backlog => ProducedReport::Backlog(self.backlog(now)),
            other => ProducedReport::Entity(self.entity_report(other, now)),
        }
    }
}

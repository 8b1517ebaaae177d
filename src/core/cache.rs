//! TTL memoization for the three report producers.
//!
//! Each report owns one [`TtlCell`]. A miss is served by exactly one caller;
//! the in-flight marker makes other callers either reuse the previous value
//! (when there is one) or wait for the refresh to land, so only one
//! extraction per expired entry is ever running.

use crate::config::Config;
use crate::core::producer::ReportService;
use crate::models::backlog::BacklogReport;
use crate::models::report::ReportTable;
use crate::models::report_kind::ReportKind;
use crate::utils::date::local_now;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Monotonic time source, swappable in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut e = self.elapsed.lock().unwrap_or_else(PoisonError::into_inner);
        *e += by;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + *self.elapsed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct Slot<V> {
    value: Option<(V, Instant)>,
    in_flight: bool,
}

pub struct TtlCell<V, C = SystemClock> {
    slot: Mutex<Slot<V>>,
    ready: Condvar,
    ttl: Duration,
    clock: C,
}

impl<V: Clone> TtlCell<V, SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<V: Clone, C: Clock> TtlCell<V, C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            slot: Mutex::new(Slot {
                value: None,
                in_flight: false,
            }),
            ready: Condvar::new(),
            ttl,
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot<V>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_fresh(&self, stored_at: Instant) -> bool {
        self.clock.now().saturating_duration_since(stored_at) < self.ttl
    }

    /// Cached value if still fresh, otherwise the result of `fetch`.
    pub fn get_or_refresh<F: FnOnce() -> V>(&self, fetch: F) -> V {
        let mut slot = self.lock();
        loop {
            if let Some((v, at)) = &slot.value
                && self.is_fresh(*at)
            {
                return v.clone();
            }
            if !slot.in_flight {
                break;
            }
            if let Some((v, _)) = &slot.value {
                debug!("refresh in flight, serving previous value");
                return v.clone();
            }
            slot = self
                .ready
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }

        slot.in_flight = true;
        drop(slot);

        let marker = InFlight { cell: self };
        let value = fetch();
        marker.complete(value.clone());
        value
    }

    pub fn peek(&self) -> Option<V> {
        self.lock().value.as_ref().map(|(v, _)| v.clone())
    }

    pub fn invalidate(&self) {
        self.lock().value = None;
    }
}

/// Clears the in-flight marker even if `fetch` unwinds.
struct InFlight<'a, V, C: Clock> {
    cell: &'a TtlCell<V, C>,
}

impl<V, C: Clock> InFlight<'_, V, C> {
    fn complete(self, value: V) {
        let stored_at = self.cell.clock.now();
        self.cell
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .value = Some((value, stored_at));
        // Drop clears the marker and wakes waiters.
    }
}

impl<V, C: Clock> Drop for InFlight<'_, V, C> {
    fn drop(&mut self) {
        self.cell
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .in_flight = false;
        self.cell.ready.notify_all();
    }
}

/// One cell per report kind in front of a [`ReportService`].
pub struct ReportCache<C: Clock + Clone = SystemClock> {
    service: ReportService,
    picking: TtlCell<ReportTable, C>,
    placement: TtlCell<ReportTable, C>,
    backlog: TtlCell<BacklogReport, C>,
}

impl ReportCache<SystemClock> {
    pub fn new(service: ReportService, cfg: &Config) -> Self {
        Self::with_clock(service, cfg, SystemClock)
    }
}

impl<C: Clock + Clone> ReportCache<C> {
    pub fn with_clock(service: ReportService, cfg: &Config, clock: C) -> Self {
        let secs = Duration::from_secs;
        Self {
            service,
            picking: TtlCell::with_clock(secs(cfg.picking_ttl_secs), clock.clone()),
            placement: TtlCell::with_clock(secs(cfg.placement_ttl_secs), clock.clone()),
            backlog: TtlCell::with_clock(secs(cfg.backlog_ttl_secs), clock),
        }
    }

    pub fn picking(&self) -> ReportTable {
        self.picking.get_or_refresh(|| {
            self.service
                .entity_report(ReportKind::Picking, local_now())
        })
    }

    pub fn placement(&self) -> ReportTable {
        self.placement.get_or_refresh(|| {
            self.service
                .entity_report(ReportKind::Placement, local_now())
        })
    }

    /// Any backlog failure becomes the empty report; other tabs are unaffected.
    pub fn backlog(&self) -> BacklogReport {
        self.backlog
            .get_or_refresh(|| match self.service.try_backlog(local_now()) {
                Ok(r) => r,
                Err(e) => {
                    warn!(error = %e, "backlog unavailable, serving empty");
                    BacklogReport::empty()
                }
            })
    }

    pub fn invalidate_all(&self) {
        self.picking.invalidate();
        self.placement.invalidate();
        self.backlog.invalidate();
    }
}

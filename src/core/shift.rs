//! Shift partitions. Each live report owns its own table; the boundaries
//! differ, so they are never merged into one shared partition.

use crate::models::report_kind::ReportKind;
use chrono::{NaiveDateTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRule {
    pub name: &'static str,
    pub start: u32,
    pub end: u32,
    /// `end` belongs to the shift (`start <= h <= end`) instead of `start <= h < end`.
    pub inclusive_end: bool,
}

impl ShiftRule {
    const fn open(name: &'static str, start: u32, end: u32) -> Self {
        Self {
            name,
            start,
            end,
            inclusive_end: false,
        }
    }

    const fn closed(name: &'static str, start: u32, end: u32) -> Self {
        Self {
            name,
            start,
            end,
            inclusive_end: true,
        }
    }

    pub fn contains(&self, hour: u32) -> bool {
        let below_end = if self.inclusive_end {
            hour <= self.end
        } else {
            hour < self.end
        };

        if self.start <= self.end {
            self.start <= hour && below_end
        } else {
            // wraps past midnight
            hour >= self.start || below_end
        }
    }

    pub fn hours(&self) -> Vec<u32> {
        (0..24).filter(|h| self.contains(*h)).collect()
    }
}

const PICKING_SHIFTS: &[ShiftRule] = &[
    ShiftRule::open("GECE", 0, 8),
    ShiftRule::open("GÜNDÜZ", 8, 16),
    ShiftRule::open("AKŞAM", 16, 24),
];

const PLACEMENT_SHIFTS: &[ShiftRule] = &[
    ShiftRule::open("Sabah", 8, 16),
    ShiftRule::closed("Öğlen", 16, 23),
    ShiftRule::open("Gece", 0, 8),
];

/// The shift in effect for a report at a given moment, with its hour buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveShift {
    pub name: &'static str,
    pub hours: Vec<u32>,
}

impl ActiveShift {
    pub fn covers(&self, hour: u32) -> bool {
        self.hours.contains(&hour)
    }
}

pub fn shift_table(kind: ReportKind) -> &'static [ShiftRule] {
    match kind {
        ReportKind::Placement => PLACEMENT_SHIFTS,
        ReportKind::Picking | ReportKind::Backlog => PICKING_SHIFTS,
    }
}

/// First matching rule wins; an hour no rule claims falls to the last one.
pub fn shift_for_hour(kind: ReportKind, hour: u32) -> ActiveShift {
    let table = shift_table(kind);
    let rule = table
        .iter()
        .find(|r| r.contains(hour))
        .or_else(|| table.last())
        .copied()
        .unwrap_or(ShiftRule::open("-", 0, 24));

    ActiveShift {
        name: rule.name,
        hours: rule.hours(),
    }
}

pub fn active_shift(kind: ReportKind, now: NaiveDateTime) -> ActiveShift {
    shift_for_hour(kind, now.hour())
}

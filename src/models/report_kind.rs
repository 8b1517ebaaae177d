use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// The three fixed report shapes served by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Picking,
    Placement,
    Backlog,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Picking => "picking",
            ReportKind::Placement => "placement",
            ReportKind::Backlog => "backlog",
        }
    }

    /// Title shown above the table.
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Picking => "Toplama KPI",
            ReportKind::Placement => "Yerleştirme KPI",
            ReportKind::Backlog => "Backlog Durumu",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

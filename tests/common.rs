#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use opsboard::config::Config;
use opsboard::core::source::{DateRange, RawTableSource};
use opsboard::errors::{AppError, AppResult};
use opsboard::models::raw_table::RawTable;
use opsboard::models::report_kind::ReportKind;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// Binary under test with HOME pointed at `home`, so no real config is read.
pub fn ops(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("opsboard");
    cmd.env("HOME", home).env("OPSBOARD_LOG", "warn");
    cmd
}

pub fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

/// Config whose every path lives under `dir`.
pub fn test_config(dir: &Path) -> Config {
    Config {
        source_dir: dir.join("exports").to_string_lossy().to_string(),
        report_dir: dir.join("reports").to_string_lossy().to_string(),
        presence_file: dir.join("active_users.json").to_string_lossy().to_string(),
        ..Config::default()
    }
}

pub const PICKING_CSV: &str = "\u{feff}Personel,Depo,07:00,08:00,09:00,10:00,TOPLAM
Ali,D1,99,25,75,0,199
Ayşe,D1,0,10,\"1,000\",0,1010
Veli,D2,4,0,abc,,4
Can,D2,0,50,50,0,100
";

pub const PLACEMENT_CSV: &str = "Kullanıcı,14:00,15:00,16:00,23:00
Mehmet,30,70,5,0
Zeynep,0,0,40,60
";

pub const BACKLOG_HEADERS: [&str; 12] = [
    "No", "Sipariş Tarihi", "Müşteri", "Depo", "Kanal", "Ürün", "Miktar", "Birim", "Kargo",
    "İl", "Not", "Statü",
];

pub fn backlog_row(date: &str, qty: &str, status: &str) -> String {
    format!("1,{date},ACME,D1,web,SKU,{qty},ad,X,İstanbul,-,{status}")
}

pub fn backlog_csv(rows: &[String]) -> String {
    let mut out = BACKLOG_HEADERS.join(",");
    out.push('\n');
    for r in rows {
        out.push_str(r);
        out.push('\n');
    }
    out
}

/// Temp dir with `exports/` populated with the given `<kind>.csv` files.
pub fn exports_dir(files: &[(ReportKind, &str)]) -> TempDir {
    let tmp = tempfile::tempdir().expect("tempdir");
    let exports = tmp.path().join("exports");
    fs::create_dir_all(&exports).expect("create exports");
    for (kind, content) in files {
        fs::write(exports.join(format!("{}.csv", kind.as_str())), content).expect("write csv");
    }
    tmp
}

/// In-memory source that counts fetches; kinds without a table fail.
pub struct StaticSource {
    tables: HashMap<ReportKind, RawTable>,
    delay: Duration,
    calls: Mutex<HashMap<ReportKind, usize>>,
    pub total_calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(tables: Vec<(ReportKind, RawTable)>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
            delay: Duration::ZERO,
            calls: Mutex::new(HashMap::new()),
            total_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self, kind: ReportKind) -> usize {
        *self.calls.lock().expect("calls").get(&kind).unwrap_or(&0)
    }
}

impl RawTableSource for StaticSource {
    fn fetch(&self, kind: ReportKind, _range: &DateRange) -> AppResult<RawTable> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        *self.calls.lock().expect("calls").entry(kind).or_insert(0) += 1;
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.tables.get(&kind).cloned().ok_or(AppError::Extraction {
            kind,
            reason: "portal unreachable".to_string(),
        })
    }
}

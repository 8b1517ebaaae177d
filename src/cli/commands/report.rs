use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::producer::{ProducedReport, ReportService};
use crate::core::source::CsvDirSource;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::models::backlog::BacklogReport;
use crate::models::report::ReportTable;
use crate::ui::messages::{header, info, warning};
use crate::utils::date::{local_now, parse_at};
use crate::utils::table::Table;
use std::sync::Arc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report {
        kind,
        at,
        export,
        format,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let now = match at {
        Some(s) => parse_at(s)?,
        None => local_now(),
    };

    let service = ReportService::new(Arc::new(CsvDirSource::new(&cfg.source_dir)), cfg);
    let report = service.produce(*kind, now);

    header(kind.title());
    println!("🕒 {}\n", now.format("%d.%m.%Y %H:%M:%S"));
    print_report(&report);

    if let Some(file) = export {
        ExportLogic::export(*kind, &report, *format, file, *force)?;
    }

    Ok(())
}

pub fn print_report(report: &ProducedReport) {
    match report {
        ProducedReport::Entity(t) => print_entity(t),
        ProducedReport::Backlog(b) => print_backlog(b),
    }
}

fn print_entity(t: &ReportTable) {
    let summary = t.summary();
    println!("Vardiya: {}", summary.shift);

    if t.is_empty() {
        warning("Veri yok");
        return;
    }

    println!(
        "Toplam Adet: {}  |  Ortalama KPI: {}  |  Çalışan Sayısı: {}\n",
        summary.total_quantity, summary.average_kpi, summary.headcount
    );

    let mut table = Table::new(t.headers());
    for row in t.to_rows() {
        table.add_row(row);
    }
    print!("{}", table.render());
}

fn print_backlog(b: &BacklogReport) {
    if b.is_empty() {
        warning("Backlog verisi yok");
        return;
    }

    let mut table = Table::new(BacklogReport::headers());
    for row in b.to_rows() {
        table.add_row(row);
    }
    print!("{}", table.render());

    println!(
        "\nİşlem Bekliyor: {}  |  Toplama İş Emri: {}  |  Toplandı: {}  |  Genel: {}",
        b.totals.pending, b.totals.work_order_created, b.totals.picked, b.totals.overall
    );
    if let Some(path) = &b.detail_csv {
        info(format!("Detail CSV: {}", path.display()));
    }
}

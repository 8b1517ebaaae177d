use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::cache::ReportCache;
use crate::core::presence::PresenceRegistry;
use crate::core::producer::ReportService;
use crate::core::source::CsvDirSource;
use crate::errors::AppResult;
use crate::models::report::ReportTable;
use crate::ui::messages::warning;
use crate::utils::date::local_now;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::info;

/// Handle the `watch` command: one refresh tick per interval, every report
/// served through the TTL cache.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Watch { ticks, interval } = cmd else {
        return Ok(());
    };

    let interval = Duration::from_secs(interval.unwrap_or(cfg.refresh_interval_secs));
    let service = ReportService::new(Arc::new(CsvDirSource::new(&cfg.source_dir)), cfg);
    let cache = ReportCache::new(service, cfg);
    let registry = PresenceRegistry::from_config(cfg);

    let mut tick: u64 = 0;
    loop {
        tick += 1;
        let now = local_now();
        info!(tick, "refresh tick");

        let online = match registry.touch(&cfg.viewer_id, now) {
            Ok(entries) => entries.len(),
            Err(e) => {
                warning(format!("Presence update failed: {e}"));
                0
            }
        };

        println!("🕒 Son Güncelleme: {}  |  🟢 Online: {online}", now.format("%d.%m.%Y %H:%M:%S"));
        println!("  {}", entity_line(&cache.picking()));
        println!("  {}", entity_line(&cache.placement()));

        let backlog = cache.backlog();
        if backlog.is_empty() {
            println!("  backlog: veri yok");
        } else {
            println!(
                "  backlog: {} gün, genel toplam {}",
                backlog.pivot.len(),
                backlog.totals.overall
            );
        }

        if *ticks != 0 && tick >= *ticks {
            break;
        }
        thread::sleep(interval);
    }

    Ok(())
}

fn entity_line(t: &ReportTable) -> String {
    if t.is_empty() {
        return format!("{} [{}]: veri yok", t.kind, t.shift);
    }
    let s = t.summary();
    format!(
        "{} [{}]: {} adet, {} çalışan, ortalama KPI {}",
        t.kind, s.shift, s.total_quantity, s.headcount, s.average_kpi
    )
}

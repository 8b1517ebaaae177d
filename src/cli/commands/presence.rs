use crate::cli::parser::{Commands, PresenceAction};
use crate::config::Config;
use crate::core::presence::{PresenceMap, PresenceRegistry};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::date::local_now;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Presence { action } = cmd else {
        return Ok(());
    };

    let registry = PresenceRegistry::from_config(cfg);

    let entries = match action {
        PresenceAction::Touch { viewer } => {
            let viewer = viewer.as_deref().unwrap_or(&cfg.viewer_id);
            registry.touch(viewer, local_now())?
        }
        PresenceAction::List => registry.snapshot()?,
    };

    print_presence(&entries);
    Ok(())
}

pub fn print_presence(entries: &PresenceMap) {
    header("Admin Paneli");
    println!("🟢 Online Kullanıcı: {}\n", entries.len());

    let mut table = Table::new(vec!["Kullanıcı".to_string(), "Son Görülme".to_string()]);
    for (viewer, seen) in entries {
        table.add_row(vec![viewer.clone(), seen.clone()]);
    }
    print!("{}", table.render());
}

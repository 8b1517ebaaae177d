use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// Creates the config directory, the extract/report directories and, unless
/// running with `--test`, writes the effective configuration to disk.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    println!("⚙️  Initializing opsboard…");

    cfg.init_all(cli.test)?;

    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("📥 Extracts    : {}", cfg.source_dir);
    println!("📤 Reports     : {}", cfg.report_dir);
    println!("👥 Presence    : {}", cfg.presence_file);

    success("opsboard initialization completed!");
    Ok(())
}

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, success, warning};
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    if *print_config {
        println!("📄 Current configuration:\n");
        println!("{}", cfg.to_yaml()?);
    }

    if *edit_config {
        let path = Config::config_file();
        if !path.exists() {
            warning("No configuration file yet, run `opsboard init` first.");
            return Ok(());
        }

        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let candidates = match editor {
            Some(e) if *e != default_editor => vec![e.clone(), default_editor],
            _ => vec![default_editor],
        };

        for ed in &candidates {
            match Command::new(ed).arg(&path).status() {
                Ok(s) if s.success() => {
                    success(format!("Configuration file edited with '{ed}'"));
                    return Ok(());
                }
                _ => warning(format!("Editor '{ed}' not available")),
            }
        }
        error("Failed to edit configuration file");
    }

    Ok(())
}

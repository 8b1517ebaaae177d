use crate::core::presence::DEFAULT_WINDOW_SECS;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the portal exporter drops `<kind>.csv` extracts into
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    /// Where per-run backlog detail CSVs are written
    #[serde(default = "default_report_dir")]
    pub report_dir: String,
    #[serde(default = "default_presence_file")]
    pub presence_file: String,
    #[serde(default = "default_viewer_id")]
    pub viewer_id: String,
    #[serde(default = "default_presence_window")]
    pub presence_window_secs: u64,
    #[serde(default = "default_entity_ttl")]
    pub picking_ttl_secs: u64,
    #[serde(default = "default_entity_ttl")]
    pub placement_ttl_secs: u64,
    #[serde(default = "default_backlog_ttl")]
    pub backlog_ttl_secs: u64,
    #[serde(default = "default_backlog_days")]
    pub backlog_days: u32,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_picking_capacity")]
    pub picking_capacity: u32,
    #[serde(default = "default_placement_capacity")]
    pub placement_capacity: u32,
}

fn default_source_dir() -> String {
    Config::config_dir().join("exports").to_string_lossy().to_string()
}
fn default_report_dir() -> String {
    Config::config_dir().join("reports").to_string_lossy().to_string()
}
fn default_presence_file() -> String {
    Config::config_dir()
        .join("active_users.json")
        .to_string_lossy()
        .to_string()
}
fn default_viewer_id() -> String {
    "Ziyaretçi".to_string()
}
fn default_presence_window() -> u64 {
    DEFAULT_WINDOW_SECS
}
fn default_entity_ttl() -> u64 {
    120
}
fn default_backlog_ttl() -> u64 {
    300
}
fn default_backlog_days() -> u32 {
    30
}
fn default_refresh_interval() -> u64 {
    60
}
fn default_picking_capacity() -> u32 {
    50
}
fn default_placement_capacity() -> u32 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            report_dir: default_report_dir(),
            presence_file: default_presence_file(),
            viewer_id: default_viewer_id(),
            presence_window_secs: default_presence_window(),
            picking_ttl_secs: default_entity_ttl(),
            placement_ttl_secs: default_entity_ttl(),
            backlog_ttl_secs: default_backlog_ttl(),
            backlog_days: default_backlog_days(),
            refresh_interval_secs: default_refresh_interval(),
            picking_capacity: default_picking_capacity(),
            placement_capacity: default_placement_capacity(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("opsboard")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".opsboard")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("opsboard.conf")
    }

    pub fn log_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Create the config directory, the working directories and (unless
    /// `is_test`) the config file itself.
    pub fn init_all(&self, is_test: bool) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        fs::create_dir_all(&self.source_dir)?;
        fs::create_dir_all(&self.report_dir)?;

        if !is_test {
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(self.to_yaml()?.as_bytes())?;
        }

        Ok(())
    }
}

use crate::export::ExportFormat;
use crate::models::report_kind::ReportKind;
use clap::{Parser, Subcommand};

/// Command-line interface definition for opsboard
#[derive(Parser)]
#[command(
    name = "opsboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Shift-scoped warehouse KPI reports (picking, placement, backlog) and active-viewer tracking",
    long_about = None
)]
pub struct Cli {
    /// Override the directory the `<kind>.csv` extracts are read from
    #[arg(global = true, long = "source", value_name = "DIR")]
    pub source: Option<String>,

    /// Override the directory backlog detail CSVs are written to
    #[arg(global = true, long = "reports", value_name = "DIR")]
    pub reports: Option<String>,

    /// Override the presence registry file
    #[arg(global = true, long = "presence", value_name = "FILE")]
    pub presence: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and working directories
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL)
        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Build one report from the latest extract and print it
    Report {
        /// Report to build
        #[arg(value_enum)]
        kind: ReportKind,

        /// Pin the wall-clock used for shift selection and date ranges.
        ///
        /// Accepted: "YYYY-MM-DD HH:MM", "YYYY-MM-DD HH:MM:SS", "YYYY-MM-DD".
        #[arg(long = "at", value_name = "DATETIME")]
        at: Option<String>,

        /// Also write the report to this file
        #[arg(long = "export", value_name = "FILE")]
        export: Option<String>,

        /// Export format
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Overwrite the export file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Active-viewer registry
    Presence {
        #[command(subcommand)]
        action: PresenceAction,
    },

    /// Refresh all reports on the configured interval
    Watch {
        /// Stop after this many refresh ticks (0 = run until interrupted)
        #[arg(long, default_value_t = 0)]
        ticks: u64,

        /// Override the refresh interval in seconds
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
    },
}

#[derive(Subcommand)]
pub enum PresenceAction {
    /// Mark a viewer as seen now and purge stale viewers
    Touch {
        /// Viewer id (defaults to `viewer_id` from the config)
        #[arg(long)]
        viewer: Option<String>,
    },
    /// Show the registry without modifying it
    List,
}

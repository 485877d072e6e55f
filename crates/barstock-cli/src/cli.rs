//! Command-line arguments for `barstock`.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use barstock_cli::logging::{LogConfig, LogFormat};
use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "barstock",
    version,
    about = "Browse and edit the bar inventory",
    long_about = "Browse and edit the bar inventory held by an inventory server.\n\n\
                  Edits and deletes are sent to the server first; the local table only\n\
                  changes once the server confirms them."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Client configuration file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Inventory server base URL, overriding the configuration file.
    #[arg(long = "url", value_name = "URL", global = true)]
    pub url: Option<String>,
}

impl Cli {
    /// Logging settings implied by the flags.
    ///
    /// `--log-level` beats `-v`/`-q`, and either one disables `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig {
            level_filter: explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit.is_none() && !self.verbosity.is_present(),
            with_ansi,
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
            log_data: self.log_data,
            ..LogConfig::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the column model.
    Columns,

    /// Load and print the inventory table.
    List(ListArgs),

    /// Change one cell of a row.
    Edit(EditArgs),

    /// Remove a row after confirmation.
    Delete(DeleteArgs),

    /// Write the loaded inventory as CSV.
    Export(ExportArgs),
}

#[derive(Parser)]
pub struct ListArgs {
    /// Column name to order by.
    #[arg(long = "sort", value_name = "COLUMN", default_value = "Category")]
    pub sort: String,

    /// Sort in descending order.
    #[arg(long = "desc")]
    pub descending: bool,
}

#[derive(Parser)]
pub struct EditArgs {
    /// Row index as shown in the `#` column of `list`.
    #[arg(value_name = "ROW")]
    pub row: usize,

    /// Column name, e.g. `ABV` or `Price_Paid`.
    #[arg(value_name = "COLUMN")]
    pub column: String,

    /// New value. Booleans accept on/off, true/false, yes/no.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Parser)]
pub struct DeleteArgs {
    /// Row index as shown in the `#` column of `list`.
    #[arg(value_name = "ROW")]
    pub row: usize,

    /// Skip the confirmation prompt.
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("barstock").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn default_flags_defer_to_rust_log() {
        let config = parse(&["columns"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert!(!config.log_data);
    }

    #[test]
    fn explicit_level_beats_verbosity() {
        let config = parse(&["-vv", "--log-level", "error", "list"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::ERROR);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn verbosity_disables_rust_log() {
        let config = parse(&["-v", "--log-format", "json", "--log-data", "columns"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::INFO);
        assert!(!config.use_env_filter);
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.log_data);
    }

    #[test]
    fn log_file_turns_off_auto_color() {
        let config = parse(&["--log-file", "barstock.log", "columns"]).log_config();
        assert!(!config.with_ansi);
        assert_eq!(config.log_file, Some(PathBuf::from("barstock.log")));
    }
}

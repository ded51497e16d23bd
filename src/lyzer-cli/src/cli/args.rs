//! CLI argument structures and parsing.
//!
//! Defines all command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};

use super::styles::{AFTER_HELP, get_styles};
use crate::load_cmd::LoadCli;
use crate::update_cmd::UpdateCli;

/// Log verbosity level for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors (default)
    #[default]
    Warn,
    /// Show informational messages, warnings, and errors
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Lyzer-ETL - load Formula 1 data into MongoDB
#[derive(Parser)]
#[command(name = "lyzer")]
#[command(author, version)]
#[command(about = "Lyzer-ETL - load Formula 1 data into MongoDB", long_about = None)]
#[command(styles = get_styles(), after_help = AFTER_HELP)]
pub struct Cli {
    /// Enable verbose output (same as --log-level debug)
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,

    /// Enable trace-level logging for debugging
    #[arg(long = "trace", global = true)]
    pub trace: bool,

    /// Set log verbosity level (error, warn, info, debug, trace)
    #[arg(
        long = "log-level",
        short = 'L',
        global = true,
        value_enum,
        default_value = "warn",
        help_heading = "Debugging"
    )]
    pub log_level: LogLevel,

    /// Enable debug mode: writes ALL trace-level logs to ./debug.txt
    #[arg(long = "debug", global = true, help_heading = "Debugging")]
    pub debug: bool,

    /// Skip the automatic daily update check
    #[arg(long = "no-auto-update", global = true)]
    pub no_auto_update: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective log level after applying the shorthand flags.
    ///
    /// `--trace` beats `--verbose`, which beats `LYZER_LOG_LEVEL`, which beats
    /// `--log-level`.
    pub fn effective_log_level(&self, env_level: Option<&str>) -> LogLevel {
        if self.trace {
            LogLevel::Trace
        } else if self.verbose {
            LogLevel::Debug
        } else {
            env_level
                .and_then(LogLevel::from_str_loose)
                .unwrap_or(self.log_level)
        }
    }

    /// Whether the implicit update check should run before the command.
    pub fn wants_auto_update(&self) -> bool {
        !self.no_auto_update && !matches!(self.command, Commands::Update(_) | Commands::Version)
    }

    /// Whether the command needs a config file (and so first-run setup).
    pub fn needs_config(&self) -> bool {
        !matches!(self.command, Commands::Version)
    }
}

/// CLI subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check for a newer release and download it
    #[command(display_order = 1)]
    Update(UpdateCli),

    /// Print the current version
    #[command(display_order = 2)]
    Version,

    /// Load data into the database
    #[command(display_order = 3)]
    Load(LoadCli),
}

/// Target of `lyzer load`.
#[derive(Debug, Subcommand)]
pub enum LoadCommand {
    /// Load a season's race schedule
    Schedule(ScheduleArgs),
}

/// Arguments for `lyzer load schedule`.
#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Season to load; prompted for when omitted
    #[arg(long, short = 'y')]
    pub year: Option<i32>,
}

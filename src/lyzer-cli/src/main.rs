//! Lyzer CLI - Main entry point.
//!
//! Sets up logging, creates the config on first run, runs the daily update
//! check, and dispatches the command.

use anyhow::Result;
use clap::Parser;

use lyzer_cli::cli::handlers::config_store;
use lyzer_cli::cli::{Cli, dispatch_command};
use lyzer_cli::setup::ensure_config;
use lyzer_cli::update_cmd::auto_update;

/// Guard that ensures debug log file is properly flushed when dropped.
struct DebugLogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Set up debug file logging that writes ALL trace-level logs to ./debug.txt.
fn setup_debug_file_logging() -> Result<DebugLogGuard> {
    use std::fs::File;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let debug_file_path = std::env::current_dir()?.join("debug.txt");

    let file = File::create(&debug_file_path).map_err(|e| {
        anyhow::anyhow!("Failed to create debug.txt: {e}. Check write permissions.")
    })?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("trace"))
        .with(file_layer)
        .init();

    eprintln!(
        "Debug mode enabled: logging to {}",
        debug_file_path.display()
    );

    Ok(DebugLogGuard { _guard: guard })
}

/// Console logging to stderr at the level chosen by flags and environment.
fn setup_console_logging(cli: &Cli) {
    let env_level = std::env::var("LYZER_LOG_LEVEL").ok();
    let level = cli.effective_log_level(env_level.as_deref());

    let filter_str = if std::env::var("RUST_LOG").is_ok() {
        format!(
            "error,lyzer_cli={0},lyzer_update={0},lyzer_schedule={0},lyzer_storage={0},lyzer_common={0}",
            level.as_filter_str()
        )
    } else {
        level.as_filter_str().to_string()
    };

    tracing_subscriber::fmt()
        .with_env_filter(&filter_str)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _debug_guard = if cli.debug {
        Some(setup_debug_file_logging()?)
    } else {
        setup_console_logging(&cli);
        None
    };

    if cli.needs_config() {
        let store = config_store()?;
        ensure_config(&store).await?;

        if cli.wants_auto_update() && auto_update(store).await {
            tracing::info!("new build downloaded, exiting");
            return Ok(());
        }
    }

    dispatch_command(cli).await
}

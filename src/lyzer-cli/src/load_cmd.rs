//! Load command - pull data from the schedule API into MongoDB.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use lyzer_common::{ConfigStore, FileConfigStore};
use lyzer_schedule::{DEFAULT_SCHEDULE_URL, ScheduleClient, ScheduleError, validate_year};
use lyzer_storage::{MongoService, ScheduleStore};

use crate::cli::args::{LoadCommand, ScheduleArgs};
use crate::styled_output::{print_error, print_success};
use crate::table::render_schedule_table;

/// Load CLI.
#[derive(Debug, Parser)]
pub struct LoadCli {
    #[command(subcommand)]
    pub command: LoadCommand,
}

impl LoadCli {
    /// Run the load command.
    ///
    /// Failures are printed, not returned, so a bad year or an API outage
    /// still exits normally.
    pub async fn run(self, store: Arc<FileConfigStore>) -> Result<()> {
        match self.command {
            LoadCommand::Schedule(args) => {
                if let Err(e) = run_schedule(args, store.as_ref()).await {
                    tracing::warn!(error = %e, "schedule load failed");
                    print_error(&load_error_message(&e));
                }
            }
        }
        Ok(())
    }
}

async fn run_schedule(args: ScheduleArgs, store: &dyn ConfigStore) -> Result<()> {
    let year = match args.year {
        Some(year) => year,
        None => prompt_year(&mut std::io::stdin().lock())?,
    };
    let year = validate_year(year, true)?;

    let config = store.load().context("Failed to read config")?;
    let client = ScheduleClient::with_url(
        config
            .schedule_url
            .unwrap_or_else(|| DEFAULT_SCHEDULE_URL.to_string()),
    );
    let service = MongoService::connect(&config.mongo_uri).await?;

    let mut stdout = std::io::stdout();
    let written = load_schedule(&client, Arc::new(service), year, &mut stdout).await?;
    print_success(&format!("Stored {written} races for {year}"));
    Ok(())
}

/// Ask for a season on the terminal.
pub fn prompt_year(input: &mut impl BufRead) -> Result<i32> {
    print!("Year: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let line = line.trim();
    line.parse().map_err(|_| {
        ScheduleError::Validation(format!("'{line}' is not a valid year.")).into()
    })
}

/// Fetch, display, and store one season.
///
/// The write runs on its own task while the table is printed, and is
/// awaited before returning.
pub async fn load_schedule(
    client: &ScheduleClient,
    store: Arc<dyn ScheduleStore>,
    year: i32,
    out: &mut impl Write,
) -> Result<usize> {
    let schedules = client.get_schedules(year).await?;

    let to_store = schedules.clone();
    let writer = tokio::spawn(async move { store.insert_schedules(year, &to_store).await });

    let printed = write!(out, "{}", render_schedule_table(&schedules)).and_then(|()| out.flush());

    // The write must finish even when printing failed (e.g. a closed pipe).
    let stored = writer.await.context("Schedule write task failed")?;
    printed.context("Failed to print schedule")?;
    Ok(stored?)
}

/// Console message for a failed load.
pub fn load_error_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ScheduleError>() {
        Some(ScheduleError::Validation(message)) => format!("ValidationError: {message}"),
        Some(schedule_error) => match schedule_error.status_code() {
            Some(status) => format!("ScheduleFetchError: {status}"),
            None => format!("Error: {error:#}"),
        },
        None => format!("Error: {error:#}"),
    }
}

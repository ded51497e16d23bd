//! Update command - check for and download a newer release.
//!
//! The same flow runs implicitly (unforced) before other commands; see
//! [`auto_update`].

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;
use lyzer_common::{ConfigStore, FileConfigStore};
use lyzer_update::{
    GithubReleaseClient, HttpDownloader, RELEASES_URL, ReleaseCandidate, UpdateError,
    UpdateOrchestrator, UpdateOutcome, UpdatePrompt, UpdateResult, format_bytes, is_affirmative,
};

use crate::styled_output::{print_error, print_info, print_success, print_warning};

/// Update CLI.
#[derive(Debug, Parser)]
pub struct UpdateCli {
    /// Override the release listing URL
    #[arg(long, hide = true)]
    pub url: Option<String>,
}

impl UpdateCli {
    /// Run a forced update check.
    ///
    /// Errors are reported to the console rather than returned.
    pub async fn run(self, store: Arc<FileConfigStore>) -> Result<()> {
        let prompt = Arc::new(ConsolePrompt::stdin());
        let orchestrator = build_orchestrator(store, self.url, prompt);

        let outcome = match orchestrator {
            Ok(mut orchestrator) => orchestrator.run(true).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(outcome) => report_outcome(&outcome),
            Err(e) => report_update_error(&e),
        }
        Ok(())
    }
}

/// Where prompt answers are read from.
enum PromptInput {
    /// The process-wide stdin handle, so no input is buffered past the answer.
    Stdin,
    Reader(Mutex<Box<dyn BufRead + Send>>),
}

/// Terminal-backed confirmation prompt.
pub struct ConsolePrompt {
    input: PromptInput,
}

impl ConsolePrompt {
    /// Prompt that reads answers from stdin.
    pub fn stdin() -> Self {
        Self {
            input: PromptInput::Stdin,
        }
    }

    /// Prompt that reads answers from `input`.
    pub fn with_input(input: impl BufRead + Send + 'static) -> Self {
        Self {
            input: PromptInput::Reader(Mutex::new(Box::new(input))),
        }
    }

    /// Read exactly one line of input.
    fn read_answer(&self) -> std::io::Result<String> {
        let mut answer = String::new();
        match &self.input {
            PromptInput::Stdin => {
                std::io::stdin().read_line(&mut answer)?;
            }
            PromptInput::Reader(reader) => {
                reader
                    .lock()
                    .map_err(|_| std::io::Error::other("prompt input poisoned"))?
                    .read_line(&mut answer)?;
            }
        }
        Ok(answer)
    }
}

impl UpdatePrompt for ConsolePrompt {
    fn checking(&self) {
        println!("Checking for updates...");
    }

    fn confirm(&self, candidate: &ReleaseCandidate) -> UpdateResult<bool> {
        println!("New version found: {}", candidate.tag);
        print!("Would you like to update? [y/N]: ");
        std::io::stdout().flush()?;

        let answer = self.read_answer()?;
        Ok(is_affirmative(&answer))
    }
}

/// Wire the orchestrator to the GitHub release source and HTTP downloader.
///
/// The release URL comes from `url_override`, then the config's
/// `releasesUrl`, then the built-in default.
pub fn build_orchestrator(
    store: Arc<FileConfigStore>,
    url_override: Option<String>,
    prompt: Arc<dyn UpdatePrompt>,
) -> UpdateResult<UpdateOrchestrator> {
    let configured = store.load()?.releases_url;
    let url = url_override
        .or(configured)
        .unwrap_or_else(|| RELEASES_URL.to_string());

    UpdateOrchestrator::new(
        store,
        Arc::new(GithubReleaseClient::with_url(url)),
        Arc::new(HttpDownloader::new()),
        prompt,
    )
}

/// Console line for a finished update run, if it warrants one.
pub fn outcome_message(outcome: &UpdateOutcome) -> Option<String> {
    match outcome {
        UpdateOutcome::NotDue => None,
        UpdateOutcome::UpToDate { .. } => Some("No new version found".to_string()),
        UpdateOutcome::Declined { tag } => Some(format!("Skipped update to {tag}.")),
        UpdateOutcome::Downloaded {
            tag,
            destination,
            bytes,
        } => Some(format!(
            "Downloaded {tag} ({}) to {}",
            format_bytes(*bytes),
            destination.display()
        )),
    }
}

fn report_outcome(outcome: &UpdateOutcome) {
    let Some(message) = outcome_message(outcome) else {
        return;
    };
    match outcome {
        UpdateOutcome::Downloaded { .. } => {
            print_success(&message);
            print_info("Update complete. Start lyzer again to use the new version.");
        }
        _ => println!("{message}"),
    }
}

/// User-facing lines for an update failure.
pub fn update_error_lines(error: &UpdateError) -> Vec<String> {
    let first = match error.status_code() {
        Some(status) => format!("HTTP Error: {status}"),
        None => error.to_string(),
    };
    vec![first, "Could not check for updates.".to_string()]
}

fn report_update_error(error: &UpdateError) {
    tracing::warn!(error = %error, "update check failed");
    for line in update_error_lines(error) {
        print_error(&line);
    }
}

/// Unforced update check run before other commands.
///
/// Never fails: problems are logged and reported as warnings. Returns whether
/// a new build was downloaded and the process should stop.
pub async fn auto_update(store: Arc<FileConfigStore>) -> bool {
    let prompt = Arc::new(ConsolePrompt::stdin());
    let mut orchestrator = match build_orchestrator(store, None, prompt) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            tracing::warn!(error = %e, "automatic update check skipped");
            return false;
        }
    };

    match orchestrator.run(false).await {
        Ok(outcome) => {
            if outcome.checked() {
                report_outcome(&outcome);
            }
            outcome.restart_required()
        }
        Err(e) => {
            tracing::warn!(error = %e, "automatic update check failed");
            for line in update_error_lines(&e) {
                print_warning(&line);
            }
            false
        }
    }
}

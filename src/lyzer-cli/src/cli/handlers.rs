//! Command handlers for the CLI.

use std::sync::Arc;

use anyhow::{Context, Result};
use lyzer_common::FileConfigStore;

use super::args::{Cli, Commands};

/// Text printed by `lyzer version`.
pub fn version_line() -> String {
    format!("Lyzer-ETL version {}", lyzer_update::CURRENT_VERSION)
}

/// Dispatch the parsed command.
pub async fn dispatch_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Version => {
            println!("{}", version_line());
            Ok(())
        }
        Commands::Update(update_cli) => update_cli.run(config_store()?).await,
        Commands::Load(load_cli) => load_cli.run(config_store()?).await,
    }
}

/// The config store at the standard location.
pub fn config_store() -> Result<Arc<FileConfigStore>> {
    let store = FileConfigStore::default_location().context("Failed to locate config file")?;
    Ok(Arc::new(store))
}

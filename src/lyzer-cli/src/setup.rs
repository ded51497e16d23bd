//! First-run setup: ask for a MongoDB connection string and write the config.

use std::future::Future;
use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use lyzer_common::{ConfigStore, FileConfigStore, LyzerConfig};

use crate::styled_output::{print_info, print_success, print_warning};

/// Create the config file when it does not exist yet.
///
/// Returns whether setup ran.
pub async fn ensure_config(store: &FileConfigStore) -> Result<bool> {
    ensure_config_with(store, |uri| async move {
        lyzer_storage::test_connection(&uri).await
    })
    .await
}

/// [`ensure_config`] with a custom connection check, reading from the shared
/// stdin handle so later prompts still see the remaining input.
pub async fn ensure_config_with<F, Fut>(store: &FileConfigStore, check: F) -> Result<bool>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = bool>,
{
    if store.exists() {
        return Ok(false);
    }

    print_info("Setting up config");
    create_config(store, &mut std::io::stdin().lock(), check).await?;
    Ok(true)
}

/// Prompt until `check` accepts a connection string, then save a fresh config.
///
/// The saved config has an empty `lastChecked`, so the first unforced update
/// check is due immediately.
pub async fn create_config<R, F, Fut>(
    store: &dyn ConfigStore,
    input: &mut R,
    mut check: F,
) -> Result<LyzerConfig>
where
    R: BufRead,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = bool>,
{
    let uri = loop {
        print!("\nEnter your mongo connection string: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("No connection string entered");
        }
        let uri = line.trim().to_string();

        if check(uri.clone()).await {
            break uri;
        }
        print_warning("Could not connect with that connection string, try again.");
    };

    let config = LyzerConfig::new(uri);
    store.save(&config).context("Failed to write config")?;
    print_success("Config file updated");
    tracing::info!("config created");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_create_config_retries_until_valid() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(tmp.path().join(".lyzer").join("config.json"));
        let mut input = Cursor::new("mongodb://bad\nmongodb://good:27017\n");
        let mut attempts = Vec::new();

        let config = create_config(&store, &mut input, |uri| {
            attempts.push(uri.clone());
            async move { uri.contains("good") }
        })
        .await
        .unwrap();

        assert_eq!(attempts, vec!["mongodb://bad", "mongodb://good:27017"]);
        assert_eq!(config.mongo_uri, "mongodb://good:27017");
        assert!(config.last_checked.is_empty());

        let saved = store.load().unwrap();
        assert_eq!(saved.mongo_uri, "mongodb://good:27017");
        assert!(saved.last_checked.is_empty());
        assert!(!saved.last_updated.is_empty());
    }

    #[tokio::test]
    async fn test_create_config_stops_on_end_of_input() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(tmp.path().join("config.json"));
        let mut input = Cursor::new("mongodb://bad\n");

        let result = create_config(&store, &mut input, |_| async { false }).await;
        assert!(result.is_err());
        assert!(!store.exists());
    }

    const SETUP_CHILD_ENV: &str = "LYZER_SETUP_CHILD";

    /// Child half of `test_setup_leaves_update_answer_on_stdin`.
    #[tokio::test]
    #[ignore]
    async fn setup_stdin_child() {
        let Some(dir) = std::env::var_os(SETUP_CHILD_ENV) else {
            return;
        };
        let store = FileConfigStore::new(std::path::PathBuf::from(dir).join("config.json"));
        let ran = ensure_config_with(&store, |_| async { true }).await.unwrap();

        let prompt = crate::update_cmd::ConsolePrompt::stdin();
        let candidate = lyzer_update::ReleaseCandidate::new("v9.0.0", Vec::new());
        let confirmed = lyzer_update::UpdatePrompt::confirm(&prompt, &candidate).unwrap();
        println!("\nsetup={ran} confirm={confirmed}");
    }

    #[test]
    fn test_setup_leaves_update_answer_on_stdin() {
        use std::process::{Command, Stdio};

        let tmp = tempfile::tempdir().unwrap();
        let mut child = Command::new(std::env::current_exe().unwrap())
            .args([
                "--exact",
                "setup::tests::setup_stdin_child",
                "--ignored",
                "--nocapture",
                "--test-threads=1",
            ])
            .env(SETUP_CHILD_ENV, tmp.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();

        child
            .stdin
            .take()
            .unwrap()
            .write_all(b"mongodb://localhost:27017\ny\n")
            .unwrap();
        let output = child.wait_with_output().unwrap();
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(output.status.success(), "{stdout}");
        assert!(stdout.contains("setup=true confirm=true"), "{stdout}");
        let saved = FileConfigStore::new(tmp.path().join("config.json")).load().unwrap();
        assert_eq!(saved.mongo_uri, "mongodb://localhost:27017");
    }

    #[tokio::test]
    async fn test_ensure_config_skips_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(tmp.path().join("config.json"));
        store.save(&LyzerConfig::new("mongodb://localhost:27017")).unwrap();

        assert!(!ensure_config(&store).await.unwrap());
    }
}

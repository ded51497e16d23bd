//! Download of release assets to a fixed local path.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;

use crate::error::{UpdateError, UpdateResult};

/// Fetches a URL into a file. Blocking from the caller's point of view, no resume or retry.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `url` to `destination`, returning the number of bytes written.
    async fn fetch(&self, url: &str, destination: &Path) -> UpdateResult<u64>;
}

/// Format bytes as human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// HTTP downloader for release assets.
#[derive(Clone)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    /// Create a downloader with the long download timeout.
    pub fn new() -> Self {
        let client = lyzer_common::create_download_client().unwrap_or_else(|e| {
            tracing::warn!("{e}, falling back to a default client");
            Client::new()
        });
        Self::with_client(client)
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

/// Sibling path the body is streamed into before the final rename.
fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

/// Stream the response body into `partial` and make it executable.
async fn write_body(response: reqwest::Response, url: &str, partial: &Path) -> UpdateResult<u64> {
    let mut file = tokio::fs::File::create(partial).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| UpdateError::from_request(url, e))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
    }

    file.flush().await?;
    drop(file);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(partial, std::fs::Permissions::from_mode(0o755)).await?;
    }

    Ok(downloaded)
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn fetch(&self, url: &str, destination: &Path) -> UpdateResult<u64> {
        tracing::info!(%url, destination = %destination.display(), "downloading release asset");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| UpdateError::from_request(url, e))?;

        if !response.status().is_success() {
            return Err(UpdateError::DownloadFailed {
                message: format!("HTTP {}", response.status()),
            });
        }

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let partial = partial_path(destination);
        let downloaded = match write_body(response, url, &partial).await {
            Ok(downloaded) => downloaded,
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                    tracing::debug!(error = %cleanup, "could not remove partial download");
                }
                return Err(e);
            }
        };

        tokio::fs::rename(&partial, destination).await?;

        tracing::info!(size = %format_bytes(downloaded), "download complete");
        Ok(downloaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(1073741824), "1.0 GB");
    }

    #[test]
    fn test_partial_path_is_sibling() {
        assert_eq!(
            partial_path(Path::new("/home/racer/lyzer")),
            PathBuf::from("/home/racer/lyzer.part")
        );
    }

    #[tokio::test]
    async fn test_fetch_writes_body_to_destination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lyzer"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"#!/bin/sh\necho lyzer\n".to_vec()))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("lyzer");
        let bytes = HttpDownloader::new()
            .fetch(&format!("{}/lyzer", server.uri()), &dest)
            .await
            .unwrap();

        assert_eq!(bytes, 21);
        assert_eq!(
            std::fs::read_to_string(&dest).unwrap(),
            "#!/bin/sh\necho lyzer\n"
        );
        assert!(!partial_path(&dest).exists());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&dest).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }
    }

    #[tokio::test]
    async fn test_fetch_truncated_body_removes_partial_file() {
        use tokio::io::AsyncReadExt;

        // Promises 100 bytes, sends 7, then hangs up.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\npartial")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("lyzer");
        let result = HttpDownloader::new()
            .fetch(&format!("http://{addr}/lyzer"), &dest)
            .await;

        assert!(result.is_err());
        assert!(!dest.exists());
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_fetch_non_success_fails_without_writing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("lyzer");
        let err = HttpDownloader::new()
            .fetch(&format!("{}/missing", server.uri()), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateError::DownloadFailed { .. }));
        assert!(!dest.exists());
    }
}

use super::retry::{RetryDecision, RetryPolicy};
use super::task::{AssetTask, DownloadOutcome, FetchMode};
use crate::config::DownloadConfig;
use crate::{HarvestError, Result};
use reqwest::header::{COOKIE, REFERER, USER_AGENT};
use reqwest::{Client, Response};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// User-Agent sent when the session does not provide one
pub const FALLBACK_USER_AGENT: &str = "Mozilla/5.0";

/// Builds the HTTP client used for asset downloads
pub fn build_download_client(config: &DownloadConfig) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(FALLBACK_USER_AGENT)
        .timeout(config.request_timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .build()
}

/// Retrieves assets into their target folders with bounded retries
#[derive(Clone)]
pub struct AssetDownloader {
    client: Client,
    policy: RetryPolicy,
}

impl AssetDownloader {
    pub fn new(config: &DownloadConfig) -> Result<Self> {
        Ok(Self {
            client: build_download_client(config)?,
            policy: RetryPolicy::from_config(config),
        })
    }

    /// Downloads one asset
    ///
    /// The target folder is created first, even if every attempt then
    /// fails. An existing file at the target path is overwritten. Images
    /// (`.jpg`, `.jpeg`, `.png`) are fetched directly; everything else is
    /// streamed with the task's cookies, User-Agent and Referer.
    ///
    /// # Returns
    ///
    /// A [`DownloadOutcome`]; failures never propagate
    pub async fn download(&self, task: &AssetTask) -> DownloadOutcome {
        let path = task.target_path();

        if let Err(e) = tokio::fs::create_dir_all(&task.target_folder).await {
            tracing::error!(
                "Cannot create folder {}: {}",
                task.target_folder.display(),
                e
            );
            return DownloadOutcome {
                success: false,
                path,
                bytes_written: 0,
                attempts: 0,
                error: Some(e.to_string()),
            };
        }

        let mode = task.fetch_mode();
        let mut attempt = 1u32;
        loop {
            let result = match mode {
                FetchMode::Direct => self.fetch_direct(&task.source_url, &path).await,
                FetchMode::Streaming => self.fetch_streaming(task, &path).await,
            };

            match result {
                Ok(bytes_written) => {
                    tracing::info!(
                        "Downloaded {} ({} bytes)",
                        path.display(),
                        bytes_written
                    );
                    return DownloadOutcome {
                        success: true,
                        path,
                        bytes_written,
                        attempts: attempt,
                        error: None,
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        "Attempt {}/{} failed for {}: {}",
                        attempt,
                        self.policy.max_attempts,
                        task.source_url,
                        e
                    );
                    match self.policy.decide(attempt) {
                        RetryDecision::RetryAfter(pause) => {
                            tokio::time::sleep(pause).await;
                            attempt += 1;
                        }
                        RetryDecision::NoRetry => {
                            let abandoned = HarvestError::Download {
                                url: task.source_url.clone(),
                                attempts: attempt,
                                message: e.to_string(),
                            };
                            tracing::error!("{}", abandoned);
                            return DownloadOutcome {
                                success: false,
                                path,
                                bytes_written: 0,
                                attempts: attempt,
                                error: Some(abandoned.to_string()),
                            };
                        }
                    }
                }
            }
        }
    }

    async fn fetch_direct(&self, url: &str, path: &Path) -> Result<u64> {
        let response = check_status(url, self.client.get(url).send().await?)?;
        let body = response.bytes().await?;
        tokio::fs::write(path, &body).await?;

        if body.is_empty() {
            return Err(HarvestError::EmptyDownload {
                url: url.to_string(),
            });
        }
        Ok(body.len() as u64)
    }

    async fn fetch_streaming(&self, task: &AssetTask, path: &Path) -> Result<u64> {
        let url = task.source_url.as_str();
        let mut request = self.client.get(url);
        if let Some(auth) = &task.auth {
            if let Some(user_agent) = &auth.user_agent {
                request = request.header(USER_AGENT, user_agent.as_str());
            }
            if let Some(referer) = &auth.referer {
                request = request.header(REFERER, referer.as_str());
            }
            if let Some(cookies) = auth.cookie_header() {
                request = request.header(COOKIE, cookies);
            }
        }

        let mut response = check_status(url, request.send().await?)?;
        let mut file = tokio::fs::File::create(path).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        if written == 0 {
            return Err(HarvestError::EmptyDownload {
                url: url.to_string(),
            });
        }
        Ok(written)
    }
}

fn check_status(url: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(HarvestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::AuthContext;
    use crate::session::Cookie;
    use tempfile::TempDir;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn downloader() -> AssetDownloader {
        let config = DownloadConfig {
            retry_pause_ms: 10,
            request_timeout_secs: 5,
            ..DownloadConfig::default()
        };
        AssetDownloader::new(&config).unwrap()
    }

    fn auth() -> AuthContext {
        AuthContext {
            cookies: vec![Cookie::new("session", "abc")],
            user_agent: Some("TestAgent/1.0".to_string()),
            referer: Some("https://vendor.test/produto/x".to_string()),
        }
    }

    #[tokio::test]
    async fn test_streaming_forwards_session_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/faces.zip"))
            .and(header("cookie", "session=abc"))
            .and(header("user-agent", "TestAgent/1.0"))
            .and(header("referer", "https://vendor.test/produto/x"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04data".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let task = AssetTask::new(format!("{}/files/faces.zip", server.uri()), dir.path())
            .with_file_name("Alameda_faces do produto.zip")
            .with_auth(auth());

        let outcome = downloader().download(&task).await;
        assert!(outcome.success);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.bytes_written, 8);
        assert_eq!(
            std::fs::read(dir.path().join("Alameda_faces do produto.zip")).unwrap(),
            b"PK\x03\x04data"
        );
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/broken.zip"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("product");
        let task = AssetTask::new(format!("{}/files/broken.zip", server.uri()), &target);

        let outcome = downloader().download(&task).await;
        assert!(!outcome.success);
        assert_eq!(outcome.attempts, 3);
        assert!(outcome.error.unwrap().contains("3 attempts"));
        // folder exists even though nothing was saved
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_zero_byte_body_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/empty.zip"))
            .respond_with(ResponseTemplate::new(200))
            .expect(3)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let task = AssetTask::new(format!("{}/files/empty.zip", server.uri()), dir.path());

        let outcome = downloader().download(&task).await;
        assert!(!outcome.success);
        assert_eq!(outcome.bytes_written, 0);
        assert_eq!(outcome.attempts, 3);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/flaky.zip"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/files/flaky.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let task = AssetTask::new(format!("{}/files/flaky.zip", server.uri()), dir.path());

        let outcome = downloader().download(&task).await;
        assert!(outcome.success);
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.path, dir.path().join("flaky.zip"));
    }

    #[tokio::test]
    async fn test_images_fetched_without_session_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header_exists("cookie"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/img/alameda.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let task = AssetTask::new(format!("{}/img/alameda.jpg", server.uri()), dir.path())
            .with_auth(auth());
        assert_eq!(task.fetch_mode(), FetchMode::Direct);

        let outcome = downloader().download(&task).await;
        assert!(outcome.success);
        assert_eq!(outcome.bytes_written, 3);
    }

    #[tokio::test]
    async fn test_existing_file_overwritten() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/sheet.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new".to_vec()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("sheet.pdf"), b"old content").unwrap();
        let task = AssetTask::new(format!("{}/files/sheet.pdf", server.uri()), dir.path());

        let outcome = downloader().download(&task).await;
        assert!(outcome.success);
        assert_eq!(std::fs::read(dir.path().join("sheet.pdf")).unwrap(), b"new");
    }
}

use crate::extract::{sanitize_name, url_basename};
use crate::session::Cookie;
use std::path::{Path, PathBuf};

/// File name used when the URL has no usable last segment
pub const FALLBACK_FILE_NAME: &str = "download";

/// Extensions fetched directly, without session headers
pub const DIRECT_FETCH_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Browser session data forwarded with streamed downloads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub cookies: Vec<Cookie>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl AuthContext {
    /// `name=value; name=value` for the `Cookie` header, `None` when empty
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|cookie| format!("{}={}", cookie.name, cookie.value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// How an asset is fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Plain GET written in one piece
    Direct,
    /// GET with cookies, User-Agent and Referer, written chunk by chunk
    Streaming,
}

impl FetchMode {
    /// Images are fetched directly, everything else is streamed
    pub fn for_file_name(file_name: &str) -> Self {
        let is_image = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                DIRECT_FETCH_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false);

        if is_image {
            Self::Direct
        } else {
            Self::Streaming
        }
    }
}

/// One asset to retrieve
///
/// Identity is the `(source_url, target_folder)` pair; re-running a task
/// overwrites the previous file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTask {
    pub source_url: String,
    pub target_folder: PathBuf,
    pub target_file_name: Option<String>,
    pub auth: Option<AuthContext>,
}

impl AssetTask {
    pub fn new(source_url: impl Into<String>, target_folder: impl Into<PathBuf>) -> Self {
        Self {
            source_url: source_url.into(),
            target_folder: target_folder.into(),
            target_file_name: None,
            auth: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.target_file_name = Some(file_name.into());
        self
    }

    pub fn with_auth(mut self, auth: AuthContext) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Requested file name, else the URL basename, else `download`
    pub fn file_name(&self) -> String {
        let name = match &self.target_file_name {
            Some(name) => sanitize_name(name),
            None => sanitize_name(&url_basename(&self.source_url)),
        };
        if name.is_empty() {
            FALLBACK_FILE_NAME.to_string()
        } else {
            name
        }
    }

    pub fn target_path(&self) -> PathBuf {
        self.target_folder.join(self.file_name())
    }

    pub fn fetch_mode(&self) -> FetchMode {
        FetchMode::for_file_name(&self.file_name())
    }
}

/// Result of one asset task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub success: bool,
    pub path: PathBuf,
    pub bytes_written: u64,
    pub attempts: u32,
    pub error: Option<String>,
}

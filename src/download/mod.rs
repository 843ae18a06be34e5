//! Asset downloads
//!
//! This module retrieves one URL into a target folder:
//! - Images are fetched directly, other assets are streamed with the
//!   browser session's cookies, User-Agent and Referer
//! - Every failure, including an empty body, is retried up to a cap
//! - Re-running a task overwrites the previous file

mod downloader;
mod retry;
mod task;

pub use downloader::{build_download_client, AssetDownloader, FALLBACK_USER_AGENT};
pub use retry::{RetryDecision, RetryPolicy};
pub use task::{
    AssetTask, AuthContext, DownloadOutcome, FetchMode, DIRECT_FETCH_EXTENSIONS,
    FALLBACK_FILE_NAME,
};

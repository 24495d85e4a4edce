//! Sequential batch export of a product group's images.
//!
//! Reproduces the gallery's "download all" behaviour on the server: the
//! plan's items are fetched strictly one at a time with a fixed pause
//! between consecutive fetches, progress is reported after each success,
//! and the first failure abandons the remainder. There is no retry and
//! no parallelism; the pacing exists so a burst of image fetches cannot
//! hammer the hosting CDN.

use std::io::{Cursor, Write};
use std::time::Duration;

use async_trait::async_trait;
use lookbook_core::plan::DownloadPlan;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Default pause between consecutive item fetches.
pub const DEFAULT_ITEM_DELAY: Duration = Duration::from_millis(500);

/// Error fetching a single asset.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("asset endpoint returned status {0}")]
    Status(u16),
}

/// Error from a batch export run.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Fetching one item failed; everything after it was abandoned.
    #[error("failed to fetch item {index} ({url}): {source}")]
    Fetch {
        index: usize,
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("zip assembly failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("zip assembly failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches a single asset's bytes.
///
/// A trait rather than a concrete client so tests can drive the engine
/// with scripted responses.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Production fetcher backed by the shared reqwest client.
pub struct HttpAssetFetcher {
    client: reqwest::Client,
}

impl HttpAssetFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Receives `(completed, total)` after each successfully fetched item.
/// `total` is fixed up front from the plan and never changes mid-run.
pub trait ProgressSink: Send {
    fn progress(&mut self, completed: usize, total: usize);
}

/// Progress sink that emits info-level log lines.
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn progress(&mut self, completed: usize, total: usize) {
        tracing::info!(completed, total, "Export progress");
    }
}

/// One fetched asset ready for archiving.
pub struct FetchedItem {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Sequential download engine over an [`AssetFetcher`].
///
/// The configured delay is inserted before every item after the first,
/// so a plan of N items takes at least `(N - 1) * delay`.
pub struct BatchDownloader<F> {
    fetcher: F,
    item_delay: Duration,
}

impl<F: AssetFetcher> BatchDownloader<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            item_delay: DEFAULT_ITEM_DELAY,
        }
    }

    pub fn with_item_delay(mut self, delay: Duration) -> Self {
        self.item_delay = delay;
        self
    }

    /// Fetch every item in the plan, reporting progress after each.
    ///
    /// Fail-fast: the first fetch error aborts the run and discards the
    /// items already fetched. `progress` will have been called once per
    /// completed item, so the last reported count is the number of
    /// successes before the failure.
    pub async fn run(
        &self,
        plan: &DownloadPlan,
        progress: &mut dyn ProgressSink,
    ) -> Result<Vec<FetchedItem>, ExportError> {
        let total = plan.total();
        let mut fetched = Vec::with_capacity(total);

        for (index, item) in plan.items.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.item_delay).await;
            }

            let bytes = self
                .fetcher
                .fetch(&item.url)
                .await
                .map_err(|source| ExportError::Fetch {
                    index,
                    url: item.url.clone(),
                    source,
                })?;

            fetched.push(FetchedItem {
                filename: item.filename.clone(),
                bytes,
            });
            progress.progress(fetched.len(), total);
        }

        Ok(fetched)
    }
}

/// Assemble fetched items into an in-memory zip archive.
///
/// Plan filenames are already unique, so entries never collide.
pub fn build_zip(items: &[FetchedItem]) -> Result<Vec<u8>, ExportError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for item in items {
        writer.start_file(item.filename.as_str(), options)?;
        writer.write_all(&item.bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}

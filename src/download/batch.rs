//! Sequential batch download of thumbnail images

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::core::entry::{QualityTier, VideoEntry};
use crate::core::progress::BatchProgress;
use crate::error::ThumbError;
use crate::fetch::MetadataFetcher;
use crate::utils::filename::thumbnail_filename;
use crate::Result;

/// Pause between consecutive saves; a pacing measure, not a correctness one
const PACING_DELAY: Duration = Duration::from_millis(100);

/// One failed save recorded while continuing past failures
#[derive(Debug)]
pub struct DownloadFailure {
    pub filename: String,
    pub reason: String,
}

/// Outcome of one batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Number of thumbnails saved
    pub completed: usize,
    /// Failures collected when continuing past them
    pub failures: Vec<DownloadFailure>,
}

/// Downloads ready entries one at a time, in collection order.
///
/// Sequencing is deliberate throttling so the image host sees a trickle of
/// requests rather than a burst.
pub struct BatchDownloader {
    fetcher: Arc<dyn MetadataFetcher>,
    keep_going: bool,
    pacing: Duration,
    progress_callback: Option<Arc<dyn Fn(BatchProgress) + Send + Sync>>,
}

impl BatchDownloader {
    /// Create a downloader over the given fetcher
    pub fn new(fetcher: Arc<dyn MetadataFetcher>) -> Self {
        Self {
            fetcher,
            keep_going: false,
            pacing: PACING_DELAY,
            progress_callback: None,
        }
    }

    /// Continue with remaining entries after a failed save, collecting
    /// failures in the report instead of stopping
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Override the pause between saves
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set progress callback
    pub fn with_progress(
        mut self,
        callback: impl Fn(BatchProgress) + Send + Sync + 'static,
    ) -> Self {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    /// Download thumbnails for every ready entry at the given quality tier.
    ///
    /// Entries not in ready state are skipped. By default the first failed
    /// save aborts the remainder; `with_keep_going` switches to
    /// skip-and-continue. Progress resets to zero on completion or abort.
    pub async fn download_all(
        &self,
        entries: &[VideoEntry],
        tier: QualityTier,
        dest_dir: &Path,
    ) -> Result<BatchReport> {
        let ready: Vec<&VideoEntry> = entries.iter().filter(|e| e.is_ready()).collect();
        let mut progress = BatchProgress::new(ready.len());
        let mut report = BatchReport::default();

        if !ready.is_empty() {
            tokio::fs::create_dir_all(dest_dir).await?;
        }

        for entry in &ready {
            let filename = thumbnail_filename(&entry.id, tier.key());
            let url = entry.thumbnails.url_for(tier);

            match self.save_one(url, &dest_dir.join(&filename)).await {
                Ok(()) => {
                    info!("Saved {}", filename);
                    report.completed += 1;
                }
                Err(e) => {
                    warn!("Download failed for {}: {}", filename, e);
                    if self.keep_going {
                        report.failures.push(DownloadFailure {
                            filename,
                            reason: e.to_string(),
                        });
                    } else {
                        progress.finish();
                        self.report_progress(&progress);
                        return Err(ThumbError::Download {
                            filename,
                            reason: e.to_string(),
                        });
                    }
                }
            }

            progress.update(report.completed + report.failures.len());
            self.report_progress(&progress);
            tokio::time::sleep(self.pacing).await;
        }

        progress.finish();
        self.report_progress(&progress);
        Ok(report)
    }

    /// Fetch one image and write it under a temp name before renaming
    async fn save_one(&self, url: &str, output_path: &Path) -> Result<()> {
        let bytes = self.fetcher.fetch_image(url).await?;

        let tmp_path = output_path.with_extension("tmp");
        let mut file = File::create(&tmp_path).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        if let Err(e) = tokio::fs::rename(&tmp_path, output_path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        Ok(())
    }

    fn report_progress(&self, progress: &BatchProgress) {
        if let Some(callback) = &self.progress_callback {
            callback(progress.clone());
        }
    }
}

//! Video list manager and enrichment orchestration

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::core::entry::{fallback_title, VideoEntry, VideoStatus};
use crate::core::list::{EntryPatch, VideoList};
use crate::fetch::MetadataFetcher;
use crate::utils::url::{extract_playlist_id, extract_video_id};

/// Error message for a thumbnail probe that came back negative
pub const THUMBNAIL_UNAVAILABLE_MESSAGE: &str = "Thumbnail not available";

/// Error message for an enrichment step that failed outright
pub const VALIDATION_FAILED_MESSAGE: &str = "Failed to validate thumbnail";

/// Result of one entry's enrichment task, sent back over the channel
#[derive(Debug)]
struct EnrichmentOutcome {
    id: String,
    patch: EntryPatch,
}

/// Owns the collection of submitted videos and drives their enrichment.
///
/// Each pending entry is enriched by its own task; entries reach their
/// terminal state independently and in whatever order their network calls
/// complete. New submissions may be made while older enrichment is still
/// outstanding.
pub struct VideoManager {
    fetcher: Arc<dyn MetadataFetcher>,
    list: VideoList,
    outcome_tx: mpsc::UnboundedSender<EnrichmentOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<EnrichmentOutcome>,
    outstanding: usize,
}

impl VideoManager {
    /// Create a manager over the given fetcher
    pub fn new(fetcher: Arc<dyn MetadataFetcher>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            fetcher,
            list: VideoList::new(),
            outcome_tx,
            outcome_rx,
            outstanding: 0,
        }
    }

    /// Submit a batch of raw input strings.
    ///
    /// Playlist references are expanded inline; a failed expansion degrades
    /// to treating the original string as a single unresolved input rather
    /// than aborting the batch. All new entries are appended in one
    /// insertion, then one enrichment task is spawned per pending entry.
    pub async fn submit(&mut self, inputs: &[String]) {
        let mut resolved: Vec<String> = Vec::new();

        for raw in inputs {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(playlist_id) = extract_playlist_id(trimmed) {
                match self.fetcher.playlist_video_ids(&playlist_id).await {
                    Ok(ids) => {
                        debug!("Playlist {} expanded to {} videos", playlist_id, ids.len());
                        for id in ids {
                            resolved.push(format!("https://www.youtube.com/watch?v={}", id));
                        }
                    }
                    Err(e) => {
                        warn!("Playlist {} expansion failed: {}", playlist_id, e);
                        resolved.push(trimmed.to_string());
                    }
                }
            } else {
                resolved.push(trimmed.to_string());
            }
        }

        let mut new_entries = Vec::new();
        for input in &resolved {
            match extract_video_id(input) {
                Some(video_id) => {
                    if self.list.contains(&video_id) {
                        debug!("Skipping duplicate video {}", video_id);
                        continue;
                    }
                    new_entries.push(VideoEntry::pending(&video_id, input));
                }
                None => new_entries.push(VideoEntry::invalid(input)),
            }
        }

        let inserted = self.list.insert_many(new_entries);

        let mut to_enrich = Vec::new();
        for id in &inserted {
            if let Some(entry) = self.list.get(id) {
                if entry.status == VideoStatus::Pending {
                    to_enrich.push((entry.id.clone(), entry.thumbnails.maxres.clone()));
                }
            }
        }
        for (id, probe_url) in to_enrich {
            self.spawn_enrichment(id, probe_url);
        }
    }

    /// Spawn the title fetch and availability probe for one entry.
    ///
    /// The two requests run concurrently; the combined outcome is sent back
    /// over the channel so it can be applied whenever it arrives.
    fn spawn_enrichment(&mut self, id: String, probe_url: String) {
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.outcome_tx.clone();
        self.outstanding += 1;

        tokio::spawn(async move {
            let (title, probe) = tokio::join!(
                fetcher.video_title(&id),
                fetcher.probe_thumbnail(&probe_url)
            );

            let patch = match probe {
                Ok(true) => EntryPatch {
                    title: Some(title),
                    status: Some(VideoStatus::Ready),
                    error: None,
                },
                Ok(false) => EntryPatch {
                    title: Some(title),
                    status: Some(VideoStatus::Failed),
                    error: Some(THUMBNAIL_UNAVAILABLE_MESSAGE.to_string()),
                },
                Err(e) => {
                    warn!("Enrichment failed for {}: {}", id, e);
                    EntryPatch {
                        title: Some(fallback_title(&id)),
                        status: Some(VideoStatus::Failed),
                        error: Some(VALIDATION_FAILED_MESSAGE.to_string()),
                    }
                }
            };

            let _ = tx.send(EnrichmentOutcome { id, patch });
        });
    }

    /// Apply enrichment outcomes in arrival order until none are outstanding
    pub async fn drain_enrichment(&mut self) {
        while self.outstanding > 0 {
            match self.outcome_rx.recv().await {
                Some(outcome) => {
                    self.outstanding -= 1;
                    self.list.update_one(&outcome.id, outcome.patch);
                }
                None => break,
            }
        }
    }

    /// Number of enrichment tasks still in flight
    pub fn pending_enrichment(&self) -> usize {
        self.outstanding
    }

    /// All entries in insertion order
    pub fn videos(&self) -> &[VideoEntry] {
        self.list.entries()
    }

    /// Entries whose thumbnail is confirmed available
    pub fn ready_videos(&self) -> Vec<&VideoEntry> {
        self.list.with_status(VideoStatus::Ready).collect()
    }

    /// Remove the entry with the given ID; no-op otherwise
    pub fn remove(&mut self, id: &str) -> bool {
        self.list.remove_one(id)
    }

    /// Empty the collection unconditionally
    pub fn clear(&mut self) {
        self.list.clear();
    }
}

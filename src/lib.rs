//! # thumbgrab - YouTube Thumbnail Downloader
//!
//! Batch fetcher and downloader for YouTube video thumbnails.
//!
//! ## Features
//!
//! - Video ID extraction from watch, short, embed, mobile and shorts URLs
//! - Playlist expansion via the public video feed
//! - Title lookup through the oEmbed endpoint
//! - Thumbnail availability probing
//! - Sequential batch download with progress reporting
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use thumbgrab::{BatchDownloader, HttpFetcher, QualityTier, VideoManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = Arc::new(HttpFetcher::new()?);
//!     let mut manager = VideoManager::new(fetcher.clone());
//!
//!     manager
//!         .submit(&["https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()])
//!         .await;
//!     manager.drain_enrichment().await;
//!
//!     let downloader = BatchDownloader::new(fetcher);
//!     let report = downloader
//!         .download_all(manager.videos(), QualityTier::Maxres, ".".as_ref())
//!         .await?;
//!     println!("Saved {} thumbnails", report.completed);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod download;
pub mod error;
pub mod fetch;
pub mod utils;

// Re-export main types
pub use crate::core::{
    BatchProgress, EntryPatch, QualityTier, ThumbnailSet, VideoEntry, VideoList, VideoManager,
    VideoStatus,
};
pub use crate::download::{BatchDownloader, BatchReport};
pub use crate::error::ThumbError;
pub use crate::fetch::{FetcherConfig, HttpFetcher, MetadataFetcher};

/// Result type alias for thumbgrab operations
pub type Result<T> = std::result::Result<T, ThumbError>;

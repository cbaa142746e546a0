//! Video entries, thumbnail sets and quality tiers

use clap::ValueEnum;
use rand::Rng;

/// Base URL of the thumbnail image host
pub const THUMBNAIL_BASE_URL: &str = "https://img.youtube.com/vi";

/// Placeholder title shown while enrichment is in flight
pub const LOADING_TITLE: &str = "Loading title...";

/// Error message attached to entries whose source could not be parsed
pub const INVALID_URL_MESSAGE: &str = "Invalid YouTube URL format";

/// Thumbnail quality tier, highest resolution first
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QualityTier {
    /// 1280x720
    Maxres,
    /// 480x360
    High,
    /// 320x180
    Medium,
    /// 120x90
    Standard,
    /// 120x90
    Default,
}

impl QualityTier {
    /// All tiers, highest resolution first
    pub const ALL: [QualityTier; 5] = [
        QualityTier::Maxres,
        QualityTier::High,
        QualityTier::Medium,
        QualityTier::Standard,
        QualityTier::Default,
    ];

    /// Stable key used in filenames and selection
    pub fn key(&self) -> &'static str {
        match self {
            QualityTier::Maxres => "maxres",
            QualityTier::High => "high",
            QualityTier::Medium => "medium",
            QualityTier::Standard => "standard",
            QualityTier::Default => "default",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::Maxres => "Max Res",
            QualityTier::High => "High",
            QualityTier::Medium => "Medium",
            QualityTier::Standard => "Standard",
            QualityTier::Default => "Default",
        }
    }

    /// Resolution description
    pub fn description(&self) -> &'static str {
        match self {
            QualityTier::Maxres => "1280x720",
            QualityTier::High => "480x360",
            QualityTier::Medium => "320x180",
            QualityTier::Standard => "120x90",
            QualityTier::Default => "120x90",
        }
    }

    /// Image-host file variant for this tier
    fn variant(&self) -> &'static str {
        match self {
            QualityTier::Maxres => "maxresdefault",
            QualityTier::High => "hqdefault",
            QualityTier::Medium => "mqdefault",
            QualityTier::Standard => "sddefault",
            QualityTier::Default => "default",
        }
    }
}

/// Fixed mapping from quality tier to thumbnail URL for one video
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailSet {
    pub maxres: String,
    pub high: String,
    pub medium: String,
    pub standard: String,
    pub default: String,
}

impl ThumbnailSet {
    /// Synthesize all five thumbnail URLs for a video ID.
    ///
    /// Pure string formatting; the ID is not validated. An invalid ID simply
    /// produces URLs that later fail the availability probe.
    pub fn for_video(video_id: &str) -> Self {
        let url = |tier: QualityTier| {
            format!("{}/{}/{}.jpg", THUMBNAIL_BASE_URL, video_id, tier.variant())
        };

        Self {
            maxres: url(QualityTier::Maxres),
            high: url(QualityTier::High),
            medium: url(QualityTier::Medium),
            standard: url(QualityTier::Standard),
            default: url(QualityTier::Default),
        }
    }

    /// Empty set for entries that never parsed to a video ID
    pub fn empty() -> Self {
        Self::default()
    }

    /// URL for the given quality tier
    pub fn url_for(&self, tier: QualityTier) -> &str {
        match tier {
            QualityTier::Maxres => &self.maxres,
            QualityTier::High => &self.high,
            QualityTier::Medium => &self.medium,
            QualityTier::Standard => &self.standard,
            QualityTier::Default => &self.default,
        }
    }
}

/// Lifecycle state of a video entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoStatus {
    /// Awaiting enrichment
    Pending,
    /// Title fetched and thumbnail confirmed
    Ready,
    /// Terminal failure, see the entry's error message
    Failed,
}

/// One user-submitted video
#[derive(Debug, Clone)]
pub struct VideoEntry {
    /// Extracted video ID, or a locally generated token for unparsable input
    pub id: String,
    /// The original string the user supplied, trimmed
    pub source_url: String,
    pub title: String,
    /// Derived from `id` at creation, never mutated afterwards
    pub thumbnails: ThumbnailSet,
    pub status: VideoStatus,
    /// Present only when status is `Failed`
    pub error: Option<String>,
}

impl VideoEntry {
    /// Create a pending entry for a successfully parsed video ID
    pub fn pending(video_id: &str, source_url: &str) -> Self {
        Self {
            id: video_id.to_string(),
            source_url: source_url.trim().to_string(),
            title: LOADING_TITLE.to_string(),
            thumbnails: ThumbnailSet::for_video(video_id),
            status: VideoStatus::Pending,
            error: None,
        }
    }

    /// Create an immediately failed entry for input that did not parse
    pub fn invalid(source_url: &str) -> Self {
        let trimmed = source_url.trim().to_string();
        Self {
            id: local_token(),
            source_url: trimmed.clone(),
            title: trimmed,
            thumbnails: ThumbnailSet::empty(),
            status: VideoStatus::Failed,
            error: Some(INVALID_URL_MESSAGE.to_string()),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == VideoStatus::Pending
    }

    pub fn is_ready(&self) -> bool {
        self.status == VideoStatus::Ready
    }

    pub fn is_failed(&self) -> bool {
        self.status == VideoStatus::Failed
    }
}

/// Generated title used when no real title could be fetched
pub fn fallback_title(video_id: &str) -> String {
    format!("YouTube Video {}", video_id)
}

/// Random 9-character base36 token for entries without a real video ID.
/// Not derived from content; collisions across entries are acceptable.
fn local_token() -> String {
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..9)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

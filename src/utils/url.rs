//! URL utilities for extracting video and playlist IDs from YouTube URLs

use regex::Regex;

/// Extract video ID from various YouTube URL formats.
///
/// Recognizes standard watch links, short links, embed links, mobile links
/// and shorts links. The captured ID runs up to the first `&`, newline,
/// `?` or `#`. First matching pattern wins.
pub fn extract_video_id(url: &str) -> Option<String> {
    let patterns = [
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/|m\.youtube\.com/watch\?v=|youtube\.com/watch\?.*&v=)([^&\n?#]+)",
        r"youtube\.com/shorts/([^&\n?#]+)",
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).unwrap();
        if let Some(captures) = re.captures(url) {
            return captures.get(1).map(|m| m.as_str().to_string());
        }
    }

    None
}

/// Extract playlist ID from a `list=` query parameter or a playlist-page URL
pub fn extract_playlist_id(url: &str) -> Option<String> {
    let patterns = [
        r"[?&]list=([^&\n?#]+)",
        r"youtube\.com/playlist\?list=([^&\n?#]+)",
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).unwrap();
        if let Some(captures) = re.captures(url) {
            return captures.get(1).map(|m| m.as_str().to_string());
        }
    }

    None
}

/// Check if URL references a playlist.
///
/// A URL may be both a video and a playlist reference (a watch link with a
/// `list=` parameter); callers decide which classification takes precedence.
pub fn is_playlist_url(url: &str) -> bool {
    extract_playlist_id(url).is_some()
}

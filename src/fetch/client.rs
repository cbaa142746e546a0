//! Remote metadata fetchers for playlist expansion, titles and thumbnails

use regex::Regex;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::entry::fallback_title;
use crate::error::ThumbError;
use crate::utils::url::extract_video_id;
use crate::Result;

/// User-facing message for a playlist that could not be expanded
const PLAYLIST_FETCH_MESSAGE: &str =
    "Failed to fetch playlist videos. Please check the playlist URL and try again.";

/// Remote metadata operations used by enrichment and the batch downloader.
///
/// `video_title` always resolves to a string and `probe_thumbnail` reports a
/// health verdict; a missing title is cosmetic while a missing thumbnail
/// fails the entry, so the two are deliberately not unified.
#[async_trait::async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Expand a playlist into its member video IDs, in playlist order.
    ///
    /// An empty playlist is an empty list, not an error.
    async fn playlist_video_ids(&self, playlist_id: &str) -> Result<Vec<String>>;

    /// Fetch a human-readable title, falling back to a generated label on
    /// any failure
    async fn video_title(&self, video_id: &str) -> String;

    /// Check that a URL resolves to an actual image
    async fn probe_thumbnail(&self, url: &str) -> Result<bool>;

    /// Fetch raw image bytes for download
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP fetcher configuration
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent override
    pub user_agent: Option<String>,
    /// Proxy URL
    pub proxy_url: Option<String>,
    /// Relay prefix for feed requests blocked by cross-origin rules;
    /// the target URL is appended percent-encoded
    pub relay_url: Option<String>,
    /// Base URL of the playlist feed host
    pub feed_base: String,
    /// Base URL of the oEmbed host
    pub oembed_base: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: None,
            proxy_url: None,
            relay_url: None,
            feed_base: "https://www.youtube.com".to_string(),
            oembed_base: "https://www.youtube.com".to_string(),
        }
    }
}

/// Relevant subset of the oEmbed response
#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
}

/// HTTP implementation of [`MetadataFetcher`] over one shared client
pub struct HttpFetcher {
    client: Client,
    config: FetcherConfig,
}

impl HttpFetcher {
    /// Create a fetcher with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(FetcherConfig::default())
    }

    /// Create a fetcher with the given configuration
    pub fn with_config(config: FetcherConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new().timeout(config.timeout);

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(proxy_url) = &config.proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Route a URL through the relay when one is configured
    fn routed(&self, target: &str) -> String {
        match &self.config.relay_url {
            Some(relay) => {
                let encoded: String =
                    url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
                format!("{}{}", relay, encoded)
            }
            None => target.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl MetadataFetcher for HttpFetcher {
    async fn playlist_video_ids(&self, playlist_id: &str) -> Result<Vec<String>> {
        let feed_url = format!(
            "{}/feeds/videos.xml?playlist_id={}",
            self.config.feed_base, playlist_id
        );
        debug!("Fetching playlist feed: {}", feed_url);

        let response = self
            .client
            .get(self.routed(&feed_url))
            .send()
            .await
            .map_err(|e| {
                warn!("Playlist feed request failed: {}", e);
                ThumbError::PlaylistFetch(PLAYLIST_FETCH_MESSAGE.to_string())
            })?;

        if !response.status().is_success() {
            warn!("Playlist feed returned status {}", response.status());
            return Err(ThumbError::PlaylistFetch(PLAYLIST_FETCH_MESSAGE.to_string()));
        }

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read playlist feed body: {}", e);
            ThumbError::PlaylistFetch(PLAYLIST_FETCH_MESSAGE.to_string())
        })?;

        parse_feed_video_ids(&body)
    }

    async fn video_title(&self, video_id: &str) -> String {
        let oembed_url = format!(
            "{}/oembed?url=https://www.youtube.com/watch?v={}&format=json",
            self.config.oembed_base, video_id
        );

        match self.client.get(&oembed_url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<OEmbedResponse>().await {
                    Ok(data) => data.title.unwrap_or_else(|| fallback_title(video_id)),
                    Err(e) => {
                        debug!("Failed to decode oEmbed response: {}", e);
                        fallback_title(video_id)
                    }
                }
            }
            Ok(response) => {
                debug!("oEmbed lookup returned status {}", response.status());
                fallback_title(video_id)
            }
            Err(e) => {
                debug!("oEmbed lookup failed: {}", e);
                fallback_title(video_id)
            }
        }
    }

    async fn probe_thumbnail(&self, url: &str) -> Result<bool> {
        match self.client.head(url).send().await {
            Ok(response) => {
                let is_image = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .map(|value| value.starts_with("image/"))
                    .unwrap_or(false);

                Ok(response.status().is_success() && is_image)
            }
            Err(e) => {
                debug!("Thumbnail probe failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Extract video IDs from a playlist feed document.
///
/// Scans for per-entry `<yt:videoId>` elements, falling back to re-parsing
/// entry link URLs. A document without a feed root fails; a feed with zero
/// entries yields an empty list.
fn parse_feed_video_ids(feed: &str) -> Result<Vec<String>> {
    if !feed.contains("<feed") {
        return Err(ThumbError::PlaylistFetch(PLAYLIST_FETCH_MESSAGE.to_string()));
    }

    let id_regex = Regex::new(r"<yt:videoId>([^<]+)</yt:videoId>").unwrap();
    let mut ids: Vec<String> = id_regex
        .captures_iter(feed)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();

    if ids.is_empty() {
        // Some feeds carry only per-entry watch links
        let link_regex = Regex::new(r#"<link[^>]+href="([^"]+)""#).unwrap();
        ids = link_regex
            .captures_iter(feed)
            .filter_map(|captures| captures.get(1))
            .filter_map(|m| extract_video_id(m.as_str()))
            .collect();
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(server: &mockito::Server) -> FetcherConfig {
        FetcherConfig {
            feed_base: server.url(),
            oembed_base: server.url(),
            ..Default::default()
        }
    }

    const FEED_WITH_IDS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns:yt="http://www.youtube.com/xml/schemas/2015" xmlns="http://www.w3.org/2005/Atom">
  <title>Test Playlist</title>
  <entry>
    <yt:videoId>aaaaaaaaaaa</yt:videoId>
    <title>First</title>
  </entry>
  <entry>
    <yt:videoId>bbbbbbbbbbb</yt:videoId>
    <title>Second</title>
  </entry>
</feed>"#;

    const FEED_WITH_LINKS_ONLY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <link rel="alternate" href="https://www.youtube.com/playlist?list=PLxxxx"/>
  <entry>
    <link rel="alternate" href="https://www.youtube.com/watch?v=ccccccccccc"/>
  </entry>
</feed>"#;

    const EMPTY_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Empty Playlist</title>
</feed>"#;

    #[tokio::test]
    async fn test_playlist_video_ids() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/feeds/videos.xml?playlist_id=PLtest")
            .with_status(200)
            .with_body(FEED_WITH_IDS)
            .create_async()
            .await;

        let fetcher = HttpFetcher::with_config(config_for(&server)).unwrap();
        let ids = fetcher.playlist_video_ids("PLtest").await.unwrap();

        assert_eq!(ids, vec!["aaaaaaaaaaa", "bbbbbbbbbbb"]);
    }

    #[tokio::test]
    async fn test_playlist_video_ids_link_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/feeds/videos.xml?playlist_id=PLtest")
            .with_status(200)
            .with_body(FEED_WITH_LINKS_ONLY)
            .create_async()
            .await;

        let fetcher = HttpFetcher::with_config(config_for(&server)).unwrap();
        let ids = fetcher.playlist_video_ids("PLtest").await.unwrap();

        // The playlist's own link has no video ID and is skipped
        assert_eq!(ids, vec!["ccccccccccc"]);
    }

    #[tokio::test]
    async fn test_playlist_video_ids_empty_feed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/feeds/videos.xml?playlist_id=PLtest")
            .with_status(200)
            .with_body(EMPTY_FEED)
            .create_async()
            .await;

        let fetcher = HttpFetcher::with_config(config_for(&server)).unwrap();
        let ids = fetcher.playlist_video_ids("PLtest").await.unwrap();

        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_playlist_video_ids_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/feeds/videos.xml?playlist_id=PLtest")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFetcher::with_config(config_for(&server)).unwrap();
        let result = fetcher.playlist_video_ids("PLtest").await;

        assert!(matches!(result, Err(ThumbError::PlaylistFetch(_))));
    }

    #[tokio::test]
    async fn test_playlist_video_ids_unparsable_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/feeds/videos.xml?playlist_id=PLtest")
            .with_status(200)
            .with_body("<html>this is not a feed</html>")
            .create_async()
            .await;

        let fetcher = HttpFetcher::with_config(config_for(&server)).unwrap();
        let result = fetcher.playlist_video_ids("PLtest").await;

        assert!(matches!(result, Err(ThumbError::PlaylistFetch(_))));
    }

    #[tokio::test]
    async fn test_playlist_feed_routed_through_relay() {
        let mut server = mockito::Server::new_async().await;
        // byte_serialize percent-encodes everything but [0-9a-zA-Z*-._]
        let encoded = "http%3A%2F%2Ffeeds.invalid%2Ffeeds%2Fvideos.xml%3Fplaylist_id%3DPLtest";
        let _mock = server
            .mock("GET", format!("/relay?u={}", encoded).as_str())
            .with_status(200)
            .with_body(FEED_WITH_IDS)
            .create_async()
            .await;

        let config = FetcherConfig {
            feed_base: "http://feeds.invalid".to_string(),
            relay_url: Some(format!("{}/relay?u=", server.url())),
            ..Default::default()
        };
        let fetcher = HttpFetcher::with_config(config).unwrap();
        let ids = fetcher.playlist_video_ids("PLtest").await.unwrap();

        assert_eq!(ids.len(), 2);
    }

    #[tokio::test]
    async fn test_video_title() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Regex("^/oembed".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"title": "Never Gonna Give You Up", "author_name": "Rick Astley"}"#)
            .create_async()
            .await;

        let fetcher = HttpFetcher::with_config(config_for(&server)).unwrap();
        let title = fetcher.video_title("dQw4w9WgXcQ").await;

        assert_eq!(title, "Never Gonna Give You Up");
    }

    #[tokio::test]
    async fn test_video_title_missing_field_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Regex("^/oembed".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"author_name": "Somebody"}"#)
            .create_async()
            .await;

        let fetcher = HttpFetcher::with_config(config_for(&server)).unwrap();
        let title = fetcher.video_title("abc123").await;

        assert_eq!(title, "YouTube Video abc123");
    }

    #[tokio::test]
    async fn test_video_title_http_error_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Regex("^/oembed".to_string()))
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFetcher::with_config(config_for(&server)).unwrap();
        let title = fetcher.video_title("abc123").await;

        // Never an error, always the generated fallback
        assert_eq!(title, "YouTube Video abc123");
    }

    #[tokio::test]
    async fn test_probe_thumbnail_image() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("HEAD", "/vi/abc/maxresdefault.jpg")
            .with_status(200)
            .with_header("content-type", "image/jpeg")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = format!("{}/vi/abc/maxresdefault.jpg", server.url());

        assert!(fetcher.probe_thumbnail(&url).await.unwrap());
    }

    #[tokio::test]
    async fn test_probe_thumbnail_wrong_content_type() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("HEAD", "/vi/abc/maxresdefault.jpg")
            .with_status(200)
            .with_header("content-type", "text/html")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = format!("{}/vi/abc/maxresdefault.jpg", server.url());

        assert!(!fetcher.probe_thumbnail(&url).await.unwrap());
    }

    #[tokio::test]
    async fn test_probe_thumbnail_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("HEAD", "/vi/abc/maxresdefault.jpg")
            .with_status(404)
            .with_header("content-type", "image/jpeg")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = format!("{}/vi/abc/maxresdefault.jpg", server.url());

        assert!(!fetcher.probe_thumbnail(&url).await.unwrap());
    }

    #[tokio::test]
    async fn test_probe_thumbnail_transport_failure_is_false() {
        // Nothing listens on this port; the probe degrades to false
        let fetcher = HttpFetcher::with_config(FetcherConfig {
            timeout: Duration::from_millis(500),
            ..Default::default()
        })
        .unwrap();

        let result = fetcher
            .probe_thumbnail("http://127.0.0.1:9/vi/abc/maxresdefault.jpg")
            .await;
        assert!(matches!(result, Ok(false)));
    }

    #[tokio::test]
    async fn test_fetch_image() {
        let mut server = mockito::Server::new_async().await;
        let bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        let _mock = server
            .mock("GET", "/vi/abc/hqdefault.jpg")
            .with_status(200)
            .with_header("content-type", "image/jpeg")
            .with_body(bytes.clone())
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = format!("{}/vi/abc/hqdefault.jpg", server.url());

        assert_eq!(fetcher.fetch_image(&url).await.unwrap(), bytes);
    }

    #[tokio::test]
    async fn test_fetch_image_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/vi/abc/hqdefault.jpg")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = format!("{}/vi/abc/hqdefault.jpg", server.url());

        assert!(fetcher.fetch_image(&url).await.is_err());
    }

    #[test]
    fn test_oembed_response_decoding() {
        let parsed: OEmbedResponse =
            serde_json::from_str(r#"{"title": "A Title", "author_name": "Someone"}"#).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("A Title"));

        let parsed: OEmbedResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.title.is_none());
    }

    #[test]
    fn test_parse_feed_video_ids() {
        assert_eq!(
            parse_feed_video_ids(FEED_WITH_IDS).unwrap(),
            vec!["aaaaaaaaaaa", "bbbbbbbbbbb"]
        );
        assert!(parse_feed_video_ids(EMPTY_FEED).unwrap().is_empty());
        assert!(parse_feed_video_ids("not xml at all").is_err());
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::app::{AppError, Result};
use crate::catalog::{CatalogConfig, VideoCatalog};
use crate::domain::VideoItem;
use crate::fetcher::Fetcher;

#[derive(Debug, Deserialize)]
struct Response {
    videos: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct Record {
    id: u64,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    /// Seconds.
    duration: Option<u64>,
    user: User,
    #[serde(default)]
    video_files: Vec<VideoFile>,
}

#[derive(Debug, Deserialize)]
struct User {
    name: String,
}

#[derive(Debug, Deserialize)]
struct VideoFile {
    link: String,
}

/// Pexels video search, one page per load.
pub struct PexelsCatalog {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    config: CatalogConfig,
}

impl PexelsCatalog {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, config: CatalogConfig) -> Self {
        Self { fetcher, config }
    }

    fn url(&self) -> Result<Url> {
        let per_page = self.config.per_page.to_string();
        Ok(Url::parse_with_params(
            &self.config.endpoint,
            &[("query", self.config.query.as_str()), ("per_page", per_page.as_str())],
        )?)
    }

    pub fn parse(body: &[u8]) -> Result<Vec<VideoItem>> {
        let response: Response = serde_json::from_slice(body)?;
        Ok(response
            .videos
            .into_iter()
            .filter_map(|record| {
                let Some(file) = record.video_files.into_iter().next() else {
                    tracing::debug!("Skipping video {} without files", record.id);
                    return None;
                };
                let mut video = VideoItem::new(record.id.to_string(), file.link, record.user.name);
                video.duration_ms = record.duration.map(|secs| secs * 1000);
                video.width = record.width;
                video.height = record.height;
                Some(video)
            })
            .collect())
    }
}

#[async_trait]
impl VideoCatalog for PexelsCatalog {
    async fn fetch_videos(&self) -> Result<Vec<VideoItem>> {
        let api_key = self
            .config
            .resolved_api_key()
            .ok_or_else(|| AppError::Config("Missing Pexels API key".into()))?;

        let url = self.url()?;
        let body = self.fetcher.get(&url, Some(&api_key)).await?;
        let videos = Self::parse(&body)?;
        tracing::info!("Loaded {} videos for {:?}", videos.len(), self.config.query);
        Ok(videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubFetcher;

    const BODY: &str = r#"{
        "page": 1,
        "per_page": 2,
        "videos": [
            {
                "id": 857251,
                "width": 1920,
                "height": 1080,
                "duration": 12,
                "user": {"id": 1, "name": "Pat Whelen"},
                "video_files": [
                    {"id": 1, "quality": "hd", "link": "https://videos.pexels.com/857251-hd.mp4"},
                    {"id": 2, "quality": "sd", "link": "https://videos.pexels.com/857251-sd.mp4"}
                ]
            },
            {
                "id": 99,
                "width": 640,
                "height": 360,
                "duration": 5,
                "user": {"id": 2, "name": "Nobody"},
                "video_files": []
            }
        ]
    }"#;

    fn config_with_key() -> CatalogConfig {
        CatalogConfig {
            api_key: Some("test-key".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_maps_first_rendition() {
        let videos = PexelsCatalog::parse(BODY.as_bytes()).unwrap();
        assert_eq!(videos.len(), 1);
        let video = &videos[0];
        assert_eq!(video.id, "857251");
        assert_eq!(video.url, "https://videos.pexels.com/857251-hd.mp4");
        assert_eq!(video.title, "Pat Whelen");
        assert_eq!(video.duration_ms, Some(12_000));
        assert_eq!((video.width, video.height), (1920, 1080));
        assert!(!video.is_liked);
    }

    #[tokio::test]
    async fn test_fetch_sends_key_and_query() {
        let fetcher = Arc::new(StubFetcher::ok(BODY));
        let catalog = PexelsCatalog::new(fetcher.clone(), config_with_key());

        let videos = catalog.fetch_videos().await.unwrap();
        assert_eq!(videos.len(), 1);

        assert_eq!(fetcher.authorization(), vec![Some("test-key".to_string())]);
        let url = Url::parse(&fetcher.requested()[0]).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("query".to_string(), "nature".to_string())));
        assert!(pairs.contains(&("per_page".to_string(), "10".to_string())));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported() {
        let fetcher = Arc::new(StubFetcher::failing("HTTP 500"));
        let catalog = PexelsCatalog::new(fetcher, config_with_key());
        assert!(catalog.fetch_videos().await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let fetcher = Arc::new(StubFetcher::ok(r#"{"error": "bad key"}"#));
        let catalog = PexelsCatalog::new(fetcher, config_with_key());
        assert!(matches!(catalog.fetch_videos().await, Err(AppError::Json(_))));
    }
}

use std::sync::Arc;
use std::time::Duration;

use crate::app::Result;
use crate::catalog::{PexelsCatalog, VideoCatalog};
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::search::{SearchAggregator, SearchSession};
use crate::store::{MemoryStore, Store};

pub struct AppContext {
    pub store: Arc<MemoryStore>,
    pub catalog: Arc<dyn VideoCatalog + Send + Sync>,
    pub aggregator: Arc<SearchAggregator>,
    pub search_debounce: Duration,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new()?);
        let catalog = Arc::new(PexelsCatalog::new(fetcher.clone(), config.catalog.clone()));
        let aggregator = Arc::new(SearchAggregator::from_config(&config.search, fetcher)?);

        Ok(Self::with_parts(
            catalog,
            aggregator,
            Duration::from_millis(config.search.debounce_ms),
        ))
    }

    pub fn with_parts(
        catalog: Arc<dyn VideoCatalog + Send + Sync>,
        aggregator: Arc<SearchAggregator>,
        search_debounce: Duration,
    ) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            catalog,
            aggregator,
            search_debounce,
        }
    }

    /// Fetch the feed and merge it into the store. Returns the number of
    /// videos fetched.
    pub async fn load_feed(&self) -> Result<usize> {
        let videos = self.catalog.fetch_videos().await?;
        let count = videos.len();
        self.store.merge_videos(videos)?;
        Ok(count)
    }

    pub fn search_session(&self) -> SearchSession {
        SearchSession::with_debounce(self.aggregator.clone(), self.search_debounce)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::app::AppError;
    use crate::domain::VideoItem;

    struct FixedCatalog(Option<Vec<VideoItem>>);

    #[async_trait]
    impl VideoCatalog for FixedCatalog {
        async fn fetch_videos(&self) -> Result<Vec<VideoItem>> {
            self.0
                .clone()
                .ok_or_else(|| AppError::Other("HTTP error! status: 500".into()))
        }
    }

    fn context(videos: Option<Vec<VideoItem>>) -> AppContext {
        AppContext::with_parts(
            Arc::new(FixedCatalog(videos)),
            Arc::new(SearchAggregator::new(Vec::new())),
            Duration::from_millis(300),
        )
    }

    #[tokio::test]
    async fn test_load_feed_stores_videos() {
        let ctx = context(Some(vec![
            VideoItem::new("1", "https://cdn.example.com/1.mp4", "One"),
            VideoItem::new("2", "https://cdn.example.com/2.mp4", "Two"),
        ]));
        assert_eq!(ctx.load_feed().await.unwrap(), 2);
        assert_eq!(ctx.store.videos().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_reload_keeps_uploads_likes_and_comments() {
        let ctx = context(Some(vec![
            VideoItem::new("1", "https://cdn.example.com/1.mp4", "One"),
            VideoItem::new("2", "https://cdn.example.com/2.mp4", "Two"),
        ]));
        ctx.load_feed().await.unwrap();
        ctx.store
            .prepend_video(VideoItem::new("up", "file:///tmp/up.mp4", "Mine"))
            .unwrap();
        ctx.store.add_comment("1", "hello").unwrap();
        ctx.store.toggle_like("1").unwrap();

        ctx.load_feed().await.unwrap();

        let ids: Vec<_> = ctx.store.videos().unwrap().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["up", "1", "2"]);
        assert_eq!(ctx.store.comments("1").unwrap()[0].text, "hello");
        let liked = ctx.store.liked_videos().unwrap();
        assert_eq!(liked.len(), 1);
        assert_eq!(liked[0].id, "1");
    }

    #[tokio::test]
    async fn test_load_feed_failure_keeps_store() {
        let ctx = context(None);
        ctx.store
            .replace_videos(vec![VideoItem::new("old", "https://cdn.example.com/o.mp4", "Old")])
            .unwrap();
        assert!(ctx.load_feed().await.is_err());
        assert_eq!(ctx.store.videos().unwrap().len(), 1);
    }
}

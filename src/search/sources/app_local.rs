use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{SearchResult, SourceTag};
use crate::search::SearchSource;

/// Simulated round trip to the app backend.
pub const APP_LATENCY: Duration = Duration::from_millis(500);

const CATALOG: &[(&str, &str)] = &[
    ("1", "How to cook pasta"),
    ("2", "Basic guitar chords"),
    ("3", "Yoga for beginners"),
];

/// Searches the app's own skill videos.
pub struct AppLocalSource {
    latency: Duration,
}

impl AppLocalSource {
    pub fn new() -> Self {
        Self::with_latency(APP_LATENCY)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for AppLocalSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchSource for AppLocalSource {
    fn name(&self) -> &str {
        "App"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        tokio::time::sleep(self.latency).await;

        let needle = query.to_lowercase();
        Ok(CATALOG
            .iter()
            .filter(|(_, title)| title.to_lowercase().contains(&needle))
            .map(|(id, title)| SearchResult::new(*id, *title, SourceTag::AppLocal, self.name()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_case_insensitive_match() {
        let source = AppLocalSource::new();
        let results = source.search("GUITAR").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Basic guitar chords");
        assert_eq!(results[0].source, SourceTag::AppLocal);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_match() {
        let source = AppLocalSource::new();
        assert!(source.search("skydiving").await.unwrap().is_empty());
    }
}

use std::sync::Arc;

use futures::future::join_all;

use crate::app::{AppError, Result};
use crate::domain::SearchResult;
use crate::fetcher::Fetcher;
use crate::search::sources::{AppLocalSource, DuckDuckGoSource, GoogleSource, WikipediaSource};
use crate::search::{SearchConfig, SearchSource};

/// Runs every source concurrently and concatenates the results in
/// source order.
pub struct SearchAggregator {
    sources: Vec<Arc<dyn SearchSource>>,
}

impl SearchAggregator {
    pub fn new(sources: Vec<Arc<dyn SearchSource>>) -> Self {
        Self { sources }
    }

    pub fn from_config(
        config: &SearchConfig,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
    ) -> Result<Self> {
        let mut sources: Vec<Arc<dyn SearchSource>> = Vec::new();

        for name in &config.sources {
            match name.trim().to_lowercase().as_str() {
                "app" => sources.push(Arc::new(AppLocalSource::new())),
                "wikipedia" => sources.push(Arc::new(WikipediaSource::new(
                    fetcher.clone(),
                    &config.wikipedia_endpoint,
                ))),
                "duckduckgo" => sources.push(Arc::new(DuckDuckGoSource::new(
                    fetcher.clone(),
                    &config.duckduckgo_endpoint,
                ))),
                "google" => match (&config.google_api_key, &config.google_engine_id) {
                    (Some(key), Some(engine)) => sources.push(Arc::new(GoogleSource::new(
                        fetcher.clone(),
                        &config.google_endpoint,
                        key,
                        engine,
                    ))),
                    _ => tracing::warn!("Google search enabled without api key/engine id, skipping"),
                },
                other => {
                    return Err(AppError::Config(format!("Unknown search source: {}", other)));
                }
            }
        }

        Ok(Self::new(sources))
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Query every source. Never fails: a failing source contributes no
    /// results.
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        let calls = self.sources.iter().map(|source| async move {
            match source.search(query).await {
                Ok(results) => results,
                Err(e) => {
                    tracing::warn!("Search source {} failed: {}", source.name(), e);
                    Vec::new()
                }
            }
        });

        join_all(calls).await.into_iter().flatten().collect()
    }
}

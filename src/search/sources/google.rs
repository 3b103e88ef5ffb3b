use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::app::Result;
use crate::domain::{SearchResult, SourceTag};
use crate::fetcher::Fetcher;
use crate::search::SearchSource;

#[derive(Debug, Deserialize)]
struct Response {
    // Absent when the query has no hits.
    #[serde(default)]
    items: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Hit {
    cache_id: Option<String>,
    title: String,
    link: String,
    snippet: Option<String>,
}

/// Google Custom Search JSON API.
pub struct GoogleSource {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    endpoint: String,
    api_key: String,
    engine_id: String,
}

impl GoogleSource {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        }
    }

    pub fn parse(body: &[u8]) -> Result<Vec<SearchResult>> {
        let response: Response = serde_json::from_slice(body)?;
        Ok(response
            .items
            .into_iter()
            .map(|hit| {
                let id = hit.cache_id.unwrap_or_else(|| hit.link.clone());
                let mut result = SearchResult::new(id, hit.title, SourceTag::WebSearch, "Google")
                    .with_link(hit.link);
                result.snippet = hit.snippet;
                result
            })
            .collect())
    }
}

#[async_trait]
impl SearchSource for GoogleSource {
    fn name(&self) -> &str {
        "Google"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = Url::parse_with_params(
            &self.endpoint,
            &[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
            ],
        )?;
        let body = self.fetcher.get(&url, None).await?;
        Self::parse(&body)
    }
}

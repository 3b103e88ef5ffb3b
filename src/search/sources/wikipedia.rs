use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::app::Result;
use crate::domain::{SearchResult, SourceTag};
use crate::fetcher::Fetcher;
use crate::search::{clean_snippet, SearchSource};

#[derive(Debug, Deserialize)]
struct Response {
    query: QueryBlock,
}

#[derive(Debug, Deserialize)]
struct QueryBlock {
    search: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    pageid: u64,
    title: String,
    #[serde(default)]
    snippet: String,
}

/// MediaWiki full-text search (`list=search`).
pub struct WikipediaSource {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    endpoint: String,
}

impl WikipediaSource {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
        }
    }

    fn url(&self, query: &str) -> Result<Url> {
        Ok(Url::parse_with_params(
            &self.endpoint,
            &[
                ("action", "query"),
                ("list", "search"),
                ("format", "json"),
                ("srsearch", query),
            ],
        )?)
    }

    pub fn parse(body: &[u8]) -> Result<Vec<SearchResult>> {
        let response: Response = serde_json::from_slice(body)?;
        Ok(response
            .query
            .search
            .into_iter()
            .map(|hit| {
                let mut result = SearchResult::new(
                    format!("wiki-{}", hit.pageid),
                    hit.title,
                    SourceTag::Encyclopedia,
                    "Wikipedia",
                )
                .with_link(format!("https://en.wikipedia.org/?curid={}", hit.pageid));
                let snippet = clean_snippet(&hit.snippet);
                if !snippet.is_empty() {
                    result.snippet = Some(snippet);
                }
                result
            })
            .collect())
    }
}

#[async_trait]
impl SearchSource for WikipediaSource {
    fn name(&self) -> &str {
        "Wikipedia"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = self.url(query)?;
        let body = self.fetcher.get(&url, None).await?;
        Self::parse(&body)
    }
}

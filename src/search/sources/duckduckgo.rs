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
    #[serde(rename = "RelatedTopics")]
    related_topics: Vec<Topic>,
}

#[derive(Debug, Deserialize)]
struct Topic {
    #[serde(rename = "Text")]
    text: Option<String>,
    #[serde(rename = "FirstURL")]
    first_url: Option<String>,
}

/// DuckDuckGo Instant Answer API, using the related topics list.
pub struct DuckDuckGoSource {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    endpoint: String,
}

impl DuckDuckGoSource {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
        }
    }

    pub fn parse(body: &[u8]) -> Result<Vec<SearchResult>> {
        let response: Response = serde_json::from_slice(body)?;
        Ok(response
            .related_topics
            .into_iter()
            .enumerate()
            .filter_map(|(index, topic)| {
                // Topic groups carry nested topics and no text of their own.
                let text = topic.text.filter(|t| !t.is_empty())?;
                let title = text.split(" - ").next().unwrap_or(&text).to_string();
                let mut result =
                    SearchResult::new(format!("ddg-{}", index), title, SourceTag::Other, "DuckDuckGo")
                        .with_snippet(text);
                result.link = topic.first_url;
                Some(result)
            })
            .collect())
    }
}

#[async_trait]
impl SearchSource for DuckDuckGoSource {
    fn name(&self) -> &str {
        "DuckDuckGo"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = Url::parse_with_params(&self.endpoint, &[("q", query), ("format", "json")])?;
        let body = self.fetcher.get(&url, None).await?;
        Self::parse(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_related_topics() {
        let body = r#"{
            "Abstract": "",
            "RelatedTopics": [
                {"Text": "Cat - A small carnivorous mammal.", "FirstURL": "https://duckduckgo.com/Cat"},
                {"Name": "Music", "Topics": [{"Text": "Cat Stevens - Singer"}]},
                {"Text": "Catalan", "FirstURL": "https://duckduckgo.com/Catalan"}
            ]
        }"#;

        let results = DuckDuckGoSource::parse(body.as_bytes()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "ddg-0");
        assert_eq!(results[0].title, "Cat");
        assert_eq!(
            results[0].snippet.as_deref(),
            Some("Cat - A small carnivorous mammal.")
        );
        assert_eq!(results[0].link.as_deref(), Some("https://duckduckgo.com/Cat"));
        assert_eq!(results[1].id, "ddg-2");
        assert_eq!(results[1].title, "Catalan");
    }

    #[test]
    fn test_parse_missing_topics_is_error() {
        assert!(DuckDuckGoSource::parse(b"{}").is_err());
        assert!(DuckDuckGoSource::parse(b"not json").is_err());
    }
}

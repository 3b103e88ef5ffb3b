use serde::{Deserialize, Serialize};

/// Kind of source a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceTag {
    AppLocal,
    WebSearch,
    Encyclopedia,
    Other,
}

impl SourceTag {
    pub fn label(self) -> &'static str {
        match self {
            SourceTag::AppLocal => "app",
            SourceTag::WebSearch => "web",
            SourceTag::Encyclopedia => "encyclopedia",
            SourceTag::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub snippet: Option<String>,
    pub source: SourceTag,
    /// Display name of the provider, e.g. "Wikipedia".
    pub provider: String,
    pub link: Option<String>,
}

impl SearchResult {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        source: SourceTag,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            snippet: None,
            source,
            provider: provider.into(),
            link: None,
        }
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

use serde::{Deserialize, Serialize};

/// `[catalog]` section of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub endpoint: String,

    /// Search term for the feed (default: "nature")
    pub query: String,

    pub per_page: u32,

    /// Pexels API key. Falls back to the `PEXELS_API_KEY` environment variable.
    pub api_key: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.pexels.com/videos/search".to_string(),
            query: "nature".to_string(),
            per_page: 10,
            api_key: None,
        }
    }
}

impl CatalogConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("PEXELS_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

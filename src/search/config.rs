use serde::{Deserialize, Serialize};

/// `[search]` section of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Sources in result order: "app", "wikipedia", "duckduckgo", "google".
    pub sources: Vec<String>,

    /// Quiet period before a typed query runs, in milliseconds (default: 300)
    pub debounce_ms: u64,

    pub wikipedia_endpoint: String,
    pub duckduckgo_endpoint: String,
    pub google_endpoint: String,

    /// Google Custom Search credentials. The source is skipped without them.
    pub google_api_key: Option<String>,
    pub google_engine_id: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sources: vec!["wikipedia".to_string(), "duckduckgo".to_string()],
            debounce_ms: 300,
            wikipedia_endpoint: "https://en.wikipedia.org/w/api.php".to_string(),
            duckduckgo_endpoint: "https://api.duckduckgo.com/".to_string(),
            google_endpoint: "https://www.googleapis.com/customsearch/v1".to_string(),
            google_api_key: None,
            google_engine_id: None,
        }
    }
}

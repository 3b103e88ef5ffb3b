use serde::{Deserialize, Serialize};

use crate::domain::CommentItem;

/// A playable entry in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub url: String,
    pub title: String,
    /// Unknown until the catalog or the player reports it.
    pub duration_ms: Option<u64>,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub comments: Vec<CommentItem>,
}

impl VideoItem {
    pub fn new(id: impl Into<String>, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: title.into(),
            duration_ms: None,
            width: 0,
            height: 0,
            is_liked: false,
            comments: Vec::new(),
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    pub fn summary(&self) -> VideoSummary {
        VideoSummary {
            id: self.id.clone(),
            title: self.display_title().to_string(),
            thumbnail: self.url.clone(),
        }
    }
}

/// Compact row used by the profile sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
}

pub mod config;
pub mod pexels;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::VideoItem;

pub use config::CatalogConfig;
pub use pexels::PexelsCatalog;

/// Message shown in place of the feed when loading fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to fetch videos. Please try again later.";

/// Source of the videos shown on the Home feed.
#[async_trait]
pub trait VideoCatalog {
    async fn fetch_videos(&self) -> Result<Vec<VideoItem>>;
}

pub mod composer;
pub mod memory;

use crate::app::Result;
use crate::domain::{CommentItem, VideoItem};

pub use composer::CommentComposer;
pub use memory::MemoryStore;

pub trait Store {
    // Video operations
    fn replace_videos(&self, videos: Vec<VideoItem>) -> Result<()>;
    /// Fold a fresh catalog page into the feed. Local uploads stay in
    /// front; known videos keep their like flag and comments.
    fn merge_videos(&self, fetched: Vec<VideoItem>) -> Result<()>;
    fn prepend_video(&self, video: VideoItem) -> Result<()>;
    fn videos(&self) -> Result<Vec<VideoItem>>;
    fn get_video(&self, id: &str) -> Result<Option<VideoItem>>;
    fn toggle_like(&self, id: &str) -> Result<bool>;
    fn liked_videos(&self) -> Result<Vec<VideoItem>>;

    // Comment operations
    /// Appends a comment. Blank input is a no-op and yields `Ok(None)`.
    fn add_comment(&self, video_id: &str, input: &str) -> Result<Option<CommentItem>>;
    fn comments(&self, video_id: &str) -> Result<Vec<CommentItem>>;
}

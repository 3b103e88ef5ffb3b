pub mod comment;
pub mod profile;
pub mod search;
pub mod video;

pub use comment::CommentItem;
pub use profile::UserProfile;
pub use search::{SearchResult, SourceTag};
pub use video::{VideoItem, VideoSummary};

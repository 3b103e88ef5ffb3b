pub mod controller;
pub mod visibility;

pub use controller::{format_time, EntryPresentation, FeedController};
pub use visibility::{first_viewable, page_tokens, ViewToken, VISIBILITY_THRESHOLD};

//! Create-screen upload flow: permission gate, pick, build a feed entry.

pub mod fs_picker;

use async_trait::async_trait;
use uuid::Uuid;

use crate::app::{AppError, Result};
use crate::domain::VideoItem;

pub use fs_picker::FsPicker;

pub const UPLOAD_TITLE: &str = "My Uploaded Video";
pub const UPLOAD_WIDTH: u32 = 1280;
pub const UPLOAD_HEIGHT: u32 = 720;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked { uri: String },
    Cancelled,
}

#[async_trait]
pub trait MediaPicker: Send + Sync {
    async fn request_permission(&self) -> Permission;
    async fn pick_video(&self) -> Result<PickOutcome>;
}

/// Run the upload flow. Denied permission aborts with
/// [`AppError::PermissionDenied`]; cancelling yields `None`.
pub async fn upload_video<P: MediaPicker + ?Sized>(picker: &P) -> Result<Option<VideoItem>> {
    if picker.request_permission().await == Permission::Denied {
        return Err(AppError::PermissionDenied(
            "You've refused to allow this app to access your videos!".into(),
        ));
    }

    match picker.pick_video().await? {
        PickOutcome::Cancelled => {
            tracing::debug!("Upload cancelled");
            Ok(None)
        }
        PickOutcome::Picked { uri } => {
            let mut video = VideoItem::new(Uuid::new_v4().to_string(), uri, UPLOAD_TITLE);
            video.width = UPLOAD_WIDTH;
            video.height = UPLOAD_HEIGHT;
            tracing::info!("Uploaded video {} from {}", video.id, video.url);
            Ok(Some(video))
        }
    }
}

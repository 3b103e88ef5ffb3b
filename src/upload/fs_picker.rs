use std::path::PathBuf;

use async_trait::async_trait;
use url::Url;

use crate::app::{AppError, Result};
use crate::upload::{MediaPicker, Permission, PickOutcome};

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "webm", "mkv", "avi"];

/// Picks a local video file chosen by path.
pub struct FsPicker {
    path: Option<PathBuf>,
}

impl FsPicker {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    fn is_video(&self) -> bool {
        self.path
            .as_ref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
    }
}

#[async_trait]
impl MediaPicker for FsPicker {
    /// Granted when the folder holding the chosen file can be read.
    async fn request_permission(&self) -> Permission {
        let Some(path) = &self.path else {
            return Permission::Granted;
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        match tokio::fs::read_dir(&dir).await {
            Ok(_) => Permission::Granted,
            Err(e) => {
                tracing::warn!("Cannot read {}: {}", dir.display(), e);
                Permission::Denied
            }
        }
    }

    async fn pick_video(&self) -> Result<PickOutcome> {
        let Some(path) = &self.path else {
            return Ok(PickOutcome::Cancelled);
        };
        if !self.is_video() {
            tracing::warn!("Not a video file: {}", path.display());
            return Ok(PickOutcome::Cancelled);
        }

        let absolute = tokio::fs::canonicalize(path).await?;
        let uri = Url::from_file_path(&absolute)
            .map_err(|_| AppError::Other(format!("Invalid file path: {}", absolute.display())))?;
        Ok(PickOutcome::Picked {
            uri: uri.to_string(),
        })
    }
}

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use crate::app::{AppError, Result};
use crate::domain::{CommentItem, VideoItem};
use crate::store::Store;

#[derive(Default)]
struct Inner {
    videos: Vec<VideoItem>,
    /// Ids added with `prepend_video`, never part of a catalog page.
    local_ids: HashSet<String>,
}

/// In-memory feed state. Lost on process exit.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| AppError::Other(format!("store lock poisoned: {}", e)))
    }
}

impl Store for MemoryStore {
    fn replace_videos(&self, videos: Vec<VideoItem>) -> Result<()> {
        let mut inner = self.lock()?;
        inner.videos = videos;
        inner.local_ids.clear();
        Ok(())
    }

    fn merge_videos(&self, fetched: Vec<VideoItem>) -> Result<()> {
        let mut inner = self.lock()?;
        let Inner { videos, local_ids } = &mut *inner;

        let (mut merged, mut previous): (Vec<_>, Vec<_>) = std::mem::take(videos)
            .into_iter()
            .partition(|v| local_ids.contains(&v.id));

        for mut video in fetched {
            if let Some(pos) = previous.iter().position(|p| p.id == video.id) {
                let old = previous.remove(pos);
                video.is_liked = old.is_liked;
                video.comments = old.comments;
            }
            merged.push(video);
        }
        // Entries that dropped off the catalog page stay, after the fresh ones.
        merged.append(&mut previous);

        *videos = merged;
        Ok(())
    }

    fn prepend_video(&self, video: VideoItem) -> Result<()> {
        let mut inner = self.lock()?;
        inner.local_ids.insert(video.id.clone());
        inner.videos.insert(0, video);
        Ok(())
    }

    fn videos(&self) -> Result<Vec<VideoItem>> {
        Ok(self.lock()?.videos.clone())
    }

    fn get_video(&self, id: &str) -> Result<Option<VideoItem>> {
        Ok(self.lock()?.videos.iter().find(|v| v.id == id).cloned())
    }

    fn toggle_like(&self, id: &str) -> Result<bool> {
        let mut inner = self.lock()?;
        let video = inner
            .videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::VideoNotFound(id.to_string()))?;
        video.is_liked = !video.is_liked;
        Ok(video.is_liked)
    }

    fn liked_videos(&self) -> Result<Vec<VideoItem>> {
        Ok(self
            .lock()?
            .videos
            .iter()
            .filter(|v| v.is_liked)
            .cloned()
            .collect())
    }

    fn add_comment(&self, video_id: &str, input: &str) -> Result<Option<CommentItem>> {
        let mut inner = self.lock()?;
        let video = inner
            .videos
            .iter_mut()
            .find(|v| v.id == video_id)
            .ok_or_else(|| AppError::VideoNotFound(video_id.to_string()))?;

        let Some(comment) = CommentItem::from_input(input) else {
            return Ok(None);
        };

        video.comments.push(comment.clone());
        tracing::debug!("Added comment {} to video {}", comment.id, video_id);
        Ok(Some(comment))
    }

    fn comments(&self, video_id: &str) -> Result<Vec<CommentItem>> {
        self.lock()?
            .videos
            .iter()
            .find(|v| v.id == video_id)
            .map(|v| v.comments.clone())
            .ok_or_else(|| AppError::VideoNotFound(video_id.to_string()))
    }
}

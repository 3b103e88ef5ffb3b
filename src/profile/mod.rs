//! Profile screen state: the live profile, a staged edit, and the two
//! collapsible video sections.
//!
//! Every field of an edit, skills included, lives on the scratch copy
//! until [`ProfileView::save`] swaps it in.

use crate::domain::{UserProfile, VideoItem, VideoSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Username,
    Bio,
}

impl EditField {
    pub fn next(self) -> Self {
        match self {
            EditField::Name => EditField::Username,
            EditField::Username => EditField::Bio,
            EditField::Bio => EditField::Name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSection {
    pub title: &'static str,
    pub expanded: bool,
    pub videos: Vec<VideoSummary>,
}

impl VideoSection {
    fn new(title: &'static str, expanded: bool) -> Self {
        Self {
            title,
            expanded,
            videos: Vec::new(),
        }
    }

    /// Rows to render. A collapsed section shows none.
    pub fn rows(&self) -> &[VideoSummary] {
        if self.expanded {
            &self.videos
        } else {
            &[]
        }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }
}

#[derive(Debug, Clone)]
pub struct ProfileView {
    live: UserProfile,
    draft: Option<UserProfile>,
    pub uploaded: VideoSection,
    pub liked: VideoSection,
}

impl ProfileView {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            live: profile,
            draft: None,
            uploaded: VideoSection::new("Uploaded Videos", true),
            liked: VideoSection::new("Liked Videos", false),
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.live
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Open the editor on a fresh copy of the live profile.
    pub fn begin_edit(&mut self) {
        self.draft = Some(self.live.clone());
    }

    pub fn draft(&self) -> Option<&UserProfile> {
        self.draft.as_ref()
    }

    pub fn draft_field_mut(&mut self, field: EditField) -> Option<&mut String> {
        let draft = self.draft.as_mut()?;
        Some(match field {
            EditField::Name => &mut draft.name,
            EditField::Username => &mut draft.username,
            EditField::Bio => &mut draft.bio,
        })
    }

    /// Stage a new skill. Blank input is ignored. Returns true when added.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        match self.draft.as_mut() {
            Some(draft) if !skill.is_empty() => {
                draft.skills.push(skill.to_string());
                true
            }
            _ => false,
        }
    }

    /// Stage removal of every skill equal to `skill`.
    pub fn remove_skill(&mut self, skill: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.skills.retain(|s| s != skill);
        }
    }

    /// Replace the live profile with the draft in one step.
    pub fn save(&mut self) -> bool {
        match self.draft.take() {
            Some(draft) => {
                self.live = draft;
                tracing::info!("Saved profile for {}", self.live.username);
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// A fresh upload becomes the newest post.
    pub fn record_upload(&mut self, video: &VideoItem) {
        self.uploaded.videos.insert(0, video.summary());
        self.live.posts += 1;
        if let Some(draft) = self.draft.as_mut() {
            draft.posts += 1;
        }
    }

    pub fn set_liked(&mut self, videos: &[VideoItem]) {
        self.liked.videos = videos.iter().map(VideoItem::summary).collect();
    }
}

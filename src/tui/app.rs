use ratatui::widgets::ListState;

use crate::domain::{SearchResult, VideoItem};
use crate::feed::FeedController;
use crate::player::{MediaSource, SimulatedPlayer};
use crate::profile::{EditField, ProfileView};
use crate::search::{SearchSession, SearchState};
use crate::store::CommentComposer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Explore,
    Create,
    Duet,
    Profile,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Home,
        Screen::Explore,
        Screen::Create,
        Screen::Duet,
        Screen::Profile,
    ];

    pub fn next(self) -> Self {
        match self {
            Screen::Home => Screen::Explore,
            Screen::Explore => Screen::Create,
            Screen::Create => Screen::Duet,
            Screen::Duet => Screen::Profile,
            Screen::Profile => Screen::Home,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Screen::Home => Screen::Profile,
            Screen::Explore => Screen::Home,
            Screen::Create => Screen::Explore,
            Screen::Duet => Screen::Create,
            Screen::Profile => Screen::Duet,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Explore => "Explore",
            Screen::Create => "Create",
            Screen::Duet => "Duet",
            Screen::Profile => "Profile",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Which part of the profile editor receives typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditFocus {
    Field(EditField),
    NewSkill,
    Skills,
}

impl EditFocus {
    pub fn next(self) -> Self {
        match self {
            EditFocus::Field(EditField::Bio) => EditFocus::NewSkill,
            EditFocus::Field(field) => EditFocus::Field(field.next()),
            EditFocus::NewSkill => EditFocus::Skills,
            EditFocus::Skills => EditFocus::Field(EditField::Name),
        }
    }
}

/// Modal text input. Anything but `Normal` bypasses keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Comment,
    Search,
    UploadPath,
    EditProfile(EditFocus),
}

pub struct TuiApp {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub load_state: LoadState,
    pub videos: Vec<VideoItem>,
    pub feed: FeedController<SimulatedPlayer>,
    pub composer: CommentComposer,
    pub search: SearchSession,
    pub search_input: String,
    pub search_index: usize,
    pub search_list_state: ListState,
    pub upload_input: String,
    pub duet_partner: Option<VideoItem>,
    pub profile: ProfileView,
    pub skill_input: String,
    pub skill_index: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new(search: SearchSession, profile: ProfileView) -> Self {
        let mut search_list_state = ListState::default();
        search_list_state.select(Some(0));

        Self {
            screen: Screen::Home,
            input_mode: InputMode::Normal,
            load_state: LoadState::Loading,
            videos: Vec::new(),
            feed: FeedController::new(SimulatedPlayer::new()),
            composer: CommentComposer::default(),
            search,
            search_input: String::new(),
            search_index: 0,
            search_list_state,
            upload_input: String::new(),
            duet_partner: None,
            profile,
            skill_input: String::new(),
            skill_index: 0,
            should_quit: false,
            status_message: None,
        }
    }

    /// Media sources for the current video snapshot, in feed order.
    pub fn media_sources(&self) -> Vec<MediaSource> {
        self.videos
            .iter()
            .map(|v| MediaSource {
                uri: v.url.clone(),
                duration_ms: v.duration_ms,
            })
            .collect()
    }

    pub fn active_video(&self) -> Option<&VideoItem> {
        self.feed.active_index().and_then(|i| self.videos.get(i))
    }

    /// Video the comment modal is attached to.
    pub fn comment_video(&self) -> Option<&VideoItem> {
        let id = self.composer.video_id.as_deref()?;
        self.videos.iter().find(|v| v.id == id)
    }

    pub fn search_state(&self) -> SearchState {
        self.search.snapshot()
    }

    pub fn selected_result(&self) -> Option<SearchResult> {
        self.search_state().results.into_iter().nth(self.search_index)
    }

    pub fn move_result_selection(&mut self, delta: isize) {
        let count = self.search_state().results.len();
        if count == 0 {
            self.search_index = 0;
        } else {
            self.search_index = self
                .search_index
                .saturating_add_signed(delta)
                .min(count - 1);
        }
        self.search_list_state.select(Some(self.search_index));
    }

    pub fn move_skill_selection(&mut self, delta: isize) {
        let count = self.profile.draft().map_or(0, |d| d.skills.len());
        self.skill_index = if count == 0 {
            0
        } else {
            self.skill_index.saturating_add_signed(delta).min(count - 1)
        };
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::UserProfile;
    use crate::search::SearchAggregator;

    fn app() -> TuiApp {
        let session = SearchSession::new(Arc::new(SearchAggregator::new(Vec::new())));
        TuiApp::new(session, ProfileView::new(UserProfile::default()))
    }

    #[test]
    fn test_screen_cycle_covers_all_tabs() {
        let mut screen = Screen::Home;
        for expected in Screen::ALL.iter().skip(1) {
            screen = screen.next();
            assert_eq!(screen, *expected);
        }
        assert_eq!(screen.next(), Screen::Home);
        assert_eq!(Screen::Home.prev(), Screen::Profile);
    }

    #[test]
    fn test_edit_focus_cycles_through_skills() {
        let mut focus = EditFocus::Field(EditField::Name);
        let mut seen = Vec::new();
        for _ in 0..5 {
            focus = focus.next();
            seen.push(focus);
        }
        assert_eq!(
            seen,
            vec![
                EditFocus::Field(EditField::Username),
                EditFocus::Field(EditField::Bio),
                EditFocus::NewSkill,
                EditFocus::Skills,
                EditFocus::Field(EditField::Name),
            ]
        );
    }

    #[tokio::test]
    async fn test_result_selection_stays_at_zero_without_results() {
        let mut app = app();
        app.move_result_selection(3);
        assert_eq!(app.search_index, 0);
        assert!(app.selected_result().is_none());
    }

    #[tokio::test]
    async fn test_media_sources_follow_video_order() {
        let mut app = app();
        app.videos = vec![
            VideoItem::new("a", "https://cdn.example.com/a.mp4", "A"),
            VideoItem::new("b", "https://cdn.example.com/b.mp4", "B"),
        ];
        let uris: Vec<_> = app.media_sources().into_iter().map(|s| s.uri).collect();
        assert_eq!(
            uris,
            vec!["https://cdn.example.com/a.mp4", "https://cdn.example.com/b.mp4"]
        );
    }
}

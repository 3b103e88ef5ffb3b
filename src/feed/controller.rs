use crate::app::Result;
use crate::feed::visibility::{first_viewable, ViewToken};
use crate::player::{MediaPlayer, MediaSource, PlaybackStatus, StatusReceiver};

/// The single live player binding. Exactly one entry owns it at a time.
struct Binding {
    owner_index: usize,
    uri: String,
    status_rx: StatusReceiver,
}

/// How a feed entry should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPresentation {
    pub attached: bool,
    pub muted: bool,
    pub should_play: bool,
}

/// Drives one media player over a vertically paged list of entries.
///
/// Playback requires the entry to be active and the hosting screen to be
/// focused. All displayed playback state comes from the player's status
/// stream for the current binding.
pub struct FeedController<P: MediaPlayer> {
    player: P,
    entries: Vec<MediaSource>,
    active_index: Option<usize>,
    focused: bool,
    binding: Option<Binding>,
    status: PlaybackStatus,
}

impl<P: MediaPlayer> FeedController<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            entries: Vec::new(),
            active_index: None,
            focused: true,
            binding: None,
            status: PlaybackStatus::default(),
        }
    }

    /// Replace the entry list. The bound media keeps its binding wherever
    /// it moved to; otherwise the active index is clamped and rebound.
    pub fn set_entries(&mut self, entries: Vec<MediaSource>) -> Result<()> {
        self.entries = entries;

        if self.entries.is_empty() {
            self.active_index = None;
            return self.swap_binding(None);
        }

        if let Some(binding) = self.binding.as_mut() {
            let entries = &self.entries;
            let in_place = entries
                .get(binding.owner_index)
                .is_some_and(|e| e.uri == binding.uri);
            let moved_to = if in_place {
                Some(binding.owner_index)
            } else {
                entries.iter().position(|e| e.uri == binding.uri)
            };
            if let Some(index) = moved_to {
                binding.owner_index = index;
                self.active_index = Some(index);
                return Ok(());
            }
        }

        let index = self
            .active_index
            .unwrap_or(0)
            .min(self.entries.len() - 1);
        self.active_index = Some(index);
        self.swap_binding(Some(index))
    }

    /// Handle a visibility change. Returns true when the active index moved.
    pub fn on_viewable_items_changed(&mut self, tokens: &[ViewToken]) -> Result<bool> {
        let Some(index) = first_viewable(tokens) else {
            return Ok(false);
        };
        if index >= self.entries.len() || self.active_index == Some(index) {
            return Ok(false);
        }

        tracing::debug!("Active feed entry {:?} -> {}", self.active_index, index);
        self.active_index = Some(index);
        self.swap_binding(Some(index))?;
        Ok(true)
    }

    /// Move the binding to `owner`: release the old media first, then
    /// attach the new one with a fresh status stream.
    fn swap_binding(&mut self, owner: Option<usize>) -> Result<()> {
        self.binding = None;
        self.player.detach();
        self.status = PlaybackStatus::default();

        let Some(index) = owner else {
            return Ok(());
        };
        let source = &self.entries[index];
        let status_rx = self.player.attach(source, self.focused)?;
        self.binding = Some(Binding {
            owner_index: index,
            uri: source.uri.clone(),
            status_rx,
        });
        Ok(())
    }

    /// Screen focus gate, independent of the active index.
    pub fn set_focused(&mut self, focused: bool) -> Result<()> {
        if self.focused == focused {
            return Ok(());
        }
        self.focused = focused;

        if self.binding.is_none() {
            return Ok(());
        }
        if focused {
            self.player.play()
        } else {
            self.player.pause()
        }
    }

    /// Issue the inverse of the last reported play state.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.binding.is_none() {
            return Ok(());
        }
        if self.status.is_playing {
            self.player.pause()
        } else {
            self.player.play()
        }
    }

    pub fn seek(&mut self, position_ms: u64) -> Result<()> {
        if self.binding.is_none() {
            return Ok(());
        }
        self.player.seek(position_ms)
    }

    /// Seek relative to the last reported position.
    pub fn seek_by(&mut self, delta_ms: i64) -> Result<()> {
        let target = self.status.position_ms.saturating_add_signed(delta_ms);
        self.seek(target)
    }

    /// Apply pending status updates for the current binding. Restarts the
    /// media when it reports end of playback.
    pub fn poll_status(&mut self) -> Result<usize> {
        let Some(binding) = self.binding.as_mut() else {
            return Ok(0);
        };

        let mut applied = 0;
        let mut finished = false;
        while let Ok(status) = binding.status_rx.try_recv() {
            self.status = status;
            finished |= status.did_just_finish;
            applied += 1;
        }

        if finished {
            tracing::debug!("Entry {} finished, restarting", binding.owner_index);
            self.player.replay()?;
        }
        Ok(applied)
    }

    pub fn status(&self) -> &PlaybackStatus {
        &self.status
    }

    pub fn position_ms(&self) -> u64 {
        self.status.position_ms
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.status.duration_ms
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn attached_index(&self) -> Option<usize> {
        self.binding.as_ref().map(|b| b.owner_index)
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> EntryPresentation {
        let attached = self.attached_index() == Some(index);
        EntryPresentation {
            attached,
            muted: !attached,
            should_play: attached && self.focused,
        }
    }

    pub fn player(&self) -> &P {
        &self.player
    }
}

/// Render milliseconds as `m:ss`.
pub fn format_time(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tokio::sync::mpsc;

    use super::*;
    use crate::player::StatusSender;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Attach(String, bool),
        Detach,
        Play,
        Pause,
        Seek(u64),
        Replay,
    }

    #[derive(Default, Clone)]
    struct RecordingPlayer {
        calls: Arc<Mutex<Vec<Call>>>,
        sender: Arc<Mutex<Option<StatusSender>>>,
    }

    impl RecordingPlayer {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn clear(&self) {
            self.calls.lock().unwrap().clear();
        }

        fn emit(&self, status: PlaybackStatus) {
            if let Some(tx) = self.sender.lock().unwrap().as_ref() {
                let _ = tx.send(status);
            }
        }

        fn current_sender(&self) -> Option<StatusSender> {
            self.sender.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl MediaPlayer for RecordingPlayer {
        fn attach(&mut self, source: &MediaSource, autoplay: bool) -> Result<StatusReceiver> {
            self.record(Call::Attach(source.uri.clone(), autoplay));
            let (tx, rx) = mpsc::unbounded_channel();
            *self.sender.lock().unwrap() = Some(tx);
            Ok(rx)
        }

        fn detach(&mut self) {
            self.record(Call::Detach);
            *self.sender.lock().unwrap() = None;
        }

        fn play(&mut self) -> Result<()> {
            self.record(Call::Play);
            Ok(())
        }

        fn pause(&mut self) -> Result<()> {
            self.record(Call::Pause);
            Ok(())
        }

        fn seek(&mut self, position_ms: u64) -> Result<()> {
            self.record(Call::Seek(position_ms));
            Ok(())
        }

        fn replay(&mut self) -> Result<()> {
            self.record(Call::Replay);
            Ok(())
        }
    }

    fn sources(n: usize) -> Vec<MediaSource> {
        (0..n)
            .map(|i| MediaSource {
                uri: format!("https://cdn.example.com/{}.mp4", i),
                duration_ms: None,
            })
            .collect()
    }

    fn controller(n: usize) -> (FeedController<RecordingPlayer>, RecordingPlayer) {
        let player = RecordingPlayer::default();
        let mut controller = FeedController::new(player.clone());
        controller.set_entries(sources(n)).unwrap();
        (controller, player)
    }

    fn playing_at(position_ms: u64) -> PlaybackStatus {
        PlaybackStatus {
            is_playing: true,
            position_ms,
            duration_ms: Some(10_000),
            did_just_finish: false,
        }
    }

    fn attached_count(controller: &FeedController<RecordingPlayer>) -> usize {
        (0..controller.len())
            .filter(|&i| controller.entry(i).attached)
            .count()
    }

    #[test]
    fn test_first_entry_attached_on_load() {
        let (controller, player) = controller(3);
        assert_eq!(controller.active_index(), Some(0));
        assert_eq!(controller.attached_index(), Some(0));
        assert_eq!(
            player.calls(),
            vec![
                Call::Detach,
                Call::Attach("https://cdn.example.com/0.mp4".into(), true)
            ]
        );
    }

    #[test]
    fn test_active_index_is_lowest_viewable_across_sequences() {
        let (mut controller, player) = controller(8);
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;

        for _ in 0..200 {
            let mut tokens = Vec::new();
            for index in 0..8 {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                if seed >> 62 == 0 {
                    continue;
                }
                let fraction = ((seed >> 33) % 101) as f32 / 100.0;
                tokens.push(ViewToken::new(index, fraction));
            }

            let before = controller.active_index();
            player.clear();
            controller.on_viewable_items_changed(&tokens).unwrap();

            let expected = first_viewable(&tokens).or(before);
            assert_eq!(controller.active_index(), expected);
            assert_eq!(controller.attached_index(), expected);
            assert_eq!(attached_count(&controller), 1);

            // Rebinding always releases before attaching.
            let calls = player.calls();
            if controller.active_index() != before {
                assert_eq!(calls.len(), 2);
                assert_eq!(calls[0], Call::Detach);
                assert!(matches!(calls[1], Call::Attach(_, _)));
            } else {
                assert!(calls.is_empty());
            }
        }
    }

    #[test]
    fn test_below_threshold_keeps_active_index() {
        let (mut controller, _) = controller(3);
        let moved = controller
            .on_viewable_items_changed(&[ViewToken::new(2, 0.4)])
            .unwrap();
        assert!(!moved);
        assert_eq!(controller.active_index(), Some(0));
    }

    #[test]
    fn test_other_entries_are_detached_and_muted() {
        let (mut controller, _) = controller(3);
        controller
            .on_viewable_items_changed(&[ViewToken::new(1, 1.0)])
            .unwrap();

        let active = controller.entry(1);
        assert!(active.attached && !active.muted && active.should_play);
        for index in [0, 2] {
            let entry = controller.entry(index);
            assert!(!entry.attached && entry.muted && !entry.should_play);
        }
    }

    #[test]
    fn test_stale_subscription_does_not_leak_into_new_entry() {
        let (mut controller, player) = controller(3);
        let old_sender = player.current_sender().unwrap();

        controller
            .on_viewable_items_changed(&[ViewToken::new(1, 1.0)])
            .unwrap();
        let _ = old_sender.send(playing_at(9_000));
        controller.poll_status().unwrap();
        assert_eq!(controller.position_ms(), 0);
        assert_eq!(controller.duration_ms(), None);

        player.emit(playing_at(1_200));
        controller.poll_status().unwrap();
        assert_eq!(controller.position_ms(), 1_200);
    }

    #[test]
    fn test_focus_gates_playback() {
        let (mut controller, player) = controller(2);
        player.clear();

        controller.set_focused(false).unwrap();
        assert!(!controller.entry(0).should_play);
        controller.set_focused(true).unwrap();
        assert!(controller.entry(0).should_play);
        assert_eq!(player.calls(), vec![Call::Pause, Call::Play]);
    }

    #[test]
    fn test_attach_while_unfocused_does_not_autoplay() {
        let (mut controller, player) = controller(2);
        controller.set_focused(false).unwrap();
        player.clear();

        controller
            .on_viewable_items_changed(&[ViewToken::new(1, 1.0)])
            .unwrap();
        assert_eq!(
            player.calls(),
            vec![
                Call::Detach,
                Call::Attach("https://cdn.example.com/1.mp4".into(), false)
            ]
        );
    }

    #[test]
    fn test_end_of_media_restarts_without_moving() {
        let (mut controller, player) = controller(3);
        controller
            .on_viewable_items_changed(&[ViewToken::new(2, 1.0)])
            .unwrap();
        player.clear();

        player.emit(PlaybackStatus {
            is_playing: false,
            position_ms: 10_000,
            duration_ms: Some(10_000),
            did_just_finish: true,
        });
        controller.poll_status().unwrap();

        assert_eq!(player.calls(), vec![Call::Replay]);
        assert_eq!(controller.active_index(), Some(2));
    }

    #[test]
    fn test_toggle_reads_reported_state_only() {
        let (mut controller, player) = controller(1);
        player.clear();

        // Nothing reported yet: treat as paused.
        controller.toggle_play_pause().unwrap();
        controller.toggle_play_pause().unwrap();
        assert_eq!(player.calls(), vec![Call::Play, Call::Play]);

        player.emit(playing_at(500));
        controller.poll_status().unwrap();
        player.clear();
        controller.toggle_play_pause().unwrap();
        assert_eq!(player.calls(), vec![Call::Pause]);
        assert!(controller.status().is_playing);
    }

    #[test]
    fn test_seek_is_not_clamped_by_controller() {
        let (mut controller, player) = controller(1);
        player.clear();
        controller.seek(99_999_999).unwrap();
        assert_eq!(player.calls(), vec![Call::Seek(99_999_999)]);
    }

    #[test]
    fn test_seek_by_saturates_at_zero() {
        let (mut controller, player) = controller(1);
        player.emit(playing_at(2_000));
        controller.poll_status().unwrap();
        player.clear();

        controller.seek_by(-5_000).unwrap();
        controller.seek_by(3_000).unwrap();
        assert_eq!(player.calls(), vec![Call::Seek(0), Call::Seek(5_000)]);
    }

    #[test]
    fn test_commands_without_entries_are_noops() {
        let player = RecordingPlayer::default();
        let mut controller = FeedController::new(player.clone());
        controller.toggle_play_pause().unwrap();
        controller.seek(10).unwrap();
        controller.set_focused(false).unwrap();
        assert_eq!(controller.poll_status().unwrap(), 0);
        assert!(player.calls().is_empty());
    }

    #[test]
    fn test_prepended_entry_keeps_bound_media() {
        let (mut controller, player) = controller(3);
        controller
            .on_viewable_items_changed(&[ViewToken::new(1, 1.0)])
            .unwrap();
        player.clear();

        let mut entries = vec![MediaSource {
            uri: "file:///tmp/upload.mp4".into(),
            duration_ms: None,
        }];
        entries.extend(sources(3));
        controller.set_entries(entries).unwrap();

        assert_eq!(controller.active_index(), Some(2));
        assert_eq!(controller.attached_index(), Some(2));
        assert!(controller.entry(2).attached);
        assert!(player.calls().is_empty());
    }

    #[test]
    fn test_removed_media_rebinds_clamped_slot() {
        let (mut controller, player) = controller(3);
        controller
            .on_viewable_items_changed(&[ViewToken::new(2, 1.0)])
            .unwrap();
        player.clear();

        controller.set_entries(sources(2)).unwrap();

        assert_eq!(controller.active_index(), Some(1));
        assert_eq!(
            player.calls(),
            vec![
                Call::Detach,
                Call::Attach("https://cdn.example.com/1.mp4".into(), true)
            ]
        );
    }

    #[test]
    fn test_unchanged_entries_keep_binding() {
        let (mut controller, player) = controller(2);
        player.clear();
        controller.set_entries(sources(2)).unwrap();
        assert!(player.calls().is_empty());
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(9_999), "0:09");
        assert_eq!(format_time(61_000), "1:01");
        assert_eq!(format_time(600_000), "10:00");
    }
}

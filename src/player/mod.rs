//! Media player seam used by the feed controller.
//!
//! A player is bound to one media source at a time. Commands are
//! fire-and-forget; the authoritative state arrives on the status stream
//! returned by [`MediaPlayer::attach`].

pub mod simulated;

use tokio::sync::mpsc;

use crate::app::Result;

pub use simulated::SimulatedPlayer;

/// Snapshot reported by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub is_playing: bool,
    pub position_ms: u64,
    /// `None` until the player knows the media length.
    pub duration_ms: Option<u64>,
    pub did_just_finish: bool,
}

pub type StatusReceiver = mpsc::UnboundedReceiver<PlaybackStatus>;
pub type StatusSender = mpsc::UnboundedSender<PlaybackStatus>;

/// What to load into the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    pub uri: String,
    pub duration_ms: Option<u64>,
}

pub trait MediaPlayer: Send {
    /// Load `source` and return the status stream for this attachment.
    /// Any previous attachment is released first.
    fn attach(&mut self, source: &MediaSource, autoplay: bool) -> Result<StatusReceiver>;

    /// Release the current media. Must not fail when nothing is attached.
    fn detach(&mut self);

    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    /// Absolute seek. Clamping is up to the player.
    fn seek(&mut self, position_ms: u64) -> Result<()>;
    /// Restart from the beginning and play.
    fn replay(&mut self) -> Result<()>;
}

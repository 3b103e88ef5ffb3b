use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

use crate::app::{AppError, Result};
use crate::player::{MediaPlayer, MediaSource, PlaybackStatus, StatusReceiver, StatusSender};

pub const TICK: Duration = Duration::from_millis(250);

/// Clip length assumed when the source does not report one.
pub const DEFAULT_CLIP_MS: u64 = 15_000;

#[derive(Debug)]
enum Command {
    Play,
    Pause,
    Seek(u64),
    Replay,
}

/// Clock-driven stand-in for a real decoder. Each attachment spawns a
/// driver task that advances the position while playing and reports
/// status on every change.
#[derive(Default)]
pub struct SimulatedPlayer {
    commands: Option<mpsc::UnboundedSender<Command>>,
}

impl SimulatedPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    fn send(&self, command: Command) -> Result<()> {
        let tx = self
            .commands
            .as_ref()
            .ok_or_else(|| AppError::Player("no media attached".into()))?;
        tx.send(command)
            .map_err(|_| AppError::Player("player task stopped".into()))
    }
}

impl MediaPlayer for SimulatedPlayer {
    fn attach(&mut self, source: &MediaSource, autoplay: bool) -> Result<StatusReceiver> {
        self.detach();

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = mpsc::unbounded_channel();
        let duration = source.duration_ms.unwrap_or(DEFAULT_CLIP_MS);

        tracing::debug!("Attaching simulated player to {}", source.uri);
        tokio::spawn(drive(cmd_rx, status_tx, duration, autoplay));

        self.commands = Some(cmd_tx);
        Ok(status_rx)
    }

    fn detach(&mut self) {
        // Dropping the sender ends the driver task.
        self.commands = None;
    }

    fn play(&mut self) -> Result<()> {
        self.send(Command::Play)
    }

    fn pause(&mut self) -> Result<()> {
        self.send(Command::Pause)
    }

    fn seek(&mut self, position_ms: u64) -> Result<()> {
        self.send(Command::Seek(position_ms))
    }

    fn replay(&mut self) -> Result<()> {
        self.send(Command::Replay)
    }
}

async fn drive(
    mut commands: mpsc::UnboundedReceiver<Command>,
    status_tx: StatusSender,
    duration_ms: u64,
    autoplay: bool,
) {
    let mut status = PlaybackStatus {
        is_playing: autoplay,
        position_ms: 0,
        duration_ms: Some(duration_ms),
        did_just_finish: false,
    };
    let mut ticker = interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    if status_tx.send(status).is_err() {
        return;
    }

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else { break };
                status.did_just_finish = false;
                match command {
                    Command::Play => {
                        if status.position_ms >= duration_ms {
                            status.position_ms = 0;
                        }
                        status.is_playing = true;
                    }
                    Command::Pause => status.is_playing = false,
                    Command::Seek(ms) => status.position_ms = ms.min(duration_ms),
                    Command::Replay => {
                        status.position_ms = 0;
                        status.is_playing = true;
                    }
                }
            }
            _ = ticker.tick() => {
                if !status.is_playing {
                    continue;
                }
                status.position_ms = (status.position_ms + TICK.as_millis() as u64).min(duration_ms);
                status.did_just_finish = status.position_ms >= duration_ms;
                if status.did_just_finish {
                    status.is_playing = false;
                }
            }
        }

        if status_tx.send(status).is_err() {
            break;
        }
    }

    tracing::trace!("Simulated player task finished");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(duration_ms: u64) -> MediaSource {
        MediaSource {
            uri: "https://cdn.example.com/clip.mp4".into(),
            duration_ms: Some(duration_ms),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reports_initial_status() {
        let mut player = SimulatedPlayer::new();
        let mut rx = player.attach(&source(1_000), true).unwrap();

        let first = rx.recv().await.unwrap();
        assert!(first.is_playing);
        assert_eq!(first.position_ms, 0);
        assert_eq!(first.duration_ms, Some(1_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_finishes_at_end_of_media() {
        let mut player = SimulatedPlayer::new();
        let mut rx = player.attach(&source(500), true).unwrap();

        let mut last = rx.recv().await.unwrap();
        while !last.did_just_finish {
            last = rx.recv().await.unwrap();
        }
        assert_eq!(last.position_ms, 500);
        assert!(!last.is_playing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seek_is_clamped_by_player() {
        let mut player = SimulatedPlayer::new();
        let mut rx = player.attach(&source(2_000), false).unwrap();
        rx.recv().await.unwrap();

        player.seek(10_000).unwrap();
        let status = rx.recv().await.unwrap();
        assert_eq!(status.position_ms, 2_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detach_closes_status_stream() {
        let mut player = SimulatedPlayer::new();
        let mut rx = player.attach(&source(2_000), false).unwrap();
        rx.recv().await.unwrap();

        player.detach();
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_detach_without_attach_is_fine() {
        let mut player = SimulatedPlayer::new();
        player.detach();
        assert!(player.play().is_err());
    }
}

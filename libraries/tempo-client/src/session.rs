//! Player session: a playback engine wired to play reporting.
//!
//! The engine itself performs no I/O. After every transition the session
//! drains the engine's events and, for each `TrackStarted`, spawns a
//! fire-and-forget report to the server. Report failures are logged and
//! never roll back local playback state; rapid skipping may leave several
//! reports in flight.

use crate::client::TempoClient;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tempo_core::{Track, TrackId};
use tempo_playback::{
    AlbumRef, ArtistRef, PlaybackConfig, PlaybackEngine, PlaybackEvent, QueueTrack, RepeatMode,
};
use tracing::{debug, warn};

/// Receiver of "track started playing" notifications.
#[async_trait]
pub trait PlayReporter: Send + Sync {
    /// Record one play of `track_id` for the current user.
    async fn report_play(&self, track_id: TrackId) -> Result<()>;
}

#[async_trait]
impl PlayReporter for TempoClient {
    async fn report_play(&self, track_id: TrackId) -> Result<()> {
        self.record_play(track_id).await.map(|_| ())
    }
}

/// Clamp a volume from the UI to [0, 1]; NaN becomes 0.
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Convert a catalog track into a queue entry.
pub fn to_queue_track(track: Track) -> QueueTrack {
    QueueTrack {
        id: track.id,
        title: track.title,
        duration_secs: track.duration,
        file_url: track.file_url,
        cover_url: track.cover_url,
        artist: ArtistRef {
            id: track.artist.id,
            name: track.artist.name,
        },
        album: track.album.map(|album| AlbumRef {
            id: album.id,
            title: album.title,
        }),
    }
}

/// Convert an ordered collection of catalog tracks into a queue.
pub fn to_queue(tracks: impl IntoIterator<Item = Track>) -> Vec<QueueTrack> {
    tracks.into_iter().map(to_queue_track).collect()
}

/// One listener's playback session.
///
/// Must be driven from within a Tokio runtime (reports are spawned tasks).
/// Each method returns the events the transition produced so the UI can
/// react to them.
pub struct PlayerSession {
    engine: PlaybackEngine,
    reporter: Arc<dyn PlayReporter>,
}

impl PlayerSession {
    pub fn new(reporter: Arc<dyn PlayReporter>, config: PlaybackConfig) -> Self {
        Self {
            engine: PlaybackEngine::new(config),
            reporter,
        }
    }

    /// Read access to the engine state.
    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    /// Replace the queue with `tracks` and start the one at `start_index`.
    pub fn play_collection(&mut self, tracks: Vec<QueueTrack>, start_index: usize) -> Vec<PlaybackEvent> {
        self.engine.play_collection(tracks, start_index);
        self.dispatch()
    }

    /// Start a single track without touching the queue.
    pub fn play_track(&mut self, track: QueueTrack) -> Vec<PlaybackEvent> {
        self.engine.set_current_track(track);
        self.dispatch()
    }

    pub fn add_to_queue(&mut self, track: QueueTrack) -> Vec<PlaybackEvent> {
        self.engine.add_to_queue(track);
        self.dispatch()
    }

    pub fn next(&mut self) -> Vec<PlaybackEvent> {
        self.engine.play_next();
        self.dispatch()
    }

    pub fn previous(&mut self) -> Vec<PlaybackEvent> {
        self.engine.play_previous();
        self.dispatch()
    }

    pub fn toggle_play(&mut self) -> Vec<PlaybackEvent> {
        self.engine.toggle_play();
        self.dispatch()
    }

    pub fn clear(&mut self) -> Vec<PlaybackEvent> {
        self.engine.clear_queue();
        self.dispatch()
    }

    /// Set volume from a UI control (clamped).
    pub fn set_volume(&mut self, volume: f32) {
        self.engine.set_volume(clamp_volume(volume));
    }

    /// Repeat button: off → all → one → off.
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.engine.cycle_repeat()
    }

    pub fn toggle_shuffle(&mut self) {
        self.engine.toggle_shuffle();
    }

    // ===== Media element callbacks =====

    /// Periodic progress tick.
    pub fn time_update(&mut self, seconds: f64) {
        self.engine.set_current_time(seconds);
    }

    /// The media element started or paused playback.
    pub fn media_playing(&mut self, is_playing: bool) -> Vec<PlaybackEvent> {
        self.engine.set_is_playing(is_playing);
        self.dispatch()
    }

    /// The media element reached the end of the current track.
    pub fn track_ended(&mut self) -> Vec<PlaybackEvent> {
        self.engine.on_track_ended();
        self.dispatch()
    }

    fn dispatch(&mut self) -> Vec<PlaybackEvent> {
        let events = self.engine.drain_events();

        for event in &events {
            if let PlaybackEvent::TrackStarted { track_id } = *event {
                let reporter = Arc::clone(&self.reporter);
                tokio::spawn(async move {
                    match reporter.report_play(track_id).await {
                        Ok(()) => debug!(track_id, "Play reported"),
                        Err(e) => warn!(track_id, error = %e, "Failed to report play"),
                    }
                });
            }
        }

        events
    }
}

//! Playback events
//!
//! The engine performs no I/O. Transitions push events into an outbox that
//! the owner drains after each call; `TrackStarted` is the cue to report a
//! play to the server.

use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// A track was assigned as current (also when the same track is
    /// assigned again, e.g. a one-track queue wrapping around)
    TrackStarted {
        /// ID of the new current track
        track_id: i64,
    },

    /// The playing flag changed
    PlayStateChanged {
        /// New value of the flag
        is_playing: bool,
    },

    /// The current track restarts from 0 without changing
    PositionReset {
        /// ID of the restarted track
        track_id: i64,
    },

    /// The queue was replaced or extended
    QueueChanged {
        /// Queue length after the change
        len: usize,
    },

    /// Queue and current track were cleared
    QueueCleared,
}

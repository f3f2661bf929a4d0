//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Track information for queue management
///
/// Carries what the player needs to stream and display a track, copied from
/// the catalog when a collection is queued. Identity is the catalog `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueTrack {
    /// Catalog track identifier
    pub id: i64,

    /// Track title
    pub title: String,

    /// Track duration in whole seconds
    #[serde(rename = "duration")]
    pub duration_secs: u32,

    /// Locator of the audio stream
    pub file_url: String,

    /// Cover art locator
    pub cover_url: Option<String>,

    /// Performing artist
    pub artist: ArtistRef,

    /// Album the track belongs to, if any
    pub album: Option<AlbumRef>,
}

/// Artist reference shown next to a queued track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: i64,
    pub name: String,
}

/// Album reference shown next to a queued track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: i64,
    pub title: String,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the queue ends
    #[default]
    Off,

    /// Loop the entire queue
    All,

    /// Loop the current track on natural end
    One,
}

impl RepeatMode {
    /// Next mode in the UI cycle: off → all → one → off
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// Configuration for a new playback engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume in [0, 1] (default: 0.7)
    pub volume: f32,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
            repeat: RepeatMode::Off,
            shuffle: false,
        }
    }
}

/// Snapshot of the whole engine state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub current_track: Option<QueueTrack>,
    pub queue: Vec<QueueTrack>,
    pub is_playing: bool,
    /// Elapsed seconds in the current track
    pub current_time: f64,
    pub volume: f32,
    pub repeat: RepeatMode,
    pub shuffle: bool,
}

//! Tempo - Playback Engine
//!
//! Client-side playback state for Tempo: the play queue, the current track
//! and the transport state (playing flag, elapsed time, volume, repeat,
//! shuffle).
//!
//! This crate provides:
//! - Queue management (replace, append, clear)
//! - Next/previous navigation with repeat-all wrap-around
//! - "Previous" restarts the current track after 3 seconds
//! - End-of-track policy (repeat-one restarts, otherwise advance)
//! - An event outbox for side effects such as reporting plays
//!
//! # Architecture
//!
//! The engine is a plain value with `&mut self` transitions. It performs no
//! I/O and has no dependency on the HTTP client or the audio element; the
//! owner drains [`PlaybackEvent`]s after each call and acts on them.
//!
//! # Example
//!
//! ```rust
//! use tempo_playback::{ArtistRef, PlaybackEngine, PlaybackEvent, QueueTrack, RepeatMode};
//!
//! let track = |id: i64| QueueTrack {
//!     id,
//!     title: format!("Track {id}"),
//!     duration_secs: 180,
//!     file_url: format!("/music/{id}.mp3"),
//!     cover_url: None,
//!     artist: ArtistRef { id: 1, name: "The Midnight".to_string() },
//!     album: None,
//! };
//!
//! let mut engine = PlaybackEngine::default();
//! engine.play_collection(vec![track(1), track(2)], 0);
//! engine.set_repeat(RepeatMode::All);
//!
//! engine.play_next();
//! engine.play_next(); // wraps to the first track
//! assert_eq!(engine.current_track().map(|t| t.id), Some(1));
//!
//! let started: Vec<_> = engine
//!     .drain_events()
//!     .into_iter()
//!     .filter(|e| matches!(e, PlaybackEvent::TrackStarted { .. }))
//!     .collect();
//! assert_eq!(started.len(), 3);
//! ```

pub mod engine;
pub mod events;
pub mod queue;
pub mod types;

pub use engine::{PlaybackEngine, RESTART_THRESHOLD_SECS};
pub use events::PlaybackEvent;
pub use queue::Queue;
pub use types::{AlbumRef, ArtistRef, PlaybackConfig, PlaybackState, QueueTrack, RepeatMode};

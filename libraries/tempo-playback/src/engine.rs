//! Playback engine - queue traversal and transport state
//!
//! A plain state container: every operation is a synchronous transition
//! that cannot fail. The owner serializes calls (`&mut self`), drains the
//! event outbox afterwards and performs any side effects itself.

use crate::{
    events::PlaybackEvent,
    queue::Queue,
    types::{PlaybackConfig, PlaybackState, QueueTrack, RepeatMode},
};

/// Elapsed seconds after which "previous" restarts the current track
/// instead of moving back
pub const RESTART_THRESHOLD_SECS: f64 = 3.0;

/// Client playback state machine
///
/// Holds the current track, the queue and the transport state (playing
/// flag, elapsed time, volume, repeat, shuffle).
///
/// Invariant: `current_time` is 0 right after the current track changes.
#[derive(Debug, Clone)]
pub struct PlaybackEngine {
    current_track: Option<QueueTrack>,
    queue: Queue,
    is_playing: bool,
    current_time: f64,
    volume: f32,
    repeat: RepeatMode,
    shuffle: bool,

    // Outbox drained by the owner
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackEngine {
    /// Create an engine with nothing queued
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            current_track: None,
            queue: Queue::new(),
            is_playing: false,
            current_time: 0.0,
            volume: config.volume,
            repeat: config.repeat,
            shuffle: config.shuffle,
            pending_events: Vec::new(),
        }
    }

    // ===== Track and queue =====

    /// Make `track` current and start playing it from 0
    ///
    /// The track does not have to be in the queue.
    pub fn set_current_track(&mut self, track: QueueTrack) {
        self.start_track(track);
        self.set_is_playing(true);
    }

    /// Replace the queue; the current track is kept
    pub fn set_queue(&mut self, tracks: Vec<QueueTrack>) {
        self.queue.replace(tracks);
        self.pending_events.push(PlaybackEvent::QueueChanged {
            len: self.queue.len(),
        });
    }

    /// Append a track to the queue; the current track is kept
    pub fn add_to_queue(&mut self, track: QueueTrack) {
        self.queue.push(track);
        self.pending_events.push(PlaybackEvent::QueueChanged {
            len: self.queue.len(),
        });
    }

    /// Queue a whole collection (album, playlist, search results) and start
    /// playing the track at `start_index`
    ///
    /// With an out-of-range index the queue is still replaced but the current
    /// track is left alone.
    pub fn play_collection(&mut self, tracks: Vec<QueueTrack>, start_index: usize) {
        let start = tracks.get(start_index).cloned();
        self.set_queue(tracks);
        if let Some(track) = start {
            self.set_current_track(track);
        }
    }

    /// Empty the queue and stop
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.current_track = None;
        self.current_time = 0.0;
        self.set_is_playing(false);
        self.pending_events.push(PlaybackEvent::QueueCleared);
    }

    // ===== Transport =====

    /// Flip the playing flag
    pub fn toggle_play(&mut self) {
        self.set_is_playing(!self.is_playing);
    }

    /// Set the playing flag
    ///
    /// Media-element echoes may arrive late; the last write wins.
    pub fn set_is_playing(&mut self, is_playing: bool) {
        if self.is_playing != is_playing {
            self.is_playing = is_playing;
            self.pending_events
                .push(PlaybackEvent::PlayStateChanged { is_playing });
        }
    }

    /// Record elapsed seconds reported by the media element
    pub fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
    }

    /// Set volume; callers clamp to [0, 1] before calling
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    /// Set the repeat mode
    pub fn set_repeat(&mut self, repeat: RepeatMode) {
        self.repeat = repeat;
    }

    /// Advance repeat through off → all → one → off and return the new mode
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.next();
        self.repeat
    }

    /// Flip the shuffle flag
    ///
    /// Traversal order is not affected.
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    // ===== Navigation =====

    /// Move to the next track in the queue
    ///
    /// From the last track this wraps to the first only with
    /// `RepeatMode::All`; otherwise nothing changes. A current track that is
    /// not in the queue moves to the queue's first track.
    pub fn play_next(&mut self) {
        let Some(current) = &self.current_track else {
            return;
        };

        let next_index = match self.queue.position_of(current.id) {
            Some(index) if index + 1 < self.queue.len() => Some(index + 1),
            Some(_) if self.repeat == RepeatMode::All => Some(0),
            Some(_) => None,
            None => (!self.queue.is_empty()).then_some(0),
        };

        if let Some(track) = next_index.and_then(|i| self.queue.get(i)).cloned() {
            self.start_track(track);
        }
    }

    /// Restart the current track, or move to the previous one
    ///
    /// Past `RESTART_THRESHOLD_SECS` the current track restarts from 0.
    /// Otherwise it moves one track back; on the first track (or a track
    /// not in the queue) nothing changes.
    pub fn play_previous(&mut self) {
        let Some(current) = &self.current_track else {
            return;
        };

        if self.current_time > RESTART_THRESHOLD_SECS {
            let track_id = current.id;
            self.restart_current(track_id);
            return;
        }

        let previous = match self.queue.position_of(current.id) {
            Some(index) if index > 0 => self.queue.get(index - 1).cloned(),
            _ => None,
        };

        if let Some(track) = previous {
            self.start_track(track);
        }
    }

    /// Natural end of the current track
    ///
    /// `RepeatMode::One` restarts the same track and keeps playing; any
    /// other mode behaves like [`play_next`](Self::play_next).
    pub fn on_track_ended(&mut self) {
        if self.repeat == RepeatMode::One {
            if let Some(track_id) = self.current_track.as_ref().map(|t| t.id) {
                self.restart_current(track_id);
                self.set_is_playing(true);
                return;
            }
        }

        self.play_next();
    }

    fn start_track(&mut self, track: QueueTrack) {
        let track_id = track.id;
        self.current_track = Some(track);
        self.current_time = 0.0;
        self.pending_events
            .push(PlaybackEvent::TrackStarted { track_id });
    }

    fn restart_current(&mut self, track_id: i64) {
        self.current_time = 0.0;
        self.pending_events
            .push(PlaybackEvent::PositionReset { track_id });
    }

    // ===== State =====

    /// Track being played, if any
    pub fn current_track(&self) -> Option<&QueueTrack> {
        self.current_track.as_ref()
    }

    /// Queued tracks in order
    pub fn queue(&self) -> &[QueueTrack] {
        self.queue.as_slice()
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Elapsed seconds in the current track
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Volume as last set, unclamped
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Whether the shuffle flag is on
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Owned snapshot of the full state
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_track: self.current_track.clone(),
            queue: self.queue.as_slice().to_vec(),
            is_playing: self.is_playing,
            current_time: self.current_time,
            volume: self.volume,
            repeat: self.repeat,
            shuffle: self.shuffle,
        }
    }

    // ===== Events =====

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Whether events are waiting to be drained
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArtistRef;

    fn track(id: i64) -> QueueTrack {
        QueueTrack {
            id,
            title: format!("Track {}", id),
            duration_secs: 200,
            file_url: format!("/music/{}.mp3", id),
            cover_url: None,
            artist: ArtistRef {
                id: 1,
                name: "Test Artist".to_string(),
            },
            album: None,
        }
    }

    #[test]
    fn test_defaults() {
        let engine = PlaybackEngine::default();
        assert!(engine.current_track().is_none());
        assert!(engine.queue().is_empty());
        assert!(!engine.is_playing());
        assert_eq!(engine.volume(), 0.7);
        assert_eq!(engine.repeat(), RepeatMode::Off);
        assert!(!engine.shuffle());
    }

    #[test]
    fn test_set_current_track_starts_playing_from_zero() {
        let mut engine = PlaybackEngine::default();
        engine.set_current_time(42.0);

        engine.set_current_track(track(1));

        assert_eq!(engine.current_track().map(|t| t.id), Some(1));
        assert!(engine.is_playing());
        assert_eq!(engine.current_time(), 0.0);
        assert_eq!(
            engine.drain_events(),
            vec![
                PlaybackEvent::TrackStarted { track_id: 1 },
                PlaybackEvent::PlayStateChanged { is_playing: true },
            ]
        );
    }

    #[test]
    fn test_set_queue_keeps_current_track() {
        let mut engine = PlaybackEngine::default();
        engine.set_current_track(track(9));

        engine.set_queue(vec![track(1), track(2)]);
        engine.add_to_queue(track(3));

        assert_eq!(engine.current_track().map(|t| t.id), Some(9));
        assert_eq!(engine.queue().len(), 3);
    }

    #[test]
    fn test_toggle_play_and_echo() {
        let mut engine = PlaybackEngine::default();
        engine.toggle_play();
        assert!(engine.is_playing());
        engine.toggle_play();
        assert!(!engine.is_playing());

        engine.drain_events();
        engine.set_is_playing(false);
        assert!(!engine.has_pending_events());
    }

    #[test]
    fn test_cycle_repeat_order() {
        let mut engine = PlaybackEngine::default();
        assert_eq!(engine.cycle_repeat(), RepeatMode::All);
        assert_eq!(engine.cycle_repeat(), RepeatMode::One);
        assert_eq!(engine.cycle_repeat(), RepeatMode::Off);
    }

    #[test]
    fn test_shuffle_does_not_change_order() {
        let mut engine = PlaybackEngine::default();
        engine.set_queue(vec![track(1), track(2), track(3)]);
        engine.set_current_track(track(1));
        engine.toggle_shuffle();
        assert!(engine.shuffle());

        engine.play_next();
        assert_eq!(engine.current_track().map(|t| t.id), Some(2));
    }

    #[test]
    fn test_navigation_without_current_track_is_noop() {
        let mut engine = PlaybackEngine::default();
        engine.set_queue(vec![track(1), track(2)]);
        engine.drain_events();

        engine.play_next();
        engine.play_previous();

        assert!(engine.current_track().is_none());
        assert!(!engine.has_pending_events());
    }

    #[test]
    fn test_next_from_track_outside_queue_goes_to_first() {
        let mut engine = PlaybackEngine::default();
        engine.set_queue(vec![track(1), track(2)]);
        engine.set_current_track(track(7));

        engine.play_next();
        assert_eq!(engine.current_track().map(|t| t.id), Some(1));
    }

    #[test]
    fn test_previous_from_track_outside_queue_is_noop() {
        let mut engine = PlaybackEngine::default();
        engine.set_queue(vec![track(1), track(2)]);
        engine.set_current_track(track(7));

        engine.play_previous();
        assert_eq!(engine.current_track().map(|t| t.id), Some(7));
    }

    #[test]
    fn test_play_collection() {
        let mut engine = PlaybackEngine::default();
        engine.play_collection(vec![track(1), track(2), track(3)], 1);

        assert_eq!(engine.queue().len(), 3);
        assert_eq!(engine.current_track().map(|t| t.id), Some(2));
        assert!(engine.is_playing());

        engine.play_collection(vec![track(4)], 5);
        assert_eq!(engine.queue().len(), 1);
        assert_eq!(engine.current_track().map(|t| t.id), Some(2));
    }

    #[test]
    fn test_wrap_on_single_track_queue_emits_track_started() {
        let mut engine = PlaybackEngine::default();
        engine.set_repeat(RepeatMode::All);
        engine.play_collection(vec![track(1)], 0);
        engine.set_current_time(10.0);
        engine.drain_events();

        engine.play_next();

        assert_eq!(engine.current_time(), 0.0);
        assert_eq!(
            engine.drain_events(),
            vec![PlaybackEvent::TrackStarted { track_id: 1 }]
        );
    }

    #[test]
    fn test_state_snapshot_serializes_camel_case() {
        let mut engine = PlaybackEngine::default();
        engine.set_current_track(track(1));
        engine.set_repeat(RepeatMode::One);

        let json = serde_json::to_value(engine.state()).unwrap();
        assert_eq!(json["isPlaying"], true);
        assert_eq!(json["repeat"], "one");
        assert_eq!(json["currentTrack"]["fileUrl"], "/music/1.mp3");
        assert_eq!(json["currentTrack"]["duration"], 200);
    }
}

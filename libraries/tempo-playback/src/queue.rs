//! Play queue
//!
//! An ordered list of tracks. The same track may appear more than once;
//! lookups by id return the first occurrence.

use crate::types::QueueTrack;

/// Ordered sequence of tracks the engine traverses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    tracks: Vec<QueueTrack>,
}

impl Queue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents wholesale
    pub fn replace(&mut self, tracks: Vec<QueueTrack>) {
        self.tracks = tracks;
    }

    /// Append a track to the end
    pub fn push(&mut self, track: QueueTrack) {
        self.tracks.push(track);
    }

    /// Remove every track
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Index of the first track with this id
    pub fn position_of(&self, track_id: i64) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track_id)
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&QueueTrack> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks in queue order
    pub fn as_slice(&self) -> &[QueueTrack] {
        &self.tracks
    }
}

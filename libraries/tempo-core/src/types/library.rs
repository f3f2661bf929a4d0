//! Per-user library entries: favorites and listening history

use crate::types::Track;
use serde::{Deserialize, Serialize};

/// A favorited track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteTrack {
    #[serde(flatten)]
    pub track: Track,
    pub favorited_at: String,
}

/// One recorded play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub track: Track,
    pub played_at: String,
}

//! Pagination and search query types

use crate::error::TempoError;
use crate::types::{Album, Artist, Track};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Offset pagination for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    /// Default page size for catalog listings
    pub const DEFAULT_LIMIT: u32 = 50;

    /// Build a page, falling back to the defaults for missing values
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }

    /// First `limit` rows
    pub fn first(limit: u32) -> Self {
        Self { limit, offset: 0 }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Which catalog categories a search covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    #[default]
    All,
    Tracks,
    Artists,
    Albums,
}

impl SearchKind {
    pub fn includes_tracks(self) -> bool {
        matches!(self, Self::All | Self::Tracks)
    }

    pub fn includes_artists(self) -> bool {
        matches!(self, Self::All | Self::Artists)
    }

    pub fn includes_albums(self) -> bool {
        matches!(self, Self::All | Self::Albums)
    }
}

impl FromStr for SearchKind {
    type Err = TempoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "tracks" => Ok(Self::Tracks),
            "artists" => Ok(Self::Artists),
            "albums" => Ok(Self::Albums),
            other => Err(TempoError::invalid_input(format!(
                "Unknown search type '{}'. Must be one of all, tracks, artists, albums",
                other
            ))),
        }
    }
}

/// Search results, one list per category (empty when not requested)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub tracks: Vec<Track>,
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
}

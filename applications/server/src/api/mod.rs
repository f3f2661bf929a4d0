/// API route modules
pub mod albums;
pub mod artists;
pub mod auth;
pub mod health;
pub mod playlists;
pub mod search;
pub mod tracks;
pub mod users;

use serde::{Deserialize, Serialize};
use tempo_core::Page;

/// `?limit=&offset=` on catalog listings
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl From<PageParams> for Page {
    fn from(params: PageParams) -> Self {
        Page::new(params.limit, params.offset)
    }
}

/// `?limit=` on ranked listings
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<u32>,
}

/// Acknowledgement body for mutations
#[derive(Debug, Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

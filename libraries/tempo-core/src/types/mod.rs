mod album;
mod artist;
mod ids;
mod library;
mod playlist;
mod query;
mod track;
mod user;

pub use album::{Album, AlbumDetail, AlbumSummary};
pub use artist::{Artist, ArtistDetail};
pub use ids::{AlbumId, ArtistId, PlaylistId, TrackId, UserId};
pub use library::{FavoriteTrack, HistoryEntry};
pub use playlist::{
    CreatePlaylist, Playlist, PlaylistDetail, PlaylistOwner, PlaylistTrack, UpdatePlaylist,
};
pub use query::{Page, SearchKind, SearchResults};
pub use track::{AlbumRef, ArtistRef, Track};
pub use user::{CreateUser, User};

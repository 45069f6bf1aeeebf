pub mod client;
pub mod schema;

use async_trait::async_trait;

use crate::session::SessionToken;
pub use client::HttpBackend;
pub use schema::{PlayedTrack, Playlist, Track};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// The game backend as seen by the screen controller.
///
/// Every call is fire-once: implementations must not retry, and the controller
/// decides whether a failure is shown to the user or only logged.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Attach (or drop) the session token sent along with every request.
    fn set_session(&mut self, session: Option<SessionToken>);

    /// URL of the Spotify consent page the user has to visit.
    async fn authorize_url(&self) -> Result<String, ApiError>;

    /// Full playlist collection, in backend order.
    async fn playlists(&self) -> Result<Vec<Playlist>, ApiError>;

    async fn add_playlist(&self, url: &str) -> Result<(), ApiError>;

    async fn remove_playlist(&self, id: &str) -> Result<(), ApiError>;

    /// A random, not-yet-played track from the given playlist.
    async fn random_track(&self, playlist_id: &str) -> Result<Track, ApiError>;

    /// Clear the server-side play state of the session.
    async fn reset(&self) -> Result<(), ApiError>;

    async fn played_tracks(&self) -> Result<Vec<PlayedTrack>, ApiError>;
}

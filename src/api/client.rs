use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::schema::{
    AddPlaylistRequest, AuthorizeResponse, PlayedTrack, Playlist, PlaylistsResponse, Track,
    TrackResponse,
};
use crate::api::{ApiError, Backend};
use crate::session::{SESSION_PARAM, SessionToken};

/// [`Backend`] over HTTP/JSON.
///
/// No timeout is configured: a request either resolves, fails, or stays pending.
pub struct HttpBackend {
    client: Client,
    base: Url,
    session: Option<SessionToken>,
}

impl HttpBackend {
    /// Build a client for the backend rooted at `base` (e.g. `http://localhost:5000`).
    pub fn new(base: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        let client = Client::builder()
            .user_agent(concat!("songamizer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base,
            session: None,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Append path segments (percent-encoded) to the base URL and attach the session.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if let Some(session) = &self.session {
            url.query_pairs_mut()
                .append_pair(SESSION_PARAM, session.as_str());
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments);
        // Path only, the query carries the session token.
        tracing::debug!("GET {}", url.path());
        let response = self.client.get(url).send().await?;
        decode(response).await
    }
}

/// Non-2xx → `Status`; 2xx with a body that doesn't match `T` → `Decode`.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn expect_success(response: Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status(status))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn set_session(&mut self, session: Option<SessionToken>) {
        self.session = session;
    }

    async fn authorize_url(&self) -> Result<String, ApiError> {
        let body: AuthorizeResponse = self.get_json(&["api", "spotify", "authorize"]).await?;
        // Reject anything we could not hand to a browser.
        let auth_url = Url::parse(body.auth_url.trim())?;
        Ok(auth_url.into())
    }

    async fn playlists(&self) -> Result<Vec<Playlist>, ApiError> {
        let body: PlaylistsResponse = self.get_json(&["api", "playlists"]).await?;
        Ok(body.playlists)
    }

    async fn add_playlist(&self, url: &str) -> Result<(), ApiError> {
        let endpoint = self.endpoint(&["api", "playlists"]);
        tracing::debug!("POST {}", endpoint.path());
        let response = self
            .client
            .post(endpoint)
            .json(&AddPlaylistRequest { url })
            .send()
            .await?;
        expect_success(response)
    }

    async fn remove_playlist(&self, id: &str) -> Result<(), ApiError> {
        let endpoint = self.endpoint(&["api", "playlists", id]);
        tracing::debug!("DELETE {}", endpoint.path());
        let response = self.client.delete(endpoint).send().await?;
        expect_success(response)
    }

    async fn random_track(&self, playlist_id: &str) -> Result<Track, ApiError> {
        let body: TrackResponse = self.get_json(&["api", "play-track", playlist_id]).await?;
        Ok(body.track)
    }

    async fn reset(&self) -> Result<(), ApiError> {
        let endpoint = self.endpoint(&["api", "reset"]);
        tracing::debug!("POST {}", endpoint.path());
        let response = self.client.post(endpoint).send().await?;
        expect_success(response)
    }

    async fn played_tracks(&self) -> Result<Vec<PlayedTrack>, ApiError> {
        self.get_json(&["api", "tracks"]).await
    }
}

use serde::{Deserialize, Deserializer, Serialize};

// ── Response bodies ───────────────────────────────────────────────────────────

/// `GET /api/spotify/authorize`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizeResponse {
    pub auth_url: String,
}

/// `GET /api/playlists`
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistsResponse {
    pub playlists: Vec<Playlist>,
}

/// `GET /api/play-track/{playlist_id}`
#[derive(Debug, Clone, Deserialize)]
pub struct TrackResponse {
    pub track: Track,
}

// ── Request bodies ────────────────────────────────────────────────────────────

/// `POST /api/playlists`
#[derive(Debug, Serialize)]
pub struct AddPlaylistRequest<'a> {
    pub url: &'a str,
}

// ── Domain records ────────────────────────────────────────────────────────────

/// A playlist owned by the backend. The controller only ever holds copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
}

/// One song handed out by the backend for a round.
///
/// Only `name` and `artist` are required. A track without `stream_url` is still
/// playable as a round; the players just don't hear it from this device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub name: String,
    pub artist: String,
    #[serde(default, deserialize_with = "year_from_wire")]
    pub year: Option<String>,
    #[serde(default)]
    pub stream_url: Option<String>,
    #[serde(default)]
    pub spotify_url: Option<String>,
}

impl Track {
    /// Stream URL if the backend sent a usable one (empty strings count as absent).
    pub fn playable_url(&self) -> Option<&str> {
        self.stream_url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// An entry of `GET /api/tracks`: a track already played in this session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayedTrack {
    pub track_id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default, deserialize_with = "year_from_wire")]
    pub release_year: Option<String>,
    #[serde(default)]
    pub playlist_theme: Option<String>,
    #[serde(default)]
    pub played_at: Option<String>,
}

// ── Year normalisation ────────────────────────────────────────────────────────

/// The backend sends years as `"2010"` for demo tracks and as `2010` once the
/// release year comes from MusicBrainz. Both normalise to a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireYear {
    Text(String),
    Number(i64),
}

fn year_from_wire<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let year = Option::<WireYear>::deserialize(deserializer)?;
    Ok(year.and_then(|year| match year {
        WireYear::Text(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        WireYear::Number(n) => Some(n.to_string()),
    }))
}

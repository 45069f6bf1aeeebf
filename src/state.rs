use crate::api::{PlayedTrack, Playlist, Track};
use crate::color::{CardColor, ColorCycle};
use crate::session::SessionToken;

/// Shown on the reveal card when the backend did not send a year.
pub const UNKNOWN_YEAR: &str = "Unknown";

/// The one visible screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Connect,
    Playlist,
    Game,
    Reveal,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Connect => "Connect",
            Screen::Playlist => "Playlists",
            Screen::Game => "Now playing",
            Screen::Reveal => "Reveal",
        }
    }
}

/// What the reveal screen shows, captured at the moment of the reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealCard {
    pub artist: String,
    pub name: String,
    /// Release year, or [`UNKNOWN_YEAR`].
    pub year: String,
    /// Running play count at reveal time.
    pub play_count: u32,
    pub color: CardColor,
    pub spotify_url: Option<String>,
}

/// Everything the screen controller knows. Mutated only through the methods
/// below so that the screen invariants hold:
/// - a playlist is selected whenever the screen is `Game` or `Reveal`;
/// - the play counter only grows, except on [`reset_round`](Self::reset_round).
#[derive(Debug, Default)]
pub struct AppState {
    screen: Screen,
    session: Option<SessionToken>,
    playlists: Vec<Playlist>,
    selected: Option<Playlist>,
    current_track: Option<Track>,
    play_count: u32,
    colors: ColorCycle,
    reveal: Option<RevealCard>,
    history: Vec<PlayedTrack>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&SessionToken> {
        self.session.as_ref()
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn selected(&self) -> Option<&Playlist> {
        self.selected.as_ref()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn play_count(&self) -> u32 {
        self.play_count
    }

    pub fn reveal_card(&self) -> Option<&RevealCard> {
        self.reveal.as_ref()
    }

    pub fn history(&self) -> &[PlayedTrack] {
        &self.history
    }

    /// Find a playlist by exact id first, then by 1-based position in the list.
    pub fn find_playlist(&self, reference: &str) -> Option<&Playlist> {
        let reference = reference.trim();
        self.playlists
            .iter()
            .find(|p| p.id == reference)
            .or_else(|| {
                let position: usize = reference.parse().ok()?;
                position.checked_sub(1).and_then(|i| self.playlists.get(i))
            })
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    pub fn set_session(&mut self, session: Option<SessionToken>) {
        self.session = session;
    }

    pub fn show_connect(&mut self) {
        self.screen = Screen::Connect;
    }

    pub fn show_playlists(&mut self) {
        self.screen = Screen::Playlist;
    }

    /// Replace the cached collection, keeping backend order and the first of any
    /// duplicated id. On the playlist screen a selection that disappeared is dropped.
    pub fn replace_playlists(&mut self, playlists: Vec<Playlist>) {
        let mut unique: Vec<Playlist> = Vec::with_capacity(playlists.len());
        for playlist in playlists {
            if unique.iter().any(|p| p.id == playlist.id) {
                tracing::debug!("Ignoring duplicate playlist id {}", playlist.id);
                continue;
            }
            unique.push(playlist);
        }
        self.playlists = unique;

        if self.screen == Screen::Playlist {
            let still_listed = self
                .selected
                .as_ref()
                .is_some_and(|s| self.playlists.iter().any(|p| p.id == s.id));
            if !still_listed {
                self.selected = None;
            }
        }
    }

    /// Select `playlist`, replacing any previous selection.
    pub fn select(&mut self, playlist: Playlist) {
        self.selected = Some(playlist);
    }

    /// Enter the game screen. Refused (returns `false`) without a selection.
    pub fn enter_game(&mut self) -> bool {
        if self.selected.is_none() {
            return false;
        }
        self.screen = Screen::Game;
        true
    }

    /// A fresh track came back from the backend.
    pub fn record_track(&mut self, track: Track) {
        self.current_track = Some(track);
        self.play_count += 1;
        self.reveal = None;
    }

    /// Drop the current track and its card. The counter is left alone.
    pub fn discard_track(&mut self) {
        self.current_track = None;
        self.reveal = None;
    }

    /// Build the reveal card for the current track, take the next color and show
    /// the reveal screen. `None` (and no transition) without a current track.
    pub fn reveal(&mut self) -> Option<&RevealCard> {
        let track = self.current_track.as_ref()?;
        if self.selected.is_none() {
            return None;
        }
        let card = RevealCard {
            artist: track.artist.clone(),
            name: track.name.clone(),
            year: track.year.clone().unwrap_or_else(|| UNKNOWN_YEAR.to_string()),
            play_count: self.play_count,
            color: self.colors.advance(),
            spotify_url: track.spotify_url.clone(),
        };
        self.screen = Screen::Reveal;
        self.reveal = Some(card);
        self.reveal.as_ref()
    }

    pub fn set_history(&mut self, history: Vec<PlayedTrack>) {
        self.history = history;
    }

    /// Zero the counter, forget the track and return to the playlist screen.
    /// The playlist collection, selection and color rotation are kept.
    pub fn reset_round(&mut self) {
        self.play_count = 0;
        self.current_track = None;
        self.reveal = None;
        self.history.clear();
        self.screen = Screen::Playlist;
    }

    /// Forget everything, including the session.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

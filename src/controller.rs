use crate::api::{Backend, Playlist};
use crate::player::AudioPlayer;
use crate::session::{self, Handoff, SESSION_KEY, SessionToken};
use crate::shell::Shell;
use crate::state::AppState;
use crate::storage::Storage;

/// Binds user actions to backend calls and state transitions.
///
/// The controller owns the collaborators; the [`AppState`] is owned by the caller
/// and lent to each handler. Handlers never return errors: a failure is either
/// alerted (the user just asked for it) or logged (background work).
pub struct Controller {
    backend: Box<dyn Backend>,
    storage: Box<dyn Storage>,
    shell: Box<dyn Shell>,
    player: Box<dyn AudioPlayer>,
}

impl Controller {
    pub fn new(
        backend: Box<dyn Backend>,
        storage: Box<dyn Storage>,
        shell: Box<dyn Shell>,
        player: Box<dyn AudioPlayer>,
    ) -> Self {
        Self {
            backend,
            storage,
            shell,
            player,
        }
    }

    /// Resolve the initial screen. A `session_id` handed in at startup wins over the
    /// stored one and is persisted; with any session the playlists are loaded.
    pub async fn start(&mut self, state: &mut AppState, session_param: Option<&str>) {
        let token = match session_param.and_then(SessionToken::new) {
            Some(token) => {
                self.persist_session(&token);
                Some(token)
            }
            None => self.storage.get(SESSION_KEY).as_deref().and_then(SessionToken::new),
        };

        match token {
            Some(token) => {
                tracing::info!("Session found, skipping connect screen");
                self.adopt_session(state, token);
                state.show_playlists();
                self.load_playlists(state).await;
            }
            None => state.show_connect(),
        }
    }

    // ── Connect ───────────────────────────────────────────────────────────────

    /// Ask the backend for the Spotify consent URL and send the user there.
    pub async fn authorize(&mut self) {
        match self.backend.authorize_url().await {
            Ok(url) => {
                tracing::info!("Navigating to Spotify authorization");
                if let Err(e) = self.shell.navigate(&url) {
                    // The URL is already on screen.
                    tracing::warn!("Could not open a browser: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Authorization URL request failed: {}", e);
                self.shell.alert(&format!("Could not connect to Spotify: {e}"));
            }
        }
    }

    /// Pick up the session from the authorization redirect (`connect → playlist`).
    pub async fn complete_authorization(&mut self, state: &mut AppState, redirect: &str) {
        match session::parse_handoff(redirect) {
            Handoff::Session(token) => {
                self.persist_session(&token);
                self.adopt_session(state, token);
                state.show_playlists();
                self.load_playlists(state).await;
            }
            Handoff::Failed(reason) => {
                tracing::warn!("Authorization redirect reported {}", reason);
                self.shell.alert(&format!(
                    "Spotify authorization failed ({reason}). Try connecting again."
                ));
            }
            Handoff::Missing => {
                self.shell
                    .alert("No session_id found. Paste the full address you were redirected to.");
            }
        }
    }

    /// Forget the stored session and go back to the connect screen.
    pub fn disconnect(&mut self, state: &mut AppState) {
        if let Err(e) = self.storage.remove(SESSION_KEY) {
            tracing::error!("Failed to remove stored session: {}", e);
        }
        self.player.stop();
        self.backend.set_session(None);
        state.clear();
        tracing::info!("Disconnected");
    }

    // ── Playlists ─────────────────────────────────────────────────────────────

    /// Refresh the playlist collection. Failures are logged only.
    pub async fn load_playlists(&mut self, state: &mut AppState) {
        match self.backend.playlists().await {
            Ok(playlists) => {
                tracing::debug!("Loaded {} playlists", playlists.len());
                state.replace_playlists(playlists);
            }
            Err(e) => tracing::warn!("Failed to load playlists: {}", e),
        }
    }

    /// Add a playlist by URL; validation is the backend's job. A blank URL is a
    /// cancelled prompt and does nothing.
    pub async fn add_playlist(&mut self, state: &mut AppState, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }
        match self.backend.add_playlist(url).await {
            Ok(()) => {
                tracing::info!("Added playlist {}", url);
                self.load_playlists(state).await;
            }
            Err(e) => {
                tracing::error!("Adding playlist {} failed: {}", url, e);
                self.shell.alert(&format!("Failed to add playlist: {e}"));
            }
        }
    }

    /// Remove a playlist by id. Failures are logged only.
    pub async fn remove_playlist(&mut self, state: &mut AppState, id: &str) {
        match self.backend.remove_playlist(id).await {
            Ok(()) => {
                tracing::info!("Removed playlist {}", id);
                self.load_playlists(state).await;
            }
            Err(e) => tracing::warn!("Removing playlist {} failed: {}", id, e),
        }
    }

    /// Mark `playlist` as the one to play from. Purely local.
    pub fn select_playlist(&mut self, state: &mut AppState, playlist: Playlist) {
        tracing::debug!("Selected playlist {}", playlist.id);
        state.select(playlist);
    }

    // ── Game loop ─────────────────────────────────────────────────────────────

    /// `playlist → game`, then fetch the first track.
    pub async fn start_game(&mut self, state: &mut AppState) {
        if !state.enter_game() {
            self.shell.alert("Please select a playlist first.");
            return;
        }
        self.play_random_track(state).await;
    }

    /// Fetch a random track for the selected playlist and start its audio.
    pub async fn play_random_track(&mut self, state: &mut AppState) {
        let Some(playlist_id) = state.selected().map(|p| p.id.clone()) else {
            self.shell.alert("Please select a playlist first.");
            return;
        };

        let track = match self.backend.random_track(&playlist_id).await {
            Ok(track) => track,
            Err(e) => {
                tracing::error!("Track request for playlist {} failed: {}", playlist_id, e);
                // The previous round is over; its answer must not be revealed again.
                self.player.stop();
                state.discard_track();
                self.shell.alert(&format!("Failed to load a track: {e}"));
                return;
            }
        };

        self.player.stop();
        let stream_url = track.playable_url().map(str::to_string);
        state.record_track(track);
        tracing::info!("Round {} loaded", state.play_count());

        match stream_url {
            Some(url) => {
                if let Err(e) = self.player.play(&url) {
                    tracing::warn!("Playback did not start: {}", e);
                }
            }
            None => tracing::info!("Track has no stream URL, continuing without audio"),
        }
    }

    /// `game → reveal`: show artist, title and year of the current track.
    pub fn reveal_card(&mut self, state: &mut AppState) {
        match state.reveal() {
            Some(card) => tracing::debug!(
                "Revealed round {} as {}",
                card.play_count,
                card.color.class_name()
            ),
            None => self.shell.alert("No track loaded yet. Start the game first."),
        }
    }

    /// `reveal → game` with a fresh track.
    pub async fn play_next(&mut self, state: &mut AppState) {
        self.start_game(state).await;
    }

    /// Reset server-side play state, then reset the local round and go back to
    /// the playlists whatever the backend said.
    pub async fn reset_game(&mut self, state: &mut AppState) {
        if let Err(e) = self.backend.reset().await {
            tracing::warn!("Backend reset failed, resetting locally anyway: {}", e);
        }
        self.player.stop();
        state.reset_round();
        tracing::info!("Game reset");
    }

    // ── Extras ────────────────────────────────────────────────────────────────

    /// Fetch the tracks already played this session.
    pub async fn load_history(&mut self, state: &mut AppState) {
        match self.backend.played_tracks().await {
            Ok(tracks) => {
                tracing::debug!("Loaded {} played tracks", tracks.len());
                state.set_history(tracks);
            }
            Err(e) => {
                tracing::error!("History request failed: {}", e);
                self.shell.alert(&format!("Failed to load played tracks: {e}"));
            }
        }
    }

    /// Open the revealed track on Spotify.
    pub fn open_track_link(&mut self, state: &AppState) {
        let link = state.reveal_card().and_then(|card| card.spotify_url.clone());
        match link {
            Some(url) => {
                if let Err(e) = self.shell.navigate(&url) {
                    tracing::warn!("Could not open a browser: {}", e);
                }
            }
            None => self.shell.alert("This track has no Spotify link."),
        }
    }

    /// Stop audio before the process exits.
    pub fn shutdown(&mut self) {
        self.player.stop();
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn persist_session(&mut self, token: &SessionToken) {
        if let Err(e) = self.storage.set(SESSION_KEY, token.as_str()) {
            // Keep going with the in-memory session.
            tracing::error!("Failed to persist session: {}", e);
        }
    }

    fn adopt_session(&mut self, state: &mut AppState, token: SessionToken) {
        self.backend.set_session(Some(token.clone()));
        state.set_session(Some(token));
    }
}

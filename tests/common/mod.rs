#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use songamizer::api::{ApiError, Backend, PlayedTrack, Playlist, Track};
use songamizer::controller::Controller;
use songamizer::player::{AudioPlayer, PlaybackError};
use songamizer::session::SessionToken;
use songamizer::shell::Shell;
use songamizer::storage::{Storage, StorageError};

// ── Backend ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct BackendState {
    pub calls: Vec<String>,
    pub playlists: Vec<Playlist>,
    pub tracks: VecDeque<Track>,
    pub history: Vec<PlayedTrack>,
    pub failing: HashSet<&'static str>,
    pub hanging: HashSet<&'static str>,
    pub session: Option<String>,
}

/// Scriptable in-memory backend. Clones share state, so a test keeps one
/// handle while the controller owns the other.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlists(self, playlists: &[(&str, &str)]) -> Self {
        self.state.lock().unwrap().playlists = playlists
            .iter()
            .map(|(id, name)| playlist(id, name))
            .collect();
        self
    }

    pub fn push_track(&self, track: Track) {
        self.state.lock().unwrap().tracks.push_back(track);
    }

    /// Make every call to `operation` fail with a 500.
    pub fn fail(&self, operation: &'static str) {
        self.state.lock().unwrap().failing.insert(operation);
    }

    /// Make every call to `operation` stay pending forever.
    pub fn hang(&self, operation: &'static str) {
        self.state.lock().unwrap().hanging.insert(operation);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(operation)).count()
    }

    pub fn session(&self) -> Option<String> {
        self.state.lock().unwrap().session.clone()
    }

    async fn enter(&self, call: String, operation: &'static str) -> Result<(), ApiError> {
        let (failing, hanging) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call);
            (
                state.failing.contains(operation),
                state.hanging.contains(operation),
            )
        };
        if hanging {
            std::future::pending::<()>().await;
        }
        if failing {
            Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn set_session(&mut self, session: Option<SessionToken>) {
        self.state.lock().unwrap().session = session.map(|s| s.as_str().to_string());
    }

    async fn authorize_url(&self) -> Result<String, ApiError> {
        self.enter("authorize".into(), "authorize").await?;
        Ok("https://accounts.spotify.com/authorize?client_id=test".into())
    }

    async fn playlists(&self) -> Result<Vec<Playlist>, ApiError> {
        self.enter("playlists".into(), "playlists").await?;
        Ok(self.state.lock().unwrap().playlists.clone())
    }

    async fn add_playlist(&self, url: &str) -> Result<(), ApiError> {
        self.enter(format!("add {url}"), "add").await?;
        // Id is the last URL segment, like a Spotify playlist link. Adding a
        // listed URL again appends a second row with the same id.
        let id = url.rsplit('/').next().unwrap_or(url);
        self.state.lock().unwrap().playlists.push(playlist(id, url));
        Ok(())
    }

    async fn remove_playlist(&self, id: &str) -> Result<(), ApiError> {
        self.enter(format!("remove {id}"), "remove").await?;
        self.state.lock().unwrap().playlists.retain(|p| p.id != id);
        Ok(())
    }

    async fn random_track(&self, playlist_id: &str) -> Result<Track, ApiError> {
        self.enter(format!("track {playlist_id}"), "track").await?;
        let mut state = self.state.lock().unwrap();
        Ok(state
            .tracks
            .pop_front()
            .unwrap_or_else(|| track("Blinding Lights", "The Weeknd", Some("2019"))))
    }

    async fn reset(&self) -> Result<(), ApiError> {
        self.enter("reset".into(), "reset").await
    }

    async fn played_tracks(&self) -> Result<Vec<PlayedTrack>, ApiError> {
        self.enter("history".into(), "history").await?;
        Ok(self.state.lock().unwrap().history.clone())
    }
}

// ── Shell ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct FakeShell {
    pub alerts: Arc<Mutex<Vec<String>>>,
    pub navigations: Arc<Mutex<Vec<String>>>,
}

impl FakeShell {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

impl Shell for FakeShell {
    fn alert(&mut self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn navigate(&mut self, url: &str) -> std::io::Result<()> {
        self.navigations.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct FakePlayer {
    pub events: Arc<Mutex<Vec<String>>>,
    pub refuse: Arc<Mutex<bool>>,
}

impl FakePlayer {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Simulate an autoplay rejection on every `play`.
    pub fn refuse_playback(&self) {
        *self.refuse.lock().unwrap() = true;
    }
}

impl AudioPlayer for FakePlayer {
    fn play(&mut self, stream_url: &str) -> Result<(), PlaybackError> {
        if *self.refuse.lock().unwrap() {
            return Err(PlaybackError::Spawn(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "autoplay blocked",
            )));
        }
        self.events.lock().unwrap().push(format!("play {stream_url}"));
        Ok(())
    }

    fn stop(&mut self) {
        self.events.lock().unwrap().push("stop".to_string());
    }
}

// ── Storage ───────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct SharedStorage {
    pub entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl SharedStorage {
    pub fn with(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        storage
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

impl Storage for SharedStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.value(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

// ── Fixtures ──────────────────────────────────────────────────────────────────

pub fn playlist(id: &str, name: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn track(name: &str, artist: &str, year: Option<&str>) -> Track {
    Track {
        name: name.to_string(),
        artist: artist.to_string(),
        year: year.map(str::to_string),
        stream_url: None,
        spotify_url: None,
    }
}

/// A controller wired to fakes, plus the handles to inspect them.
pub struct Harness {
    pub controller: Controller,
    pub backend: FakeBackend,
    pub shell: FakeShell,
    pub player: FakePlayer,
    pub storage: SharedStorage,
}

impl Harness {
    pub fn new(backend: FakeBackend) -> Self {
        Self::with_storage(backend, SharedStorage::default())
    }

    pub fn with_storage(backend: FakeBackend, storage: SharedStorage) -> Self {
        let shell = FakeShell::default();
        let player = FakePlayer::default();
        let controller = Controller::new(
            Box::new(backend.clone()),
            Box::new(storage.clone()),
            Box::new(shell.clone()),
            Box::new(player.clone()),
        );
        Self {
            controller,
            backend,
            shell,
            player,
            storage,
        }
    }
}

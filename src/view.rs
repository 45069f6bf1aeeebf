use std::fmt;

use crate::api::PlayedTrack;
use crate::state::{AppState, RevealCard, Screen};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// One row of the playlist screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRow {
    /// 1-based, usable as a command argument.
    pub position: usize,
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// Screen-specific part of a [`View`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    Connect,
    Playlists {
        rows: Vec<PlaylistRow>,
        /// The "start" action is enabled.
        can_start: bool,
    },
    Game {
        playlist: String,
        play_count: u32,
        track_loaded: bool,
        /// The loaded track has a stream URL.
        audible: bool,
    },
    Reveal {
        playlist: String,
        card: RevealCard,
    },
}

/// Everything a rendering layer needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub screen: Screen,
    pub body: ScreenView,
    pub history: Vec<PlayedTrack>,
}

/// Pure mapping from state to what should be on screen.
pub fn render(state: &AppState) -> View {
    let playlist = state
        .selected()
        .map(|p| p.name.clone())
        .unwrap_or_default();

    let body = match state.screen() {
        Screen::Connect => ScreenView::Connect,
        Screen::Playlist => {
            let selected_id = state.selected().map(|p| p.id.as_str());
            let rows = state
                .playlists()
                .iter()
                .enumerate()
                .map(|(i, p)| PlaylistRow {
                    position: i + 1,
                    id: p.id.clone(),
                    name: p.name.clone(),
                    selected: Some(p.id.as_str()) == selected_id,
                })
                .collect();
            ScreenView::Playlists {
                rows,
                can_start: state.selected().is_some(),
            }
        }
        Screen::Game => ScreenView::Game {
            playlist,
            play_count: state.play_count(),
            track_loaded: state.current_track().is_some(),
            audible: state
                .current_track()
                .is_some_and(|t| t.playable_url().is_some()),
        },
        // A reveal screen always has a card; fall back to the game view otherwise.
        Screen::Reveal => match state.reveal_card() {
            Some(card) => ScreenView::Reveal {
                playlist,
                card: card.clone(),
            },
            None => ScreenView::Game {
                playlist,
                play_count: state.play_count(),
                track_loaded: false,
                audible: false,
            },
        },
    };

    View {
        screen: state.screen(),
        body,
        history: state.history().to_vec(),
    }
}

// ── Terminal rendering ────────────────────────────────────────────────────────

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{BOLD}── {} ──{RESET}", self.screen.title())?;
        match &self.body {
            ScreenView::Connect => {
                writeln!(f, "Connect your Spotify account to start.")?;
                writeln!(f, "{DIM}connect{RESET}  open the Spotify consent page")?;
                writeln!(f, "{DIM}session <id|url>{RESET}  paste the address you were sent back to")?;
            }
            ScreenView::Playlists { rows, can_start } => {
                if rows.is_empty() {
                    writeln!(f, "No playlists yet. Add one with {DIM}add <spotify url>{RESET}.")?;
                }
                for row in rows {
                    let marker = if row.selected { "●" } else { " " };
                    writeln!(f, " {marker} {:>2}. {}", row.position, row.name)?;
                }
                if *can_start {
                    writeln!(f, "\n{DIM}start{RESET}  play from the selected playlist")?;
                } else if !rows.is_empty() {
                    writeln!(f, "\n{DIM}select <n>{RESET}  choose a playlist to play from")?;
                }
            }
            ScreenView::Game {
                playlist,
                play_count,
                track_loaded,
                audible,
            } => {
                writeln!(f, "Playlist: {playlist}")?;
                writeln!(f, "Songs played: {play_count}")?;
                if !track_loaded {
                    writeln!(f, "Waiting for a track…")?;
                } else if *audible {
                    writeln!(f, "♪ Listen closely… who is it, and what year?")?;
                } else {
                    writeln!(f, "No audio for this track here. Guess from the room's speaker.")?;
                }
                writeln!(f, "\n{DIM}reveal{RESET}  flip the card    {DIM}reset{RESET}  back to playlists")?;
            }
            ScreenView::Reveal { playlist, card } => {
                let color = card.color.ansi();
                writeln!(f, "Playlist: {playlist}")?;
                writeln!(f, "{color}┌──────────────────────────────┐{RESET}")?;
                writeln!(f, "{color}│{RESET} {BOLD}{}{RESET}", card.artist)?;
                writeln!(f, "{color}│{RESET} {}", card.name)?;
                writeln!(f, "{color}│{RESET} {BOLD}{}{RESET}", card.year)?;
                writeln!(f, "{color}└──────────────────────────────┘{RESET}")?;
                writeln!(f, "Song #{}", card.play_count)?;
                let open = if card.spotify_url.is_some() { "    open  listen on Spotify" } else { "" };
                writeln!(f, "\n{DIM}next{RESET}  play the next song    {DIM}reset{RESET}  back to playlists{open}")?;
            }
        }

        if !self.history.is_empty() {
            writeln!(f, "\n{BOLD}Played this session{RESET}")?;
            for track in &self.history {
                let year = track.release_year.as_deref().unwrap_or("?");
                writeln!(f, "  {} - {} ({year})", track.artist, track.title)?;
            }
        }
        Ok(())
    }
}

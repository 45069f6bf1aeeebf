//! Songamizer screen controller: connect a Spotify session, queue playlists, guess the song.

pub mod api;
pub mod app;
pub mod cli;
pub mod color;
pub mod command;
pub mod config;
pub mod controller;
pub mod player;
pub mod session;
pub mod shell;
pub mod state;
pub mod storage;
pub mod view;

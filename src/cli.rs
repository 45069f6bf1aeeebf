use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "songamizer",
    about = "Guess-the-song party game: connect Spotify, pick a playlist, reveal the cards",
    long_about = None,
    version,
)]
pub struct Args {
    /// Backend base URL [default: http://localhost:5000]
    #[arg(short, long, value_name = "URL")]
    pub server: Option<String>,

    /// Session id handed back by the authorization redirect; stored for next time
    #[arg(long, value_name = "ID")]
    pub session_id: Option<String>,

    /// Path to TOML config file (overrides default search: ./songamizer.toml, ~/.config/songamizer/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where the session token is kept [default: <data dir>/songamizer/storage.json]
    #[arg(long, value_name = "FILE")]
    pub storage: Option<PathBuf>,

    /// Command used to play stream URLs, e.g. "mpv --no-video" (the URL is appended)
    #[arg(short, long, value_name = "CMD")]
    pub player: Option<String>,

    /// Print the authorization URL instead of opening a browser
    #[arg(long)]
    pub no_browser: bool,
}

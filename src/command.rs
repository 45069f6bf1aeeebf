use std::str::FromStr;

use crate::state::Screen;

pub const HELP: &str = "\
Commands
  connect            open the Spotify consent page
  session <id|url>   finish connecting with the address you were sent back to
  playlists          reload the playlist list
  add [url]          add a Spotify playlist (prompts when no url is given)
  remove <n|id>      remove a playlist
  select <n|id>      choose the playlist to play from
  start              start the game with the selected playlist
  reveal             flip the card: artist, title, year
  next               play the next song
  reset              clear played songs and go back to the playlists
  history            list the songs played this session
  open               open the revealed song on Spotify
  disconnect         forget the stored session
  help               show this help
  quit               leave";

/// A user action, the terminal's stand-in for a button click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect,
    Session(String),
    Playlists,
    /// `None` means "prompt for the URL".
    Add(Option<String>),
    Remove(String),
    Select(String),
    Start,
    Reveal,
    Next,
    Reset,
    History,
    Open,
    Disconnect,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("`{0}` needs {1}")]
    MissingArgument(&'static str, &'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let argument = (!rest.is_empty()).then(|| rest.to_string());

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "connect" | "login" => Ok(Command::Connect),
            "session" | "callback" => {
                required(argument, "session", "a session id or redirect url").map(Command::Session)
            }
            "playlists" | "list" | "ls" => Ok(Command::Playlists),
            "add" => Ok(Command::Add(argument)),
            "remove" | "rm" => required(argument, "remove", "a playlist number or id").map(Command::Remove),
            "select" | "sel" => required(argument, "select", "a playlist number or id").map(Command::Select),
            "start" | "play" => Ok(Command::Start),
            "reveal" | "flip" => Ok(Command::Reveal),
            "next" | "n" => Ok(Command::Next),
            "reset" => Ok(Command::Reset),
            "history" => Ok(Command::History),
            "open" => Ok(Command::Open),
            "disconnect" | "logout" => Ok(Command::Disconnect),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn required(
    argument: Option<String>,
    name: &'static str,
    what: &'static str,
) -> Result<String, CommandError> {
    argument.ok_or(CommandError::MissingArgument(name, what))
}

impl Command {
    /// Whether the action exists on `screen`. Buttons only show on their own screen.
    pub fn available_on(&self, screen: Screen) -> bool {
        match self {
            Command::Help | Command::Quit => true,
            Command::Connect | Command::Session(_) => screen == Screen::Connect,
            Command::Playlists
            | Command::Add(_)
            | Command::Remove(_)
            | Command::Select(_)
            | Command::Start => screen == Screen::Playlist,
            Command::Reveal => screen == Screen::Game,
            Command::Next | Command::Open => screen == Screen::Reveal,
            Command::Reset | Command::History | Command::Disconnect => screen != Screen::Connect,
        }
    }
}

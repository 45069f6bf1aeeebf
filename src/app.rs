use std::future::Future;
use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::command::{Command, CommandError, HELP};
use crate::controller::Controller;
use crate::state::{AppState, Screen};
use crate::view;

/// What the event loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    ShowHelp,
    Quit,
}

/// Why the command loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    EndOfInput,
    /// The shutdown future resolved, possibly in the middle of a command.
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("not available on the {} screen", .0.title())]
    Unavailable(Screen),
    #[error("no playlist matches `{0}`")]
    NoSuchPlaylist(String),
}

/// Route one user command to its handler. Commands run to completion one at a
/// time, so handlers never interleave.
pub async fn dispatch(
    controller: &mut Controller,
    state: &mut AppState,
    command: Command,
) -> Result<Flow, DispatchError> {
    if !command.available_on(state.screen()) {
        return Err(DispatchError::Unavailable(state.screen()));
    }

    match command {
        Command::Connect => controller.authorize().await,
        Command::Session(redirect) => controller.complete_authorization(state, &redirect).await,
        Command::Playlists => controller.load_playlists(state).await,
        // No URL means the prompt was cancelled.
        Command::Add(url) => {
            if let Some(url) = url {
                controller.add_playlist(state, &url).await;
            }
        }
        Command::Remove(reference) => {
            let id = state
                .find_playlist(&reference)
                .map(|p| p.id.clone())
                .ok_or(DispatchError::NoSuchPlaylist(reference))?;
            controller.remove_playlist(state, &id).await;
        }
        Command::Select(reference) => {
            let playlist = state
                .find_playlist(&reference)
                .cloned()
                .ok_or(DispatchError::NoSuchPlaylist(reference))?;
            controller.select_playlist(state, playlist);
        }
        Command::Start => controller.start_game(state).await,
        Command::Reveal => controller.reveal_card(state),
        Command::Next => controller.play_next(state).await,
        Command::Reset => controller.reset_game(state).await,
        Command::History => controller.load_history(state).await,
        Command::Open => controller.open_track_link(state),
        Command::Disconnect => controller.disconnect(state),
        Command::Help => return Ok(Flow::ShowHelp),
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

// ── Command loop ──────────────────────────────────────────────────────────────

fn prompt(label: &str) {
    let mut out = std::io::stdout().lock();
    let _ = write!(out, "{label}");
    let _ = out.flush();
}

/// Read one line, or `None` on end of input.
async fn read_line<R: AsyncBufRead + Unpin>(input: &mut Lines<R>) -> Option<String> {
    match input.next_line().await {
        Ok(line) => line,
        Err(e) => {
            tracing::error!("Failed to read input: {}", e);
            None
        }
    }
}

/// Read, parse and run one command line. `Some` ends the loop.
async fn step<R: AsyncBufRead + Unpin>(
    controller: &mut Controller,
    state: &mut AppState,
    input: &mut Lines<R>,
) -> Option<Exit> {
    prompt("\nsongamizer> ");
    let Some(line) = read_line(input).await else {
        return Some(Exit::EndOfInput);
    };

    let command = match line.parse::<Command>() {
        Ok(Command::Add(None)) if Command::Add(None).available_on(state.screen()) => {
            prompt("Playlist URL: ");
            Command::Add(read_line(input).await.filter(|url| !url.trim().is_empty()))
        }
        Ok(command) => command,
        Err(CommandError::Empty) => return None,
        Err(e) => {
            println!("{e}");
            return None;
        }
    };

    match dispatch(controller, state, command).await {
        Ok(Flow::Continue) => print!("{}", view::render(state)),
        Ok(Flow::ShowHelp) => println!("{HELP}"),
        Ok(Flow::Quit) => return Some(Exit::Quit),
        Err(e) => println!("{e}"),
    }
    None
}

/// Run commands from `input` until `quit`, end of input, or `shutdown` resolves.
///
/// `shutdown` is raced against the whole command, backend call included, so a
/// request that never answers cannot hold the loop.
pub async fn run<R, S>(
    controller: &mut Controller,
    state: &mut AppState,
    input: &mut Lines<R>,
    shutdown: S,
) -> Exit
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            exit = step(controller, state, input) => {
                if let Some(exit) = exit {
                    return exit;
                }
            }
            () = &mut shutdown => return Exit::Interrupted,
        }
    }
}

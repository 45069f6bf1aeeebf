use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use songamizer::api::HttpBackend;
use songamizer::app::{self, Exit};
use songamizer::controller::Controller;
use songamizer::player::{AudioPlayer, CommandPlayer, NullPlayer};
use songamizer::shell::TerminalShell;
use songamizer::state::AppState;
use songamizer::storage::{FileStorage, MemoryStorage, Storage};
use songamizer::{cli, config, view};

/// Set once the first Ctrl+C is received. A second Ctrl+C force-exits.
static SHUTTING_DOWN: AtomicBool = AtomicBool::new(false);

/// Wait for Ctrl+C. The first one returns; any later one exits the process.
async fn wait_for_shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    if SHUTTING_DOWN.swap(true, Ordering::SeqCst) {
        eprintln!("\nsongamizer: forced exit");
        std::process::exit(1);
    }
}

fn open_storage(path: &std::path::Path) -> Box<dyn Storage> {
    match FileStorage::open(path) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            // Leave the file alone; this run keeps its session in memory.
            tracing::warn!("Ignoring storage {}: {}", path.display(), e);
            Box::new(MemoryStorage::new())
        }
    }
}

fn build_player(command_line: Option<&str>) -> Box<dyn AudioPlayer> {
    let Some(command_line) = command_line else {
        return Box::new(NullPlayer);
    };
    match CommandPlayer::from_command_line(command_line) {
        Ok(player) => {
            tracing::debug!("Using player {} {}", player.program(), player.args().join(" "));
            Box::new(player)
        }
        Err(e) => {
            tracing::warn!("Player disabled: {}", e);
            Box::new(NullPlayer)
        }
    }
}

// Single UI thread: every command is awaited before the next line is read.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::Args::parse();

    let config_path = config::find_config_file(args.config.as_deref());
    let file_config = config_path
        .as_deref()
        .map(|path| (path, config::load_config(path)));
    let (file_config, config_error) = match file_config {
        Some((path, Ok(cfg))) => (Some(cfg), Some(Ok(path.to_owned()))),
        Some((_, Err(e))) => (None, Some(Err(e))),
        None => (None, None),
    };

    let config = config::Config::resolve(file_config, &args);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    match config_error {
        Some(Ok(path)) => tracing::debug!("Loaded config from {}", path.display()),
        Some(Err(e)) => tracing::warn!("Failed to parse config file: {}", e),
        None => {}
    }

    let backend = HttpBackend::new(&config.server).unwrap_or_else(|e| {
        eprintln!("error: invalid server URL {}: {}", config.server, e);
        std::process::exit(1);
    });
    tracing::info!("songamizer {} using backend {}", env!("CARGO_PKG_VERSION"), backend.base());

    let mut controller = Controller::new(
        Box::new(backend),
        open_storage(&config.storage),
        Box::new(TerminalShell::new(config.open_browser)),
        build_player(config.player.as_deref()),
    );
    let mut state = AppState::new();

    // One listener for the whole session, so Ctrl+C also ends a pending request.
    let shutdown = wait_for_shutdown();
    tokio::pin!(shutdown);

    let started = tokio::select! {
        () = controller.start(&mut state, args.session_id.as_deref()) => true,
        () = &mut shutdown => false,
    };

    let exit = if started {
        print!("{}", view::render(&state));
        let mut input = BufReader::new(tokio::io::stdin()).lines();
        app::run(&mut controller, &mut state, &mut input, shutdown).await
    } else {
        Exit::Interrupted
    };
    if exit == Exit::Interrupted {
        tracing::info!("Interrupted, shutting down");
    }

    // Stopping the player waits on its process; a second Ctrl+C skips that.
    let stopping = tokio::task::spawn_blocking(move || controller.shutdown());
    tokio::select! {
        _ = stopping => {}
        () = wait_for_shutdown() => {}
    }
    println!("\nBye.");
}

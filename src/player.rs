use std::process::{Child, Command, Stdio};

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("player command is empty")]
    EmptyCommand,
    #[error("failed to start player: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Audio output for track stream URLs.
pub trait AudioPlayer: Send {
    /// Start playing `stream_url`, replacing whatever was playing.
    fn play(&mut self, stream_url: &str) -> Result<(), PlaybackError>;

    /// Stop playback. A no-op when nothing is playing.
    fn stop(&mut self);
}

/// Used when no player is configured: rounds run without audio.
#[derive(Debug, Default)]
pub struct NullPlayer;

impl AudioPlayer for NullPlayer {
    fn play(&mut self, stream_url: &str) -> Result<(), PlaybackError> {
        tracing::debug!("No player configured, not playing {}", stream_url);
        Ok(())
    }

    fn stop(&mut self) {}
}

/// Plays by spawning an external command (e.g. `mpv --no-video`) with the
/// stream URL appended as its last argument. One child at a time.
#[derive(Debug)]
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl CommandPlayer {
    /// Split `command_line` on whitespace into program and leading arguments.
    /// No shell quoting is interpreted.
    pub fn from_command_line(command_line: &str) -> Result<Self, PlaybackError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(PlaybackError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
            child: None,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// A child was started and has not exited yet.
    pub fn is_playing(&mut self) -> bool {
        matches!(self.child.as_mut().map(Child::try_wait), Some(Ok(None)))
    }
}

impl AudioPlayer for CommandPlayer {
    fn play(&mut self, stream_url: &str) -> Result<(), PlaybackError> {
        if self.is_playing() {
            tracing::debug!("Replacing the running {} process", self.program);
        }
        self.stop();
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(stream_url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::info!("Playing via {} (pid {})", self.program, child.id());
        self.child = Some(child);
        Ok(())
    }

    fn stop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        if let Err(e) = child.kill() {
            // Already exited on its own.
            tracing::debug!("Player pid {} not killed: {}", child.id(), e);
        }
        let _ = child.wait();
    }
}

impl Drop for CommandPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

use std::io::Write;

/// The surface around the controller that a browser would otherwise provide:
/// blocking alerts and top-level navigation.
pub trait Shell: Send {
    /// Tell the user something they just did failed.
    fn alert(&mut self, message: &str);

    /// Send the user to `url` (e.g. the Spotify consent page).
    fn navigate(&mut self, url: &str) -> std::io::Result<()>;
}

/// Terminal implementation: alerts go to stdout, navigation opens the system browser.
pub struct TerminalShell {
    open_browser: bool,
}

impl TerminalShell {
    pub fn new(open_browser: bool) -> Self {
        Self { open_browser }
    }
}

impl Shell for TerminalShell {
    fn alert(&mut self, message: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "\n  \x1b[1;31m!\x1b[0m {message}\n");
        let _ = out.flush();
    }

    fn navigate(&mut self, url: &str) -> std::io::Result<()> {
        {
            let mut out = std::io::stdout().lock();
            writeln!(out, "\n  Open this page to continue:\n  {url}\n")?;
            out.flush()?;
        }
        if self.open_browser {
            open::that(url)?;
        }
        Ok(())
    }
}

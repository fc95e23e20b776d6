//! Terminal lifecycle and out-of-band alerts.
//!
//! A pet nobody is watching needs a way to get noticed, so besides raw-mode
//! setup this module can raise a desktop notification or ring the bell.

use std::io::{self, stdout, Write};
use std::panic;

use color_eyre::Result;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn leave_screen() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, cursor::Show)
}

/// Take over the terminal: alternate screen, raw mode, no cursor.
///
/// A panic while the pet is on screen gives the terminal back before the
/// report is printed.
pub fn init() -> Result<Tui> {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = leave_screen();
        previous(info);
    }));
    let _ = color_eyre::install();

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout()))?)
}

pub fn restore() -> Result<()> {
    leave_screen()?;
    Ok(())
}

/// How to reach the user when the pet wants attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationProtocol {
    /// OSC 9, also understood by WezTerm
    ITerm2,
    /// OSC 99
    Kitty,
    Bell,
}

impl NotificationProtocol {
    /// Pick from the environment the host terminal exports.
    pub fn detect() -> Self {
        if std::env::var("KITTY_WINDOW_ID").is_ok() {
            return Self::Kitty;
        }

        match std::env::var("TERM_PROGRAM").as_deref() {
            Ok("iTerm.app" | "WezTerm") => Self::ITerm2,
            _ if std::env::var("ITERM_SESSION_ID").is_ok() => Self::ITerm2,
            // an ignored pet is allowed to be annoying
            _ => Self::Bell,
        }
    }

    fn escape(self, title: &str, body: &str) -> String {
        match self {
            Self::ITerm2 => format!("\x1b]9;{title}: {body}\x07"),
            Self::Kitty => format!("\x1b]99;i=1:d=0;{title}: {body}\x1b\\"),
            Self::Bell => "\x07".to_string(),
        }
    }
}

/// Best effort; write errors are ignored.
pub fn send_notification(title: &str, body: &str) {
    let mut stdout = stdout();
    let _ = write!(stdout, "{}", NotificationProtocol::detect().escape(title, body));
    let _ = stdout.flush();
}

/// Set the window title (OSC 0).
pub fn set_title(title: &str) {
    let mut stdout = stdout();
    let _ = write!(stdout, "\x1b]0;{title}\x1b\\");
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_sequences() {
        assert_eq!(NotificationProtocol::Bell.escape("a", "b"), "\x07");
        assert_eq!(
            NotificationProtocol::ITerm2.escape("Pixel Pal", "hi"),
            "\x1b]9;Pixel Pal: hi\x07"
        );
        assert!(NotificationProtocol::Kitty
            .escape("Pixel Pal", "hi")
            .starts_with("\x1b]99;"));
    }
}

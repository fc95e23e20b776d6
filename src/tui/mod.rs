//! Pixel Pal TUI - the pet in a terminal
//!
//! ## Architecture
//!
//! - `app.rs` - Application state, input handling, event loop
//! - `terminal.rs` - Terminal setup/teardown and notifications
//! - `ui.rs` - Layout and rendering
//!
//! The mood engine runs in a [`crate::session`] task; the TUI only renders
//! what the session publishes and forwards key presses as gestures.

pub mod app;
pub mod terminal;
pub mod ui;

// Re-exports
pub use app::{App, Jitter};
pub use terminal::{init, restore, send_notification, NotificationProtocol};

use color_eyre::Result;

use crate::config::PalConfig;
use crate::engine::RngEntropy;
use crate::session::Session;

/// Run the TUI application
///
/// Initializes the terminal, runs the app loop, and restores on exit.
/// The session is shut down before returning so no timer outlives the UI.
pub async fn run(config: &PalConfig) -> Result<()> {
    let handle = Session::spawn(
        config.session_options(),
        Box::new(RngEntropy::from_seed_option(config.seed)),
    );
    let mut app = App::new(handle, config.frame_interval());

    let mut terminal = terminal::init()?;
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even on error
    terminal::restore()?;
    app.into_handle().shutdown().await;

    result
}

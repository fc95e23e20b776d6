#![allow(clippy::module_name_repetitions)]

//! # Pixel Pal
//!
//! A needy terminal pet. Its mood climbs from 0 to 10 the longer it is
//! ignored; any attention calms it down, until mood 10 breaks it for good.
//!
//! The core is [`engine::MoodEngine`], a pure state machine over time.
//! [`session`] drives it with tokio timers, and [`tui`] draws it.

pub mod canvas;
pub mod config;
pub mod engine;
pub mod errors;
pub mod session;
pub mod simulate;
pub mod sprite;
pub mod tui;

pub use config::{load_config, PalConfig};
pub use engine::{Gesture, MoodEngine, Signals, TickOutcome};
pub use errors::{PalError, Result};
pub use session::{PalHandle, Session, SessionOptions};

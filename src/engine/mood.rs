//! Mood table - idle thresholds and the effects each mood level switches on.

use serde::{Deserialize, Serialize};

/// Highest mood; entering it breaks the pet for good.
pub const MAX_MOOD: u8 = 10;

/// Idle durations (ms) that must be strictly exceeded to reach moods 1..=10.
pub const MOOD_THRESHOLDS_MS: [u64; 10] = [
    5_000, 10_000, 16_000, 22_000, 28_000, 34_000, 40_000, 46_000, 52_000, 58_000,
];

/// Map idle time to a mood level.
///
/// The table is ascending, so the number of thresholds exceeded is also the
/// highest index reached. Comparison is strict: exactly 5000ms idle is still
/// mood 0.
pub fn derive_mood(elapsed_ms: u64) -> u8 {
    MOOD_THRESHOLDS_MS
        .iter()
        .take_while(|&&threshold| elapsed_ms > threshold)
        .count() as u8
}

/// Presentation flags derived from a mood level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodEffects {
    pub shaking: bool,
    pub glitching: bool,
    pub show_appeasement_prompt: bool,
    pub zoom_level: f64,
    /// Whether entering this mood may trigger a lightning flash
    pub lightning_eligible: bool,
}

impl Default for MoodEffects {
    fn default() -> Self {
        Self::calm()
    }
}

impl MoodEffects {
    /// Everything off, zoom at rest.
    pub const fn calm() -> Self {
        Self {
            shaking: false,
            glitching: false,
            show_appeasement_prompt: false,
            zoom_level: 1.0,
            lightning_eligible: false,
        }
    }

    /// Effects applied on entry to `mood`.
    pub fn for_mood(mood: u8) -> Self {
        match mood {
            5 => Self {
                shaking: true,
                ..Self::calm()
            },
            6 => Self {
                shaking: true,
                zoom_level: 1.05,
                lightning_eligible: true,
                ..Self::calm()
            },
            7 => Self {
                shaking: true,
                show_appeasement_prompt: true,
                zoom_level: 1.10,
                lightning_eligible: true,
                ..Self::calm()
            },
            8 => Self {
                shaking: true,
                show_appeasement_prompt: true,
                zoom_level: 1.15,
                ..Self::calm()
            },
            9 => Self {
                glitching: true,
                zoom_level: 0.95,
                ..Self::calm()
            },
            _ => Self::calm(),
        }
    }
}

/// Short name for a mood level.
pub fn mood_label(mood: u8) -> &'static str {
    match mood {
        0 => "happy",
        1 => "neutral",
        2 => "waiting",
        3 => "annoyed",
        4 => "irritated",
        5 => "angry",
        6 => "furious",
        7 => "desperate",
        8 => "pleading",
        9 => "glitching",
        _ => "broken",
    }
}

/// What the pet says at each mood level.
pub fn status_message(mood: u8) -> &'static str {
    match mood {
        0 => "Welcome! So glad you could make it!",
        1 => "Everything's calm. Just chilling.",
        2 => "Still here? Nice.",
        3 => "Getting a bit quiet... maybe interact?",
        4 => "Hellooo? Is this thing on?",
        5 => "Don't ignore me! I'm warning you!",
        6 => "THIS ISN'T FUNNY! PRESS SOMETHING!",
        7 => "PLEASE! I'M BEGGING YOU! LOOK, SHINY THINGS!",
        8 => "Why... why won't you just... *sniff*... press a key?",
        9 => "FINE! YOU WANT TO IGNORE ME? WATCH THIS!",
        _ => "...Oops. Did I do that?",
    }
}

//! Pixel Pal Configuration
//!
//! Loaded from `config.toml` in the platform config dir, or from an explicit
//! path (TOML or JSON). A missing default file just means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::{PalError, Result};
use crate::session::SessionOptions;

/// Pixel Pal configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PalConfig {
    /// Mood sampler period (ms)
    pub sample_interval_ms: u64,

    /// TUI redraw period (ms)
    pub frame_interval_ms: u64,

    /// Fixed seed for lightning and particles; OS entropy when unset
    pub seed: Option<u64>,

    /// Particle swarm enabled
    pub particles: bool,

    /// Where to write logs while the TUI owns the terminal
    pub log_file: Option<PathBuf>,
}

impl Default for PalConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 500,
            frame_interval_ms: 33,
            seed: None,
            particles: true,
            log_file: None,
        }
    }
}

impl PalConfig {
    /// Config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "pixelpal", "pixel-pal").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Default config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Reject values the runtime cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.sample_interval_ms == 0 {
            return Err(PalError::configuration("sample_interval_ms must be positive"));
        }
        if self.frame_interval_ms == 0 {
            return Err(PalError::configuration("frame_interval_ms must be positive"));
        }
        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            sample_interval: Duration::from_millis(self.sample_interval_ms),
            particles: self.particles,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Load configuration from `path`, or from the default location.
///
/// An explicit path must exist; the default one may be absent.
pub fn load_config(path: Option<&Path>) -> Result<PalConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match PalConfig::config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(PalConfig::default()),
        },
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        PalError::configuration(format!("Failed to read config {}: {e}", path.display()))
    })?;

    let config: PalConfig = if path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&content)
            .map_err(|e| PalError::configuration(format!("Invalid JSON config: {e}")))?
    } else {
        toml::from_str(&content)
            .map_err(|e| PalError::configuration(format!("Invalid TOML config: {e}")))?
    };

    config.validate()?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

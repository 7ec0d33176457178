pub mod engine;
pub mod model;
pub mod supervisor;

pub use engine::PlaybackController;
pub use model::{PathError, PathModel};
pub use supervisor::SessionSupervisor;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Completed,
    Cancelled,
}

/// Errors from starting, cancelling or requesting playback
#[derive(Debug, Error, PartialEq)]
pub enum PlaybackError {
    /// A playback request arrived with no fixes
    #[error("No data for the selected group and dates")]
    EmptyResult,

    #[error("Cannot {action} playback while {from:?}")]
    InvalidTransition {
        from: PlaybackState,
        action: &'static str,
    },

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Playback configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Delay between two reveals
    pub tick_interval_ms: u64,
    /// Pan animation length when following the newest fix
    pub center_duration_ms: u64,
    /// Padding around the path when fitting the view at the end
    pub fit_padding_px: u32,
    /// Fit animation length
    pub fit_duration_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2000,
            center_duration_ms: 500,
            fit_padding_px: 50,
            fit_duration_ms: 1000,
        }
    }
}

impl PlaybackConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pathplay").join("settings.json"))
    }

    /// Load the persisted settings, falling back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Self::default(),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        let parsed = fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|contents| serde_json::from_str(&contents).map_err(anyhow::Error::from));

        match parsed {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("No config directory on this platform"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

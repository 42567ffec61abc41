//! Game settings
//!
//! Stored as JSON next to the binary; every field has a default so partial
//! files are fine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which demo scene to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    #[default]
    Arena,
    Pong,
}

impl SceneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKind::Arena => "arena",
            SceneKind::Pong => "pong",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arena" | "adventure" => Some(SceneKind::Arena),
            "pong" => Some(SceneKind::Pong),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scene: SceneKind,
    /// Frame pacing target
    pub target_fps: u32,
    /// Sleep between frames; off runs the demo as fast as possible
    pub realtime: bool,
    /// Frames to simulate before exiting
    pub demo_frames: u32,

    /// Seed for anything random (ball serves, enemy placement)
    pub seed: u64,
    /// Enemies spawned in the arena scene
    pub enemy_count: u32,

    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene: SceneKind::Arena,
            target_fps: crate::consts::TARGET_FPS,
            realtime: false,
            demo_frames: 600,

            seed: 0x5eed,
            enemy_count: 3,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Fixed timestep used when not pacing to the wall clock
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }
}

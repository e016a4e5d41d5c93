//! # Configuration
//!
//! Replay configuration with serde-backed loading from TOML or RON files.
//! Every field has a sensible default so a missing or partial config file
//! still yields a runnable replay.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file contents failed to parse
    #[error("parse error in {path}: {message}")]
    Parse {
        /// Path of the offending file
        path: String,
        /// Parser diagnostic
        message: String,
    },
    /// File extension is neither `.toml` nor `.ron`
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level replay configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Viewport and optics settings
    pub display: DisplayConfig,
    /// Input data and pacing settings
    pub playback: PlaybackConfig,
}

/// Viewport and field-of-view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels; also the clipping-frustum base size
    pub height: u32,
    /// Whole field-of-view angle in degrees
    pub fov_degrees: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov_degrees: 90.0,
        }
    }
}

/// Input file paths and frame pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Ground plane model file (loaded first; its first polygon is the
    /// ground plane)
    pub ground_model: String,
    /// Target aircraft model file
    pub target_model: String,
    /// Missile model file
    pub missile_model: String,
    /// Trajectory stream file
    pub trajectory: String,
    /// Initial delay between frames in milliseconds
    pub frame_delay_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            ground_model: "dat/ground.dat".into(),
            target_model: "dat/target.dat".into(),
            missile_model: "dat/missile.dat".into(),
            trajectory: "dat/trajectory.dat".into(),
            frame_delay_ms: 10,
        }
    }
}

impl ReplayConfig {
    /// Load configuration from a TOML or RON file, selected by extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let display = path.display().to_string();

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: display,
                message: e.to_string(),
            }),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: display,
                message: e.to_string(),
            }),
            _ => Err(ConfigError::UnsupportedFormat(display)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReplayConfig::default();
        assert_eq!(config.display.width, 800);
        assert_eq!(config.display.height, 600);
        assert_eq!(config.playback.frame_delay_ms, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ReplayConfig = toml::from_str(
            r#"
            [display]
            width = 1024
            "#,
        )
        .unwrap();
        assert_eq!(config.display.width, 1024);
        assert_eq!(config.display.height, 600);
        assert_eq!(config.playback.trajectory, "dat/trajectory.dat");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ReplayConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back: ReplayConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.display.fov_degrees, config.display.fov_degrees);
        assert_eq!(back.playback.missile_model, config.playback.missile_model);
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let result = ReplayConfig::load("config.yaml");
        assert!(matches!(
            result,
            Err(ConfigError::Io(_) | ConfigError::UnsupportedFormat(_))
        ));
    }
}

//! Game settings
//!
//! Loaded once at startup from an optional JSON file. Anything missing falls
//! back to the defaults; anything out of range is rejected by
//! [`Settings::validate`] before the game starts.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::platform::KeyBindings;
use crate::sim::RemainderPolicy;

/// Startup configuration errors. All of them are fatal.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid canvas size {width}x{height}: both sides must be positive")]
    InvalidCanvas { width: f32, height: f32 },
    #[error("invalid update rate {fps} fps: must be at least 1")]
    InvalidUpdateRate { fps: u32 },
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Logical canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

/// Simulation rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRate {
    pub fps: u32,
}

impl UpdateRate {
    /// Fixed step length in seconds
    pub fn seconds(&self) -> f32 {
        1.0 / self.fps as f32
    }
}

impl Default for UpdateRate {
    fn default() -> Self {
        Self { fps: DEFAULT_FPS }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub canvas: CanvasSize,
    pub update_rate: UpdateRate,
    /// Double-resolution backing store (set to false on regular monitors)
    pub hi_dpi: bool,
    /// Seed for enemy placement
    pub seed: u64,
    /// What the clock does with leftover frame time
    pub remainder: RemainderPolicy,
    /// Cap on steps per frame; unbounded when absent
    pub max_substeps: Option<u32>,
    /// Draw velocity lines on moving bodies
    pub show_velocity: bool,
    pub bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            update_rate: UpdateRate::default(),
            hi_dpi: true,
            seed: 0x5EED,
            remainder: RemainderPolicy::Drop,
            max_substeps: None,
            show_velocity: false,
            bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let CanvasSize { width, height } = self.canvas;
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(width) || !positive(height) {
            return Err(SettingsError::InvalidCanvas { width, height });
        }
        if self.update_rate.fps == 0 {
            return Err(SettingsError::InvalidUpdateRate {
                fps: self.update_rate.fps,
            });
        }
        if self.max_substeps == Some(0) {
            log::warn!("max_substeps of 0 would never step; treating as unbounded");
        }
        Ok(())
    }

    /// Step cap with the degenerate zero treated as "no cap"
    pub fn effective_max_substeps(&self) -> Option<u32> {
        self.max_substeps.filter(|&max| max > 0)
    }
}

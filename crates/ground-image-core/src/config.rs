//! Saved ground image display configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::properties::FrameProperty;

/// Snapshot of the four user-editable ground image parameters.
///
/// Serialized with the same labels the inspector shows, so a saved viewer
/// layout reads naturally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Path of the image file to display.
    #[serde(rename = "Image Path")]
    pub image_path: String,

    /// Frame the image is anchored to.
    #[serde(rename = "Frame")]
    pub frame_name: String,

    /// Width of the displayed image in meters.
    #[serde(rename = "Width")]
    pub width: f32,

    /// Height of the displayed image in meters.
    #[serde(rename = "Height")]
    pub height: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            frame_name: FrameProperty::FIXED_FRAME_STRING.to_string(),
            width: 10.0,
            height: 10.0,
        }
    }
}

impl DisplayConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the image path.
    #[must_use]
    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = path.into();
        self
    }

    /// Sets the anchor frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frame_name = frame.into();
        self
    }

    /// Sets width and height, clamped to non-negative. Non-finite sizes fall
    /// back to the default.
    #[must_use]
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self.clamped()
    }

    /// Returns a copy with width and height clamped to non-negative.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        let defaults = Self::default();
        self.width = clamp_size(self.width, defaults.width);
        self.height = clamp_size(self.height, defaults.height);
        self
    }

    /// Parses a saved configuration. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.clamped())
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a configuration saved with [`DisplayConfig::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("loaded display config from {}", path.display());
        Self::from_json(&json)
    }

    /// Writes the configuration to `path` as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::debug!("saved display config to {}", path.display());
        Ok(())
    }
}

fn clamp_size(value: f32, default: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        default
    }
}

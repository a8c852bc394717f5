//! `.png.mcmeta` animation metadata
//!
//! Minecraft reads texture animation timing from a JSON file next to the
//! texture: `{"animation": {"frametime": <ticks>}}`. The game runs at 20 ticks
//! per second, so a frame shown for `1 / fps` seconds lasts `20 / fps` ticks.

use crate::{Error, Result, Stride};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Game ticks per second
pub const TICKS_PER_SECOND: f64 = 20.0;

/// Timing metadata for one texture animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationMetadata {
    animation: AnimationSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct AnimationSection {
    frametime: f64,
}

impl AnimationMetadata {
    /// Creates metadata with an explicit frametime in ticks
    pub fn new(frametime: f64) -> Result<Self> {
        if !frametime.is_finite() || frametime <= 0.0 {
            return Err(Error::invalid_parameter(format!(
                "the frametime must be a positive number, got {frametime}"
            )));
        }
        Ok(Self {
            animation: AnimationSection { frametime },
        })
    }

    /// Derives the frametime from the source frame rate and the sampling stride
    pub fn from_frame_rate(source_fps: f64, stride: Stride) -> Result<Self> {
        let effective_fps = source_fps / f64::from(stride.get());
        if !effective_fps.is_finite() || effective_fps <= 0.0 {
            return Err(Error::invalid_parameter(format!(
                "the source frame rate must be positive, got {source_fps}"
            )));
        }
        Self::new(TICKS_PER_SECOND / effective_fps)
    }

    /// Ticks each animation frame stays on screen (not rounded)
    pub fn frametime(&self) -> f64 {
        self.animation.frametime
    }

    /// Serializes to the `.mcmeta` JSON text
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses `.mcmeta` JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let metadata: Self = serde_json::from_str(text)?;
        Self::new(metadata.frametime())
    }

    /// Writes the JSON to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut json = self.to_json()?;
        json.push('\n');
        fs::write(path, json).map_err(|e| Error::write_failure(path, e))
    }

    /// Reads a `.mcmeta` file back
    pub fn read_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

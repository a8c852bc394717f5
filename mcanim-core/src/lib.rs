//! mcanim Core Library
//!
//! This library turns a sequence of decoded video frames into a Minecraft
//! texture animation: a vertical strip of square tiles (`.png`) plus the
//! `.png.mcmeta` file carrying the frame timing.

pub mod compositor;
pub mod frame;
pub mod mcmeta;
pub mod output;
pub mod params;
pub mod pipeline;
pub mod sampler;
pub mod transform;

pub use compositor::{compose, AnimationCompositor, AnimationImage};
pub use frame::{FrameSource, MemorySource, SampledFrame};
pub use mcmeta::AnimationMetadata;
pub use output::{OutputName, SavedArtifacts};
pub use params::{ConversionConfig, Resolution, Stride};
pub use pipeline::{convert, Animation};
pub use sampler::FrameSampler;

use std::path::PathBuf;

/// Result type for mcanim-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for mcanim-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Video source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No frames were sampled, nothing to compose")]
    EmptyAnimation,

    #[error("Failed to write {}: {message}", path.display())]
    WriteFailure { path: PathBuf, message: String },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{frames} tiles of {side}px exceed the maximum image height")]
    SheetTooLarge { frames: u32, side: u32 },

    #[error("Malformed frame: {width}x{height}")]
    MalformedFrame { width: u32, height: u32 },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Metadata error: {0}")]
    Metadata(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn write_failure(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::WriteFailure {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

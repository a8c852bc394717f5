//! mcanim Video Library
//!
//! This library decodes video files with FFmpeg and exposes them as a
//! [`mcanim_core::FrameSource`].

pub mod video_reader;

pub use video_reader::VideoSource;

/// Result type for mcanim-video operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for mcanim-video operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("FFmpeg error: {0}")]
    Ffmpeg(#[from] ffmpeg_next::Error),

    #[error("No video stream found")]
    NoVideoStream,

    #[error("Decoded frame does not match its {width}x{height} size")]
    InvalidFrame { width: u32, height: u32 },
}

impl From<Error> for mcanim_core::Error {
    fn from(e: Error) -> Self {
        mcanim_core::Error::Decode(e.to_string())
    }
}

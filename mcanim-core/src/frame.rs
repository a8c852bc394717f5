//! Frame sources and sampled frames

use crate::Result;
use image::RgbImage;
use std::collections::VecDeque;

/// A forward-only cursor over the decoded frames of a video
///
/// Implementations own the decoder state; frames come out in decode order and
/// a source cannot be rewound.
pub trait FrameSource {
    /// Frame width in pixels
    fn width(&self) -> u32;

    /// Frame height in pixels
    fn height(&self) -> u32;

    /// Frames per second of the source
    fn frame_rate(&self) -> f64;

    /// Decodes the next frame, or returns `None` at end of stream
    fn next_frame(&mut self) -> Result<Option<RgbImage>>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn frame_rate(&self) -> f64 {
        (**self).frame_rate()
    }

    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        (**self).next_frame()
    }
}

/// A frame picked by the sampler, tagged with its decode-order index
#[derive(Debug, Clone)]
pub struct SampledFrame {
    /// Index of this frame in the original stream
    pub index: u64,
    /// Decoded RGB pixels at source resolution
    pub image: RgbImage,
}

/// Frame source over already-decoded images
#[derive(Debug, Clone)]
pub struct MemorySource {
    width: u32,
    height: u32,
    frame_rate: f64,
    frames: VecDeque<RgbImage>,
}

impl MemorySource {
    /// Creates a source that yields `frames` in order
    pub fn new(width: u32, height: u32, frame_rate: f64, frames: Vec<RgbImage>) -> Self {
        Self {
            width,
            height,
            frame_rate,
            frames: frames.into(),
        }
    }

    /// Returns the number of frames not yet read
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for MemorySource {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        Ok(self.frames.pop_front())
    }
}

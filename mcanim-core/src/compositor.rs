//! Sprite-sheet composition
//!
//! Sampled frames are cropped to a centered square, scaled to the tile side
//! and stacked top to bottom: tile `k` occupies rows `[k * side, (k + 1) * side)`.

use crate::frame::SampledFrame;
use crate::transform::{crop_center_square, resize_square};
use crate::{Error, Resolution, Result};
use image::{ImageFormat, RgbImage};
use std::path::Path;
use tracing::debug;

/// The finished vertical strip of square tiles
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationImage {
    image: RgbImage,
    side: u32,
    frame_count: u32,
}

impl AnimationImage {
    /// Width (and height) of one tile
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Number of stacked tiles
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// The whole strip
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Copies tile `k` out of the strip
    pub fn tile(&self, k: u32) -> Option<RgbImage> {
        if k >= self.frame_count {
            return None;
        }
        let view = image::imageops::crop_imm(&self.image, 0, k * self.side, self.side, self.side);
        Some(view.to_image())
    }

    /// Writes the strip as a PNG file
    pub fn write_png(&self, path: &Path) -> Result<()> {
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| Error::write_failure(path, e))
    }
}

/// Accumulates tiles into one tall image
pub struct AnimationCompositor {
    side: u32,
    frame_count: u32,
    pixels: Vec<u8>,
}

impl AnimationCompositor {
    /// Creates an empty compositor producing `side x side` tiles
    pub fn new(resolution: Resolution) -> Self {
        Self {
            side: resolution.side(),
            frame_count: 0,
            pixels: Vec::new(),
        }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Number of tiles appended so far
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Crops, scales and appends one frame below the previous ones
    pub fn push(&mut self, frame: &RgbImage) -> Result<()> {
        let square = crop_center_square(frame)?;
        let tile = resize_square(&square, self.side)?;
        debug_assert_eq!(tile.dimensions(), (self.side, self.side));

        // Row-major storage: stacking vertically is appending the raw rows.
        self.pixels.extend_from_slice(tile.as_raw());
        self.frame_count += 1;
        Ok(())
    }

    /// Produces the finished strip; fails if no frame was pushed
    pub fn finish(self) -> Result<AnimationImage> {
        if self.frame_count == 0 {
            return Err(Error::EmptyAnimation);
        }
        let height = sheet_height(self.side, self.frame_count)?;
        let image = RgbImage::from_raw(self.side, height, self.pixels).ok_or(
            Error::MalformedFrame {
                width: self.side,
                height,
            },
        )?;

        Ok(AnimationImage {
            image,
            side: self.side,
            frame_count: self.frame_count,
        })
    }
}

/// Height of a strip of `frames` tiles, if it fits an image dimension
fn sheet_height(side: u32, frames: u32) -> Result<u32> {
    side.checked_mul(frames).ok_or(Error::SheetTooLarge { frames, side })
}

/// Composes sampled frames into a sprite sheet
///
/// Without a target resolution the tile side is derived from the first
/// frame: the largest power of two not exceeding its smaller dimension.
pub fn compose<I>(frames: I, target: Option<Resolution>) -> Result<AnimationImage>
where
    I: IntoIterator<Item = Result<SampledFrame>>,
{
    let mut frames = frames.into_iter();
    let first = frames.next().ok_or(Error::EmptyAnimation)??;

    let resolution = match target {
        Some(resolution) => resolution,
        None => {
            let (width, height) = first.image.dimensions();
            let derived = Resolution::for_source(width, height)?;
            debug!(side = derived.side(), width, height, "derived tile side");
            derived
        }
    };

    let mut compositor = AnimationCompositor::new(resolution);
    for frame in std::iter::once(Ok(first)).chain(frames) {
        let frame = frame?;
        compositor.push(&frame.image)?;

        if compositor.frame_count() % 100 == 0 {
            debug!(
                frames = compositor.frame_count(),
                source_index = frame.index,
                "composited frames"
            );
        }
    }

    compositor.finish()
}

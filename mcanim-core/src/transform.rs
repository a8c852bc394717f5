//! Per-frame geometry: center-square crop and square resize

use crate::{Error, Result};
use image::imageops::{self, FilterType};
use image::RgbImage;

/// Interpolation used when scaling tiles (bilinear)
pub const RESIZE_FILTER: FilterType = FilterType::Triangle;

/// Cuts the centered `min(W, H)` square out of a frame
///
/// The discarded margin is split evenly, with the leading margin rounded down.
/// A frame that is already square is returned unchanged.
pub fn crop_center_square(frame: &RgbImage) -> Result<RgbImage> {
    let (width, height) = frame.dimensions();
    let side = width.min(height);
    if side == 0 {
        return Err(Error::MalformedFrame { width, height });
    }
    if width == height {
        return Ok(frame.clone());
    }

    let x = (width - side) / 2;
    let y = (height - side) / 2;
    Ok(imageops::crop_imm(frame, x, y, side, side).to_image())
}

/// Scales a square frame to `side x side`
///
/// Resizing to the frame's current size is the identity.
pub fn resize_square(frame: &RgbImage, side: u32) -> Result<RgbImage> {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 || side == 0 {
        return Err(Error::MalformedFrame { width, height });
    }
    if width == side && height == side {
        return Ok(frame.clone());
    }
    Ok(imageops::resize(frame, side, side, RESIZE_FILTER))
}

/// Largest power of two that does not exceed `n` (`n` must be positive)
pub fn largest_power_of_two(n: u32) -> u32 {
    debug_assert!(n > 0);
    1 << (u32::BITS - 1 - n.leading_zeros())
}

/// Tile side used when no resolution was requested: `2^floor(log2(min(W, H)))`
pub fn default_side(width: u32, height: u32) -> Result<u32> {
    match width.min(height) {
        0 => Err(Error::MalformedFrame { width, height }),
        min => Ok(largest_power_of_two(min)),
    }
}

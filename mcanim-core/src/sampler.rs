//! Stride-based frame sampling

use crate::frame::{FrameSource, SampledFrame};
use crate::{Result, Stride};

/// Lazily pulls frames from a source and keeps every `stride`th one
///
/// The iterator is single-pass: it owns the source cursor and stops for good
/// at end of stream or after the first decode error.
pub struct FrameSampler<S: FrameSource> {
    source: S,
    stride: Stride,
    next_index: u64,
    finished: bool,
}

impl<S: FrameSource> FrameSampler<S> {
    /// Creates a sampler over an already opened source
    pub fn new(source: S, stride: Stride) -> Self {
        Self {
            source,
            stride,
            next_index: 0,
            finished: false,
        }
    }

    /// Number of frames decoded so far, sampled or not
    pub fn frames_read(&self) -> u64 {
        self.next_index
    }

    /// Gives the source back, e.g. to release it early
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: FrameSource> Iterator for FrameSampler<S> {
    type Item = Result<SampledFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let image = match self.source.next_frame() {
                Ok(Some(image)) => image,
                Ok(None) => {
                    self.finished = true;
                    break;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            };

            let index = self.next_index;
            self.next_index += 1;

            if self.stride.selects(index) {
                return Some(Ok(SampledFrame { index, image }));
            }
        }
        None
    }
}

impl<S: FrameSource> std::iter::FusedIterator for FrameSampler<S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, MemorySource};
    use image::{Rgb, RgbImage};

    fn numbered_source(count: u32) -> MemorySource {
        let frames = (0..count)
            .map(|i| RgbImage::from_pixel(1, 1, Rgb([i as u8, 0, 0])))
            .collect();
        MemorySource::new(1, 1, 30.0, frames)
    }

    fn sampled_indices(count: u32, stride: i64) -> Vec<u64> {
        FrameSampler::new(numbered_source(count), Stride::new(stride).unwrap())
            .map(|f| f.unwrap().index)
            .collect()
    }

    #[test]
    fn test_stride_one_keeps_every_frame() {
        assert_eq!(sampled_indices(5, 1), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_sample_count_is_ceil_of_frames_over_stride() {
        for frames in 0..20u32 {
            for stride in 1..7i64 {
                let indices = sampled_indices(frames, stride);
                let expected = (frames as u64).div_ceil(stride as u64);
                assert_eq!(indices.len() as u64, expected, "F={frames} n={stride}");
                for (k, index) in indices.iter().enumerate() {
                    assert_eq!(*index, k as u64 * stride as u64);
                }
            }
        }
    }

    #[test]
    fn test_sampled_pixels_match_original_frames() {
        let sampler = FrameSampler::new(numbered_source(7), Stride::new(3).unwrap());
        let values: Vec<u8> = sampler
            .map(|f| f.unwrap().image.get_pixel(0, 0)[0])
            .collect();
        assert_eq!(values, vec![0, 3, 6]);
    }

    #[test]
    fn test_empty_source_gives_empty_sequence() {
        assert!(sampled_indices(0, 1).is_empty());
    }

    #[test]
    fn test_stride_larger_than_stream_keeps_first_frame() {
        assert_eq!(sampled_indices(4, 10), vec![0]);
    }

    #[test]
    fn test_sampler_reads_whole_stream_and_is_fused() {
        let mut sampler = FrameSampler::new(numbered_source(5), Stride::new(2).unwrap());
        assert_eq!(sampler.by_ref().count(), 3);
        assert_eq!(sampler.frames_read(), 5);
        assert!(sampler.next().is_none());
        assert_eq!(sampler.into_inner().remaining(), 0);
    }

    struct FailingSource {
        good_frames: u32,
    }

    impl FrameSource for FailingSource {
        fn width(&self) -> u32 {
            1
        }

        fn height(&self) -> u32 {
            1
        }

        fn frame_rate(&self) -> f64 {
            1.0
        }

        fn next_frame(&mut self) -> Result<Option<RgbImage>> {
            if self.good_frames == 0 {
                return Err(Error::Decode("corrupt packet".into()));
            }
            self.good_frames -= 1;
            Ok(Some(RgbImage::new(1, 1)))
        }
    }

    #[test]
    fn test_decode_error_stops_sampling() {
        let mut sampler = FrameSampler::new(FailingSource { good_frames: 2 }, Stride::default());
        assert!(sampler.next().unwrap().is_ok());
        assert!(sampler.next().unwrap().is_ok());
        assert!(matches!(sampler.next(), Some(Err(Error::Decode(_)))));
        assert!(sampler.next().is_none());
    }
}

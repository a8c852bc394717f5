//! Sequential frame decoding using FFmpeg

use crate::{Error, Result};
use ffmpeg_next as ffmpeg;
use image::RgbImage;
use mcanim_core::FrameSource;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};

static FFMPEG_INIT: OnceLock<std::result::Result<(), ffmpeg::Error>> = OnceLock::new();

/// Initialize FFmpeg (once per process)
fn init_ffmpeg() -> Result<()> {
    FFMPEG_INIT
        .get_or_init(|| {
            ffmpeg::init()?;
            ffmpeg::util::log::set_level(ffmpeg::util::log::Level::Error);
            Ok(())
        })
        .clone()
        .map_err(Error::from)
}

/// An opened video file decoded front to back
///
/// Frames are converted to RGB at the source resolution. The decoder only
/// moves forward; dropping the source closes the file.
pub struct VideoSource {
    input: ffmpeg::format::context::Input,
    video_stream_index: usize,
    decoder: ffmpeg::codec::decoder::Video,
    scaler: ffmpeg::software::scaling::Context,
    frame_rate: f64,
    pending: VecDeque<RgbImage>,
    eof_sent: bool,
}

impl VideoSource {
    /// Opens a video file and prepares its best video stream for decoding
    ///
    /// Fails with `SourceUnavailable` if the file cannot be opened or holds
    /// no decodable video stream.
    pub fn open(path: impl AsRef<Path>) -> mcanim_core::Result<Self> {
        let path = path.as_ref();
        Self::open_inner(path).map_err(|e| {
            mcanim_core::Error::SourceUnavailable(format!("{}: {e}", path.display()))
        })
    }

    fn open_inner(path: &Path) -> Result<Self> {
        init_ffmpeg()?;

        let input = ffmpeg::format::input(&path)?;

        // Find the video stream
        let video_stream = input
            .streams()
            .best(ffmpeg::media::Type::Video)
            .ok_or(Error::NoVideoStream)?;

        let video_stream_index = video_stream.index();
        let frame_rate = stream_frame_rate(&video_stream);

        // Create decoder
        let context = ffmpeg::codec::context::Context::from_parameters(video_stream.parameters())?;
        let decoder = context.decoder().video()?;

        let scaler = ffmpeg::software::scaling::Context::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            ffmpeg::format::Pixel::RGB24,
            decoder.width(),
            decoder.height(),
            ffmpeg::software::scaling::Flags::BILINEAR,
        )?;

        info!(
            path = %path.display(),
            width = decoder.width(),
            height = decoder.height(),
            fps = frame_rate,
            "opened video"
        );

        Ok(Self {
            input,
            video_stream_index,
            decoder,
            scaler,
            frame_rate,
            pending: VecDeque::new(),
            eof_sent: false,
        })
    }

    /// Reads the next packet belonging to the video stream
    fn next_video_packet(&mut self) -> Option<ffmpeg::Packet> {
        let index = self.video_stream_index;
        self.input
            .packets()
            .find_map(|(stream, packet)| (stream.index() == index).then_some(packet))
    }

    /// Moves every frame the decoder has ready into the pending queue
    fn receive_decoded_frames(&mut self) -> Result<()> {
        let mut decoded = ffmpeg::frame::Video::empty();
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            let mut rgb_frame = ffmpeg::frame::Video::empty();
            self.scaler.run(&decoded, &mut rgb_frame)?;
            self.pending.push_back(frame_to_image(&rgb_frame)?);
        }
        Ok(())
    }

    fn decode_next(&mut self) -> Result<Option<RgbImage>> {
        loop {
            if let Some(frame) = self.pending.pop_front() {
                return Ok(Some(frame));
            }
            if self.eof_sent {
                return Ok(None);
            }

            match self.next_video_packet() {
                Some(packet) => self.decoder.send_packet(&packet)?,
                None => {
                    // Flush decoder
                    debug!("end of packets, flushing decoder");
                    self.decoder.send_eof()?;
                    self.eof_sent = true;
                }
            }
            self.receive_decoded_frames()?;
        }
    }
}

impl FrameSource for VideoSource {
    fn width(&self) -> u32 {
        self.decoder.width()
    }

    fn height(&self) -> u32 {
        self.decoder.height()
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn next_frame(&mut self) -> mcanim_core::Result<Option<RgbImage>> {
        Ok(self.decode_next()?)
    }
}

/// Average frame rate of a stream, falling back to its base rate
fn stream_frame_rate(stream: &ffmpeg::format::stream::Stream) -> f64 {
    [stream.avg_frame_rate(), stream.rate()]
        .into_iter()
        .find(|rate| rate.numerator() > 0 && rate.denominator() > 0)
        .map(|rate| f64::from(rate.numerator()) / f64::from(rate.denominator()))
        .unwrap_or(0.0)
}

/// Copies an RGB24 frame into an image, dropping the per-row padding
fn frame_to_image(frame: &ffmpeg::frame::Video) -> Result<RgbImage> {
    let width = frame.width();
    let height = frame.height();
    let stride = frame.stride(0);
    let row_bytes = width as usize * 3;
    let data = frame.data(0);

    if stride < row_bytes || data.len() < stride * height.saturating_sub(1) as usize + row_bytes {
        return Err(Error::InvalidFrame { width, height });
    }

    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in data.chunks(stride).take(height as usize) {
        pixels.extend_from_slice(&row[..row_bytes]);
    }

    RgbImage::from_raw(width, height, pixels).ok_or(Error::InvalidFrame { width, height })
}

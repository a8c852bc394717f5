//! Video-to-animation conversion

use crate::compositor::{compose, AnimationImage};
use crate::frame::FrameSource;
use crate::mcmeta::AnimationMetadata;
use crate::output::{OutputName, SavedArtifacts};
use crate::sampler::FrameSampler;
use crate::{ConversionConfig, Resolution, Result};
use tracing::info;

/// A composed sprite sheet together with its timing metadata
#[derive(Debug, Clone)]
pub struct Animation {
    pub image: AnimationImage,
    pub metadata: AnimationMetadata,
}

impl Animation {
    /// Writes `<name>.png` and then `<name>.png.mcmeta`
    ///
    /// The two writes are not transactional: if the metadata write fails the
    /// image stays on disk.
    pub fn save(&self, name: &OutputName) -> Result<SavedArtifacts> {
        let artifacts = SavedArtifacts {
            image: name.image_path(),
            metadata: name.metadata_path(),
        };

        self.image.write_png(&artifacts.image)?;
        self.metadata.write_to(&artifacts.metadata)?;

        info!(
            image = %artifacts.image.display(),
            metadata = %artifacts.metadata.display(),
            "saved animation"
        );
        Ok(artifacts)
    }
}

/// Samples `source`, composes the sampled frames and derives the frametime
///
/// The tile side and frame rate are checked against the source properties
/// before any frame is decoded. The source is consumed and released when
/// sampling ends.
pub fn convert<S: FrameSource>(source: S, config: &ConversionConfig) -> Result<Animation> {
    let (width, height) = (source.width(), source.height());
    let fps = source.frame_rate();

    let resolution = match config.resolution {
        Some(resolution) => resolution,
        None => Resolution::for_source(width, height)?,
    };
    let metadata = AnimationMetadata::from_frame_rate(fps, config.stride)?;

    info!(
        width,
        height,
        fps,
        stride = config.stride.get(),
        side = resolution.side(),
        "converting video"
    );

    let image = compose(FrameSampler::new(source, config.stride), Some(resolution))?;

    info!(
        frames = image.frame_count(),
        sheet_height = image.image().height(),
        frametime = metadata.frametime(),
        "composed animation"
    );

    Ok(Animation { image, metadata })
}

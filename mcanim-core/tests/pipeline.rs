//! End-to-end conversion over in-memory frames, written to a temp directory

use image::{Rgb, RgbImage};
use mcanim_core::{
    convert, AnimationMetadata, ConversionConfig, Error, MemorySource, OutputName, Resolution,
    Stride,
};

/// Frames whose center region carries the frame number in the red channel
fn numbered_frames(width: u32, height: u32, count: u8) -> Vec<RgbImage> {
    (0..count)
        .map(|i| {
            RgbImage::from_fn(width, height, |x, _| {
                // Left and right borders would be cropped away
                let in_center = x >= (width - height) / 2 && x < (width + height) / 2;
                if in_center {
                    Rgb([i, 0, 0])
                } else {
                    Rgb([255, 255, 255])
                }
            })
        })
        .collect()
}

#[test]
fn test_convert_and_save_writes_both_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::new(48, 32, 30.0, numbered_frames(48, 32, 9));
    let config = ConversionConfig {
        resolution: None,
        stride: Stride::new(2).unwrap(),
    };

    let animation = convert(source, &config).unwrap();
    let name = OutputName::new(dir.path().join("clip.mp4")).unwrap();
    let saved = animation.save(&name).unwrap();

    assert_eq!(saved.image, dir.path().join("clip.png"));
    assert_eq!(saved.metadata, dir.path().join("clip.png.mcmeta"));

    let sheet = image::open(&saved.image).unwrap().to_rgb8();
    // min(48, 32) = 32 is already a power of two; 9 frames with stride 2 -> 5 tiles
    assert_eq!(sheet.dimensions(), (32, 160));
    for k in 0..5u32 {
        let center = sheet.get_pixel(16, k * 32 + 16);
        assert_eq!(center, &Rgb([(k * 2) as u8, 0, 0]));
        assert_eq!(sheet.get_pixel(0, k * 32), &Rgb([(k * 2) as u8, 0, 0]));
    }

    let metadata = AnimationMetadata::read_from(&saved.metadata).unwrap();
    assert!((metadata.frametime() - 20.0 / 15.0).abs() < 1e-9);

    let text = std::fs::read_to_string(&saved.metadata).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value["animation"]["frametime"].is_f64());
    assert_eq!(value.as_object().unwrap().len(), 1);
}

#[test]
fn test_explicit_resolution_scales_tiles() {
    let dir = tempfile::tempdir().unwrap();
    let frames = vec![RgbImage::from_pixel(100, 100, Rgb([10, 20, 30])); 3];
    let source = MemorySource::new(100, 100, 20.0, frames);
    let config = ConversionConfig {
        resolution: Some("16".parse::<Resolution>().unwrap()),
        stride: Stride::default(),
    };

    let animation = convert(source, &config).unwrap();
    let saved = animation
        .save(&OutputName::new(dir.path().join("flat")).unwrap())
        .unwrap();

    let sheet = image::open(&saved.image).unwrap().to_rgb8();
    assert_eq!(sheet.dimensions(), (16, 48));
    assert!(sheet.pixels().all(|p| *p == Rgb([10, 20, 30])));
    let metadata = AnimationMetadata::read_from(&saved.metadata).unwrap();
    assert_eq!(metadata.frametime(), 1.0);
}

#[test]
fn test_empty_animation_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::new(64, 64, 30.0, Vec::new());
    let name = OutputName::new(dir.path().join("empty.avi")).unwrap();

    let result = convert(source, &ConversionConfig::default()).and_then(|a| a.save(&name));

    assert!(matches!(result, Err(Error::EmptyAnimation)));
    assert!(!name.image_path().exists());
    assert!(!name.metadata_path().exists());
}

#[test]
fn test_unwritable_destination_is_write_failure() {
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::new(8, 8, 30.0, vec![RgbImage::new(8, 8)]);
    let animation = convert(source, &ConversionConfig::default()).unwrap();
    let name = OutputName::new(dir.path().join("no_such_dir").join("anim")).unwrap();

    assert!(matches!(
        animation.save(&name),
        Err(Error::WriteFailure { .. })
    ));
}

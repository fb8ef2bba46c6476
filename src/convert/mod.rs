//! Format conversion strategies installed on frames by their producer.

/// Sample-encoding conversion.
pub mod audio;
/// Pixel-layout conversion.
pub mod image;

use crate::format::audio::AudioFormat;
use crate::format::image::ImageFormat;
use crate::foundation::error::{FrameError, FrameResult};
use crate::frame::buffer::{Audio, Image};

/// Conversion capability a producer supplies to the frames it creates.
///
/// The frame calls these only when the buffer is not already in the target format, so
/// implementations never see identity requests from the frame itself. Implementations must
/// return a buffer in exactly `target` or an [`FrameError::UnsupportedFormat`].
pub trait Converter: Send + Sync {
    /// Convert `image` into `target`.
    fn convert_image(&self, image: &Image, target: ImageFormat) -> FrameResult<Image>;

    /// Convert `audio` into `target`.
    fn convert_audio(&self, audio: &Audio, target: AudioFormat) -> FrameResult<Audio>;

    /// 8-bit alpha plane of `image`, if its layout carries one.
    fn alpha_mask(&self, _image: &Image) -> Option<Vec<u8>> {
        None
    }
}

/// Converter with no conversion paths: identity requests succeed, everything else fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullConverter;

impl Converter for NullConverter {
    fn convert_image(&self, image: &Image, target: ImageFormat) -> FrameResult<Image> {
        if image.format == target {
            return Ok(image.clone());
        }
        Err(FrameError::unsupported_format(format!(
            "no image conversion from {} to {}",
            image.format, target
        )))
    }

    fn convert_audio(&self, audio: &Audio, target: AudioFormat) -> FrameResult<Audio> {
        if audio.format == target {
            return Ok(audio.clone());
        }
        Err(FrameError::unsupported_format(format!(
            "no audio conversion from {} to {}",
            audio.format, target
        )))
    }
}

/// Converter covering every pair of concrete image layouts and audio encodings.
///
/// Images go through 8-bit RGBA using BT.601 integer coefficients; audio goes through 32-bit
/// integer samples, except float-to-float which is lossless.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardConverter;

impl Converter for StandardConverter {
    fn convert_image(&self, image: &Image, target: ImageFormat) -> FrameResult<Image> {
        self::image::convert(image, target)
    }

    fn convert_audio(&self, audio: &Audio, target: AudioFormat) -> FrameResult<Audio> {
        self::audio::convert(audio, target)
    }

    fn alpha_mask(&self, image: &Image) -> Option<Vec<u8>> {
        self::image::extract_alpha(image)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/converter.rs"]
mod tests;

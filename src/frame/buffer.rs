use crate::format::audio::AudioFormat;
use crate::format::image::ImageFormat;
use crate::foundation::error::{FrameError, FrameResult};
use std::sync::Arc;

/// A resolved image buffer.
///
/// Bytes are shared between clones; [`Image::data_mut`] copies on write when the buffer is shared.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    /// Pixel layout of `data`.
    pub format: ImageFormat,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    data: Arc<Vec<u8>>,
}

impl Image {
    /// Wrap `data`, checking it is large enough for `format` at `width x height`.
    pub fn new(format: ImageFormat, width: u32, height: u32, data: Vec<u8>) -> FrameResult<Self> {
        let image = Self {
            format,
            width,
            height,
            data: Arc::new(data),
        };
        image.ensure_consistent()?;
        Ok(image)
    }

    /// A solid straight-alpha RGBA image.
    pub fn solid_rgba(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let px = width as usize * height as usize;
        Self {
            format: ImageFormat::Rgb24a,
            width,
            height,
            data: Arc::new(rgba.repeat(px)),
        }
    }

    /// An opaque white image in `format`, used as the test-card placeholder.
    ///
    /// `ImageFormat::None` yields an empty buffer.
    pub fn white(format: ImageFormat, width: u32, height: u32) -> Self {
        let size = format.buffer_size(width, height);
        let data = match format {
            ImageFormat::None => Vec::new(),
            ImageFormat::Rgb24 | ImageFormat::Rgb24a => vec![255; size],
            ImageFormat::Yuv422 => [235u8, 128].repeat(size / 2),
            ImageFormat::Yuv420p => {
                let luma = width as usize * height as usize;
                let mut data = vec![128; size];
                data[..luma].fill(235);
                data
            }
        };
        Self {
            format,
            width,
            height,
            data: Arc::new(data),
        }
    }

    /// Borrow the bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutably borrow the bytes, copying them first if another holder shares them.
    pub fn data_mut(&mut self) -> &mut Vec<u8> {
        Arc::make_mut(&mut self.data)
    }

    /// Take the bytes, copying only if they are shared.
    pub fn into_data(self) -> Vec<u8> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }

    /// Return `true` when another [`Image`] holds the same bytes.
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.data) > 1
    }

    /// Return `true` when both images point at the same bytes.
    pub fn shares_buffer_with(&self, other: &Image) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Detach from any other holder so that mutation stays private.
    pub(crate) fn make_private(&mut self) {
        if self.is_shared() {
            self.data = Arc::new((*self.data).clone());
        }
    }

    pub(crate) fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub(crate) fn ensure_consistent(&self) -> FrameResult<()> {
        let needed = self.format.buffer_size(self.width, self.height);
        if self.data.len() < needed {
            return Err(FrameError::invalid_state(format!(
                "{} image {}x{} needs {needed} bytes, buffer holds {}",
                self.format,
                self.width,
                self.height,
                self.data.len()
            )));
        }
        Ok(())
    }
}

/// A resolved buffer of audio samples.
#[derive(Clone, Debug, PartialEq)]
pub struct Audio {
    /// Sample encoding of `data`.
    pub format: AudioFormat,
    /// Sample rate in Hz.
    pub frequency: u32,
    /// Channel count.
    pub channels: u16,
    /// Samples per channel.
    pub samples: u32,
    data: Arc<Vec<u8>>,
}

impl Audio {
    /// Wrap `data`, checking it is large enough for the declared layout.
    pub fn new(
        format: AudioFormat,
        frequency: u32,
        channels: u16,
        samples: u32,
        data: Vec<u8>,
    ) -> FrameResult<Self> {
        let audio = Self {
            format,
            frequency,
            channels,
            samples,
            data: Arc::new(data),
        };
        audio.ensure_consistent()?;
        Ok(audio)
    }

    /// Silence in `format`; unsigned encodings sit at their midpoint.
    pub fn silence(format: AudioFormat, frequency: u32, channels: u16, samples: u32) -> Self {
        let size = format.buffer_size(samples, channels);
        let fill = if format == AudioFormat::U8 { 128 } else { 0 };
        Self {
            format,
            frequency,
            channels,
            samples,
            data: Arc::new(vec![fill; size]),
        }
    }

    /// Borrow the bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutably borrow the bytes, copying them first if another holder shares them.
    pub fn data_mut(&mut self) -> &mut Vec<u8> {
        Arc::make_mut(&mut self.data)
    }

    /// Take the bytes, copying only if they are shared.
    pub fn into_data(self) -> Vec<u8> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }

    /// Interleaved `i16` view of an [`AudioFormat::S16`] buffer.
    ///
    /// Fails with [`FrameError::InvalidState`] when the declared layout no longer fits the bytes.
    pub fn s16_samples(&self) -> FrameResult<Vec<i16>> {
        if self.format != AudioFormat::S16 {
            return Err(FrameError::unsupported_format(format!(
                "expected s16 samples, buffer is {}",
                self.format
            )));
        }
        self.ensure_consistent()?;
        let len = self.format.buffer_size(self.samples, self.channels);
        Ok(self.data[..len]
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect())
    }

    pub(crate) fn ensure_consistent(&self) -> FrameResult<()> {
        if self.format != AudioFormat::None && self.channels == 0 && self.samples > 0 {
            return Err(FrameError::invalid_state(format!(
                "{} audio with {} samples declares zero channels",
                self.format, self.samples
            )));
        }
        let needed = self.format.buffer_size(self.samples, self.channels);
        if self.data.len() < needed {
            return Err(FrameError::invalid_state(format!(
                "{} audio {}ch x {} samples needs {needed} bytes, buffer holds {}",
                self.format,
                self.channels,
                self.samples,
                self.data.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/buffer.rs"]
mod tests;

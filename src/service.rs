//! The producer seam: what a frame needs to know about the service that created it.

use crate::convert::{Converter, StandardConverter};
use crate::foundation::core::Fps;
use crate::foundation::error::{FrameError, FrameResult};
use std::path::Path;
use std::sync::Arc;

/// Video and audio defaults of a producer.
///
/// Loaded from JSON; missing fields take the PAL defaults of [`Profile::default`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Free-form description.
    pub description: String,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frame rate.
    pub fps: Fps,
    /// Sample (pixel) aspect ratio numerator.
    pub sample_aspect_num: u32,
    /// Sample (pixel) aspect ratio denominator.
    pub sample_aspect_den: u32,
    /// Audio sample rate in Hz.
    pub frequency: u32,
    /// Audio channel count.
    pub channels: u16,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            description: "PAL 4:3 DV or DVD".to_owned(),
            width: 720,
            height: 576,
            fps: Fps { num: 25, den: 1 },
            sample_aspect_num: 16,
            sample_aspect_den: 15,
            frequency: 48_000,
            channels: 2,
        }
    }
}

impl Profile {
    /// Parse and validate a JSON profile.
    pub fn from_json_str(s: &str) -> FrameResult<Self> {
        let profile: Self = serde_json::from_str(s).map_err(|e| FrameError::serde(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Read, parse and validate a JSON profile file.
    pub fn from_path(path: impl AsRef<Path>) -> FrameResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            FrameError::validation(format!("failed to read profile '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Check every field is usable.
    pub fn validate(&self) -> FrameResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameError::validation("profile width/height must be non-zero"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.sample_aspect_num == 0 || self.sample_aspect_den == 0 {
            return Err(FrameError::validation(
                "profile sample aspect ratio terms must be non-zero",
            ));
        }
        if self.frequency == 0 {
            return Err(FrameError::validation("profile frequency must be non-zero"));
        }
        if self.channels == 0 {
            return Err(FrameError::validation("profile channels must be non-zero"));
        }
        Ok(())
    }

    /// Sample aspect ratio as a float.
    pub fn sample_aspect_ratio(&self) -> f64 {
        if self.sample_aspect_den == 0 {
            return 1.0;
        }
        f64::from(self.sample_aspect_num) / f64::from(self.sample_aspect_den)
    }
}

/// A service that originates frames.
pub trait Service: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    /// Defaults for the frames this service creates.
    fn profile(&self) -> &Profile;

    /// Conversion strategy installed on new frames.
    fn converter(&self) -> Arc<dyn Converter> {
        Arc::new(StandardConverter)
    }
}

/// Shared handle to a [`Service`].
pub type ServiceRef = Arc<dyn Service>;

#[cfg(test)]
#[path = "../tests/unit/service.rs"]
mod tests;

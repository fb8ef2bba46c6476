use crate::foundation::error::{FrameError, FrameResult};
use std::fmt;
use std::str::FromStr;

/// Sample encoding of an audio buffer.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// No audio / no preference.
    #[default]
    None,
    /// Signed 16-bit, interleaved.
    S16,
    /// Signed 32-bit, planar (one channel after another).
    S32,
    /// 32-bit float, planar.
    Float,
    /// Signed 32-bit, interleaved.
    S32le,
    /// 32-bit float, interleaved.
    F32le,
    /// Unsigned 8-bit, interleaved.
    U8,
}

impl AudioFormat {
    /// Every format, in code order.
    pub const ALL: [AudioFormat; 7] = [
        Self::None,
        Self::S16,
        Self::S32,
        Self::Float,
        Self::S32le,
        Self::F32le,
        Self::U8,
    ];

    /// Stable human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::S16 => "s16",
            Self::S32 => "s32",
            Self::Float => "float",
            Self::S32le => "s32le",
            Self::F32le => "f32le",
            Self::U8 => "u8",
        }
    }

    /// Stable numeric code.
    pub fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::S16 => 1,
            Self::S32 => 2,
            Self::Float => 3,
            Self::S32le => 4,
            Self::F32le => 5,
            Self::U8 => 6,
        }
    }

    /// Size of one sample of one channel in bytes.
    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::None => 0,
            Self::U8 => 1,
            Self::S16 => 2,
            Self::S32 | Self::Float | Self::S32le | Self::F32le => 4,
        }
    }

    /// Return `true` for channel-after-channel layouts.
    pub fn is_planar(self) -> bool {
        matches!(self, Self::S32 | Self::Float)
    }

    /// Return `true` for floating-point encodings.
    pub fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::F32le)
    }

    /// Bytes needed for `samples` samples of `channels` channels.
    pub fn buffer_size(self, samples: u32, channels: u16) -> usize {
        samples as usize * usize::from(channels) * self.bytes_per_sample()
    }
}

impl TryFrom<i32> for AudioFormat {
    type Error = FrameError;

    fn try_from(code: i32) -> FrameResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.code() == code)
            .ok_or_else(|| FrameError::validation(format!("unknown audio format code {code}")))
    }
}

impl FromStr for AudioFormat {
    type Err = FrameError;

    fn from_str(s: &str) -> FrameResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FrameError::validation(format!("unknown audio format '{s}'")))
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of the audio format with numeric `code`; `"invalid"` when out of range.
pub fn audio_format_name(code: i32) -> &'static str {
    AudioFormat::try_from(code).map_or("invalid", AudioFormat::name)
}

#[cfg(test)]
#[path = "../../tests/unit/format/audio.rs"]
mod tests;

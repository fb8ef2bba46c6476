use crate::foundation::error::{FrameError, FrameResult};
use std::fmt;
use std::str::FromStr;

/// In-memory pixel layout of an image buffer.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// No image / no preference.
    #[default]
    None,
    /// Packed 8-bit RGB.
    Rgb24,
    /// Packed 8-bit RGBA (straight alpha).
    Rgb24a,
    /// Packed 4:2:2 YUYV, one `Y0 U Y1 V` quad per horizontal pixel pair.
    Yuv422,
    /// Planar 4:2:0: full-size Y plane, then quarter-size U and V planes.
    Yuv420p,
}

impl ImageFormat {
    /// Every format, in code order.
    pub const ALL: [ImageFormat; 5] = [
        Self::None,
        Self::Rgb24,
        Self::Rgb24a,
        Self::Yuv422,
        Self::Yuv420p,
    ];

    /// Stable human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Rgb24 => "rgb24",
            Self::Rgb24a => "rgb24a",
            Self::Yuv422 => "yuv422",
            Self::Yuv420p => "yuv420p",
        }
    }

    /// Stable numeric code.
    pub fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Rgb24 => 1,
            Self::Rgb24a => 2,
            Self::Yuv422 => 3,
            Self::Yuv420p => 4,
        }
    }

    /// Return `true` when the layout carries a per-pixel alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgb24a)
    }

    /// Bytes needed for a `width x height` image. Odd dimensions round chroma up.
    pub fn buffer_size(self, width: u32, height: u32) -> usize {
        let (w, h) = (width as usize, height as usize);
        let half_w = w.div_ceil(2);
        let half_h = h.div_ceil(2);
        match self {
            Self::None => 0,
            Self::Rgb24 => w * h * 3,
            Self::Rgb24a => w * h * 4,
            Self::Yuv422 => half_w * 4 * h,
            Self::Yuv420p => w * h + 2 * half_w * half_h,
        }
    }
}

impl TryFrom<i32> for ImageFormat {
    type Error = FrameError;

    fn try_from(code: i32) -> FrameResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.code() == code)
            .ok_or_else(|| FrameError::validation(format!("unknown image format code {code}")))
    }
}

impl FromStr for ImageFormat {
    type Err = FrameError;

    fn from_str(s: &str) -> FrameResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FrameError::validation(format!("unknown image format '{s}'")))
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of the image format with numeric `code`; `"invalid"` when out of range.
pub fn image_format_name(code: i32) -> &'static str {
    ImageFormat::try_from(code).map_or("invalid", ImageFormat::name)
}

#[cfg(test)]
#[path = "../../tests/unit/format/image.rs"]
mod tests;

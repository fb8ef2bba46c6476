use crate::foundation::error::{FrameError, FrameResult};
use std::fmt;
use std::str::FromStr;

/// Absolute frame position in producer timeline space.
///
/// Signed: producers may hand out frames before their in point (for example while pre-rolling).
pub type Position = i64;

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> FrameResult<Self> {
        if den == 0 {
            return Err(FrameError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(FrameError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Map a floating-point rate onto a rational one.
    ///
    /// NTSC-family rates (`23.976`, `29.97`, `47.952`, `59.94`, `119.88`) map to `N*1000/1001`;
    /// everything else becomes `round(fps * 1000) / 1000` reduced to lowest terms.
    pub fn approximate(fps: f64) -> FrameResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(FrameError::validation(format!(
                "fps must be finite and > 0, got {fps}"
            )));
        }

        for base in [24u32, 30, 48, 60, 120] {
            let ntsc = f64::from(base) * 1000.0 / 1001.0;
            if (fps - ntsc).abs() < 0.005 {
                return Self::new(base * 1000, 1001);
            }
        }

        let scaled = (fps * 1000.0).round();
        if scaled < 1.0 || scaled > f64::from(u32::MAX) {
            return Err(FrameError::validation(format!("fps {fps} is out of range")));
        }
        let num = scaled as u32;
        let g = gcd(num, 1000);
        Self::new(num / g, 1000 / g)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 25, den: 1 }
    }
}

impl fmt::Display for Fps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl FromStr for Fps {
    type Err = FrameError;

    /// Accepts `"25"`, `"30000/1001"` or a decimal such as `"29.97"`.
    fn from_str(s: &str) -> FrameResult<Self> {
        let s = s.trim();
        if let Some((num, den)) = s.split_once('/') {
            let num = num
                .trim()
                .parse::<u32>()
                .map_err(|e| FrameError::validation(format!("invalid fps numerator '{num}': {e}")))?;
            let den = den.trim().parse::<u32>().map_err(|e| {
                FrameError::validation(format!("invalid fps denominator '{den}': {e}"))
            })?;
            return Self::new(num, den);
        }
        if let Ok(whole) = s.parse::<u32>() {
            return Self::new(whole, 1);
        }
        let value = s
            .parse::<f64>()
            .map_err(|e| FrameError::validation(format!("invalid fps '{s}': {e}")))?;
        Self::approximate(value)
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

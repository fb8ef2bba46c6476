use crate::foundation::core::{Fps, Position};

/// Samples from the stream start to the first sample of `position` (exclusive of `position`).
///
/// Computed analytically as `round(position * frequency / fps)`, rounding half away from zero, so
/// consecutive differences never accumulate drift.
pub fn samples_before(fps: Fps, frequency: u32, position: Position) -> i64 {
    if fps.num == 0 || fps.den == 0 || frequency == 0 {
        return 0;
    }
    let num = i128::from(position) * i128::from(frequency) * i128::from(fps.den);
    let den = i128::from(fps.num);
    let rounded = if num >= 0 {
        (num + den / 2) / den
    } else {
        -((-num + den / 2) / den)
    };
    rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Number of audio samples belonging to the video frame at `position`.
///
/// Over any run of frames spanning a whole number of seconds the counts sum to exactly
/// `frequency` per second: at 25 fps / 48 kHz every frame gets 1920; at 30000/1001 fps / 48 kHz
/// frames get 1601 or 1602 and every 30000 frames total `1001 * 48000`.
pub fn sample_calculator(fps: Fps, frequency: u32, position: Position) -> u32 {
    let this = samples_before(fps, frequency, position);
    let next = samples_before(fps, frequency, position.saturating_add(1));
    u32::try_from(next - this).unwrap_or(u32::MAX)
}

/// Cumulative samples from the stream start up to and including the frame at `position`.
///
/// For `position >= 0` this equals the sum of [`sample_calculator`] over `0..=position`.
pub fn sample_calculator_to_now(fps: Fps, frequency: u32, position: Position) -> i64 {
    samples_before(fps, frequency, position.saturating_add(1))
}

#[cfg(test)]
#[path = "../../tests/unit/audio/samples.rs"]
mod tests;

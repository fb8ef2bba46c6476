//! Audio timing arithmetic and derived views.

/// Samples-per-frame arithmetic.
pub mod samples;
/// Waveform rendering.
pub mod waveform;

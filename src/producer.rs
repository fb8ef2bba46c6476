//! A minimal producer: solid colour video with an optional sine tone.

use crate::audio::samples::{sample_calculator, samples_before};
use crate::format::audio::AudioFormat;
use crate::foundation::core::Position;
use crate::foundation::error::FrameResult;
use crate::frame::buffer::{Audio, Image};
use crate::frame::entity::Frame;
use crate::frame::{AudioRequest, ImageRequest};
use crate::service::{Profile, Service, ServiceRef};
use std::f64::consts::TAU;
use std::sync::Arc;

/// Produces frames whose first image step yields a solid straight-alpha RGBA colour and whose
/// first audio step yields an s16 sine tone (silence at zero amplitude).
///
/// The tone is phase-continuous across frames: each frame starts at the sample offset of its
/// position.
#[derive(Clone, Debug)]
pub struct ColourProducer {
    name: String,
    profile: Profile,
    rgba: [u8; 4],
    tone_hz: f64,
    amplitude: f64,
}

impl ColourProducer {
    /// A silent producer of `rgba` frames.
    pub fn new(profile: Profile, rgba: [u8; 4]) -> Self {
        Self {
            name: "colour".to_owned(),
            profile,
            rgba,
            tone_hz: 0.0,
            amplitude: 0.0,
        }
    }

    /// Add a sine tone at `hz` with peak `amplitude` in `[0, 1]`.
    pub fn with_tone(mut self, hz: f64, amplitude: f64) -> Self {
        self.tone_hz = hz;
        self.amplitude = amplitude.clamp(0.0, 1.0);
        self
    }

    /// Rename the producer.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Create the frame at `position` with this producer's image and audio steps installed.
    pub fn get_frame(self: &Arc<Self>, position: Position) -> Frame {
        let service: ServiceRef = Arc::clone(self) as ServiceRef;
        let mut frame = Frame::new(service);
        frame.set_position(position);

        let rgba = self.rgba;
        let (default_w, default_h) = (self.profile.width, self.profile.height);
        frame.push_get_image(move |_: &mut Frame, request: &ImageRequest| -> FrameResult<Image> {
            let width = if request.width > 0 { request.width } else { default_w };
            let height = if request.height > 0 { request.height } else { default_h };
            Ok(Image::solid_rgba(width, height, rgba))
        });

        let producer = Arc::clone(self);
        frame.push_audio(move |frame: &mut Frame, request: &AudioRequest| -> FrameResult<Audio> {
            producer.tone(frame.position(), request)
        });
        frame
    }

    fn tone(&self, position: Position, request: &AudioRequest) -> FrameResult<Audio> {
        let frequency = match request.frequency {
            0 => self.profile.frequency,
            f => f,
        };
        let channels = match request.channels {
            0 => self.profile.channels,
            c => c,
        };
        let samples = match request.samples {
            0 => sample_calculator(self.profile.fps, frequency, position),
            s => s,
        };
        let start = samples_before(self.profile.fps, frequency, position);

        let mut data = Vec::with_capacity(AudioFormat::S16.buffer_size(samples, channels));
        for i in 0..i64::from(samples) {
            let t = (start + i) as f64 / f64::from(frequency);
            let v = self.amplitude * (TAU * self.tone_hz * t).sin();
            let s = (v * f64::from(i16::MAX)).round() as i16;
            for _ in 0..channels {
                data.extend_from_slice(&s.to_le_bytes());
            }
        }
        Audio::new(AudioFormat::S16, frequency, channels, samples, data)
    }
}

impl Service for ColourProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn profile(&self) -> &Profile {
        &self.profile
    }
}

#[cfg(test)]
#[path = "../tests/unit/producer.rs"]
mod tests;

use crate::audio::samples::sample_calculator;
use crate::audio::waveform::render_waveform;
use crate::convert::audio::apply_gain;
use crate::format::audio::AudioFormat;
use crate::foundation::error::{FrameError, FrameResult};
use crate::frame::buffer::Audio;
use crate::frame::entity::{Frame, META_PREFIX, TEST_AUDIO};
use crate::frame::stack::StackItem;
use image::GrayImage;
use std::any::Any;

/// Waveform sample rates grow in steps of this size until every column gets a sample.
const WAVEFORM_FREQUENCY_STEP: u32 = 16_000;
const WAVEFORM_MAX_FREQUENCY: u32 = WAVEFORM_FREQUENCY_STEP * 1024;

/// What a consumer asks of [`Frame::get_audio`]. Zero fields mean "no preference".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AudioRequest {
    /// Desired encoding; [`AudioFormat::None`] accepts whatever the pipeline produces.
    pub format: AudioFormat,
    /// Desired sample rate in Hz.
    pub frequency: u32,
    /// Desired channel count.
    pub channels: u16,
    /// Desired samples per channel.
    pub samples: u32,
}

impl AudioRequest {
    /// Request `format` at `frequency` with `channels` channels and `samples` samples.
    pub fn new(format: AudioFormat, frequency: u32, channels: u16, samples: u32) -> Self {
        Self {
            format,
            frequency,
            channels,
            samples,
        }
    }
}

/// One link of a frame's audio pipeline; the audio counterpart of
/// [`ImageStep`](crate::ImageStep).
pub trait AudioStep: Send {
    /// Produce audio for `frame`.
    fn get_audio(self: Box<Self>, frame: &mut Frame, request: &AudioRequest) -> FrameResult<Audio>;
}

impl<F> AudioStep for F
where
    F: FnOnce(&mut Frame, &AudioRequest) -> FrameResult<Audio> + Send,
{
    fn get_audio(self: Box<Self>, frame: &mut Frame, request: &AudioRequest) -> FrameResult<Audio> {
        (*self)(frame, request)
    }
}

impl Frame {
    /// Push an audio-processing step. The most recently pushed step runs first.
    pub fn push_audio(&mut self, step: impl AudioStep + 'static) {
        self.audio_stack.push(StackItem::Step(Box::new(step)));
    }

    /// Pop the most recently pushed audio step.
    pub fn pop_audio(&mut self) -> FrameResult<Option<Box<dyn AudioStep>>> {
        self.audio_stack.pop_step("audio")
    }

    /// Push stage-local data (intermediate buffers, stage state) onto the audio stack.
    pub fn push_audio_data<T: Any + Send>(&mut self, data: T) {
        self.audio_stack.push(StackItem::Data(Box::new(data)));
    }

    /// Pop stage-local data of type `T` from the audio stack.
    pub fn pop_audio_data<T: Any + Send>(&mut self) -> FrameResult<Option<T>> {
        Ok(self.audio_stack.pop_data::<T>("audio")?.map(|data| *data))
    }

    /// Resolve the frame's audio.
    ///
    /// Pops and runs the top step; with an empty stack, returns the audio already attached;
    /// with neither, fails with [`FrameError::EmptyPipeline`]. A pending `meta.volume` gain is
    /// applied once and removed, then the result is converted to `request.format`, recorded
    /// (`audio_frequency`, `audio_channels`, `audio_samples`, `audio_format`) and cached.
    #[tracing::instrument(level = "debug", skip(self), fields(position = self.position()))]
    pub fn get_audio(&mut self, request: &AudioRequest) -> FrameResult<Audio> {
        let mut audio = match self.pop_audio()? {
            Some(step) => self.run_step("audio", |frame| step.get_audio(frame, request))?,
            None => match &self.audio {
                Some(audio) => audio.clone(),
                None => {
                    return Err(FrameError::empty_pipeline(
                        "audio stack is empty and no audio is attached",
                    ));
                }
            },
        };
        audio.ensure_consistent()?;

        let volume_key = format!("{META_PREFIX}volume");
        if let Some(volume) = self.props.remove(&volume_key) {
            let gain = volume.as_double().unwrap_or(1.0);
            tracing::debug!(gain, "applying pending volume");
            apply_gain(&mut audio, gain);
        }

        self.convert_audio(&mut audio, request.format)?;
        self.attach_audio(audio.clone());
        Ok(audio)
    }

    /// Resolve the audio, substituting silence when resolution fails or audio is muted.
    ///
    /// Unspecified request fields fall back to the producer profile; the sample count defaults to
    /// [`sample_calculator`] at the frame position.
    pub fn get_audio_or_silence(&mut self, request: &AudioRequest) -> Audio {
        if !self.is_audio_muted() {
            match self.get_audio(request) {
                Ok(audio) => return audio,
                Err(err) => tracing::warn!(
                    position = self.position(),
                    error = %err,
                    "audio resolution failed; substituting silence"
                ),
            }
        }

        let profile = self.profile();
        let format = match request.format {
            AudioFormat::None => AudioFormat::S16,
            format => format,
        };
        let frequency = match request.frequency {
            0 => profile.frequency,
            f => f,
        };
        let channels = match request.channels {
            0 => profile.channels,
            c => c,
        };
        let samples = match request.samples {
            0 => sample_calculator(profile.fps, frequency, self.position()),
            s => s,
        };
        let audio = Audio::silence(format, frequency, channels, samples);
        self.attach_audio(audio.clone());
        self.props.set_int(TEST_AUDIO, 1);
        audio
    }

    /// Attach an audio buffer directly, bypassing the stack.
    ///
    /// The frame takes ownership; the previously attached buffer, if any, is released now and
    /// this one when it is replaced or the frame is closed.
    pub fn set_audio(&mut self, audio: Audio) -> FrameResult<()> {
        audio.ensure_consistent()?;
        self.attach_audio(audio);
        Ok(())
    }

    /// The audio attached to the frame, if any, without resolving anything.
    pub fn audio(&self) -> Option<&Audio> {
        self.audio.as_ref()
    }

    /// Convert `audio` to `target` with the frame's converter.
    ///
    /// A no-op when `audio` is already in `target` or `target` is [`AudioFormat::None`].
    pub fn convert_audio(&self, audio: &mut Audio, target: AudioFormat) -> FrameResult<()> {
        if target == AudioFormat::None || audio.format == target {
            return Ok(());
        }
        let converted = self.converter.convert_audio(audio, target)?;
        if converted.format != target {
            return Err(FrameError::unsupported_format(format!(
                "converter returned {} when asked for {}",
                converted.format, target
            )));
        }
        converted.ensure_consistent()?;
        *audio = converted;
        Ok(())
    }

    /// Render the frame's audio as a `width x height` level image.
    ///
    /// Resolves (or reuses) the audio as interleaved s16 stereo. The requested sample rate starts
    /// at 16 kHz and grows in 16 kHz steps until the frame has at least one sample per column.
    #[tracing::instrument(level = "debug", skip(self), fields(position = self.position()))]
    pub fn get_waveform(&mut self, width: u32, height: u32) -> FrameResult<GrayImage> {
        if width == 0 || height == 0 {
            return Err(FrameError::validation(format!(
                "waveform size must be non-zero, got {width}x{height}"
            )));
        }

        let fps = self.profile().fps;
        let position = self.position();
        let mut frequency = WAVEFORM_FREQUENCY_STEP;
        let mut samples = sample_calculator(fps, frequency, position);
        while samples < width && frequency < WAVEFORM_MAX_FREQUENCY {
            frequency += WAVEFORM_FREQUENCY_STEP;
            samples = sample_calculator(fps, frequency, position);
        }

        let audio = self.get_audio(&AudioRequest::new(AudioFormat::S16, frequency, 2, samples))?;
        let pcm = audio.s16_samples()?;
        Ok(render_waveform(&pcm, audio.channels, width, height))
    }

    fn attach_audio(&mut self, audio: Audio) {
        self.props
            .set_int("audio_frequency", i64::from(audio.frequency));
        self.props
            .set_int("audio_channels", i64::from(audio.channels));
        self.props.set_int("audio_samples", i64::from(audio.samples));
        self.props
            .set_int("audio_format", i64::from(audio.format.code()));
        self.audio = Some(audio);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/audio.rs"]
mod tests;

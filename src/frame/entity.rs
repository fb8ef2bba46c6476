use crate::convert::Converter;
use crate::foundation::core::Position;
use crate::foundation::error::{FrameError, FrameResult};
use crate::frame::audio::AudioStep;
use crate::frame::buffer::{Audio, Image};
use crate::frame::image::ImageStep;
use crate::frame::service::ServiceItem;
use crate::frame::stack::{Stack, StackItem};
use crate::properties::store::Properties;
use crate::properties::value::Value;
use crate::service::{Profile, ServiceRef};
use std::fmt;
use std::sync::Arc;

/// Property holding the frame position.
pub const POSITION: &str = "_position";
/// Property holding the producer speed.
pub const SPEED: &str = "_speed";
/// Property holding the display aspect ratio.
pub const ASPECT_RATIO: &str = "aspect_ratio";
/// Set when the frame's image is a placeholder.
pub const TEST_IMAGE: &str = "test_image";
/// Set when the frame's audio is a placeholder.
pub const TEST_AUDIO: &str = "test_audio";
/// Bit 1 hides video, bit 2 mutes audio.
pub const HIDE: &str = "hide";
/// Set on the end-of-tracks frame.
pub const LAST_TRACK: &str = "last_track";
/// Prefix of per-frame metadata properties.
pub const META_PREFIX: &str = "meta.";

/// The unit of audio/video data that flows between processing stages.
///
/// A frame owns one [`Properties`] store, three independent stacks (image, audio, service), the
/// conversion strategy installed by its producer, and any image/alpha/audio buffers resolved or
/// attached so far. Everything it owns is released when it is closed or dropped.
pub struct Frame {
    pub(super) props: Properties,
    pub(super) producer: ServiceRef,
    pub(super) converter: Arc<dyn Converter>,
    pub(super) image_stack: Stack<StackItem<Box<dyn ImageStep>>>,
    pub(super) audio_stack: Stack<StackItem<Box<dyn AudioStep>>>,
    pub(super) service_stack: Stack<ServiceItem>,
    pub(super) image: Option<Image>,
    pub(super) alpha: Option<Vec<u8>>,
    pub(super) audio: Option<Audio>,
}

impl Frame {
    /// Create a frame originating from `service`, with the service's converter installed.
    pub fn new(service: ServiceRef) -> Self {
        let converter = service.converter();
        Self::with_converter(service, converter)
    }

    /// Create a frame originating from `service` with an explicit conversion strategy.
    pub fn with_converter(service: ServiceRef, converter: Arc<dyn Converter>) -> Self {
        let profile = service.profile();
        let mut props = Properties::new();
        props.set_int(POSITION, 0);
        props.set_int("width", i64::from(profile.width));
        props.set_int("height", i64::from(profile.height));
        props.set_int("normalised_width", i64::from(profile.width));
        props.set_int("normalised_height", i64::from(profile.height));
        props.set_double(ASPECT_RATIO, profile.sample_aspect_ratio());

        Self {
            props,
            producer: service,
            converter,
            image_stack: Stack::new(),
            audio_stack: Stack::new(),
            service_stack: Stack::new(),
            image: None,
            alpha: None,
            audio: None,
        }
    }

    /// Tear the frame down: unwind all three stacks, then release buffers and properties.
    ///
    /// Consuming `self` makes a second close impossible. Dropping a frame performs the same
    /// teardown; this method only fixes the order.
    pub fn close(mut self) {
        self.image_stack.clear();
        self.audio_stack.clear();
        self.service_stack.clear();
        self.image = None;
        self.alpha = None;
        self.audio = None;
    }

    /// Borrow the property store.
    pub fn properties(&self) -> &Properties {
        &self.props
    }

    /// Mutably borrow the property store.
    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.props
    }

    /// Shorthand for [`Properties::set`].
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.props.set(name, value);
    }

    /// Shorthand for [`Properties::get`].
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    /// Temporal position (frame index).
    pub fn position(&self) -> Position {
        self.props.get_int(POSITION)
    }

    /// Set the temporal position.
    pub fn set_position(&mut self, position: Position) {
        self.props.set_int(POSITION, position);
    }

    /// Display aspect ratio; the producer profile's sample aspect ratio when unset.
    pub fn aspect_ratio(&self) -> f64 {
        let value = self.props.get_double(ASPECT_RATIO);
        if value > 0.0 && value.is_finite() {
            value
        } else {
            self.profile().sample_aspect_ratio()
        }
    }

    /// Set the display aspect ratio.
    pub fn set_aspect_ratio(&mut self, value: f64) {
        self.props.set_double(ASPECT_RATIO, value);
    }

    /// Playback speed of the producer that generated the frame; `1.0` when unset.
    pub fn speed(&self) -> f64 {
        self.props
            .get(SPEED)
            .and_then(Value::as_double)
            .unwrap_or(1.0)
    }

    /// Record the producer speed.
    pub fn set_speed(&mut self, speed: f64) {
        self.props.set_double(SPEED, speed);
    }

    /// Return `true` when the image is a placeholder rather than decoded content.
    pub fn is_test_card(&self) -> bool {
        self.props.get_int(TEST_IMAGE) != 0
    }

    /// Return `true` when the audio is a placeholder rather than decoded content.
    pub fn is_test_audio(&self) -> bool {
        self.props.get_int(TEST_AUDIO) != 0
    }

    /// Return `true` when bit 1 of `hide` is set.
    pub fn is_video_hidden(&self) -> bool {
        self.props.get_int(HIDE) & 1 != 0
    }

    /// Return `true` when bit 2 of `hide` is set.
    pub fn is_audio_muted(&self) -> bool {
        self.props.get_int(HIDE) & 2 != 0
    }

    /// Return `true` on the end-of-tracks frame.
    pub fn is_last_track(&self) -> bool {
        self.props.get_int(LAST_TRACK) != 0
    }

    /// Mark or unmark the end-of-tracks frame.
    pub fn set_last_track(&mut self, last: bool) {
        self.props.set_int(LAST_TRACK, i64::from(last));
    }

    /// Metadata entries (`meta.*`), prefix stripped.
    pub fn metadata(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.props.iter_prefix(META_PREFIX)
    }

    /// Set one metadata entry.
    pub fn set_meta(&mut self, key: &str, value: impl Into<Value>) {
        self.props.set(&format!("{META_PREFIX}{key}"), value);
    }

    /// The service that created this frame, however many stages it has passed through since.
    pub fn original_producer(&self) -> &ServiceRef {
        &self.producer
    }

    /// Profile of the originating producer.
    pub fn profile(&self) -> &Profile {
        self.producer.profile()
    }

    /// Replace the conversion strategy.
    pub fn set_converter(&mut self, converter: Arc<dyn Converter>) {
        self.converter = converter;
    }

    /// Number of items on the image stack.
    pub fn image_stack_len(&self) -> usize {
        self.image_stack.len()
    }

    /// Number of items on the audio stack.
    pub fn audio_stack_len(&self) -> usize {
        self.audio_stack.len()
    }

    /// Run a processing step, rejecting any change it makes to the frame position.
    pub(super) fn run_step<T>(
        &mut self,
        what: &str,
        step: impl FnOnce(&mut Self) -> FrameResult<T>,
    ) -> FrameResult<T> {
        let position = self.position();
        let result = step(self);
        let moved = self.position();
        if moved != position {
            self.set_position(position);
            return Err(FrameError::invalid_state(format!(
                "{what} step moved the frame position from {position} to {moved}"
            )));
        }
        result
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("producer", &self.producer.name())
            .field("position", &self.position())
            .field("image_stack", &self.image_stack.len())
            .field("audio_stack", &self.audio_stack.len())
            .field("service_stack", &self.service_stack.len())
            .field("image", &self.image.as_ref().map(|i| (i.format, i.width, i.height)))
            .field("audio", &self.audio.as_ref().map(|a| (a.format, a.samples)))
            .finish_non_exhaustive()
    }
}

impl Drop for Frame {
    fn drop(&mut self) {
        tracing::trace!(
            producer = self.producer.name(),
            position = self.position(),
            image_items = self.image_stack.len(),
            audio_items = self.audio_stack.len(),
            service_items = self.service_stack.len(),
            "releasing frame"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/entity.rs"]
mod tests;

//! framepipe is the frame pipeline core of a media framework.
//!
//! A [`Frame`] is the unit of audio/video data moving between producers, filters, transitions and
//! consumers. Stages push deferred processing steps onto the frame's image and audio stacks; a
//! consumer resolves the final buffers with [`Frame::get_image`] and [`Frame::get_audio`], which
//! unwind the stacks most-recent-first.
//!
//! - Attach metadata through the frame's [`Properties`]
//! - Push [`ImageStep`]s and [`AudioStep`]s, then resolve with an [`ImageRequest`] or [`AudioRequest`]
//! - Compute per-frame sample counts with [`sample_calculator`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Audio timing arithmetic and the waveform view.
pub mod audio;
/// Conversion strategies between buffer formats.
pub mod convert;
/// Image and audio format enumerations.
pub mod format;
/// The frame entity, its stacks and its buffers.
pub mod frame;
/// Frame properties.
pub mod properties;
/// A ready-made producer for tests and demos.
pub mod producer;
/// The producer seam and profiles.
pub mod service;

pub use crate::foundation::core::{Fps, Position};
pub use crate::foundation::error::{FrameError, FrameResult};

pub use crate::audio::samples::{sample_calculator, sample_calculator_to_now, samples_before};
pub use crate::audio::waveform::render_waveform;
pub use crate::convert::{Converter, NullConverter, StandardConverter};
pub use crate::format::audio::{AudioFormat, audio_format_name};
pub use crate::format::image::{ImageFormat, image_format_name};
pub use crate::frame::buffer::{Audio, Image};
pub use crate::frame::entity::Frame;
pub use crate::frame::service::ServiceItem;
pub use crate::frame::stack::{Stack, StackItem};
pub use crate::frame::{AudioRequest, AudioStep, ImageRequest, ImageStep};
pub use crate::producer::ColourProducer;
pub use crate::properties::store::Properties;
pub use crate::properties::value::Value;
pub use crate::service::{Profile, Service, ServiceRef};

//! The frame: the unit of audio/video data passed through a processing pipeline.
//!
//! A frame carries three independent LIFO stacks. Stages push processing steps onto the image and
//! audio stacks; a consumer then asks for a buffer and the frame unwinds the stack, each step
//! delegating "everything pushed before me" back to the frame. The service stack holds
//! bookkeeping items stages use to save and restore context across those nested calls.

/// Resolved image and audio buffers.
pub mod buffer;
/// Frame construction, properties and teardown.
pub mod entity;
/// Tagged service-stack items.
pub mod service;
/// The stack primitive.
pub mod stack;

mod audio;
mod image;

pub use audio::{AudioRequest, AudioStep};
pub use image::{ImageRequest, ImageStep};

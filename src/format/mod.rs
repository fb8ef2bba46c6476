//! Closed enumerations of the image and audio buffer formats the core understands.

/// Audio sample encodings.
pub mod audio;
/// Image pixel layouts.
pub mod image;

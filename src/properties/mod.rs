//! Named, typed attributes carried by every frame.

/// Insertion-ordered property map.
pub mod store;
/// Typed property values.
pub mod value;

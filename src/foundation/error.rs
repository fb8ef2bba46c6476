/// Convenience result type used across the frame core.
pub type FrameResult<T> = Result<T, FrameError>;

/// Error taxonomy reported by frame resolution, conversion and stack operations.
///
/// Teardown never produces one of these: dropping or closing a frame always completes.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    /// Resolution was requested but no processing step or attached buffer was available.
    #[error("empty pipeline: {0}")]
    EmptyPipeline(String),

    /// No conversion path exists between the available and the requested format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The frame or a buffer is in a state that cannot satisfy the request.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A tagged stack pop found a different kind of item on top.
    #[error("stack mismatch: {0}")]
    StackMismatch(String),

    /// Invalid caller-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrameError {
    /// Build a [`FrameError::EmptyPipeline`] value.
    pub fn empty_pipeline(msg: impl Into<String>) -> Self {
        Self::EmptyPipeline(msg.into())
    }

    /// Build a [`FrameError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`FrameError::InvalidState`] value.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Build a [`FrameError::StackMismatch`] value.
    pub fn stack_mismatch(msg: impl Into<String>) -> Self {
        Self::StackMismatch(msg.into())
    }

    /// Build a [`FrameError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FrameError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for [`FrameError::EmptyPipeline`].
    pub fn is_empty_pipeline(&self) -> bool {
        matches!(self, Self::EmptyPipeline(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

/// Convenience result type used across the crate.
pub type BlurResult<T> = Result<T, BlurError>;

/// Top-level error taxonomy used by blur APIs.
///
/// Every fallible entry point either returns a complete buffer or one of these; no partially
/// written output is ever handed back.
#[derive(thiserror::Error, Debug)]
pub enum BlurError {
    /// Out-of-range or unparsable blur configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Pixel buffer with a zero pixel count, a mismatched byte length, or undecodable bytes.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The execution substrate (thread pool, worker thread) is unavailable.
    #[error("unsupported backend: {0}")]
    UnsupportedBackend(String),

    /// Failure while running the convolution passes.
    #[error("processing failure: {0}")]
    ProcessingFailure(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlurError {
    /// Build a [`BlurError::InvalidConfig`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Build a [`BlurError::InvalidImage`] value.
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Build a [`BlurError::UnsupportedBackend`] value.
    pub fn unsupported_backend(msg: impl Into<String>) -> Self {
        Self::UnsupportedBackend(msg.into())
    }

    /// Build a [`BlurError::ProcessingFailure`] value.
    pub fn processing(msg: impl Into<String>) -> Self {
        Self::ProcessingFailure(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

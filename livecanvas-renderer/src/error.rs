//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while encoding a rendered snapshot.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Bitmap encoding failed.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// The pixmap dimensions cannot be represented by the encoder.
    #[error("Invalid pixmap dimensions")]
    InvalidDimensions,
}

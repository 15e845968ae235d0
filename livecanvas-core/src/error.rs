//! Error types.
//!
//! Ordinary misuse (unknown ids, empty history, gestures against missing
//! frames) is not an error here; those operations degrade to no-ops and
//! report through their return values. Errors are reserved for the
//! genuinely fallible layer-list serialization boundary.

use thiserror::Error;

/// Result alias for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Canvas engine errors.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Layer-list JSON failed to encode or parse.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A relative-coordinate export was requested before any canvas size
    /// was reported.
    #[error("Canvas size not yet known")]
    CanvasSizeUnknown,
}

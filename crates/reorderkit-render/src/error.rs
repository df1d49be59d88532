//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur while handling render-side resources.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A snapshot's pixel buffer does not match its declared dimensions.
    #[error("snapshot buffer of {actual} bytes does not match {width}x{height} RGBA")]
    InvalidSnapshot {
        width: u32,
        height: u32,
        actual: usize,
    },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

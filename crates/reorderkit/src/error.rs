//! Error types for reorderkit.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the list model, the proxy controller and the state
/// machine.
///
/// Gestures that cannot start or continue a drag (no row under the pointer,
/// terminal events without a session) are not errors; they are ignored.
#[derive(Error, Debug)]
pub enum ReorderError {
    /// A list index was outside `[0, len)` (or `[0, len]` for insertion).
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A structural mutation was attempted while a drag session holds the
    /// list's structure lock.
    #[error("list structure is locked by an active drag session")]
    ModelLocked,

    /// A floating proxy was requested while another one is still alive.
    #[error("a floating proxy is already active")]
    ProxyAlreadyActive,

    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or saving [`ReorderConfig`](crate::ReorderConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML text was malformed or had wrongly typed fields.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field parsed but holds an unusable value.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for reorderkit operations.
pub type ReorderResult<T> = Result<T, ReorderError>;

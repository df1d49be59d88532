//! Configuration for the reorder controller.
//!
//! Every field has a default, so a configuration file only needs to list
//! what it changes:
//!
//! ```toml
//! anchor = "grab-point"
//!
//! [proxy]
//! lifted_scale = 1.1
//!
//! [long_press]
//! timeout_ms = 350
//! ```

use std::path::Path;

use reorderkit_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gesture::LongPressConfig;
use crate::proxy::ProxyStyle;

/// How the floating proxy tracks the pointer vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProxyAnchor {
    /// The proxy's center follows the pointer.
    #[default]
    Center,
    /// The point of the row that was grabbed stays under the pointer.
    GrabPoint,
}

/// Settings for a [`ReorderController`](crate::ReorderController) and its
/// [`LongPressTracker`](crate::LongPressTracker).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderConfig {
    /// How the proxy tracks the pointer.
    pub anchor: ProxyAnchor,
    /// Appearance and timing of the floating proxy.
    pub proxy: ProxyStyle,
    /// Long-press recognition.
    pub long_press: LongPressConfig,
}

impl ReorderConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Serializes the configuration to TOML text.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.proxy.validate()?;
        self.long_press.validate()
    }
}

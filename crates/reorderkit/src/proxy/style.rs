//! Visual style of the floating proxy.

use std::time::Duration;

use reorderkit_render::{ProxyAppearance, ProxyShadow, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Drop shadow drawn under the lifted proxy.
///
/// A shadow with zero opacity is not drawn at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowStyle {
    /// Horizontal offset of the shadow.
    pub offset_x: f32,
    /// Vertical offset of the shadow.
    pub offset_y: f32,
    /// Blur radius.
    pub radius: f32,
    /// Shadow opacity, 0.0 to 1.0.
    pub opacity: f32,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            offset_x: -5.0,
            offset_y: 0.0,
            radius: 5.0,
            opacity: 0.4,
        }
    }
}

impl ShadowStyle {
    /// The shadow as drawn by a surface, or `None` if it is invisible.
    pub fn to_shadow(&self) -> Option<ProxyShadow> {
        (self.opacity > 0.0).then(|| ProxyShadow {
            offset: Vec2::new(self.offset_x, self.offset_y),
            radius: self.radius,
            opacity: self.opacity,
        })
    }
}

/// Appearance of the floating proxy through its lifecycle.
///
/// The proxy is attached at `initial_opacity`, lifted to `lifted_opacity`
/// and `lifted_scale`, and on release settles back to `initial_opacity` at
/// scale 1 before it is detached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyStyle {
    /// Opacity when attached and at the end of the settle transition.
    pub initial_opacity: f32,
    /// Opacity while dragged.
    pub lifted_opacity: f32,
    /// Scale while dragged.
    pub lifted_scale: f32,
    /// Duration of the lift and settle transitions, in milliseconds.
    pub transition_ms: u64,
    /// Drop shadow while attached.
    pub shadow: ShadowStyle,
}

impl Default for ProxyStyle {
    fn default() -> Self {
        Self {
            initial_opacity: 0.0,
            lifted_opacity: 0.98,
            lifted_scale: 1.05,
            transition_ms: 250,
            shadow: ShadowStyle::default(),
        }
    }
}

impl ProxyStyle {
    /// Duration of the lift and settle transitions.
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Appearance when the proxy is first attached.
    pub fn resting(&self) -> ProxyAppearance {
        ProxyAppearance {
            opacity: self.initial_opacity,
            scale: 1.0,
            shadow: self.shadow.to_shadow(),
        }
    }

    /// Appearance while the proxy follows the pointer.
    pub fn lifted(&self) -> ProxyAppearance {
        ProxyAppearance {
            opacity: self.lifted_opacity,
            scale: self.lifted_scale,
            shadow: self.shadow.to_shadow(),
        }
    }

    /// Appearance at the end of the settle transition.
    pub fn settled(&self) -> ProxyAppearance {
        ProxyAppearance {
            opacity: self.initial_opacity,
            scale: 1.0,
            shadow: None,
        }
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("proxy.initial_opacity", self.initial_opacity)?;
        check_unit("proxy.lifted_opacity", self.lifted_opacity)?;
        check_unit("proxy.shadow.opacity", self.shadow.opacity)?;

        if !(self.lifted_scale.is_finite() && self.lifted_scale > 0.0) {
            return Err(ConfigError::Invalid {
                field: "proxy.lifted_scale",
                reason: format!("must be a positive number, got {}", self.lifted_scale),
            });
        }
        if !(self.shadow.radius.is_finite() && self.shadow.radius >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "proxy.shadow.radius",
                reason: format!("must not be negative, got {}", self.shadow.radius),
            });
        }
        Ok(())
    }
}

fn check_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be between 0 and 1, got {value}"),
        })
    }
}

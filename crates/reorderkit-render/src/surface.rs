//! Render-side collaborator traits.
//!
//! The reorder state machine never draws anything. It talks to the host's
//! rendering surface through two narrow traits:
//!
//! - [`RowRenderer`] - visibility and visual order of the list's rows
//! - [`ProxySurface`] - the floating proxy drawn above the rows
//!
//! Animations requested through [`ProxySurface::transition`] are
//! fire-and-forget. The surface reports the end of a settle transition back to
//! the owner of the proxy, which then detaches it.

use std::time::Duration;

use glam::Vec2;
use slotmap::new_key_type;

use crate::snapshot::RowSnapshot;
use crate::types::{Point, Rect};

new_key_type! {
    /// Identifies one floating proxy on a [`ProxySurface`].
    ///
    /// Ids are generational: an id that has been detached never compares
    /// equal to a later proxy's id.
    pub struct ProxyId;
}

/// Drop shadow drawn under a lifted proxy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProxyShadow {
    /// Shadow offset relative to the proxy.
    pub offset: Vec2,
    /// Blur radius.
    pub radius: f32,
    /// Shadow opacity, 0.0 to 1.0.
    pub opacity: f32,
}

/// How a proxy looks at rest or at the end of a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProxyAppearance {
    /// Opacity, 0.0 to 1.0.
    pub opacity: f32,
    /// Uniform scale around the proxy's center.
    pub scale: f32,
    /// Optional drop shadow.
    pub shadow: Option<ProxyShadow>,
}

impl ProxyAppearance {
    /// Fully opaque, unscaled, no shadow.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        scale: 1.0,
        shadow: None,
    };
}

impl Default for ProxyAppearance {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// An animated change of a proxy's geometry and appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProxyTransition {
    /// Fade in and grow while moving the center to follow the pointer.
    Lift {
        center: Point,
        appearance: ProxyAppearance,
        duration: Duration,
    },
    /// Move onto a row frame and restore the resting appearance.
    ///
    /// The surface must report completion (or interruption) of a settle
    /// transition so the proxy can be detached.
    Settle {
        frame: Rect,
        appearance: ProxyAppearance,
        duration: Duration,
    },
}

impl ProxyTransition {
    /// The transition's duration.
    pub fn duration(&self) -> Duration {
        match self {
            Self::Lift { duration, .. } | Self::Settle { duration, .. } => *duration,
        }
    }

    /// Target appearance at the end of the transition.
    pub fn appearance(&self) -> ProxyAppearance {
        match self {
            Self::Lift { appearance, .. } | Self::Settle { appearance, .. } => *appearance,
        }
    }
}

/// Draws the rows of the list.
pub trait RowRenderer {
    /// Hide or show a row. Hidden rows keep their slot in the layout.
    fn set_row_hidden(&mut self, index: usize, hidden: bool);

    /// Whether the row is currently hidden.
    fn is_row_hidden(&self, index: usize) -> bool;

    /// Visually move the row at `from` to `to`.
    ///
    /// This is a pure view update; the backing data has already been swapped.
    /// The row's hidden state moves with it.
    fn move_row_visual(&mut self, from: usize, to: usize);

    /// Rebuild every row from the backing data.
    fn reload_all(&mut self);
}

/// Draws floating proxies above the list.
pub trait ProxySurface {
    /// Start drawing a proxy showing `snapshot` inside `frame`.
    fn attach(&mut self, id: ProxyId, snapshot: &RowSnapshot, frame: Rect, appearance: ProxyAppearance);

    /// Move the proxy's center immediately, superseding any running transition
    /// target for the position.
    fn set_center(&mut self, id: ProxyId, center: Point);

    /// Begin an animated transition.
    fn transition(&mut self, id: ProxyId, transition: ProxyTransition);

    /// Stop drawing the proxy and free its resources.
    fn detach(&mut self, id: ProxyId);
}

//! Render-side types for reorderkit.
//!
//! This crate holds everything the reorder state machine shares with a
//! rendering surface, without depending on any particular GUI toolkit:
//!
//! - geometry value types ([`Point`], [`Size`], [`Rect`])
//! - row bitmaps captured for the floating proxy ([`RowSnapshot`])
//! - the collaborator traits a host implements ([`RowRenderer`],
//!   [`ProxySurface`])
//!
//! # Example
//!
//! ```
//! use reorderkit_render::{Point, Rect, RowSnapshot, Size};
//!
//! let frame = Rect::new(0.0, 44.0, 320.0, 44.0);
//! assert!(frame.contains(Point::new(10.0, 50.0)));
//!
//! let snapshot = RowSnapshot::solid(320, 44, [255, 255, 255, 255], frame.size);
//! assert_eq!(snapshot.logical_size(), Size::new(320.0, 44.0));
//! ```

mod error;
mod snapshot;
mod surface;
mod types;

pub use error::{RenderError, RenderResult};
pub use snapshot::RowSnapshot;
pub use surface::{
    ProxyAppearance, ProxyId, ProxyShadow, ProxySurface, ProxyTransition, RowRenderer,
};
pub use types::{Point, Rect, Size};

// Re-export glam's vector type, used for offsets
pub use glam::Vec2;

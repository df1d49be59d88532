//! Drag-to-reorder for vertical lists.
//!
//! reorderkit implements the interaction that lets a user press on a row,
//! lift it out of the list as a floating proxy, drag it up or down while the
//! other rows make room, and drop it into its new position. It does not draw
//! anything: the host supplies geometry, a row renderer and a proxy surface
//! through traits, and feeds gestures in.
//!
//! # Architecture
//!
//! - [`ListModel`] - the ordered items, shared with the host
//! - [`GeometryAdapter`] - hit testing, row frames and row snapshots
//!   ([`RowLayout`] is a ready-made implementation)
//! - [`RowRenderer`] / [`ProxySurface`] - the host's drawing side
//! - [`ProxyController`] - lifecycle of the floating proxy
//! - [`ReorderController`] - the state machine tying them together
//! - [`LongPressTracker`] - turns raw pointer events into [`DragGesture`]s
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use reorderkit::{DragGesture, ListModel, Point, ReorderController, RowLayout};
//!
//! let model = Arc::new(ListModel::new(vec!["A", "B", "C", "D", "E"]));
//! let mut controller = ReorderController::new(
//!     model.clone(),
//!     RowLayout::uniform(5, 320.0, 44.0),
//!     renderer,
//!     proxy_surface,
//! );
//!
//! controller.signals().drag_finished.connect(|outcome| {
//!     println!("moved {} -> {}", outcome.origin_index, outcome.final_index);
//! });
//!
//! controller.handle_gesture(DragGesture::Begin(Point::new(10.0, 20.0)))?;
//! controller.handle_gesture(DragGesture::Move(Point::new(10.0, 150.0)))?;
//! controller.handle_gesture(DragGesture::End(Point::new(10.0, 150.0)))?;
//!
//! // Later, when the proxy surface finishes the settle animation:
//! controller.proxy_settled(proxy_id);
//! ```
//!
//! # Logging
//!
//! All logging goes through `tracing` under the `reorderkit::*` targets
//! listed in [`reorderkit_core::logging::targets`].

pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod machine;
pub mod model;
pub mod proxy;

pub use config::{ProxyAnchor, ReorderConfig};
pub use error::{ConfigError, ReorderError, ReorderResult};
pub use geometry::{GeometryAdapter, RowLayout};
pub use gesture::{DragGesture, LongPressConfig, LongPressTracker, PointerEvent, PointerPhase};
pub use machine::{DragOutcome, DragSession, DragState, ReorderController, ReorderSignals};
pub use model::{ListModel, ListSignals, StructureLock};
pub use proxy::{ProxyController, ProxyHandle, ProxyStyle, ShadowStyle};

// Render-side types used throughout the public API
pub use reorderkit_render::{
    Point, ProxyAppearance, ProxyId, ProxyShadow, ProxySurface, ProxyTransition, Rect,
    RowRenderer, RowSnapshot, Size, Vec2,
};

// Signals
pub use reorderkit_core::{ConnectionGuard, ConnectionId, Signal};

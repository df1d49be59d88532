//! The state of one drag, from `Begin` to `End` or `Cancel`.

use reorderkit_render::{Point, Vec2};

use crate::config::ProxyAnchor;
use crate::model::StructureLock;
use crate::proxy::ProxyHandle;

/// Coarse state of a [`ReorderController`](super::ReorderController).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag is active.
    #[default]
    Idle,
    /// A row is being dragged.
    Dragging,
}

/// Summary of a finished drag, emitted on
/// [`ReorderSignals::drag_finished`](super::ReorderSignals::drag_finished).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOutcome {
    /// Index the dragged row started at.
    pub origin_index: usize,
    /// Index the dragged row ended at.
    pub final_index: usize,
    /// `true` if the drag ended with `Cancel` rather than `End`.
    ///
    /// Swaps made during a cancelled drag stay committed.
    pub cancelled: bool,
}

impl DragOutcome {
    /// Returns `true` if the row ended somewhere other than where it started.
    pub fn moved(&self) -> bool {
        self.origin_index != self.final_index
    }
}

/// An active drag.
///
/// Exclusively owned by the controller while it is in
/// [`DragState::Dragging`]. Owns the proxy handle and the model's structure
/// lock, so both live exactly as long as the session.
#[derive(Debug)]
pub struct DragSession {
    pub(super) origin_index: usize,
    pub(super) current_index: usize,
    pub(super) pointer_offset: Vec2,
    pub(super) anchor_x: f32,
    pub(super) proxy: ProxyHandle,
    pub(super) lock: StructureLock,
    pub(super) span: tracing::Span,
}

impl DragSession {
    /// Index the dragged row started at.
    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    /// Index the dragged row occupies now.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Vector from the grabbed row's center to the pointer, fixed at `Begin`.
    pub fn pointer_offset(&self) -> Vec2 {
        self.pointer_offset
    }

    /// Horizontal center the proxy is pinned to.
    pub fn anchor_x(&self) -> f32 {
        self.anchor_x
    }

    /// The live proxy's handle.
    pub fn proxy(&self) -> &ProxyHandle {
        &self.proxy
    }

    /// Where the proxy's center goes for a pointer at `pointer`.
    ///
    /// The proxy only moves vertically.
    pub fn proxy_center(&self, anchor: ProxyAnchor, pointer: Point) -> Point {
        proxy_center(anchor, self.anchor_x, self.pointer_offset, pointer)
    }
}

pub(super) fn proxy_center(anchor: ProxyAnchor, anchor_x: f32, pointer_offset: Vec2, pointer: Point) -> Point {
    match anchor {
        ProxyAnchor::Center => Point::new(anchor_x, pointer.y),
        ProxyAnchor::GrabPoint => Point::new(anchor_x, pointer.y - pointer_offset.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_center_anchors() {
        let offset = Vec2::new(12.0, 8.0);
        let pointer = Point::new(300.0, 100.0);

        assert_eq!(
            proxy_center(ProxyAnchor::Center, 160.0, offset, pointer),
            Point::new(160.0, 100.0)
        );
        assert_eq!(
            proxy_center(ProxyAnchor::GrabPoint, 160.0, offset, pointer),
            Point::new(160.0, 92.0)
        );
    }

    #[test]
    fn test_outcome_moved() {
        let outcome = DragOutcome {
            origin_index: 0,
            final_index: 3,
            cancelled: false,
        };
        assert!(outcome.moved());
        assert!(
            !DragOutcome {
                final_index: 0,
                ..outcome
            }
            .moved()
        );
    }
}

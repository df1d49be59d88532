//! Geometry adapter: point-to-row hit testing and row frames.
//!
//! The reorder controller never computes layout itself. It asks a
//! [`GeometryAdapter`] which row is under the pointer and where a row is
//! drawn. [`RowLayout`] is a ready-made adapter for lists whose row frames
//! are known up front, with an optional vertical scroll offset.

use reorderkit_render::{Point, Rect, RowSnapshot, Size};

/// Maps view coordinates to rows and rows to their frames.
///
/// All points and frames are in the list view's coordinate space.
pub trait GeometryAdapter {
    /// The index of the row under `point`, or `None` if the point is not over
    /// any row.
    fn row_index_at(&self, point: Point) -> Option<usize>;

    /// The current frame of the row at `index`.
    ///
    /// Only called with indices previously returned by
    /// [`row_index_at`](Self::row_index_at) or tracked by a drag session.
    fn frame_of(&self, index: usize) -> Rect;

    /// A rendered bitmap of the row at `index`, used as the floating proxy.
    ///
    /// Returning `None` refuses the drag.
    fn snapshot_row(&self, index: usize) -> Option<RowSnapshot>;
}

type Snapshotter = Box<dyn Fn(usize, Rect) -> Option<RowSnapshot>>;

/// A [`GeometryAdapter`] over precomputed row frames.
///
/// Frames are stored in content coordinates; the viewport shows the content
/// shifted up by the scroll offset. Points outside the viewport never hit a
/// row.
pub struct RowLayout {
    item_rects: Vec<Rect>,
    viewport: Rect,
    scroll_y: f32,
    snapshotter: Option<Snapshotter>,
}

impl std::fmt::Debug for RowLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowLayout")
            .field("item_rects", &self.item_rects)
            .field("viewport", &self.viewport)
            .field("scroll_y", &self.scroll_y)
            .field("snapshotter", &self.snapshotter.is_some())
            .finish()
    }
}

impl RowLayout {
    /// Creates a layout from explicit row frames and a viewport.
    pub fn new(item_rects: Vec<Rect>, viewport: Rect) -> Self {
        Self {
            item_rects,
            viewport,
            scroll_y: 0.0,
            snapshotter: None,
        }
    }

    /// Stacks `count` rows of equal height, each `width` wide, starting at the
    /// top of a viewport tall enough to show them all.
    pub fn uniform(count: usize, width: f32, row_height: f32) -> Self {
        let item_rects = (0..count)
            .map(|row| Rect::new(0.0, row as f32 * row_height, width, row_height))
            .collect();
        let viewport = Rect::new(0.0, 0.0, width, count as f32 * row_height);
        Self::new(item_rects, viewport)
    }

    /// Uses `snapshotter` to render row bitmaps.
    ///
    /// Without one, rows are captured as opaque white bitmaps of their frame
    /// size.
    pub fn with_snapshotter<F>(mut self, snapshotter: F) -> Self
    where
        F: Fn(usize, Rect) -> Option<RowSnapshot> + 'static,
    {
        self.snapshotter = Some(Box::new(snapshotter));
        self
    }

    /// Sets the viewport rectangle.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Returns the viewport rectangle.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Sets the vertical scroll offset of the content.
    pub fn set_scroll_y(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y;
    }

    /// Returns the vertical scroll offset of the content.
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Number of rows in the layout.
    pub fn row_count(&self) -> usize {
        self.item_rects.len()
    }
}

impl GeometryAdapter for RowLayout {
    fn row_index_at(&self, point: Point) -> Option<usize> {
        if !self.viewport.contains(point) {
            return None;
        }

        let content_point = Point::new(point.x, point.y + self.scroll_y);
        self.item_rects
            .iter()
            .position(|rect| rect.contains(content_point))
    }

    fn frame_of(&self, index: usize) -> Rect {
        self.item_rects
            .get(index)
            .map(|rect| rect.offset(0.0, -self.scroll_y))
            .unwrap_or(Rect::ZERO)
    }

    fn snapshot_row(&self, index: usize) -> Option<RowSnapshot> {
        let frame = self.item_rects.get(index).copied()?;
        match &self.snapshotter {
            Some(snapshotter) => snapshotter(index, frame),
            None => {
                let width = frame.width().ceil().max(1.0) as u32;
                let height = frame.height().ceil().max(1.0) as u32;
                Some(RowSnapshot::solid(
                    width,
                    height,
                    [255, 255, 255, 255],
                    Size::new(frame.width(), frame.height()),
                ))
            }
        }
    }
}

//! Recording fakes for the reorder controller's collaborators.
//!
//! The fakes share their state through `Arc<Mutex<_>>`, so a test keeps a
//! clone to inspect what the controller did, even after the controller has
//! been dropped.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use reorderkit::{
    ListModel, Point, ProxyAppearance, ProxyId, ProxySurface, ProxyTransition, Rect,
    ReorderController, RowLayout, RowRenderer, RowSnapshot,
};

/// Height of every row in the test layouts.
pub const ROW_HEIGHT: f32 = 44.0;

/// Width of the test list.
pub const ROW_WIDTH: f32 = 320.0;

/// A point in the middle of `row`, horizontally off-center.
pub fn row_point(row: usize) -> Point {
    Point::new(100.0, row as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0)
}

// ── Row renderer ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub label: String,
    pub hidden: bool,
}

#[derive(Debug, Default)]
pub struct RendererState {
    pub rows: Vec<RowView>,
    pub moves: Vec<(usize, usize)>,
    pub reloads: usize,
}

/// A renderer that keeps one view per row and rebuilds them from the model
/// on reload.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    model: Arc<ListModel<&'static str>>,
    state: Arc<Mutex<RendererState>>,
}

impl RecordingRenderer {
    pub fn new(model: Arc<ListModel<&'static str>>) -> Self {
        let renderer = Self {
            model,
            state: Arc::default(),
        };
        renderer.rebuild();
        renderer
    }

    fn rebuild(&self) {
        let rows = self
            .model
            .to_vec()
            .into_iter()
            .map(|label| RowView {
                label: label.to_string(),
                hidden: false,
            })
            .collect();
        self.state.lock().rows = rows;
    }

    pub fn labels(&self) -> Vec<String> {
        self.state.lock().rows.iter().map(|row| row.label.clone()).collect()
    }

    pub fn hidden_rows(&self) -> Vec<usize> {
        self.state
            .lock()
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.hidden)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn moves(&self) -> Vec<(usize, usize)> {
        self.state.lock().moves.clone()
    }

    pub fn reloads(&self) -> usize {
        self.state.lock().reloads
    }
}

impl RowRenderer for RecordingRenderer {
    fn set_row_hidden(&mut self, index: usize, hidden: bool) {
        if let Some(row) = self.state.lock().rows.get_mut(index) {
            row.hidden = hidden;
        }
    }

    fn is_row_hidden(&self, index: usize) -> bool {
        self.state
            .lock()
            .rows
            .get(index)
            .is_some_and(|row| row.hidden)
    }

    fn move_row_visual(&mut self, from: usize, to: usize) {
        let mut state = self.state.lock();
        let view = state.rows.remove(from);
        state.rows.insert(to, view);
        state.moves.push((from, to));
    }

    fn reload_all(&mut self) {
        self.rebuild();
        self.state.lock().reloads += 1;
    }
}

// ── Proxy surface ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Attach {
        id: ProxyId,
        frame: Rect,
        appearance: ProxyAppearance,
    },
    SetCenter {
        id: ProxyId,
        center: Point,
    },
    Transition {
        id: ProxyId,
        transition: ProxyTransition,
    },
    Detach {
        id: ProxyId,
    },
}

/// A proxy surface that only records the calls it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
}

impl RecordingSurface {
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().clone()
    }

    pub fn attached(&self) -> Vec<ProxyId> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Attach { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn detached(&self) -> Vec<ProxyId> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Detach { id } => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Proxies attached and not yet detached.
    pub fn on_screen(&self) -> Vec<ProxyId> {
        let detached = self.detached();
        self.attached()
            .into_iter()
            .filter(|id| !detached.contains(id))
            .collect()
    }

    pub fn last_center(&self) -> Option<Point> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            SurfaceCall::SetCenter { center, .. } => Some(*center),
            SurfaceCall::Transition {
                transition: ProxyTransition::Lift { center, .. },
                ..
            } => Some(*center),
            _ => None,
        })
    }

    /// The target frame of the last settle transition.
    pub fn last_settle(&self) -> Option<(ProxyId, Rect)> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            SurfaceCall::Transition {
                id,
                transition: ProxyTransition::Settle { frame, .. },
            } => Some((*id, *frame)),
            _ => None,
        })
    }
}

impl ProxySurface for RecordingSurface {
    fn attach(&mut self, id: ProxyId, _snapshot: &RowSnapshot, frame: Rect, appearance: ProxyAppearance) {
        self.calls.lock().push(SurfaceCall::Attach {
            id,
            frame,
            appearance,
        });
    }

    fn set_center(&mut self, id: ProxyId, center: Point) {
        self.calls.lock().push(SurfaceCall::SetCenter { id, center });
    }

    fn transition(&mut self, id: ProxyId, transition: ProxyTransition) {
        self.calls.lock().push(SurfaceCall::Transition { id, transition });
    }

    fn detach(&mut self, id: ProxyId) {
        self.calls.lock().push(SurfaceCall::Detach { id });
    }
}

// ── Harness ─────────────────────────────────────────────────────────────

pub type TestController =
    ReorderController<&'static str, RowLayout, RecordingRenderer, RecordingSurface>;

/// A controller over a uniform layout, plus recording handles on its collaborators.
pub struct Harness {
    pub model: Arc<ListModel<&'static str>>,
    pub renderer: RecordingRenderer,
    pub surface: RecordingSurface,
    pub controller: TestController,
}

impl Harness {
    pub fn new(items: &[&'static str]) -> Self {
        Self::with_layout(items, RowLayout::uniform(items.len(), ROW_WIDTH, ROW_HEIGHT))
    }

    pub fn with_layout(items: &[&'static str], layout: RowLayout) -> Self {
        let model = Arc::new(ListModel::new(items.to_vec()));
        let renderer = RecordingRenderer::new(model.clone());
        let surface = RecordingSurface::default();
        let controller =
            ReorderController::new(model.clone(), layout, renderer.clone(), surface.clone());
        Self {
            model,
            renderer,
            surface,
            controller,
        }
    }

    /// Reports completion of the most recent settle transition.
    pub fn settle(&mut self) -> bool {
        match self.surface.last_settle() {
            Some((id, _)) => self.controller.proxy_settled(id),
            None => false,
        }
    }
}

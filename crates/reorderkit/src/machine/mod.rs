//! The reorder state machine.
//!
//! [`ReorderController`] consumes [`DragGesture`]s and drives its
//! collaborators:
//!
//! - the [`ListModel`] it swaps rows in
//! - a [`GeometryAdapter`] for hit testing, row frames and snapshots
//! - a [`RowRenderer`] that hides and moves row visuals
//! - a [`ProxySurface`] for the floating proxy, through a
//!   [`ProxyController`]
//!
//! # States
//!
//! ```text
//!            Begin(p) over a row
//!   Idle  ------------------------->  Dragging
//!    ^                                  |  Move(p): follow, swap on crossing
//!    +------ End(p) / Cancel -----------+
//! ```
//!
//! `Move`, `End` and `Cancel` are no-ops while idle, and a second `Begin`
//! while dragging is ignored. Ending a drag returns to `Idle` immediately;
//! the released proxy keeps animating until the host reports
//! [`proxy_settled`](ReorderController::proxy_settled), at which point the
//! proxy is detached and every row reloaded.

mod session;

use std::sync::Arc;

use reorderkit_core::Signal;
use reorderkit_core::logging::{self, targets};
use reorderkit_render::{Point, ProxyId, ProxySurface, RowRenderer};

use crate::config::ReorderConfig;
use crate::error::ReorderResult;
use crate::geometry::GeometryAdapter;
use crate::gesture::DragGesture;
use crate::model::ListModel;
use crate::proxy::ProxyController;

pub use session::{DragOutcome, DragSession, DragState};

/// Notifications emitted by a [`ReorderController`].
#[derive(Debug, Default)]
pub struct ReorderSignals {
    /// A drag started at the given row.
    pub drag_started: Signal<usize>,
    /// The dragged row moved: `(from, to)`.
    pub row_moved: Signal<(usize, usize)>,
    /// A drag ended or was cancelled.
    pub drag_finished: Signal<DragOutcome>,
}

#[derive(Debug)]
enum State {
    Idle,
    Dragging(DragSession),
}

/// Drag-to-reorder state machine for a vertical list.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use reorderkit::{DragGesture, ListModel, ReorderController, RowLayout};
/// use reorderkit_render::Point;
///
/// let model = Arc::new(ListModel::new(vec!["A", "B", "C"]));
/// let mut controller = ReorderController::new(
///     model.clone(),
///     RowLayout::uniform(3, 320.0, 44.0),
///     my_renderer,
///     my_proxy_surface,
/// );
///
/// controller.handle_gesture(DragGesture::Begin(Point::new(10.0, 10.0)))?;
/// controller.handle_gesture(DragGesture::Move(Point::new(10.0, 100.0)))?;
/// controller.handle_gesture(DragGesture::End(Point::new(10.0, 100.0)))?;
/// assert_eq!(model.to_vec(), vec!["B", "C", "A"]);
/// ```
pub struct ReorderController<T, G, R, S>
where
    G: GeometryAdapter,
    R: RowRenderer,
    S: ProxySurface,
{
    model: Arc<ListModel<T>>,
    geometry: G,
    renderer: R,
    proxies: ProxyController<S>,
    config: ReorderConfig,
    state: State,
    signals: ReorderSignals,
}

impl<T, G, R, S> ReorderController<T, G, R, S>
where
    G: GeometryAdapter,
    R: RowRenderer,
    S: ProxySurface,
{
    /// Creates an idle controller with the default configuration.
    pub fn new(model: Arc<ListModel<T>>, geometry: G, renderer: R, surface: S) -> Self {
        Self::with_config(model, geometry, renderer, surface, ReorderConfig::default())
    }

    /// Creates an idle controller with the given configuration.
    pub fn with_config(
        model: Arc<ListModel<T>>,
        geometry: G,
        renderer: R,
        surface: S,
        config: ReorderConfig,
    ) -> Self {
        Self {
            model,
            geometry,
            renderer,
            proxies: ProxyController::new(surface, config.proxy),
            config,
            state: State::Idle,
            signals: ReorderSignals::default(),
        }
    }

    /// The list being reordered.
    pub fn model(&self) -> &Arc<ListModel<T>> {
        &self.model
    }

    /// The geometry adapter.
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Mutable access to the geometry adapter, e.g. to update the scroll
    /// offset.
    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    /// The row renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the row renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The proxy controller.
    pub fn proxies(&self) -> &ProxyController<S> {
        &self.proxies
    }

    /// Mutable access to the proxy surface.
    pub fn surface_mut(&mut self) -> &mut S {
        self.proxies.surface_mut()
    }

    /// The active configuration.
    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    /// Validates and installs a new configuration. The anchor applies from
    /// the next gesture; the proxy style from the next transition.
    ///
    /// An invalid configuration is rejected with
    /// [`ReorderError::Config`](crate::ReorderError::Config)
    /// and the current one stays in place.
    pub fn set_config(&mut self, config: ReorderConfig) -> ReorderResult<()> {
        config.validate()?;
        self.proxies.set_style(config.proxy);
        self.config = config;
        tracing::debug!(target: targets::MACHINE, ?config, "configuration replaced");
        Ok(())
    }

    /// Notifications emitted by this controller.
    pub fn signals(&self) -> &ReorderSignals {
        &self.signals
    }

    /// The current coarse state.
    pub fn state(&self) -> DragState {
        match self.state {
            State::Idle => DragState::Idle,
            State::Dragging(_) => DragState::Dragging,
        }
    }

    /// Returns `true` while a row is being dragged.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging(_))
    }

    /// The active drag, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            State::Idle => None,
            State::Dragging(session) => Some(session),
        }
    }

    /// Processes one gesture to completion.
    ///
    /// The only error is
    /// [`ReorderError::IndexOutOfRange`](crate::ReorderError::IndexOutOfRange)
    /// from a model swap, which means the geometry adapter and the model
    /// disagree about the number of rows.
    #[tracing::instrument(skip(self), target = "reorderkit::machine", level = "trace")]
    pub fn handle_gesture(&mut self, gesture: DragGesture) -> ReorderResult<()> {
        match gesture {
            DragGesture::Begin(point) => self.begin(point),
            DragGesture::Move(point) => self.drag_to(point),
            DragGesture::End(_) => {
                self.finish(false);
                Ok(())
            }
            DragGesture::Cancel => {
                self.finish(true);
                Ok(())
            }
        }
    }

    /// Reports that the settle transition of proxy `id` finished.
    ///
    /// Detaches the proxy and reloads every row. Returns `false` for
    /// completions that do not belong to a released proxy (stale or
    /// duplicate reports), which are ignored.
    pub fn proxy_settled(&mut self, id: ProxyId) -> bool {
        if !self.proxies.complete(id) {
            return false;
        }
        self.renderer.reload_all();
        tracing::debug!(target: targets::MACHINE, ?id, "rows reloaded after settle");
        true
    }

    /// Cuts a running settle transition short, detaching the proxy and
    /// reloading every row.
    ///
    /// Returns `false` if no released proxy was still settling.
    pub fn finish_pending_release(&mut self) -> bool {
        if self.proxies.interrupt() == 0 {
            return false;
        }
        self.renderer.reload_all();
        tracing::debug!(target: targets::MACHINE, "rows reloaded after interrupted settle");
        true
    }

    fn begin(&mut self, point: Point) -> ReorderResult<()> {
        if self.is_dragging() {
            tracing::trace!(target: targets::MACHINE, "begin ignored while dragging");
            return Ok(());
        }

        let Some(index) = self.geometry.row_index_at(point) else {
            tracing::trace!(target: targets::MACHINE, x = point.x, y = point.y, "begin outside any row");
            return Ok(());
        };

        let len = self.model.len();
        if index >= len {
            tracing::warn!(target: targets::MACHINE, index, len, "begin on a row the model does not have");
            return Ok(());
        }
        if self.renderer.is_row_hidden(index) {
            tracing::warn!(target: targets::MACHINE, index, "begin on a hidden row");
            return Ok(());
        }
        let Some(snapshot) = self.geometry.snapshot_row(index) else {
            tracing::debug!(target: targets::MACHINE, index, "no snapshot for row, drag refused");
            return Ok(());
        };

        self.finish_pending_release();

        let frame = self.geometry.frame_of(index);
        let proxy = self.proxies.create(frame, snapshot)?;
        self.renderer.set_row_hidden(index, true);

        let row_center = frame.center();
        let pointer_offset = point.offset_from(row_center);
        let anchor_x = row_center.x;
        self.proxies.lift(
            &proxy,
            session::proxy_center(self.config.anchor, anchor_x, pointer_offset, point),
        );

        let span = logging::drag_session_span(index);
        let _entered = span.clone().entered();
        tracing::debug!(target: targets::MACHINE, index, "drag started");

        self.state = State::Dragging(DragSession {
            origin_index: index,
            current_index: index,
            pointer_offset,
            anchor_x,
            proxy,
            lock: self.model.lock_structure(),
            span,
        });
        self.signals.drag_started.emit(index);
        Ok(())
    }

    fn drag_to(&mut self, point: Point) -> ReorderResult<()> {
        let State::Dragging(session) = &mut self.state else {
            tracing::trace!(target: targets::MACHINE, "move ignored while idle");
            return Ok(());
        };
        let _entered = session.span.clone().entered();

        let center = session.proxy_center(self.config.anchor, point);
        self.proxies.move_to(&session.proxy, center);

        let len = self.model.len();
        let Some(candidate) = self
            .geometry
            .row_index_at(point)
            .filter(|&row| row < len)
        else {
            return Ok(());
        };

        let from = session.current_index;
        if candidate == from {
            return Ok(());
        }

        session.lock.swap(&*self.model, candidate, from)?;
        self.renderer.move_row_visual(from, candidate);
        session.current_index = candidate;
        tracing::debug!(target: targets::MACHINE, from, to = candidate, "row moved");

        self.signals.row_moved.emit((from, candidate));
        Ok(())
    }

    fn finish(&mut self, cancelled: bool) {
        let State::Dragging(session) = std::mem::replace(&mut self.state, State::Idle) else {
            tracing::trace!(target: targets::MACHINE, cancelled, "end ignored while idle");
            return;
        };
        let DragSession {
            origin_index,
            current_index,
            proxy,
            lock,
            span,
            ..
        } = session;
        let _entered = span.entered();

        let target = self.geometry.frame_of(current_index);
        self.proxies.release(proxy, target);
        self.renderer.set_row_hidden(current_index, false);
        drop(lock);

        tracing::debug!(
            target: targets::MACHINE,
            origin = origin_index,
            destination = current_index,
            cancelled,
            "drag finished"
        );
        self.signals.drag_finished.emit(DragOutcome {
            origin_index,
            final_index: current_index,
            cancelled,
        });
    }
}

impl<T, G, R, S> std::fmt::Debug for ReorderController<T, G, R, S>
where
    G: GeometryAdapter,
    R: RowRenderer,
    S: ProxySurface,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReorderController")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("rows", &self.model.len())
            .field("settling", &self.proxies.settling_count())
            .finish_non_exhaustive()
    }
}

impl<T, G, R, S> Drop for ReorderController<T, G, R, S>
where
    G: GeometryAdapter,
    R: RowRenderer,
    S: ProxySurface,
{
    fn drop(&mut self) {
        if self.is_dragging() {
            tracing::debug!(target: targets::MACHINE, "controller dropped mid-drag, cancelling");
            self.finish(true);
        }
        self.finish_pending_release();
    }
}

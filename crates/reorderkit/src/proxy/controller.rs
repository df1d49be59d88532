//! Lifecycle of the floating proxy.

use reorderkit_core::logging::targets;
use reorderkit_render::{Point, ProxyId, ProxySurface, ProxyTransition, Rect, RowSnapshot};
use slotmap::SlotMap;

use super::style::ProxyStyle;
use crate::error::{ReorderError, ReorderResult};

/// Owning token for the live proxy.
///
/// Returned by [`ProxyController::create`] and consumed by
/// [`ProxyController::release`]. It cannot be cloned, so exactly one owner
/// can move or release the proxy.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a proxy that is never released stays on screen until the controller is dropped"]
pub struct ProxyHandle {
    id: ProxyId,
}

impl ProxyHandle {
    /// The surface id of the proxy.
    pub fn id(&self) -> ProxyId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProxyPhase {
    /// Following the pointer.
    Live,
    /// Released, animating onto its final frame.
    Settling,
}

#[derive(Debug)]
struct ProxyEntry {
    snapshot: RowSnapshot,
    frame: Rect,
    center: Point,
    phase: ProxyPhase,
}

/// Creates, moves, releases and disposes floating proxies on a
/// [`ProxySurface`].
///
/// At most one proxy is live at a time. A released proxy keeps animating
/// until the surface reports completion through [`complete`](Self::complete)
/// or it is cut short by [`interrupt`](Self::interrupt); either way it is
/// detached exactly once. Proxies still attached when the controller is
/// dropped are detached then.
#[derive(Debug)]
pub struct ProxyController<S: ProxySurface> {
    surface: S,
    style: ProxyStyle,
    proxies: SlotMap<ProxyId, ProxyEntry>,
}

impl<S: ProxySurface> ProxyController<S> {
    /// Creates a controller drawing on `surface` with the given style.
    pub fn new(surface: S, style: ProxyStyle) -> Self {
        Self {
            surface,
            style,
            proxies: SlotMap::with_key(),
        }
    }

    /// The style applied to new transitions.
    pub fn style(&self) -> &ProxyStyle {
        &self.style
    }

    /// Replaces the style. Running transitions are not affected.
    pub fn set_style(&mut self, style: ProxyStyle) {
        self.style = style;
    }

    /// The underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the underlying surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Number of proxies following the pointer (0 or 1).
    pub fn live_count(&self) -> usize {
        self.count(ProxyPhase::Live)
    }

    /// Number of released proxies that have not been disposed yet.
    pub fn settling_count(&self) -> usize {
        self.count(ProxyPhase::Settling)
    }

    /// Returns `true` while a released proxy is still animating.
    pub fn is_settling(&self) -> bool {
        self.settling_count() > 0
    }

    fn count(&self, phase: ProxyPhase) -> usize {
        self.proxies.values().filter(|entry| entry.phase == phase).count()
    }

    /// The snapshot shown by the live proxy.
    pub fn snapshot(&self, handle: &ProxyHandle) -> Option<&RowSnapshot> {
        self.proxies.get(handle.id).map(|entry| &entry.snapshot)
    }

    /// The last center requested for the live proxy.
    pub fn center(&self, handle: &ProxyHandle) -> Option<Point> {
        self.proxies.get(handle.id).map(|entry| entry.center)
    }

    /// Attaches a proxy showing `snapshot`, centered on `source_frame` at the
    /// resting appearance.
    ///
    /// Fails with [`ReorderError::ProxyAlreadyActive`] if a proxy is still
    /// live. Settling proxies do not block creation.
    pub fn create(&mut self, source_frame: Rect, snapshot: RowSnapshot) -> ReorderResult<ProxyHandle> {
        if self.live_count() > 0 {
            return Err(ReorderError::ProxyAlreadyActive);
        }

        let center = source_frame.center();
        let id = self.proxies.insert(ProxyEntry {
            snapshot,
            frame: source_frame,
            center,
            phase: ProxyPhase::Live,
        });

        let entry = &self.proxies[id];
        self.surface
            .attach(id, &entry.snapshot, entry.frame, self.style.resting());
        tracing::debug!(target: targets::PROXY, ?id, x = center.x, y = center.y, "proxy attached");

        Ok(ProxyHandle { id })
    }

    /// Fades the proxy in and scales it up while moving its center to
    /// `center`.
    pub fn lift(&mut self, handle: &ProxyHandle, center: Point) {
        let Some(entry) = self.proxies.get_mut(handle.id) else {
            tracing::warn!(target: targets::PROXY, id = ?handle.id, "lift for unknown proxy");
            return;
        };
        entry.center = center;

        self.surface.transition(
            handle.id,
            ProxyTransition::Lift {
                center,
                appearance: self.style.lifted(),
                duration: self.style.transition_duration(),
            },
        );
        tracing::trace!(target: targets::PROXY, id = ?handle.id, "proxy lifted");
    }

    /// Moves the proxy's center without animation.
    pub fn move_to(&mut self, handle: &ProxyHandle, center: Point) {
        let Some(entry) = self.proxies.get_mut(handle.id) else {
            tracing::warn!(target: targets::PROXY, id = ?handle.id, "move for unknown proxy");
            return;
        };
        entry.center = center;
        self.surface.set_center(handle.id, center);
    }

    /// Animates the proxy onto `target_frame`, restoring its resting scale
    /// and opacity.
    ///
    /// The proxy stays attached until [`complete`](Self::complete) or
    /// [`interrupt`](Self::interrupt). Returns the id the surface will report
    /// on completion.
    pub fn release(&mut self, handle: ProxyHandle, target_frame: Rect) -> ProxyId {
        let id = handle.id;
        let Some(entry) = self.proxies.get_mut(id) else {
            tracing::warn!(target: targets::PROXY, ?id, "release for unknown proxy");
            return id;
        };
        entry.phase = ProxyPhase::Settling;
        entry.frame = target_frame;
        entry.center = target_frame.center();

        self.surface.transition(
            id,
            ProxyTransition::Settle {
                frame: target_frame,
                appearance: self.style.settled(),
                duration: self.style.transition_duration(),
            },
        );
        tracing::debug!(target: targets::PROXY, ?id, "proxy released");
        id
    }

    /// Disposes a released proxy whose settle transition has finished.
    ///
    /// Returns `true` if a proxy was detached. Reports for live proxies, or
    /// for ids that were already disposed, are ignored.
    pub fn complete(&mut self, id: ProxyId) -> bool {
        match self.proxies.get(id).map(|entry| entry.phase) {
            Some(ProxyPhase::Settling) => {
                self.proxies.remove(id);
                self.surface.detach(id);
                tracing::debug!(target: targets::PROXY, ?id, "proxy settled and detached");
                true
            }
            Some(ProxyPhase::Live) => {
                tracing::trace!(target: targets::PROXY, ?id, "completion for live proxy ignored");
                false
            }
            None => {
                tracing::trace!(target: targets::PROXY, ?id, "stale proxy completion ignored");
                false
            }
        }
    }

    /// Cuts every settle transition short and detaches those proxies.
    ///
    /// Returns the number of proxies disposed.
    pub fn interrupt(&mut self) -> usize {
        let settling: Vec<ProxyId> = self
            .proxies
            .iter()
            .filter(|(_, entry)| entry.phase == ProxyPhase::Settling)
            .map(|(id, _)| id)
            .collect();

        for &id in &settling {
            self.proxies.remove(id);
            self.surface.detach(id);
            tracing::debug!(target: targets::PROXY, ?id, "settling proxy interrupted");
        }
        settling.len()
    }
}

impl<S: ProxySurface> Drop for ProxyController<S> {
    fn drop(&mut self) {
        for (id, _) in self.proxies.drain() {
            self.surface.detach(id);
            tracing::debug!(target: targets::PROXY, ?id, "proxy detached on teardown");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use reorderkit_render::{ProxyAppearance, Size};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Attach(ProxyId, Rect, ProxyAppearance),
        SetCenter(ProxyId, Point),
        Transition(ProxyId, ProxyTransition),
        Detach(ProxyId),
    }

    #[derive(Debug, Default, Clone)]
    struct Recorder {
        calls: Arc<Mutex<Vec<Call>>>,
    }

    impl Recorder {
        fn detached(&self) -> Vec<ProxyId> {
            self.calls
                .lock()
                .iter()
                .filter_map(|call| match call {
                    Call::Detach(id) => Some(*id),
                    _ => None,
                })
                .collect()
        }
    }

    impl ProxySurface for Recorder {
        fn attach(&mut self, id: ProxyId, _snapshot: &RowSnapshot, frame: Rect, appearance: ProxyAppearance) {
            self.calls.lock().push(Call::Attach(id, frame, appearance));
        }

        fn set_center(&mut self, id: ProxyId, center: Point) {
            self.calls.lock().push(Call::SetCenter(id, center));
        }

        fn transition(&mut self, id: ProxyId, transition: ProxyTransition) {
            self.calls.lock().push(Call::Transition(id, transition));
        }

        fn detach(&mut self, id: ProxyId) {
            self.calls.lock().push(Call::Detach(id));
        }
    }

    fn snapshot() -> RowSnapshot {
        RowSnapshot::solid(4, 2, [255, 255, 255, 255], Size::new(4.0, 2.0))
    }

    fn controller() -> (ProxyController<Recorder>, Recorder) {
        let recorder = Recorder::default();
        (
            ProxyController::new(recorder.clone(), ProxyStyle::default()),
            recorder,
        )
    }

    #[test]
    fn test_create_attaches_at_frame_center() {
        let (mut proxies, recorder) = controller();
        let frame = Rect::new(0.0, 44.0, 320.0, 44.0);
        let handle = proxies.create(frame, snapshot()).unwrap();

        assert_eq!(proxies.center(&handle), Some(Point::new(160.0, 66.0)));
        assert_eq!(proxies.live_count(), 1);
        assert_eq!(
            recorder.calls.lock()[0],
            Call::Attach(handle.id(), frame, ProxyStyle::default().resting())
        );
        let _ = proxies.release(handle, frame);
    }

    #[test]
    fn test_second_live_proxy_rejected() {
        let (mut proxies, _recorder) = controller();
        let handle = proxies.create(Rect::new(0.0, 0.0, 10.0, 10.0), snapshot()).unwrap();
        assert!(matches!(
            proxies.create(Rect::new(0.0, 10.0, 10.0, 10.0), snapshot()),
            Err(ReorderError::ProxyAlreadyActive)
        ));

        // Once released, a new proxy may be created while the old one settles
        proxies.release(handle, Rect::new(0.0, 0.0, 10.0, 10.0));
        let next = proxies.create(Rect::new(0.0, 10.0, 10.0, 10.0), snapshot()).unwrap();
        assert_eq!(proxies.live_count(), 1);
        assert_eq!(proxies.settling_count(), 1);
        let _ = proxies.release(next, Rect::ZERO);
    }

    #[test]
    fn test_lift_and_move() {
        let (mut proxies, recorder) = controller();
        let handle = proxies.create(Rect::new(0.0, 0.0, 100.0, 20.0), snapshot()).unwrap();

        proxies.lift(&handle, Point::new(50.0, 14.0));
        proxies.move_to(&handle, Point::new(50.0, 30.0));
        assert_eq!(proxies.center(&handle), Some(Point::new(50.0, 30.0)));

        let calls = recorder.calls.lock().clone();
        assert!(matches!(
            calls[1],
            Call::Transition(_, ProxyTransition::Lift { center, .. }) if center == Point::new(50.0, 14.0)
        ));
        assert_eq!(calls[2], Call::SetCenter(handle.id(), Point::new(50.0, 30.0)));
        let _ = proxies.release(handle, Rect::ZERO);
    }

    #[test]
    fn test_release_then_complete_detaches_once() {
        let (mut proxies, recorder) = controller();
        let handle = proxies.create(Rect::new(0.0, 0.0, 100.0, 20.0), snapshot()).unwrap();
        let target = Rect::new(0.0, 40.0, 100.0, 20.0);
        let id = proxies.release(handle, target);

        assert!(proxies.is_settling());
        assert!(recorder.detached().is_empty());

        assert!(proxies.complete(id));
        assert!(!proxies.complete(id));
        assert_eq!(recorder.detached(), vec![id]);
        assert!(!proxies.is_settling());
    }

    #[test]
    fn test_completion_for_live_proxy_ignored() {
        let (mut proxies, recorder) = controller();
        let handle = proxies.create(Rect::new(0.0, 0.0, 100.0, 20.0), snapshot()).unwrap();
        assert!(!proxies.complete(handle.id()));
        assert!(recorder.detached().is_empty());
        let _ = proxies.release(handle, Rect::ZERO);
    }

    #[test]
    fn test_interrupt_disposes_settling_only() {
        let (mut proxies, recorder) = controller();
        let first = proxies.create(Rect::new(0.0, 0.0, 100.0, 20.0), snapshot()).unwrap();
        let first_id = proxies.release(first, Rect::ZERO);
        let live = proxies.create(Rect::new(0.0, 20.0, 100.0, 20.0), snapshot()).unwrap();

        assert_eq!(proxies.interrupt(), 1);
        assert_eq!(recorder.detached(), vec![first_id]);
        assert_eq!(proxies.live_count(), 1);

        // A late completion for the interrupted proxy is stale
        assert!(!proxies.complete(first_id));
        let _ = proxies.release(live, Rect::ZERO);
    }

    #[test]
    fn test_drop_detaches_remaining() {
        let (mut proxies, recorder) = controller();
        let handle = proxies.create(Rect::new(0.0, 0.0, 100.0, 20.0), snapshot()).unwrap();
        let id = proxies.release(handle, Rect::ZERO);
        drop(proxies);
        assert_eq!(recorder.detached(), vec![id]);
    }
}

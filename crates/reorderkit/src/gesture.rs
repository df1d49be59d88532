//! Gesture input.
//!
//! [`DragGesture`] is what the [`ReorderController`](crate::ReorderController)
//! consumes. Hosts that get raw pointer or touch events can feed them through
//! a [`LongPressTracker`], which starts a drag once a press has been held
//! still long enough:
//!
//! ```
//! use std::time::{Duration, Instant};
//! use reorderkit::{DragGesture, LongPressTracker, Point, PointerEvent, PointerPhase};
//!
//! let mut tracker = LongPressTracker::default();
//! let t0 = Instant::now();
//!
//! let pressed = PointerEvent::new(PointerPhase::Pressed, Point::new(10.0, 10.0), t0);
//! assert!(tracker.process(pressed).is_empty());
//!
//! // A timer fires after the long-press timeout
//! let begin = tracker.poll(t0 + Duration::from_millis(500));
//! assert_eq!(begin, Some(DragGesture::Begin(Point::new(10.0, 10.0))));
//! ```

use std::time::{Duration, Instant};

use reorderkit_core::logging::targets;
use reorderkit_render::Point;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A drag gesture in list view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragGesture {
    /// The user started dragging at a point.
    Begin(Point),
    /// The pointer moved.
    Move(Point),
    /// The pointer was released.
    End(Point),
    /// The system cancelled the gesture.
    Cancel,
}

/// Default long-press timeout in milliseconds.
pub const DEFAULT_LONG_PRESS_TIMEOUT_MS: u64 = 500;

/// Default movement allowed during a long press, in pixels.
pub const DEFAULT_LONG_PRESS_SLOP: f32 = 10.0;

/// Long-press recognition settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongPressConfig {
    /// How long a press must be held before a drag begins, in milliseconds.
    pub timeout_ms: u64,
    /// How far the pointer may move before the timeout without cancelling
    /// the long press.
    pub slop: f32,
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_LONG_PRESS_TIMEOUT_MS,
            slop: DEFAULT_LONG_PRESS_SLOP,
        }
    }
}

impl LongPressConfig {
    /// The timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.slop.is_finite() && self.slop >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "long_press.slop",
                reason: format!("must not be negative, got {}", self.slop),
            });
        }
        Ok(())
    }
}

/// Phase of a raw pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// The pointer went down.
    Pressed,
    /// The pointer moved while down.
    Moved,
    /// The pointer went up.
    Released,
    /// The system took the pointer away.
    Cancelled,
}

/// A raw pointer event with its timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub phase: PointerPhase,
    /// Where, in list view coordinates.
    pub position: Point,
    /// When.
    pub time: Instant,
}

impl PointerEvent {
    /// Creates a new pointer event.
    pub fn new(phase: PointerPhase, position: Point, time: Instant) -> Self {
        Self {
            phase,
            position,
            time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TrackerState {
    /// No pointer is down.
    Idle,
    /// Down, waiting for the timeout.
    Pressed {
        start: Point,
        last: Point,
        since: Instant,
    },
    /// Moved beyond the slop before the timeout; ignored until released.
    Rejected,
    /// A drag has begun.
    Active,
}

/// Turns raw pointer events into [`DragGesture`]s using long-press
/// recognition.
///
/// A drag begins when a press has been held for
/// [`LongPressConfig::timeout`] without moving more than
/// [`LongPressConfig::slop`] from where it started. The timeout is noticed
/// on the next pointer event or on [`poll`](Self::poll), whichever comes
/// first. After that, moves become [`DragGesture::Move`], release becomes
/// [`DragGesture::End`] and cancellation becomes [`DragGesture::Cancel`].
#[derive(Debug, Clone)]
pub struct LongPressTracker {
    config: LongPressConfig,
    state: TrackerState,
}

impl Default for LongPressTracker {
    fn default() -> Self {
        Self::new(LongPressConfig::default())
    }
}

impl LongPressTracker {
    /// Creates a tracker with the given settings.
    pub fn new(config: LongPressConfig) -> Self {
        Self {
            config,
            state: TrackerState::Idle,
        }
    }

    /// The recognition settings.
    pub fn config(&self) -> &LongPressConfig {
        &self.config
    }

    /// Replaces the recognition settings. A press in progress keeps its
    /// start time.
    pub fn set_config(&mut self, config: LongPressConfig) {
        self.config = config;
    }

    /// Returns `true` after a drag has begun and before it ends.
    pub fn is_active(&self) -> bool {
        self.state == TrackerState::Active
    }

    /// When the pending press turns into a drag, if one is pending.
    ///
    /// Hosts can arm a timer for this instant and call [`poll`](Self::poll)
    /// when it fires.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            TrackerState::Pressed { since, .. } => Some(since + self.config.timeout()),
            _ => None,
        }
    }

    /// Forgets any press in progress without emitting anything.
    pub fn reset(&mut self) {
        self.state = TrackerState::Idle;
    }

    /// Processes one pointer event and returns the gestures it produces.
    pub fn process(&mut self, event: PointerEvent) -> Vec<DragGesture> {
        let mut gestures = Vec::new();

        match event.phase {
            PointerPhase::Pressed => {
                if self.state == TrackerState::Active {
                    tracing::debug!(target: targets::GESTURE, "press while dragging, cancelling drag");
                    gestures.push(DragGesture::Cancel);
                }
                self.state = TrackerState::Pressed {
                    start: event.position,
                    last: event.position,
                    since: event.time,
                };
            }
            PointerPhase::Moved => self.handle_move(event, &mut gestures),
            PointerPhase::Released => {
                match self.state {
                    TrackerState::Pressed { last, since, .. } if self.elapsed(since, event.time) => {
                        tracing::debug!(target: targets::GESTURE, "long press recognized on release");
                        gestures.push(DragGesture::Begin(last));
                        gestures.push(DragGesture::End(event.position));
                    }
                    TrackerState::Active => gestures.push(DragGesture::End(event.position)),
                    _ => {}
                }
                self.state = TrackerState::Idle;
            }
            PointerPhase::Cancelled => {
                if self.state == TrackerState::Active {
                    gestures.push(DragGesture::Cancel);
                }
                self.state = TrackerState::Idle;
            }
        }

        gestures
    }

    /// Starts the drag if the pending press has been held long enough by
    /// `now`.
    pub fn poll(&mut self, now: Instant) -> Option<DragGesture> {
        match self.state {
            TrackerState::Pressed { last, since, .. } if self.elapsed(since, now) => {
                tracing::debug!(target: targets::GESTURE, "long press recognized");
                self.state = TrackerState::Active;
                Some(DragGesture::Begin(last))
            }
            _ => None,
        }
    }

    fn handle_move(&mut self, event: PointerEvent, gestures: &mut Vec<DragGesture>) {
        match self.state {
            TrackerState::Pressed { start, last, since } => {
                if self.elapsed(since, event.time) {
                    tracing::debug!(target: targets::GESTURE, "long press recognized on move");
                    self.state = TrackerState::Active;
                    gestures.push(DragGesture::Begin(last));
                    gestures.push(DragGesture::Move(event.position));
                } else if event.position.offset_from(start).length() > self.config.slop {
                    tracing::trace!(target: targets::GESTURE, "moved beyond slop, long press rejected");
                    self.state = TrackerState::Rejected;
                } else {
                    self.state = TrackerState::Pressed {
                        start,
                        last: event.position,
                        since,
                    };
                }
            }
            TrackerState::Active => gestures.push(DragGesture::Move(event.position)),
            TrackerState::Idle | TrackerState::Rejected => {}
        }
    }

    fn elapsed(&self, since: Instant, now: Instant) -> bool {
        now.saturating_duration_since(since) >= self.config.timeout()
    }
}

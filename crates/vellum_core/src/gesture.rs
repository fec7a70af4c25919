//! Gesture recognition
//!
//! Converts raw pointer samples into a small vocabulary of semantic events
//! for one surface: touchdown, drag start/move/end, tap, and directional
//! swipes. Tap vs. drag disambiguation is purely distance-based, decided at
//! release time from a latch set while moving. A slow deliberate tap and a
//! fast short swipe both classify correctly.

use smallvec::SmallVec;
use tracing::trace;

use crate::emitter::{Emitter, HandlerId};
use crate::input::{PointSnapshot, PointerPoint, PointerSource};

/// Default movement threshold in surface pixels, shared by both axes.
pub const DEFAULT_THRESHOLD: f32 = 5.0;

/// Semantic gesture vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Pointer made contact.
    Touchdown,
    /// Movement crossed the threshold for the first time in this session.
    MoveStart,
    /// Over-threshold movement sample.
    TouchMove,
    /// Pointer released after movement.
    Touchup,
    /// Release summary of a moved session.
    Swipe,
    /// Drag finished.
    MoveEnd,
    /// Release without meaningful movement.
    Tap,
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
}

/// Dominant-axis direction of a displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureDirection {
    Left,
    Right,
    Up,
    Down,
}

impl GestureDirection {
    /// Horizontal dominance (|dx| > |dy|) yields left/right by the sign of
    /// `dx`; otherwise up/down by the sign of `dy`.
    pub fn from_delta(dx: f32, dy: f32) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0.0 {
                GestureDirection::Right
            } else {
                GestureDirection::Left
            }
        } else if dy > 0.0 {
            GestureDirection::Down
        } else {
            GestureDirection::Up
        }
    }

    /// The directional swipe event matching this direction.
    pub fn swipe_kind(self) -> GestureKind {
        match self {
            GestureDirection::Left => GestureKind::SwipeLeft,
            GestureDirection::Right => GestureKind::SwipeRight,
            GestureDirection::Up => GestureKind::SwipeUp,
            GestureDirection::Down => GestureKind::SwipeDown,
        }
    }
}

/// Immutable gesture payload delivered to subscribers.
#[derive(Debug, Clone)]
pub struct GestureEvent {
    pub kind: GestureKind,
    /// Position of the primary point, surface-local.
    pub x: f32,
    pub y: f32,
    /// Displacement from the session start.
    pub dx: f32,
    pub dy: f32,
    /// Dominant-axis direction; `None` on touchdown.
    pub direction: Option<GestureDirection>,
    /// Straight-line distance from the session start.
    pub distance: f32,
    /// Milliseconds between begin and finish; end events only.
    pub duration_ms: Option<u64>,
    pub source: PointerSource,
    /// Active point count at the time of the sample.
    pub fingers: usize,
    /// Per-point snapshot.
    pub finger_data: PointSnapshot,
}

/// Transient per-contact state. Created on `begin`, destroyed on
/// `finish`/`cancel`; owned exclusively by the recognizer.
struct GestureSession {
    start: PointerPoint,
    start_time_ms: u64,
    last: PointerPoint,
    fingers: usize,
    finger_data: PointSnapshot,
    /// Latched once cumulative displacement crosses the threshold.
    moved: bool,
}

/// Events produced by a single recognizer call; a `finish` after movement
/// yields up to four.
pub type GestureBatch = SmallVec<[GestureEvent; 4]>;

/// Normalizes heterogeneous pointer input into semantic gesture events for
/// one surface element.
///
/// Every operation both returns the batch of events it produced and feeds
/// any handlers registered via [`GestureRecognizer::on`], so the recognizer
/// works embedded in a controller (routing on the returned batch) or
/// standalone (subscription style).
pub struct GestureRecognizer {
    threshold: f32,
    session: Option<GestureSession>,
    emitter: Emitter<GestureKind, GestureEvent>,
    destroyed: bool,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }

    /// A recognizer with a custom movement threshold. Euclidean distance,
    /// one scalar for both axes so diagonal gestures stay consistent.
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            session: None,
            emitter: Emitter::new(),
            destroyed: false,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Register a handler for one gesture kind.
    pub fn on<F>(&mut self, kind: GestureKind, handler: F) -> HandlerId
    where
        F: FnMut(&GestureEvent) + 'static,
    {
        self.emitter.on(kind, handler)
    }

    /// Register a handler for every gesture kind.
    pub fn on_any<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&GestureEvent) + 'static,
    {
        self.emitter.on_any(handler)
    }

    /// Unsubscribe a handler.
    pub fn off(&mut self, id: HandlerId) -> bool {
        self.emitter.off(id)
    }

    /// Record a new contact. Always creates a fresh session; an overlapping
    /// begin replaces the previous one, never merges into it.
    pub fn begin(
        &mut self,
        points: &[PointerPoint],
        source: PointerSource,
        now_ms: u64,
    ) -> GestureBatch {
        let mut batch = GestureBatch::new();
        if self.destroyed {
            return batch;
        }
        let Some(first) = points.first().copied() else {
            return batch;
        };

        let finger_data: PointSnapshot = points.iter().copied().collect();
        self.session = Some(GestureSession {
            start: first,
            start_time_ms: now_ms,
            last: first,
            fingers: points.len(),
            finger_data: finger_data.clone(),
            moved: false,
        });

        batch.push(GestureEvent {
            kind: GestureKind::Touchdown,
            x: first.x,
            y: first.y,
            dx: 0.0,
            dy: 0.0,
            direction: None,
            distance: 0.0,
            duration_ms: None,
            source,
            fingers: points.len(),
            finger_data,
        });
        self.deliver(batch)
    }

    /// Process a movement sample. Emits `MoveStart` exactly once when the
    /// threshold is first crossed, then `TouchMove` for this and every
    /// subsequent over-threshold sample. Sub-threshold jitter is absorbed.
    pub fn motion(&mut self, points: &[PointerPoint], source: PointerSource) -> GestureBatch {
        let mut batch = GestureBatch::new();
        if self.destroyed {
            return batch;
        }
        let Some(first) = points.first().copied() else {
            return batch;
        };
        let Some(session) = self.session.as_mut() else {
            return batch;
        };

        session.last = first;
        let dx = first.x - session.start.x;
        let dy = first.y - session.start.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < self.threshold {
            return batch;
        }

        let direction = GestureDirection::from_delta(dx, dy);
        let finger_data: PointSnapshot = points.iter().copied().collect();
        let template = GestureEvent {
            kind: GestureKind::TouchMove,
            x: first.x,
            y: first.y,
            dx,
            dy,
            direction: Some(direction),
            distance,
            duration_ms: None,
            source,
            fingers: points.len(),
            finger_data,
        };

        if !session.moved {
            session.moved = true;
            trace!(distance, ?direction, "gesture crossed movement threshold");
            batch.push(GestureEvent {
                kind: GestureKind::MoveStart,
                ..template.clone()
            });
        }
        batch.push(template);
        self.deliver(batch)
    }

    /// Release the contact. A session that never crossed the threshold and
    /// ended within it yields exactly one `Tap`; otherwise `Touchup`,
    /// `Swipe`, `MoveEnd`, and the matching directional swipe, in that
    /// order. The session is cleared either way.
    pub fn finish(&mut self, source: PointerSource, now_ms: u64) -> GestureBatch {
        let mut batch = GestureBatch::new();
        if self.destroyed {
            return batch;
        }
        let Some(session) = self.session.take() else {
            return batch;
        };

        let dx = session.last.x - session.start.x;
        let dy = session.last.y - session.start.y;
        let distance = (dx * dx + dy * dy).sqrt();
        let direction = GestureDirection::from_delta(dx, dy);
        let duration_ms = now_ms.saturating_sub(session.start_time_ms);

        let template = GestureEvent {
            kind: GestureKind::Tap,
            x: session.last.x,
            y: session.last.y,
            dx,
            dy,
            direction: Some(direction),
            distance,
            duration_ms: Some(duration_ms),
            source,
            fingers: session.fingers,
            finger_data: session.finger_data,
        };

        if !session.moved && distance < self.threshold {
            trace!(duration_ms, "tap");
            batch.push(template);
        } else {
            trace!(distance, ?direction, duration_ms, "swipe");
            batch.push(GestureEvent {
                kind: GestureKind::Touchup,
                ..template.clone()
            });
            batch.push(GestureEvent {
                kind: GestureKind::Swipe,
                ..template.clone()
            });
            batch.push(GestureEvent {
                kind: GestureKind::MoveEnd,
                ..template.clone()
            });
            batch.push(GestureEvent {
                kind: direction.swipe_kind(),
                ..template
            });
        }
        self.deliver(batch)
    }

    /// Drop the session without emitting anything (pointer cancel).
    pub fn cancel(&mut self) {
        self.session = None;
    }

    /// Whether a contact is currently being tracked.
    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// Detach all handlers and clear session state. Safe to call multiple
    /// times; a destroyed recognizer emits nothing.
    pub fn destroy(&mut self) {
        self.session = None;
        self.emitter.clear();
        self.destroyed = true;
    }

    fn deliver(&mut self, batch: GestureBatch) -> GestureBatch {
        for event in &batch {
            self.emitter.emit(event.kind, event);
        }
        batch
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

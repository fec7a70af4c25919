//! Book interaction controller
//!
//! Owns the lifecycle state machine (closed → opening → open → closing),
//! composes gesture output and page sequencing into transitions, drives the
//! free-spin animator, and emits the public event stream.
//!
//! Time is host-supplied: the frame loop calls [`BookController::pump`]
//! once per rendering frame, and pointer begin/end calls carry timestamps.
//! Every delayed effect is a cancellable timer entry; lifecycle-bound
//! timers carry an epoch token so a competing transition silently
//! invalidates them. Operations invoked in the wrong lifecycle state are
//! silent no-ops; stale or duplicate UI events are expected input, not
//! errors.

use tracing::debug;

use vellum_animation::{snap_right_angle, Rotation, RotationAnimator};
use vellum_core::emitter::{Emitter, HandlerId};
use vellum_core::gesture::{GestureBatch, GestureEvent, GestureKind, GestureRecognizer};
use vellum_core::input::{KeyCode, PointerPoint, PointerSource};

use crate::config::{BookOptions, BoundaryPolicy, OptionsError};
use crate::events::{BookEvent, BookEventKind};
use crate::focus::{self, BookId};
use crate::schedule::{TimerKind, TimerQueue};
use crate::sequencer::{self, PageStep};
use crate::state::{BookState, Lifecycle, RenderState};
use crate::ui::{self, UiModel};

/// Milliseconds the open/close transition takes to settle visually.
const SETTLE_MS: u64 = 1_000;
/// Delay between cascade-close steps.
const CASCADE_STEP_MS: u64 = 50;
/// Auto-advance interval for `play`.
const AUTO_PLAY_MS: u64 = 2_000;
/// How long after the last resize notification the resizing marker clears.
const RESIZE_SETTLE_MS: u64 = 200;
/// Pointer deltas are applied at half scale while drag-rotating.
const DRAG_ROTATE_FACTOR: f32 = 0.5;

/// The root interaction object for one book.
pub struct BookController {
    id: BookId,
    options: BookOptions,
    state: BookState,
    render: RenderState,
    events: Emitter<BookEventKind, BookEvent>,
    recognizer: GestureRecognizer,
    timers: TimerQueue,
    animator: RotationAnimator,
    /// Bumped by every lifecycle-changing operation; pending settle and
    /// cascade timers must still match it when they fire.
    epoch: u64,
    /// Last timestamp seen from the host; monotone.
    clock_ms: u64,
    /// Surface size for tap-side routing, `(width, height)`.
    surface: (f32, f32),
    /// Last pointer position while a drag rotates the closed book.
    drag_anchor: Option<PointerPoint>,
    enabled: bool,
    destroyed: bool,
}

impl BookController {
    pub fn new(options: BookOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        let rotation = Rotation::new(options.rotate_x, options.rotate_y, options.rotate_z);
        let recognizer = GestureRecognizer::with_threshold(options.swipe_threshold);
        let mut controller = Self {
            id: BookId::next(),
            state: BookState::new(options.pages, rotation),
            render: RenderState::new(options.pages, rotation),
            events: Emitter::new(),
            recognizer,
            timers: TimerQueue::new(),
            animator: RotationAnimator::new(),
            epoch: 0,
            clock_ms: 0,
            surface: (options.width, options.height),
            drag_anchor: None,
            enabled: true,
            destroyed: false,
            options,
        };
        controller.init();
        Ok(controller)
    }

    // ------------------------------------------------------------------
    // Subscription
    // ------------------------------------------------------------------

    /// Subscribe to one event kind; the returned handle unsubscribes.
    pub fn on<F>(&mut self, kind: BookEventKind, handler: F) -> HandlerId
    where
        F: FnMut(&BookEvent) + 'static,
    {
        self.events.on(kind, handler)
    }

    /// Subscribe to every event.
    pub fn on_any<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&BookEvent) + 'static,
    {
        self.events.on_any(handler)
    }

    /// Unsubscribe a handler.
    pub fn off(&mut self, id: HandlerId) -> bool {
        self.events.off(id)
    }

    // ------------------------------------------------------------------
    // Lifecycle operations
    // ------------------------------------------------------------------

    /// Reset to the configured initial state. Called by `new`; callable
    /// again at any time to re-initialize the instance.
    pub fn init(&mut self) {
        if self.destroyed {
            return;
        }
        self.emit(BookEvent::InitBefore);

        self.epoch += 1;
        self.timers.cancel_all();
        self.animator.stop();
        self.recognizer.cancel();

        let rotation = Rotation::new(
            self.options.rotate_x,
            self.options.rotate_y,
            self.options.rotate_z,
        );
        self.state = BookState::new(self.options.pages, rotation);
        self.render = RenderState::new(self.options.pages, rotation);
        self.drag_anchor = None;
        self.enabled = true;
        self.surface = (self.options.width, self.options.height);

        self.emit(BookEvent::Resize {
            width: self.surface.0,
            height: self.surface.1,
        });
        self.update_ui();
        self.emit(BookEvent::Init);
        self.emit(BookEvent::InitAfter);
    }

    /// Tear the instance down: cancel every pending timer and the spin
    /// loop, release focus, detach all listeners. Any further operation or
    /// input is a silent no-op.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        debug!("destroy");
        self.epoch += 1;
        self.timers.cancel_all();
        self.animator.stop();
        self.recognizer.destroy();
        focus::release(self.id);
        self.emit(BookEvent::Destroy);
        self.events.clear();
        self.destroyed = true;
    }

    /// Re-attach gesture/button/keyboard routing.
    pub fn enable(&mut self) {
        if self.destroyed {
            return;
        }
        self.enabled = true;
        self.emit(BookEvent::Enable);
    }

    /// Detach gesture/button/keyboard routing without altering the
    /// lifecycle. Pending timers and the spin loop are cancelled; a
    /// transient opening/closing state settles immediately so re-enabling
    /// never resumes from a stranded transition.
    pub fn disable(&mut self) {
        if self.destroyed {
            return;
        }
        match self.state.lifecycle {
            Lifecycle::Opening => {
                self.state.lifecycle = Lifecycle::Open;
                self.sync_render();
            }
            Lifecycle::Closing => self.finalize_close(),
            _ => {}
        }
        self.state.cascade_closing = false;
        self.state.dragging = false;
        self.render.dragging = false;
        self.animator.stop();
        self.recognizer.cancel();
        self.timers.cancel_all();
        self.enabled = false;
        self.emit(BookEvent::Disable);
    }

    /// Open the book to page 0. Legal from `Closed`, or from `Closing`:
    /// reopening before a pending close finalizes suppresses that
    /// finalization via the epoch token.
    pub fn open(&mut self) {
        if self.destroyed
            || !matches!(self.state.lifecycle, Lifecycle::Closed | Lifecycle::Closing)
        {
            return;
        }
        debug!(from = ?self.state.lifecycle, "open");
        self.animator.stop();
        self.emit(BookEvent::BookOpenBefore);

        self.epoch += 1;
        self.timers.cancel_kind(TimerKind::SettleClose);
        self.state.lifecycle = Lifecycle::Opening;
        self.state.current_page = 0;
        self.state.rotation = Rotation::NEUTRAL;
        self.render.flipped = sequencer::flip_flags(0, self.state.page_count);
        self.sync_render();
        self.timers.schedule(
            TimerKind::SettleOpen,
            self.clock_ms + SETTLE_MS,
            Some(self.epoch),
        );

        self.update_ui();
        self.emit(BookEvent::BookOpen);
    }

    /// Close the book directly. Legal only from `Open`; finalizes after the
    /// settle duration.
    pub fn close(&mut self) {
        if self.destroyed || !self.state.lifecycle.is_open() {
            return;
        }
        debug!("close");
        self.emit(BookEvent::BookCloseBefore);

        self.epoch += 1;
        self.state.lifecycle = Lifecycle::Closing;
        self.state.current_page = -1;
        self.state.cascade_closing = false;
        self.state.rotation = Rotation::NEUTRAL;
        self.render.flipped = sequencer::flip_flags(0, self.state.page_count);
        self.sync_render();
        self.timers.schedule(
            TimerKind::SettleClose,
            self.clock_ms + SETTLE_MS,
            Some(self.epoch),
        );

        self.update_ui();
        self.emit(BookEvent::BookClose);
    }

    fn finalize_close(&mut self) {
        debug!("close finalized");
        self.state.lifecycle = Lifecycle::Closed;
        self.state.current_page = -1;
        self.render.z_orders = sequencer::closed_z_orders(self.state.page_count);
        self.sync_render();
        self.emit(BookEvent::BookCloseAfter);
    }

    // ------------------------------------------------------------------
    // Paging
    // ------------------------------------------------------------------

    /// Flip to an absolute page. Out-of-range requests clamp into
    /// `[0, page_count - 1]`. Legal only while `Open`.
    pub fn page_to(&mut self, page: i32) {
        if self.destroyed || !self.state.lifecycle.is_open() {
            return;
        }
        let page = sequencer::clamp(page, self.state.page_count);
        self.state.current_page = page as i32;
        self.emit(BookEvent::PageFlipBefore { page });

        // Lift the turning sheet above everything flipped before it.
        self.state.stack_counter += 1;
        if let Some((sheet, z)) = sequencer::lift(page, self.state.stack_counter) {
            self.render.z_orders[sheet] = z;
        }
        self.render.flipped = sequencer::flip_flags(page, self.state.page_count);
        self.sync_render();

        if self.state.cascade_closing {
            self.timers.schedule(
                TimerKind::CascadeStep,
                self.clock_ms + CASCADE_STEP_MS,
                Some(self.epoch),
            );
        }

        self.update_ui();
        self.emit(BookEvent::PageFlip { page });
        self.emit(BookEvent::PageFlipAfter { page });
    }

    /// Flip one page forward or backward. At the boundaries the configured
    /// policy decides between a cascade close and staying put; either way
    /// the boundary event fires and `current_page` is unchanged.
    pub fn page(&mut self, direction: i32) {
        if self.destroyed || !self.state.lifecycle.is_open() {
            return;
        }
        match sequencer::step(self.state.current_page, self.state.page_count, direction) {
            PageStep::Advance(page) => self.page_to(page as i32),
            PageStep::LastBoundary => {
                if self.options.page_click_last == BoundaryPolicy::Close {
                    self.close_pages();
                }
                self.emit(BookEvent::ClickPageLast);
            }
            PageStep::FirstBoundary => {
                if self.options.page_click_first == BoundaryPolicy::Close {
                    self.close_pages();
                }
                self.emit(BookEvent::ClickPageFirst);
            }
        }
    }

    pub fn page_next(&mut self) {
        self.page(1);
    }

    pub fn page_prev(&mut self) {
        self.page(-1);
    }

    /// Walk the book closed page by page: a self-driving discrete
    /// animation, each step observable through the normal page-flip events.
    pub fn close_pages(&mut self) {
        if self.destroyed || !self.state.lifecycle.is_open() {
            return;
        }
        self.state.cascade_closing = true;
        if self.state.current_page > 0 {
            self.page(-1);
        } else {
            self.state.cascade_closing = false;
            self.close();
        }
    }

    fn cascade_step(&mut self) {
        if self.state.cascade_closing && self.state.lifecycle.is_open() {
            self.close_pages();
        }
    }

    // ------------------------------------------------------------------
    // Rotation
    // ------------------------------------------------------------------

    /// Start a free spin with per-tick velocities. Legal only while
    /// `Closed` and not already spinning. With `looping = false` this is a
    /// single nudge applied immediately; with `looping = true` the spin
    /// continues every pumped frame until [`BookController::rotate_stop`]
    /// or a lifecycle change.
    pub fn rotate_by(&mut self, velocity_x: f32, velocity_y: f32, looping: bool) {
        if self.destroyed || !self.state.lifecycle.is_closed() || self.animator.is_active() {
            return;
        }
        self.animator.start(velocity_x, velocity_y, looping);
        self.animator.tick(&mut self.state.rotation);
        self.sync_render();
    }

    /// Clear the free-spin flag; idempotent.
    pub fn rotate_stop(&mut self) {
        if self.destroyed {
            return;
        }
        self.animator.stop();
    }

    /// Set absolute angles directly, no snapping. Legal only while
    /// `Closed`; stops any active spin first.
    pub fn rotate_to(&mut self, x: Option<f32>, y: Option<f32>) {
        if self.destroyed || !self.state.lifecycle.is_closed() {
            return;
        }
        self.animator.stop();
        if let Some(x) = x {
            self.state.rotation.x = x;
        }
        if let Some(y) = y {
            self.state.rotation.y = y;
        }
        self.sync_render();
    }

    /// Snap the current angle up to the next right angle, then add the
    /// requested delta, so repeated 90° nudges always land on clean
    /// quarter-turn boundaries regardless of prior free-drag rotation.
    pub fn rotate_to_angle(&mut self, x: Option<f32>, y: Option<f32>) {
        if self.destroyed || !self.state.lifecycle.is_closed() {
            return;
        }
        self.animator.stop();
        if let Some(dx) = x {
            self.state.rotation.x = snap_right_angle(self.state.rotation.x) + dx;
        }
        if let Some(dy) = y {
            self.state.rotation.y = snap_right_angle(self.state.rotation.y) + dy;
        }
        self.sync_render();
    }

    /// Quarter-turn nudge to the left around the vertical axis.
    pub fn rotate_left(&mut self) {
        self.rotate_to_angle(None, Some(-90.0));
    }

    /// Quarter-turn nudge to the right around the vertical axis.
    pub fn rotate_right(&mut self) {
        self.rotate_to_angle(None, Some(90.0));
    }

    // ------------------------------------------------------------------
    // Auto-play, fullscreen, focus
    // ------------------------------------------------------------------

    /// Auto-advance one page every fixed interval until `stop`.
    pub fn play(&mut self) {
        if self.destroyed {
            return;
        }
        self.timers.cancel_kind(TimerKind::AutoPlay);
        self.timers
            .schedule(TimerKind::AutoPlay, self.clock_ms + AUTO_PLAY_MS, None);
        self.emit(BookEvent::Play);
    }

    /// Cancel auto-advance.
    pub fn stop(&mut self) {
        if self.destroyed {
            return;
        }
        self.timers.cancel_kind(TimerKind::AutoPlay);
        self.emit(BookEvent::Stop);
    }

    /// Ask the host to enter fullscreen presentation.
    pub fn fullscreen(&mut self) {
        if self.destroyed {
            return;
        }
        self.emit(BookEvent::Fullscreen);
    }

    /// Claim keyboard focus for this instance, detaching the previous
    /// holder.
    pub fn activate(&mut self) {
        if self.destroyed {
            return;
        }
        let previous = focus::acquire(self.id);
        if let Some(previous) = previous {
            debug!(?previous, "focus reassigned");
        }
        self.emit(BookEvent::Active);
    }

    // ------------------------------------------------------------------
    // External chrome
    // ------------------------------------------------------------------

    /// Right/next button.
    pub fn press_next(&mut self) {
        if self.destroyed || !self.enabled {
            return;
        }
        self.emit(BookEvent::ButtonNextClick);
        if self.state.lifecycle.is_open() {
            self.page(1);
        } else {
            self.rotate_to_angle(None, Some(90.0));
        }
    }

    /// Left/prev button.
    pub fn press_prev(&mut self) {
        if self.destroyed || !self.enabled {
            return;
        }
        self.emit(BookEvent::ButtonPrevClick);
        if self.state.lifecycle.is_open() {
            self.page(-1);
        } else {
            self.rotate_to_angle(None, Some(-90.0));
        }
    }

    /// Pagination bullet click: opens a closed book, then navigates.
    pub fn select_page(&mut self, page: i32) {
        if self.destroyed || !self.enabled {
            return;
        }
        if self.state.lifecycle.is_closed() {
            self.open();
        }
        self.page_to(page);
    }

    /// The host surface changed size. Updates tap-side routing and raises
    /// the resizing marker until notifications settle.
    pub fn notify_resize(&mut self, width: f32, height: f32) {
        if self.destroyed {
            return;
        }
        self.surface = (width, height);
        self.render.resizing = true;
        self.timers.cancel_kind(TimerKind::ResizeSettle);
        self.timers.schedule(
            TimerKind::ResizeSettle,
            self.clock_ms + RESIZE_SETTLE_MS,
            None,
        );
        self.emit(BookEvent::Resize { width, height });
    }

    /// Keyboard routing. Only the focus-holding instance reacts.
    pub fn key_input(&mut self, key: KeyCode) {
        if self.destroyed || !self.enabled || !focus::is_holder(self.id) {
            return;
        }
        match key {
            KeyCode::ENTER => {
                if self.state.lifecycle.is_closed() {
                    self.open();
                } else {
                    self.close();
                }
            }
            KeyCode::SPACE => {
                if self.state.lifecycle.is_open() {
                    self.close();
                } else {
                    self.open();
                }
            }
            KeyCode::RIGHT => {
                if self.state.lifecycle.is_open() {
                    self.page(1);
                } else {
                    self.rotate_to_angle(None, Some(90.0));
                }
            }
            KeyCode::LEFT => {
                if self.state.lifecycle.is_open() {
                    self.page(-1);
                } else {
                    self.rotate_to_angle(None, Some(-90.0));
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, points: &[PointerPoint], source: PointerSource, now_ms: u64) {
        if self.destroyed || !self.enabled {
            return;
        }
        self.bump_clock(now_ms);
        let batch = self.recognizer.begin(points, source, now_ms);
        self.route_gestures(batch);
    }

    pub fn pointer_move(&mut self, points: &[PointerPoint], source: PointerSource) {
        if self.destroyed || !self.enabled {
            return;
        }
        let batch = self.recognizer.motion(points, source);
        self.route_gestures(batch);
    }

    pub fn pointer_up(&mut self, source: PointerSource, now_ms: u64) {
        if self.destroyed || !self.enabled {
            return;
        }
        self.bump_clock(now_ms);
        let batch = self.recognizer.finish(source, now_ms);
        self.route_gestures(batch);
    }

    /// The platform cancelled the contact (system gesture, window blur).
    pub fn pointer_cancel(&mut self) {
        if self.destroyed {
            return;
        }
        self.recognizer.cancel();
        self.drag_anchor = None;
        self.state.dragging = false;
        self.render.dragging = false;
    }

    fn route_gestures(&mut self, batch: GestureBatch) {
        for event in batch {
            match event.kind {
                GestureKind::Touchdown => {
                    self.drag_anchor = Some(PointerPoint::new(event.x, event.y));
                    self.emit(BookEvent::TouchStart(event));
                }
                GestureKind::MoveStart => {
                    self.state.dragging = true;
                    self.render.dragging = true;
                }
                GestureKind::TouchMove => {
                    self.drag_rotate(&event);
                    self.drag_anchor = Some(PointerPoint::new(event.x, event.y));
                    self.emit(BookEvent::TouchMove(event));
                }
                GestureKind::MoveEnd => {
                    self.state.dragging = false;
                    self.render.dragging = false;
                    self.drag_anchor = None;
                    self.emit(BookEvent::TouchEnd);
                }
                GestureKind::Tap => self.route_tap(event),
                GestureKind::SwipeLeft => {
                    if self.state.lifecycle.is_open() && self.options.page_swipe {
                        self.emit(BookEvent::SwipeLeft(event));
                        self.page(1);
                    }
                }
                GestureKind::SwipeRight => {
                    if self.state.lifecycle.is_open() && self.options.page_swipe {
                        self.emit(BookEvent::SwipeRight(event));
                        self.page(-1);
                    }
                }
                GestureKind::Touchup | GestureKind::Swipe | GestureKind::SwipeUp
                | GestureKind::SwipeDown => {}
            }
        }
    }

    /// Free rotation proportional to the pointer delta while the closed
    /// book is dragged.
    fn drag_rotate(&mut self, event: &GestureEvent) {
        if !self.state.dragging || !self.state.lifecycle.is_closed() {
            return;
        }
        let Some(anchor) = self.drag_anchor else {
            return;
        };
        let dx = event.x - anchor.x;
        let dy = event.y - anchor.y;
        if self.options.book_rotate_x {
            self.state.rotation.y += dx * DRAG_ROTATE_FACTOR;
        }
        if self.options.book_rotate_y {
            self.state.rotation.x -= dy * DRAG_ROTATE_FACTOR;
        }
        self.sync_render();
    }

    fn route_tap(&mut self, event: GestureEvent) {
        self.emit(BookEvent::Click(event.clone()));
        match self.state.lifecycle {
            Lifecycle::Open => {
                if self.options.page_click {
                    let center = self.surface.0 / 2.0;
                    if event.x > center {
                        self.emit(BookEvent::PageNextClick(event));
                        self.page(1);
                    } else {
                        self.emit(BookEvent::PagePrevClick(event));
                        self.page(-1);
                    }
                }
            }
            Lifecycle::Closed => {
                if self.options.book_click {
                    self.open();
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Frame pump
    // ------------------------------------------------------------------

    /// Advance scheduled work to `now_ms` and apply one free-spin tick.
    /// The host calls this once per rendering frame.
    pub fn pump(&mut self, now_ms: u64) {
        if self.destroyed {
            return;
        }
        self.bump_clock(now_ms);

        for timer in self.timers.drain_due(now_ms) {
            if let Some(epoch) = timer.epoch {
                if epoch != self.epoch {
                    debug!(kind = ?timer.kind, "dropping stale timer");
                    continue;
                }
            }
            match timer.kind {
                TimerKind::SettleOpen => {
                    if self.state.lifecycle == Lifecycle::Opening {
                        self.state.lifecycle = Lifecycle::Open;
                        self.sync_render();
                    }
                }
                TimerKind::SettleClose => {
                    if self.state.lifecycle == Lifecycle::Closing {
                        self.finalize_close();
                    }
                }
                TimerKind::CascadeStep => self.cascade_step(),
                TimerKind::AutoPlay => {
                    self.page_next();
                    self.timers
                        .schedule(TimerKind::AutoPlay, self.clock_ms + AUTO_PLAY_MS, None);
                }
                TimerKind::ResizeSettle => {
                    self.render.resizing = false;
                }
            }
        }

        if self.animator.is_active() {
            if self.state.lifecycle.is_closed() {
                self.animator.tick(&mut self.state.rotation);
                self.sync_render();
            } else {
                // A lifecycle change invalidates the loop flag.
                self.animator.stop();
            }
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle
    }

    pub fn current_page(&self) -> i32 {
        self.state.current_page
    }

    pub fn page_count(&self) -> u32 {
        self.state.page_count
    }

    pub fn rotation(&self) -> Rotation {
        self.state.rotation
    }

    pub fn options(&self) -> &BookOptions {
        &self.options
    }

    /// Snapshot for the host renderer.
    pub fn render_state(&self) -> &RenderState {
        &self.render
    }

    /// Pagination/pageing chrome for the current page position.
    pub fn ui_model(&self) -> UiModel {
        ui::ui_model(
            self.state.current_page,
            self.state.page_count,
            self.options.ui_pagination_limit,
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of outstanding scheduled callbacks; must be zero after
    /// `disable` or `destroy`.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_free_spinning(&self) -> bool {
        self.animator.is_active()
    }

    pub fn is_cascade_closing(&self) -> bool {
        self.state.cascade_closing
    }

    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn bump_clock(&mut self, now_ms: u64) {
        if now_ms > self.clock_ms {
            self.clock_ms = now_ms;
        }
    }

    fn sync_render(&mut self) {
        self.render.lifecycle = self.state.lifecycle;
        self.render.current_page = self.state.current_page;
        self.render.rotation = self.state.rotation;
    }

    fn update_ui(&mut self) {
        self.emit(BookEvent::UpdateUi {
            current_index: self.state.current_page,
        });
    }

    fn emit(&mut self, event: BookEvent) {
        self.events.emit(event.kind(), &event);
    }
}

impl Drop for BookController {
    fn drop(&mut self) {
        focus::release(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn book() -> BookController {
        BookController::new(BookOptions::default()).unwrap()
    }

    fn book_with(pages: u32) -> BookController {
        let options = BookOptions {
            pages,
            ..BookOptions::default()
        };
        BookController::new(options).unwrap()
    }

    fn open_book(pages: u32) -> BookController {
        let mut controller = book_with(pages);
        controller.open();
        controller.pump(SETTLE_MS);
        assert_eq!(controller.lifecycle(), Lifecycle::Open);
        controller
    }

    fn record(controller: &mut BookController) -> Rc<RefCell<Vec<BookEventKind>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        controller.on_any(move |event| sink.borrow_mut().push(event.kind()));
        log
    }

    #[test]
    fn test_open_transitions_through_opening() {
        let mut controller = book();
        let log = record(&mut controller);

        controller.open();
        assert_eq!(controller.lifecycle(), Lifecycle::Opening);
        assert_eq!(controller.current_page(), 0);

        controller.pump(SETTLE_MS);
        assert_eq!(controller.lifecycle(), Lifecycle::Open);
        assert_eq!(
            *log.borrow(),
            vec![
                BookEventKind::BookOpenBefore,
                BookEventKind::UpdateUi,
                BookEventKind::BookOpen,
            ]
        );
    }

    #[test]
    fn test_open_is_noop_unless_closed_or_closing() {
        let mut controller = open_book(20);
        let log = record(&mut controller);
        controller.open();
        assert!(log.borrow().is_empty());
        assert_eq!(controller.lifecycle(), Lifecycle::Open);
    }

    #[test]
    fn test_close_is_noop_unless_open() {
        let mut controller = book();
        let log = record(&mut controller);
        controller.close();
        assert!(log.borrow().is_empty());
        assert_eq!(controller.lifecycle(), Lifecycle::Closed);
    }

    #[test]
    fn test_close_emits_and_finalizes() {
        let mut controller = open_book(20);
        let log = record(&mut controller);

        controller.close();
        assert_eq!(controller.lifecycle(), Lifecycle::Closing);
        assert_eq!(controller.current_page(), -1);
        assert_eq!(controller.rotation(), Rotation::NEUTRAL);

        controller.pump(2 * SETTLE_MS);
        assert_eq!(controller.lifecycle(), Lifecycle::Closed);
        assert_eq!(
            *log.borrow(),
            vec![
                BookEventKind::BookCloseBefore,
                BookEventKind::UpdateUi,
                BookEventKind::BookClose,
                BookEventKind::BookCloseAfter,
            ]
        );
        // Closed stacking restored.
        assert_eq!(
            controller.render_state().z_orders,
            sequencer::closed_z_orders(20)
        );
    }

    #[test]
    fn test_reopen_suppresses_pending_close_finalization() {
        let mut controller = open_book(20);
        controller.close();
        assert_eq!(controller.lifecycle(), Lifecycle::Closing);

        // Re-entrant open before the close settle fires.
        controller.open();
        assert_eq!(controller.lifecycle(), Lifecycle::Opening);

        controller.pump(10 * SETTLE_MS);
        assert_eq!(controller.lifecycle(), Lifecycle::Open);
    }

    #[test]
    fn test_page_to_clamps() {
        let mut controller = open_book(10);
        controller.page_to(99);
        assert_eq!(controller.current_page(), 9);
        controller.page_to(-7);
        assert_eq!(controller.current_page(), 0);
    }

    #[test]
    fn test_page_navigation_noop_while_not_open() {
        let mut controller = book();
        controller.page_to(3);
        assert_eq!(controller.current_page(), -1);

        controller.open();
        // Still opening: navigation stays a no-op until the settle.
        controller.page(1);
        assert_eq!(controller.current_page(), 0);
    }

    #[test]
    fn test_flip_flags_and_lifted_sheet() {
        let mut controller = open_book(10);
        controller.page_to(3);

        let render = controller.render_state();
        assert_eq!(&render.flipped[..4], &[true, true, true, false]);
        // The lifted sheet carries the freshest stacking value.
        let lifted = render.z_orders[2];
        assert!(render.z_orders.iter().all(|z| *z <= lifted));
    }

    #[test]
    fn test_stack_counter_never_reused() {
        let mut controller = open_book(10);
        controller.page_to(1);
        let first = controller.render_state().z_orders[0];
        controller.page_to(2);
        controller.page_to(1);
        let second = controller.render_state().z_orders[0];
        assert!(second > first);
    }

    #[test]
    fn test_boundary_policy_none_stays_put() {
        let options = BookOptions {
            pages: 5,
            page_click_last: BoundaryPolicy::None,
            ..BookOptions::default()
        };
        let mut controller = BookController::new(options).unwrap();
        controller.open();
        controller.pump(SETTLE_MS);
        controller.page_to(4);

        let log = record(&mut controller);
        controller.page(1);
        assert_eq!(*log.borrow(), vec![BookEventKind::ClickPageLast]);
        assert_eq!(controller.current_page(), 4);
        assert!(!controller.is_cascade_closing());
    }

    #[test]
    fn test_rotate_to_angle_snap_then_add() {
        let mut controller = book();
        controller.rotate_to_angle(None, Some(90.0));
        controller.rotate_to_angle(None, Some(90.0));
        assert_eq!(controller.rotation().y, 180.0);

        // From a dragged angle the snap realigns first.
        controller.rotate_to(None, Some(200.5));
        controller.rotate_to_angle(None, Some(90.0));
        assert_eq!(controller.rotation().y, 360.0);
    }

    #[test]
    fn test_rotation_noop_unless_closed() {
        let mut controller = open_book(10);
        controller.rotate_to(Some(45.0), Some(45.0));
        controller.rotate_by(5.0, 0.0, true);
        assert_eq!(controller.rotation(), Rotation::NEUTRAL);
        assert!(!controller.is_free_spinning());
    }

    #[test]
    fn test_free_spin_loops_until_stop() {
        let mut controller = book();
        controller.rotate_by(10.0, 0.0, true);
        // Starting applies the first tick immediately.
        assert_eq!(controller.rotation().x, 10.0);

        controller.pump(16);
        controller.pump(32);
        assert_eq!(controller.rotation().x, 30.0);

        controller.rotate_stop();
        controller.pump(48);
        assert_eq!(controller.rotation().x, 30.0);
    }

    #[test]
    fn test_nudge_spin_applies_once() {
        let mut controller = book();
        controller.rotate_by(0.0, 15.0, false);
        assert_eq!(controller.rotation().y, 15.0);
        controller.pump(16);
        assert_eq!(controller.rotation().y, 15.0);
    }

    #[test]
    fn test_open_cancels_free_spin() {
        let mut controller = book();
        controller.rotate_by(10.0, 0.0, true);
        controller.open();
        assert!(!controller.is_free_spinning());
        assert_eq!(controller.rotation(), Rotation::NEUTRAL);
    }

    #[test]
    fn test_destroy_silences_everything() {
        let mut controller = book();
        let log = record(&mut controller);
        controller.destroy();
        assert_eq!(*log.borrow(), vec![BookEventKind::Destroy]);

        controller.open();
        controller.pointer_down(
            &[PointerPoint::new(10.0, 10.0)],
            PointerSource::Touch,
            0,
        );
        controller.pointer_up(PointerSource::Touch, 50);
        controller.pump(10_000);
        controller.destroy();

        assert_eq!(*log.borrow(), vec![BookEventKind::Destroy]);
        assert_eq!(controller.lifecycle(), Lifecycle::Closed);
    }

    #[test]
    fn test_disable_detaches_input_and_cancels_timers() {
        let mut controller = book();
        controller.open();
        assert_eq!(controller.lifecycle(), Lifecycle::Opening);

        controller.disable();
        // The pending settle resolved synchronously rather than leaking.
        assert_eq!(controller.lifecycle(), Lifecycle::Open);
        assert!(!controller.is_enabled());

        // Input routing is detached; the lifecycle is untouched.
        controller.pointer_down(&[PointerPoint::new(10.0, 10.0)], PointerSource::Touch, 0);
        controller.pointer_up(PointerSource::Touch, 30);
        assert_eq!(controller.lifecycle(), Lifecycle::Open);

        controller.enable();
        assert!(controller.is_enabled());
    }

    #[test]
    fn test_tap_routing_by_side() {
        let mut controller = open_book(10);
        controller.page_to(4);

        // Default surface width is 210; right of center pages forward.
        controller.pointer_down(&[PointerPoint::new(180.0, 50.0)], PointerSource::Mouse, 0);
        controller.pointer_up(PointerSource::Mouse, 40);
        assert_eq!(controller.current_page(), 5);

        controller.pointer_down(&[PointerPoint::new(20.0, 50.0)], PointerSource::Mouse, 100);
        controller.pointer_up(PointerSource::Mouse, 140);
        assert_eq!(controller.current_page(), 4);
    }

    #[test]
    fn test_tap_opens_closed_book() {
        let mut controller = book();
        controller.pointer_down(&[PointerPoint::new(10.0, 10.0)], PointerSource::Touch, 0);
        controller.pointer_up(PointerSource::Touch, 60);
        assert_eq!(controller.lifecycle(), Lifecycle::Opening);
    }

    #[test]
    fn test_swipe_pages_forward_and_back() {
        let mut controller = open_book(10);
        controller.page_to(4);

        controller.pointer_down(&[PointerPoint::new(150.0, 50.0)], PointerSource::Touch, 0);
        controller.pointer_move(&[PointerPoint::new(60.0, 52.0)], PointerSource::Touch);
        controller.pointer_up(PointerSource::Touch, 90);
        assert_eq!(controller.current_page(), 5);

        controller.pointer_down(&[PointerPoint::new(60.0, 50.0)], PointerSource::Touch, 200);
        controller.pointer_move(&[PointerPoint::new(150.0, 52.0)], PointerSource::Touch);
        controller.pointer_up(PointerSource::Touch, 290);
        assert_eq!(controller.current_page(), 4);
    }

    #[test]
    fn test_drag_rotates_closed_book_at_half_scale() {
        let mut controller = book();
        controller.pointer_down(&[PointerPoint::new(100.0, 100.0)], PointerSource::Mouse, 0);
        controller.pointer_move(&[PointerPoint::new(140.0, 100.0)], PointerSource::Mouse);
        assert!(controller.is_dragging());
        assert!(controller.render_state().dragging);
        assert_eq!(controller.rotation().y, 20.0);

        controller.pointer_move(&[PointerPoint::new(140.0, 60.0)], PointerSource::Mouse);
        assert_eq!(controller.rotation().x, 20.0);

        controller.pointer_up(PointerSource::Mouse, 100);
        assert!(!controller.is_dragging());
        assert!(!controller.render_state().dragging);
    }

    #[test]
    fn test_drag_does_not_rotate_open_book() {
        let options = BookOptions {
            page_swipe: false,
            ..BookOptions::default()
        };
        let mut controller = BookController::new(options).unwrap();
        controller.open();
        controller.pump(SETTLE_MS);
        controller.pointer_down(&[PointerPoint::new(100.0, 100.0)], PointerSource::Mouse, 0);
        controller.pointer_move(&[PointerPoint::new(160.0, 100.0)], PointerSource::Mouse);
        controller.pointer_up(PointerSource::Mouse, 80);
        assert_eq!(controller.rotation(), Rotation::NEUTRAL);
    }

    #[test]
    fn test_auto_play_advances_until_stop() {
        // The clock sits at SETTLE_MS after opening; intervals count from
        // the play call.
        let mut controller = open_book(10);
        controller.play();

        controller.pump(SETTLE_MS + AUTO_PLAY_MS);
        assert_eq!(controller.current_page(), 1);
        controller.pump(SETTLE_MS + 2 * AUTO_PLAY_MS);
        assert_eq!(controller.current_page(), 2);

        controller.stop();
        controller.pump(SETTLE_MS + 9 * AUTO_PLAY_MS);
        assert_eq!(controller.current_page(), 2);
    }

    #[test]
    fn test_resize_marker_settles() {
        let mut controller = book();
        controller.pump(1_000);
        controller.notify_resize(400.0, 600.0);
        assert!(controller.render_state().resizing);

        controller.pump(1_000 + RESIZE_SETTLE_MS);
        assert!(!controller.render_state().resizing);
        assert_eq!(controller.surface, (400.0, 600.0));
    }

    #[test]
    fn test_init_resets_state() {
        let mut controller = open_book(10);
        controller.page_to(5);

        controller.init();
        assert_eq!(controller.lifecycle(), Lifecycle::Closed);
        assert_eq!(controller.current_page(), -1);
        assert_eq!(controller.rotation(), Rotation::NEUTRAL);
        assert!(controller.is_enabled());
    }

    #[test]
    fn test_select_page_opens_first() {
        let mut controller = book();
        controller.select_page(3);
        // The book opens to page 0; the jump waits for the settle per the
        // four-state machine.
        assert_eq!(controller.lifecycle(), Lifecycle::Opening);
        assert_eq!(controller.current_page(), 0);

        controller.pump(SETTLE_MS);
        controller.select_page(3);
        assert_eq!(controller.current_page(), 3);
    }
}

//! Book state
//!
//! [`BookState`] is the single source of truth inside the controller;
//! [`RenderState`] is the snapshot the host renderer consumes. Both are
//! created on `init()` and discarded on `destroy()`, and mutated only
//! through the controller's operations.

use vellum_animation::Rotation;

use crate::sequencer;

/// The book's macro mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Closed,
    /// Transient; auto-expires to `Open` after the visual settle duration.
    Opening,
    Open,
    /// Transient; auto-expires to `Closed` after the visual settle duration.
    Closing,
}

impl Lifecycle {
    /// Page navigation is legal only here.
    pub fn is_open(self) -> bool {
        matches!(self, Lifecycle::Open)
    }

    /// Rotation operations are legal only here.
    pub fn is_closed(self) -> bool {
        matches!(self, Lifecycle::Closed)
    }
}

/// Mutable interaction state for one book instance.
#[derive(Debug, Clone)]
pub struct BookState {
    pub lifecycle: Lifecycle,
    /// `-1` means no page selected; valid only while not open.
    pub current_page: i32,
    /// Fixed per configuration, at least 1.
    pub page_count: u32,
    pub rotation: Rotation,
    /// True only during the automated backward page walk.
    pub cascade_closing: bool,
    /// True between a drag start and its matching drag end.
    pub dragging: bool,
    /// Monotonically increasing z assignment for lifted pages; never reused
    /// within a session so rapid flips cannot collide.
    pub stack_counter: u64,
}

impl BookState {
    pub fn new(page_count: u32, rotation: Rotation) -> Self {
        Self {
            lifecycle: Lifecycle::Closed,
            current_page: -1,
            page_count,
            rotation,
            cascade_closing: false,
            dragging: false,
            // Starts above the closed stacking range so a lifted sheet
            // always renders over settled ones.
            stack_counter: u64::from(page_count),
        }
    }
}

/// What the renderer needs to visually reflect the book. The controller
/// issues these as side effects alongside each emitted event and never
/// inspects rendered output.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub lifecycle: Lifecycle,
    pub current_page: i32,
    pub rotation: Rotation,
    /// One flag per interior sheet; sheet `i` lies flipped to the left when
    /// true.
    pub flipped: Vec<bool>,
    /// One stacking order per interior sheet.
    pub z_orders: Vec<u64>,
    /// Suppress transition animation while the pointer drags the book.
    pub dragging: bool,
    /// Suppress transition animation while the surface is being resized.
    pub resizing: bool,
}

impl RenderState {
    pub fn new(page_count: u32, rotation: Rotation) -> Self {
        let sheets = sequencer::sheet_count(page_count);
        Self {
            lifecycle: Lifecycle::Closed,
            current_page: -1,
            rotation,
            flipped: vec![false; sheets],
            z_orders: sequencer::closed_z_orders(page_count),
            dragging: false,
            resizing: false,
        }
    }
}

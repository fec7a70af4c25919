//! Pointer and keyboard input model
//!
//! Raw platform input arrives either as a touch-point list or as a single
//! mouse position. Both are normalized to a `&[PointerPoint]` slice before
//! the gesture recognizer sees them, so downstream logic is
//! input-source-agnostic.

use smallvec::SmallVec;

/// A normalized pointer sample in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPoint {
    pub x: f32,
    pub y: f32,
}

impl PointerPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Where a pointer sample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Touch,
    Mouse,
}

impl PointerSource {
    pub const fn is_touch(self) -> bool {
        matches!(self, PointerSource::Touch)
    }
}

/// Snapshot of every active pointer; inline for the common one/two-finger case.
pub type PointSnapshot = SmallVec<[PointerPoint; 2]>;

/// Wrap a single mouse position as a one-element point list.
pub fn mouse_point(x: f32, y: f32) -> PointSnapshot {
    let mut points = PointSnapshot::new();
    points.push(PointerPoint::new(x, y));
    points
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const BACKSPACE: KeyCode = KeyCode(0x08);
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);

    // Arrow keys
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    // Navigation keys
    pub const HOME: KeyCode = KeyCode(0x24);
    pub const END: KeyCode = KeyCode(0x23);

    // Unknown/unmapped key
    pub const UNKNOWN: KeyCode = KeyCode(0);
}

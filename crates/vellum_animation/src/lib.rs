//! Vellum Animation System
//!
//! Rotation state and the free-spin animator for the closed book.
//!
//! # Features
//!
//! - **Rotation**: per-axis angles in degrees with modulo-360 wrapping
//! - **Angle Snapping**: quarter-turn alignment for 90°-nudge operations
//! - **Free Spin**: per-frame velocity integration, interruptible at any tick

pub mod animator;
pub mod rotation;

pub use animator::RotationAnimator;
pub use rotation::{snap_right_angle, Rotation};

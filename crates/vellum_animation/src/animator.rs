//! Free-spin animator
//!
//! Drives continuous rotation one update per rendering frame. The host's
//! frame loop calls [`RotationAnimator::tick`]; the animator never schedules
//! itself, so stopping it is synchronous and cannot leak a callback.

use tracing::debug;

use crate::rotation::Rotation;

/// Per-frame rotation integrator for the closed book's free spin.
///
/// `looping = false` is a single nudge: the spin deactivates after one
/// tick's worth of motion. `looping = true` keeps adding the velocity every
/// tick until [`RotationAnimator::stop`] or an external invalidation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationAnimator {
    velocity_x: f32,
    velocity_y: f32,
    looping: bool,
    active: bool,
}

impl RotationAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a spin with per-tick angular velocities for the x and y axes.
    pub fn start(&mut self, velocity_x: f32, velocity_y: f32, looping: bool) {
        debug!(velocity_x, velocity_y, looping, "free spin start");
        self.velocity_x = velocity_x;
        self.velocity_y = velocity_y;
        self.looping = looping;
        self.active = true;
    }

    /// Clear the spin flag; idempotent.
    pub fn stop(&mut self) {
        if self.active {
            debug!("free spin stop");
        }
        self.active = false;
        self.looping = false;
    }

    /// Whether the spin wants more frames.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_looping(&self) -> bool {
        self.active && self.looping
    }

    /// Current per-tick velocities `(x, y)`.
    pub fn velocity(&self) -> (f32, f32) {
        (self.velocity_x, self.velocity_y)
    }

    /// Apply one frame of motion to `rotation`, wrapping both axes modulo
    /// 360. Returns whether the spin remains active.
    pub fn tick(&mut self, rotation: &mut Rotation) -> bool {
        if !self.active {
            return false;
        }
        rotation.x += self.velocity_x;
        rotation.y += self.velocity_y;
        rotation.wrap();
        if !self.looping {
            self.active = false;
        }
        self.active
    }
}

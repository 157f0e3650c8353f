//! Idle turret look-around.
//!
//! Runs every tick regardless of the pursuit state. Pursuit overrides it by
//! holding a bearing briefly with [`LookAround::hold`].

use rand::Rng;

use forest_core::constants::{LOOK_AROUND_ARC, LOOK_AROUND_HOLD_BASE, LOOK_AROUND_HOLD_JITTER};
use forest_core::math::denormalize;

/// Turret look target and how long to keep it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookAround {
    /// World heading the turret is chasing, if any.
    pub target: Option<f64>,
    /// Remaining hold time (seconds). While idle, time until the next glance.
    pub wait: f64,
}

impl LookAround {
    /// Chase `heading` for `secs`.
    pub fn hold(&mut self, heading: f64, secs: f64) {
        self.target = Some(heading);
        self.wait = secs;
    }
}

/// Advance the look-around timer. Returns the heading the turret should chase
/// this tick, if any.
pub fn update_look<R: Rng + ?Sized>(
    look: &mut LookAround,
    body_heading: f64,
    dt: f64,
    rng: &mut R,
) -> Option<f64> {
    if let Some(target) = look.target {
        if look.wait > 0.0 {
            look.wait = (look.wait - dt).max(0.0);
        }
        if look.wait == 0.0 {
            look.target = None;
        }
        return Some(target);
    }

    if look.wait > 0.0 {
        look.wait = (look.wait - dt).max(0.0);
        return None;
    }

    let offset = denormalize(rng.gen::<f64>(), -LOOK_AROUND_ARC, LOOK_AROUND_ARC);
    look.target = Some(body_heading + offset);
    look.wait = rng.gen::<f64>() * LOOK_AROUND_HOLD_JITTER + LOOK_AROUND_HOLD_BASE;
    None
}

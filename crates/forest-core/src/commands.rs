//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and applied at the start of the next tick, using
//! that tick's frame time.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Drive toward a world heading at the given speed.
    Steer { heading: f64, speed: f64 },
    /// Release the throttle; brakes once if the tank was moving.
    Stop,
    /// Aim the turret at a world heading.
    Look { heading: f64 },
    /// Plant a tree behind the tank, consuming one seed.
    Plant,
}

//! Events emitted by the simulation for audio and UI feedback.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Gameplay events, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A standing tree was tipped over.
    TreeFell { position: DVec3 },
    /// A live tree dropped a seed.
    SeedDropped { position: DVec3 },
    /// The player picked up a seed.
    SeedCollected { stock: u32 },
    /// A seed decayed without being collected.
    SeedExpired,
    /// The player planted a sapling.
    TreePlanted { position: DVec3, stock: u32 },
    /// No live trees remain.
    ForestLost { elapsed_secs: f64 },
}

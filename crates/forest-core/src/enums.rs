//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreePhase {
    /// Sapling, size below 1.
    Growing,
    /// Upright and full size.
    #[default]
    Standing,
    /// Tipped over, angle between 0 and π/2.
    Falling,
    /// Lying flat. Terminal.
    Fallen,
}

impl TreePhase {
    /// Upright trees are still alive and can be targeted.
    pub fn is_upright(self) -> bool {
        matches!(self, TreePhase::Growing | TreePhase::Standing)
    }
}

/// Pre-built shapes the rendering collaborator can instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prototype {
    Tree,
    Seed,
    PlayerTank,
    EnemyTank,
}

/// One-shot spatial audio cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    TreeFall,
}

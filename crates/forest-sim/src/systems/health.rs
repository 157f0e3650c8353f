//! Forest health and the game-over condition.

use log::info;

use forest_core::events::SimEvent;
use forest_core::state::ForestView;

/// Ratio of live to desired trees, clamped to `[0, 1]`. Zero when no trees
/// are desired.
pub fn forest_health(live: usize, desired: u32) -> f64 {
    if desired == 0 {
        return 0.0;
    }
    (live as f64 / desired as f64).clamp(0.0, 1.0)
}

/// Tracks the one-shot game-over transition.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForestHealth {
    pub desired_trees: u32,
    pub health: f64,
    pub game_over: bool,
}

impl ForestHealth {
    /// Recompute health. Emits `ForestLost` the first time the forest is gone.
    pub fn update(&mut self, live: usize, elapsed_secs: f64, events: &mut Vec<SimEvent>) {
        self.health = forest_health(live, self.desired_trees);
        if self.desired_trees > 0 && live == 0 && !self.game_over {
            self.game_over = true;
            events.push(SimEvent::ForestLost { elapsed_secs });
            info!("forest lost after {elapsed_secs:.1}s");
        }
    }

    pub fn view(&self, live: usize) -> ForestView {
        ForestView {
            live_trees: live as u32,
            desired_trees: self.desired_trees,
            health: self.health,
            color_blend: self.health,
            game_over: self.game_over,
        }
    }
}

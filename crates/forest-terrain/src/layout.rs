//! Tree grid layout.
//!
//! Trees sit on a jittered grid centered in the arena, each cell populated
//! with a fixed probability.

use glam::DVec2;
use rand::Rng;

use forest_core::constants::{TREE_DENSITY, TREE_GRID_BORDER, TREE_GRID_MARGIN, TREE_GRID_SPACING};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeLayout {
    /// Distance between grid cells.
    pub spacing: f64,
    /// Jitter within a cell, as a fraction of `spacing`.
    pub margin: f64,
    /// Arena border kept free of trees (total across both sides).
    pub border: f64,
    /// Probability that a cell holds a tree.
    pub density: f64,
}

impl Default for TreeLayout {
    fn default() -> Self {
        Self {
            spacing: TREE_GRID_SPACING,
            margin: TREE_GRID_MARGIN,
            border: TREE_GRID_BORDER,
            density: TREE_DENSITY,
        }
    }
}

/// Result of a grid layout.
#[derive(Debug, Clone, Default)]
pub struct TreeGrid {
    pub positions: Vec<DVec2>,
    /// Cells per side.
    pub grid_size: usize,
}

/// Lay out trees for an arena of edge `arena_size`.
pub fn layout_tree_grid<R: Rng + ?Sized>(arena_size: f64, layout: &TreeLayout, rng: &mut R) -> TreeGrid {
    let grid_size = ((arena_size - layout.border) / layout.spacing).max(0.0).floor() as usize;
    let center_offset = ((grid_size as f64 + layout.margin * 2.0 - 1.0) * layout.spacing) / 2.0;
    let jitter = layout.margin * layout.spacing;

    let mut positions = Vec::new();
    for x in 0..grid_size {
        for y in 0..grid_size {
            let wx = x as f64 * layout.spacing - center_offset;
            let wy = y as f64 * layout.spacing - center_offset;
            if rng.gen::<f64>() < layout.density {
                let px = wx + rng.gen::<f64>() * jitter;
                let py = wy + rng.gen::<f64>() * jitter;
                positions.push(DVec2::new(px, py));
            }
        }
    }

    TreeGrid {
        positions,
        grid_size,
    }
}

//! Terrain spatial queries for the forest simulation.
//!
//! Tree grid layout, Delaunay triangulation of tree positions, and the
//! free-space lookup used to place tanks between trees. Positions are on the
//! ground plane: `DVec2 { x, y }` maps to world `(x, z)`.

pub use forest_core as core;

pub mod freespace;
pub mod layout;
pub mod triangulation;

// Re-export key types for convenience.
pub use freespace::find_free_space;
pub use layout::{layout_tree_grid, TreeGrid, TreeLayout};
pub use triangulation::Triangulation;

#[cfg(test)]
mod tests;

//! Free-space lookup: the roomiest gap between trees that is also unoccupied.

use glam::DVec2;

use crate::triangulation::{triangle_area, Triangulation};

/// Find the centroid of the largest triangle whose centroid is more than
/// `min_dist` from each of its corners and for which `is_clear` accepts the
/// centroid.
///
/// `is_clear` is only consulted for triangles larger than the best found so
/// far, in triangulation order.
pub fn find_free_space(
    triangulation: &Triangulation,
    min_dist: f64,
    mut is_clear: impl FnMut(DVec2) -> bool,
) -> Option<DVec2> {
    let min_dist_sq = min_dist * min_dist;
    let mut best_area = 0.0;
    let mut best = None;

    for corners in triangulation.triangles() {
        let area = triangle_area(corners);
        if area <= best_area {
            continue;
        }
        let centroid = (corners[0] + corners[1] + corners[2]) / 3.0;
        let clearance = corners
            .iter()
            .map(|c| centroid.distance_squared(*c))
            .fold(f64::INFINITY, f64::min);
        if clearance > min_dist_sq && is_clear(centroid) {
            best_area = area;
            best = Some(centroid);
        }
    }
    best
}

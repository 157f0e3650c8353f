#[cfg(test)]
mod tests {
    use glam::DVec2;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use forest_core::constants::ARENA_SIZE;

    use crate::freespace::find_free_space;
    use crate::layout::{layout_tree_grid, TreeLayout};
    use crate::triangulation::{triangle_area, Triangulation};

    fn square() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(0.0, 10.0),
        ]
    }

    // ---- Triangulation ----

    #[test]
    fn test_square_splits_into_two_triangles() {
        let tri = Triangulation::from_points(&square());
        assert_eq!(tri.len(), 2);
        let total: f64 = tri.triangles().map(triangle_area).sum();
        assert!((total - 100.0).abs() < 1e-9, "total area {total}");
    }

    #[test]
    fn test_square_with_center_has_four_triangles() {
        let mut points = square();
        points.push(DVec2::new(5.0, 5.0));
        let tri = Triangulation::from_points(&points);
        assert_eq!(tri.len(), 4);
        let total: f64 = tri.triangles().map(triangle_area).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!(tri.triangle_indices().iter().all(|t| t.contains(&4)));
    }

    #[test]
    fn test_too_few_or_collinear_points() {
        assert!(Triangulation::from_points(&[]).is_empty());
        assert!(Triangulation::from_points(&square()[..2]).is_empty());
        let line = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(2.0, 2.0),
        ];
        assert!(Triangulation::from_points(&line).is_empty());
    }

    #[test]
    fn test_duplicate_points_ignored() {
        let mut points = square();
        points.push(DVec2::new(10.0, 10.0));
        let tri = Triangulation::from_points(&points);
        assert_eq!(tri.len(), 2);
    }

    #[test]
    fn test_random_points_satisfy_empty_circumcircle() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let points: Vec<DVec2> = (0..60)
            .map(|_| DVec2::new(rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0)))
            .collect();
        let tri = Triangulation::from_points(&points);
        assert!(!tri.is_empty());

        for [a, b, c] in tri.triangles() {
            assert!(triangle_area([a, b, c]) > 0.0);
            let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
            let center = DVec2::new(
                (a.length_squared() * (b.y - c.y)
                    + b.length_squared() * (c.y - a.y)
                    + c.length_squared() * (a.y - b.y))
                    / d,
                (a.length_squared() * (c.x - b.x)
                    + b.length_squared() * (a.x - c.x)
                    + c.length_squared() * (b.x - a.x))
                    / d,
            );
            let r2 = center.distance_squared(a);
            for p in &points {
                assert!(
                    center.distance_squared(*p) >= r2 - 1e-6,
                    "point {p:?} inside circumcircle of {a:?} {b:?} {c:?}"
                );
            }
        }
    }

    // ---- Free space ----

    #[test]
    fn test_free_space_returns_centroid() {
        let tri = Triangulation::from_points(&square());
        let spot = find_free_space(&tri, 1.0, |_| true).expect("free space");
        assert!(spot.x > 0.0 && spot.x < 10.0 && spot.y > 0.0 && spot.y < 10.0);
    }

    #[test]
    fn test_free_space_respects_min_distance() {
        let tri = Triangulation::from_points(&square());
        assert!(find_free_space(&tri, 10.0, |_| true).is_none());
    }

    #[test]
    fn test_free_space_respects_occupancy() {
        let tri = Triangulation::from_points(&square());
        assert!(find_free_space(&tri, 1.0, |_| false).is_none());
    }

    #[test]
    fn test_free_space_prefers_largest_clear_triangle() {
        // A big gap on the right, small triangles on the left.
        let points = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(30.0, -15.0),
            DVec2::new(30.0, 16.0),
        ];
        let tri = Triangulation::from_points(&points);
        let spot = find_free_space(&tri, 2.0, |_| true).expect("free space");
        assert!(spot.x > 5.0, "expected the large gap, got {spot:?}");

        // Blocking the large gap falls back to the next largest.
        let fallback = find_free_space(&tri, 2.0, |c| c.distance(spot) > 1e-9);
        if let Some(other) = fallback {
            assert!(other.distance(spot) > 1e-9);
        }
    }

    // ---- Layout ----

    #[test]
    fn test_layout_grid_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let grid = layout_tree_grid(ARENA_SIZE, &TreeLayout::default(), &mut rng);
        assert_eq!(grid.grid_size, 9);
        assert!(!grid.positions.is_empty());
        assert!(grid.positions.len() <= 81);
    }

    #[test]
    fn test_layout_density_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let full = TreeLayout {
            density: 1.0,
            ..Default::default()
        };
        assert_eq!(layout_tree_grid(ARENA_SIZE, &full, &mut rng).positions.len(), 81);
        let empty = TreeLayout {
            density: 0.0,
            ..Default::default()
        };
        assert!(layout_tree_grid(ARENA_SIZE, &empty, &mut rng).positions.is_empty());
    }

    #[test]
    fn test_layout_stays_inside_arena() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let layout = TreeLayout {
            density: 1.0,
            ..Default::default()
        };
        let half = ARENA_SIZE / 2.0;
        for p in layout_tree_grid(ARENA_SIZE, &layout, &mut rng).positions {
            assert!(p.x.abs() < half && p.y.abs() < half, "tree {p:?} outside arena");
        }
    }

    #[test]
    fn test_layout_deterministic() {
        let a = layout_tree_grid(ARENA_SIZE, &TreeLayout::default(), &mut ChaCha8Rng::seed_from_u64(9));
        let b = layout_tree_grid(ARENA_SIZE, &TreeLayout::default(), &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a.positions, b.positions);
    }

    #[test]
    fn test_small_arena_has_no_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let grid = layout_tree_grid(8.0, &TreeLayout::default(), &mut rng);
        assert_eq!(grid.grid_size, 0);
        assert!(grid.positions.is_empty());
    }
}

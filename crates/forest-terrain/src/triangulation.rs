//! Bowyer–Watson Delaunay triangulation on the ground plane.

use glam::DVec2;

/// Triangles below this area are dropped as degenerate.
const MIN_TRIANGLE_AREA: f64 = 1e-12;

/// Super triangle size relative to the point set's extent.
const SUPER_TRIANGLE_SCALE: f64 = 1000.0;

#[derive(Debug, Clone, Copy)]
struct Circumcircle {
    center: DVec2,
    radius_sq: f64,
}

impl Circumcircle {
    fn of(a: DVec2, b: DVec2, c: DVec2) -> Option<Self> {
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d.abs() < MIN_TRIANGLE_AREA {
            return None;
        }
        let a2 = a.length_squared();
        let b2 = b.length_squared();
        let c2 = c.length_squared();
        let center = DVec2::new(
            (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
            (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
        );
        Some(Self {
            center,
            radius_sq: center.distance_squared(a),
        })
    }

    fn contains(&self, p: DVec2) -> bool {
        self.center.distance_squared(p) < self.radius_sq
    }
}

#[derive(Debug, Clone, Copy)]
struct Working {
    vertices: [usize; 3],
    circle: Circumcircle,
}

/// Delaunay triangulation of a point set.
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    points: Vec<DVec2>,
    triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    /// Triangulate `points`. Fewer than three distinct, non-collinear points
    /// yield no triangles. Duplicate points are ignored.
    pub fn from_points(points: &[DVec2]) -> Self {
        let mut triangulation = Self {
            points: points.to_vec(),
            triangles: Vec::new(),
        };
        if points.len() < 3 {
            return triangulation;
        }

        let (min, max) = points.iter().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(lo, hi), p| (lo.min(*p), hi.max(*p)),
        );
        let span = (max - min).max_element().max(1.0);
        let mid = (min + max) / 2.0;

        // Super triangle; its vertices stand in for points at infinity.
        let n = points.len();
        let mut vertices = points.to_vec();
        let reach = SUPER_TRIANGLE_SCALE * span;
        vertices.push(mid + DVec2::new(-reach, -reach));
        vertices.push(mid + DVec2::new(0.0, reach));
        vertices.push(mid + DVec2::new(reach, -reach));

        let mut working: Vec<Working> = Vec::new();
        if let Some(circle) = Circumcircle::of(vertices[n], vertices[n + 1], vertices[n + 2]) {
            working.push(Working {
                vertices: [n, n + 1, n + 2],
                circle,
            });
        }

        for (i, &p) in points.iter().enumerate() {
            if points[..i].contains(&p) {
                continue;
            }

            let (bad, good): (Vec<Working>, Vec<Working>) =
                working.into_iter().partition(|t| t.circle.contains(p));
            working = good;

            // Boundary of the cavity: edges not shared by two bad triangles.
            let mut edges: Vec<(usize, usize)> = Vec::new();
            for t in &bad {
                let [a, b, c] = t.vertices;
                for edge in [(a, b), (b, c), (c, a)] {
                    let shared = bad.iter().any(|other| {
                        !std::ptr::eq(other, t) && has_edge(&other.vertices, edge)
                    });
                    if !shared {
                        edges.push(edge);
                    }
                }
            }

            for (a, b) in edges {
                if let Some(circle) = Circumcircle::of(vertices[a], vertices[b], p) {
                    working.push(Working {
                        vertices: [a, b, i],
                        circle,
                    });
                }
            }
        }

        triangulation.triangles = working
            .into_iter()
            .filter(|t| t.vertices.iter().all(|&v| v < n))
            .map(|t| t.vertices)
            .collect();
        triangulation
    }

    /// Triangles as indices into the input points.
    pub fn triangle_indices(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Triangles as vertex positions.
    pub fn triangles(&self) -> impl Iterator<Item = [DVec2; 3]> + '_ {
        self.triangles
            .iter()
            .map(|&[a, b, c]| [self.points[a], self.points[b], self.points[c]])
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

fn has_edge(vertices: &[usize; 3], (a, b): (usize, usize)) -> bool {
    vertices.contains(&a) && vertices.contains(&b)
}

/// Unsigned area of a triangle.
pub fn triangle_area([a, b, c]: [DVec2; 3]) -> f64 {
    ((a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)) / 2.0).abs()
}

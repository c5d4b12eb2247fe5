//! Integer polygons and the "inside or on the boundary" predicate used for
//! enclosure and turf collisions.
//!
//! All arithmetic is exact (`i128`, wide enough for any pair of `i32`
//! coordinates), so a grid point lying on an edge is always classified as
//! touching.

use crate::grid::Position;
use thiserror::Error;

/// Why a polygon cannot be used as an obstacle region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolygonDefect {
    #[error("needs at least 3 distinct vertices, got {0}")]
    TooFewVertices(usize),
    #[error("vertices are collinear (zero area)")]
    ZeroArea,
    #[error("edges {0} and {1} intersect")]
    SelfIntersecting(usize, usize),
}

/// A simple closed polygon. The closing edge from the last vertex back to the
/// first is implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    vertices: Vec<Position>,
    min: Position,
    max: Position,
}

impl Polygon {
    /// Builds a polygon without validating it. Consecutive duplicate vertices
    /// and an explicit closing vertex are dropped.
    pub fn new(vertices: impl IntoIterator<Item = Position>) -> Self {
        let mut cleaned: Vec<Position> = Vec::new();
        for vertex in vertices {
            if cleaned.last() != Some(&vertex) {
                cleaned.push(vertex);
            }
        }
        while cleaned.len() > 1 && cleaned.first() == cleaned.last() {
            cleaned.pop();
        }

        let min = Position::new(
            cleaned.iter().map(|v| v.x).min().unwrap_or(0),
            cleaned.iter().map(|v| v.y).min().unwrap_or(0),
        );
        let max = Position::new(
            cleaned.iter().map(|v| v.x).max().unwrap_or(0),
            cleaned.iter().map(|v| v.y).max().unwrap_or(0),
        );

        Polygon {
            vertices: cleaned,
            min,
            max,
        }
    }

    /// Axis-aligned rectangle spanning the two corners (inclusive).
    pub fn rectangle(corner: Position, opposite: Position) -> Self {
        let (x0, x1) = (corner.x.min(opposite.x), corner.x.max(opposite.x));
        let (y0, y1) = (corner.y.min(opposite.y), corner.y.max(opposite.y));
        Polygon::new([
            Position::new(x0, y0),
            Position::new(x1, y0),
            Position::new(x1, y1),
            Position::new(x0, y1),
        ])
    }

    pub fn vertices(&self) -> &[Position] {
        &self.vertices
    }

    fn edges(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Twice the signed area (shoelace formula).
    fn doubled_area(&self) -> i128 {
        self.edges()
            .map(|(a, b)| wide(a.x) * wide(b.y) - wide(b.x) * wide(a.y))
            .sum()
    }

    /// Checks that the polygon is simple and encloses a non-empty region.
    pub fn validate(&self) -> Result<(), PolygonDefect> {
        let n = self.vertices.len();
        if n < 3 {
            return Err(PolygonDefect::TooFewVertices(n));
        }
        if self.doubled_area() == 0 {
            return Err(PolygonDefect::ZeroArea);
        }

        let edges: Vec<_> = self.edges().collect();
        for i in 0..n {
            for j in (i + 1)..n {
                // Neighbouring edges share a vertex by construction.
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                let (a, b) = edges[i];
                let (c, d) = edges[j];
                if segments_intersect(a, b, c, d) {
                    return Err(PolygonDefect::SelfIntersecting(i, j));
                }
            }
        }
        Ok(())
    }

    /// True if `point` is strictly inside the polygon or on its boundary.
    pub fn contains_or_touches(&self, point: Position) -> bool {
        if point.x < self.min.x || point.x > self.max.x || point.y < self.min.y || point.y > self.max.y
        {
            return false;
        }
        if self.edges().any(|(a, b)| on_segment(a, b, point)) {
            return true;
        }

        // Even-odd crossing test on a ray towards +x.
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > point.y) != (b.y > point.y) {
                let lhs = (wide(point.x) - wide(a.x)) * (wide(b.y) - wide(a.y));
                let rhs = (wide(point.y) - wide(a.y)) * (wide(b.x) - wide(a.x));
                let left_of_edge = if b.y > a.y { lhs < rhs } else { lhs > rhs };
                if left_of_edge {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// The adapter the searcher consumes: does any polygon of the set contain or
/// touch `point`?
pub fn any_contains_or_touches(polygons: &[Polygon], point: Position) -> bool {
    polygons.iter().any(|polygon| polygon.contains_or_touches(point))
}

fn wide(v: i32) -> i128 {
    i128::from(v)
}

fn cross(o: Position, a: Position, b: Position) -> i128 {
    let (ax, ay) = (wide(a.x) - wide(o.x), wide(a.y) - wide(o.y));
    let (bx, by) = (wide(b.x) - wide(o.x), wide(b.y) - wide(o.y));
    ax * by - ay * bx
}

fn on_segment(a: Position, b: Position, p: Position) -> bool {
    cross(a, b, p) == 0
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

fn segments_intersect(a: Position, b: Position, c: Position, d: Position) -> bool {
    let d1 = cross(c, d, a).signum();
    let d2 = cross(c, d, b).signum();
    let d3 = cross(a, b, c).signum();
    let d4 = cross(a, b, d).signum();

    if d1 * d2 < 0 && d3 * d4 < 0 {
        return true;
    }
    on_segment(c, d, a) || on_segment(c, d, b) || on_segment(a, b, c) || on_segment(a, b, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn square_contains_interior_edges_and_vertices() {
        let square = Polygon::rectangle(p(2, 2), p(6, 6));
        assert!(square.contains_or_touches(p(4, 4)));
        assert!(square.contains_or_touches(p(2, 4)));
        assert!(square.contains_or_touches(p(6, 6)));
        assert!(!square.contains_or_touches(p(1, 4)));
        assert!(!square.contains_or_touches(p(7, 7)));
    }

    #[test]
    fn triangle_diagonal_edge_counts_as_touching() {
        let triangle = Polygon::new([p(0, 0), p(4, 0), p(0, 4)]);
        assert!(triangle.contains_or_touches(p(2, 2)));
        assert!(triangle.contains_or_touches(p(1, 1)));
        assert!(!triangle.contains_or_touches(p(3, 2)));
    }

    #[test]
    fn concave_notch_is_outside() {
        // A "U" shape opening upwards.
        let u = Polygon::new([
            p(0, 0),
            p(6, 0),
            p(6, 6),
            p(4, 6),
            p(4, 2),
            p(2, 2),
            p(2, 6),
            p(0, 6),
        ]);
        assert!(u.validate().is_ok());
        assert!(!u.contains_or_touches(p(3, 4)));
        assert!(u.contains_or_touches(p(3, 2)));
        assert!(u.contains_or_touches(p(1, 5)));
        assert!(u.contains_or_touches(p(5, 3)));
    }

    #[test]
    fn closing_vertex_and_duplicates_are_dropped() {
        let polygon = Polygon::new([p(0, 0), p(3, 0), p(3, 0), p(3, 3), p(0, 0)]);
        assert_eq!(polygon.vertices(), &[p(0, 0), p(3, 0), p(3, 3)]);
    }

    #[test]
    fn validation_rejects_degenerate_shapes() {
        assert_eq!(
            Polygon::new([p(0, 0), p(1, 1)]).validate(),
            Err(PolygonDefect::TooFewVertices(2))
        );
        assert_eq!(
            Polygon::new([p(0, 0), p(1, 1), p(2, 2)]).validate(),
            Err(PolygonDefect::ZeroArea)
        );
        let bowtie = Polygon::new([p(0, 0), p(4, 4), p(4, 0), p(0, 4)]);
        assert!(matches!(
            bowtie.validate(),
            Err(PolygonDefect::SelfIntersecting(_, _))
        ));
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let huge = Polygon::new([
            p(-2_000_000_000, -2_000_000_000),
            p(2_000_000_000, -2_000_000_000),
            p(2_000_000_000, 2_000_000_000),
            p(-2_000_000_000, 2_000_000_000),
        ]);
        assert_eq!(huge.validate(), Ok(()));
        assert!(huge.contains_or_touches(p(0, 0)));
        assert!(huge.contains_or_touches(p(2_000_000_000, 5)));

        let sliver = Polygon::new([p(i32::MIN, i32::MIN), p(i32::MAX, i32::MAX), p(i32::MIN, i32::MAX)]);
        assert_eq!(sliver.validate(), Ok(()));
        assert!(sliver.contains_or_touches(p(0, 0)));
        assert!(!sliver.contains_or_touches(p(1, 0)));
    }

    #[test]
    fn any_polygon_in_set() {
        let set = vec![
            Polygon::rectangle(p(0, 0), p(1, 1)),
            Polygon::rectangle(p(5, 5), p(6, 6)),
        ];
        assert!(any_contains_or_touches(&set, p(6, 5)));
        assert!(!any_contains_or_touches(&set, p(3, 3)));
        assert!(!any_contains_or_touches(&[], p(0, 0)));
    }
}

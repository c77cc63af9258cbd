//! Geometric utility functions for segment intersection and polygon overlap.
//!
//! All directional math uses screen convention: a heading of 0 points up
//! (negative y), and an angle `a` maps to the direction `(-sin a, -cos a)`.

use geo::{Coord, Line};

/// A point in world space.
pub type Point = Coord<f32>;

/// A directed segment from `start` to `end`.
pub type Segment = Line<f32>;

/// Where two segments cross.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Crossing point, interpolated along the first segment.
    pub point: Point,
    /// Fractional position of `point` along the first segment (0 = start, 1 = end).
    pub offset: f32,
}

/// Linear interpolation between `a` and `b`. `t` is not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Returns the point `length` units away from `origin` along `angle_rad`.
#[inline]
pub fn project(origin: Point, angle_rad: f32, length: f32) -> Point {
    Point {
        x: origin.x - angle_rad.sin() * length,
        y: origin.y - angle_rad.cos() * length,
    }
}

/// Intersects segment A→B with segment C→D.
///
/// # Arguments
///
/// * `a`, `b` - Start and end of the first segment
/// * `c`, `d` - Start and end of the second segment
///
/// # Returns
///
/// The crossing point on A→B and its offset along A→B, or `None` when the
/// segments are parallel or do not overlap within both parameter ranges.
#[allow(clippy::float_cmp)]
pub fn intersect(a: Point, b: Point, c: Point, d: Point) -> Option<Intersection> {
    let t_top = (d.x - c.x) * (a.y - c.y) - (d.y - c.y) * (a.x - c.x);
    let u_top = (c.y - a.y) * (a.x - b.x) - (c.x - a.x) * (a.y - b.y);
    let bottom = (d.y - c.y) * (b.x - a.x) - (d.x - c.x) * (b.y - a.y);

    if bottom == 0.0 {
        return None;
    }

    let t = t_top / bottom;
    let u = u_top / bottom;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(Intersection {
        point: Point {
            x: lerp(a.x, b.x, t),
            y: lerp(a.y, b.y, t),
        },
        offset: t,
    })
}

/// Intersects two [`Segment`]s, offset measured along `first`.
#[inline]
pub fn intersect_segments(first: &Segment, second: &Segment) -> Option<Intersection> {
    intersect(first.start, first.end, second.start, second.end)
}

/// Picks the candidate with the smallest offset.
pub fn nearest_intersection<I>(candidates: I) -> Option<Intersection>
where
    I: IntoIterator<Item = Intersection>,
{
    candidates
        .into_iter()
        .min_by(|a, b| a.offset.total_cmp(&b.offset))
}

/// Closed polygon, at least three corners. Last corner connects to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon from its corners in order.
    ///
    /// Panics if fewer than three corners are given.
    pub fn new(points: Vec<Point>) -> Self {
        assert!(
            points.len() >= 3,
            "polygon needs at least 3 points, got {}",
            points.len()
        );
        Self { points }
    }

    /// Axis-aligned rectangle spanning `min` to `max`.
    pub fn rect(min: Point, max: Point) -> Self {
        Self::new(vec![
            Point { x: min.x, y: min.y },
            Point { x: max.x, y: min.y },
            Point { x: max.x, y: max.y },
            Point { x: min.x, y: max.y },
        ])
    }

    /// Corners in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Edges in order, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Line::new(self.points[i], self.points[(i + 1) % n]))
    }

    /// Mean of the corners.
    pub fn center(&self) -> Point {
        let n = self.points.len() as f32;
        let sum = self
            .points
            .iter()
            .fold(Point { x: 0.0, y: 0.0 }, |acc, p| acc + *p);
        Point {
            x: sum.x / n,
            y: sum.y / n,
        }
    }

    /// True if any edge of this polygon crosses `segment`.
    pub fn touches_segment(&self, segment: &Segment) -> bool {
        self.edges()
            .any(|edge| intersect_segments(&edge, segment).is_some())
    }

    /// True if any edge of this polygon crosses any edge of `other`.
    pub fn intersects(&self, other: &Polygon) -> bool {
        polygons_intersect(self, other)
    }
}

/// Edge-vs-edge overlap test, stops at the first crossing.
///
/// A polygon fully contained in the other without any edge crossing is not
/// reported.
pub fn polygons_intersect(first: &Polygon, second: &Polygon) -> bool {
    first
        .edges()
        .any(|edge| second.edges().any(|other| intersect_segments(&edge, &other).is_some()))
}

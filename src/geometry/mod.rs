pub mod extent;

pub use extent::Extent;

use crate::math::Point2;

/// A directed line segment between two distinct points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point2,
    pub end: Point2,
}

impl Line {
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Bounding extent of the segment.
    #[must_use]
    pub fn extent(&self) -> Extent {
        Extent::from_points(&[self.start, self.end])
    }

    /// Squared length of the segment.
    #[must_use]
    pub fn length2(&self) -> f64 {
        crate::math::point_distance2(self.start, self.end)
    }
}

/// An open sequence of vertices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString(pub Vec<Point2>);

/// A polygon as a list of rings; ring 0 is the exterior, rings 1..n are
/// holes. Rings are stored open, the closing edge is implied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon(pub Vec<Vec<Point2>>);

/// An ordered set of polygons.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon(pub Vec<Polygon>);

/// A triangle produced by the triangulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle(pub [Point2; 3]);

impl Triangle {
    /// Centroid of the triangle.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.0[0].x + self.0[1].x + self.0[2].x) / 3.0,
            (self.0[0].y + self.0[1].y + self.0[2].y) / 3.0,
        )
    }
}

/// The closed set of geometry variants the kernel understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point2),
    MultiPoint(Vec<Point2>),
    LineString(LineString),
    MultiLineString(Vec<LineString>),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    Collection(Vec<Geometry>),
}

/// Consecutive-vertex segments of an open ring, including the implied
/// closing edge. Zero-length edges from repeated vertices are skipped.
#[must_use]
pub fn ring_segments(ring: &[Point2]) -> Vec<Line> {
    if ring.len() < 2 {
        return Vec::new();
    }
    let mut segments = Vec::with_capacity(ring.len());
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        if !crate::math::cmp::point_eq(a, b) {
            segments.push(Line::new(a, b));
        }
    }
    segments
}

impl Polygon {
    /// All boundary segments of every ring, hole structure discarded.
    #[must_use]
    pub fn as_segments(&self) -> Vec<Line> {
        self.0.iter().flat_map(|ring| ring_segments(ring)).collect()
    }
}

impl MultiPolygon {
    /// All boundary segments of every ring of every polygon.
    #[must_use]
    pub fn as_segments(&self) -> Vec<Line> {
        self.0.iter().flat_map(Polygon::as_segments).collect()
    }
}

impl Geometry {
    /// Bounding extent of the geometry. An empty geometry has no bounds
    /// and reports the universe.
    #[must_use]
    pub fn extent(&self) -> Extent {
        Extent::from_geometry(self)
    }
}

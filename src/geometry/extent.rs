//! Axis-aligned bounding boxes with an unbounded-universe state.
//!
//! An extent either carries concrete `[min_x, min_y, max_x, max_y]` bounds
//! or is absent, in which case it represents the whole universe: it
//! contains everything and reports the ±[`f64::MAX`] sentinel magnitudes
//! from its bound accessors.

use super::{Geometry, Line, Polygon};
use crate::math::Point2;

/// A rectangle, or the unbounded universe when absent.
///
/// Invariant for concrete extents: `min_x <= max_x` and `min_y <= max_y`.
/// Constructing bounds that violate this is a caller bug; it is not
/// checked at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent(Option<[f64; 4]>);

/// Predicate deciding whether four corner vertices are in clockwise order.
/// Lets callers encode coordinate-system specific winding conventions.
pub type ClockwiseFn<'a> = &'a dyn Fn(&[Point2; 4]) -> bool;

impl Extent {
    /// The unbounded universe.
    pub const UNIVERSE: Extent = Extent(None);

    /// A concrete extent from its four bounds.
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Extent(Some([min_x, min_y, max_x, max_y]))
    }

    /// The smallest extent containing all given points; the universe when
    /// the input is empty.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        let Some(first) = points.first() else {
            return Extent::UNIVERSE;
        };
        let mut e = [first.x, first.y, first.x, first.y];
        for pt in &points[1..] {
            if pt.x < e[0] {
                e[0] = pt.x;
            } else if pt.x > e[2] {
                e[2] = pt.x;
            }
            if pt.y < e[1] {
                e[1] = pt.y;
            } else if pt.y > e[3] {
                e[3] = pt.y;
            }
        }
        Extent(Some(e))
    }

    /// The smallest extent containing every point of the geometry; the
    /// universe when the geometry has no points.
    #[must_use]
    pub fn from_geometry(geometry: &Geometry) -> Self {
        let mut points = Vec::new();
        collect_points(geometry, &mut points);
        Extent::from_points(&points)
    }

    /// The smallest extent from two lon/lat points, choosing the west
    /// point with antimeridian awareness: when the longitude delta
    /// exceeds 180° the pair is assumed to wrap across ±180° and the
    /// westmost-selection comparison inverts.
    #[must_use]
    pub fn hull(a: Point2, b: Point2) -> Self {
        let (west, east) = if (a.x - b.x).abs() > 180.0 {
            if a.x < b.x {
                (b, a)
            } else {
                (a, b)
            }
        } else if a.x > b.x {
            (b, a)
        } else {
            (a, b)
        };
        Extent::segment(west, east)
    }

    /// Extent spanning from a westmost to an eastmost lon/lat point.
    #[must_use]
    pub fn segment(west: Point2, east: Point2) -> Self {
        let (south, north) = if west.y < east.y {
            (west.y, east.y)
        } else {
            (east.y, west.y)
        };
        Extent::new(west.x, south, east.x, north)
    }

    /// The smaller x bound, or `-f64::MAX` on the universe.
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.0.map_or(-f64::MAX, |e| e[0])
    }

    /// The smaller y bound, or `-f64::MAX` on the universe.
    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.0.map_or(-f64::MAX, |e| e[1])
    }

    /// The larger x bound, or `f64::MAX` on the universe.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.0.map_or(f64::MAX, |e| e[2])
    }

    /// The larger y bound, or `f64::MAX` on the universe.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.0.map_or(f64::MAX, |e| e[3])
    }

    /// Width of the extent; infinite on the universe.
    #[must_use]
    pub fn x_span(&self) -> f64 {
        self.0.map_or(f64::INFINITY, |e| e[2] - e[0])
    }

    /// Height of the extent; infinite on the universe.
    #[must_use]
    pub fn y_span(&self) -> f64 {
        self.0.map_or(f64::INFINITY, |e| e[3] - e[1])
    }

    /// The four corners, always in the order
    /// (min_x,min_y), (max_x,min_y), (max_x,max_y), (min_x,max_y).
    #[must_use]
    pub fn vertices(&self) -> [Point2; 4] {
        [
            Point2::new(self.min_x(), self.min_y()),
            Point2::new(self.max_x(), self.min_y()),
            Point2::new(self.max_x(), self.max_y()),
            Point2::new(self.min_x(), self.max_y()),
        ]
    }

    /// The four boundary edges. When a predicate is supplied and reports
    /// the vertex order is not clockwise, the vertex order is reversed
    /// before the edges are emitted.
    #[must_use]
    pub fn edges(&self, clockwise: Option<ClockwiseFn>) -> [Line; 4] {
        let mut v = self.vertices();
        if let Some(cw) = clockwise {
            if !cw(&v) {
                v.reverse();
            }
        }
        [
            Line::new(v[0], v[1]),
            Line::new(v[1], v[2]),
            Line::new(v[2], v[3]),
            Line::new(v[3], v[0]),
        ]
    }

    /// The extent as a single-ring polygon of its four vertices.
    #[must_use]
    pub fn as_polygon(&self) -> Polygon {
        Polygon(vec![self.vertices().to_vec()])
    }

    /// Expands in place to the union of the two extents. No-op on the
    /// universe, which already absorbs everything.
    pub fn add(&mut self, other: &Extent) {
        if let Some(e) = &mut self.0 {
            e[0] = e[0].min(other.min_x());
            e[1] = e[1].min(other.min_y());
            e[2] = e[2].max(other.max_x());
            e[3] = e[3].max(other.max_y());
        }
    }

    /// Expands in place to contain the given points. No-op on the
    /// universe.
    pub fn add_points(&mut self, points: &[Point2]) {
        if let Some(e) = &mut self.0 {
            for pt in points {
                e[0] = e[0].min(pt.x);
                e[1] = e[1].min(pt.y);
                e[2] = e[2].max(pt.x);
                e[3] = e[3].max(pt.y);
            }
        }
    }

    /// Expands in place to contain every point of the geometry.
    pub fn add_geometry(&mut self, geometry: &Geometry) {
        if self.0.is_none() {
            return;
        }
        let mut points = Vec::new();
        collect_points(geometry, &mut points);
        self.add_points(&points);
    }

    /// `|height × width|`. On the universe this evaluates against the
    /// sentinel magnitudes and yields an enormous value; callers rely on
    /// it being neither zero nor a defined "infinite area" marker.
    #[must_use]
    pub fn area(&self) -> f64 {
        ((self.max_y() - self.min_y()) * (self.max_x() - self.min_x())).abs()
    }

    /// Whether the other extent lies completely inside this one. The
    /// universe contains everything; an absent argument is never
    /// contained.
    #[must_use]
    pub fn contains(&self, other: &Extent) -> bool {
        if self.0.is_none() {
            return true;
        }
        if other.0.is_none() {
            return false;
        }
        self.min_x() <= other.min_x()
            && self.max_x() >= other.max_x()
            && self.min_y() <= other.min_y()
            && self.max_y() >= other.max_y()
    }

    /// Whether the point lies inside the extent (boundary included).
    #[must_use]
    pub fn contains_point(&self, pt: Point2) -> bool {
        self.0.is_none()
            || (self.min_x() <= pt.x
                && pt.x <= self.max_x()
                && self.min_y() <= pt.y
                && pt.y <= self.max_y())
    }

    /// Whether both endpoints of the line lie inside the extent.
    #[must_use]
    pub fn contains_line(&self, line: &Line) -> bool {
        self.contains_point(line.start) && self.contains_point(line.end)
    }

    /// Whether the geometry lies completely inside the extent, judged by
    /// the extent built from the geometry.
    #[must_use]
    pub fn contains_geom(&self, geometry: &Geometry) -> bool {
        if self.is_universe() {
            return true;
        }
        self.contains(&Extent::from_geometry(geometry))
    }

    /// A new extent with both corners scaled by `s`. The universe stays
    /// the universe.
    #[must_use]
    pub fn scale_by(&self, s: f64) -> Extent {
        match self.0 {
            None => Extent::UNIVERSE,
            Some(e) => Extent::from_points(&[
                Point2::new(e[0] * s, e[1] * s),
                Point2::new(e[2] * s, e[3] * s),
            ]),
        }
    }

    /// A new extent grown by `s` on every side. The universe stays the
    /// universe.
    #[must_use]
    pub fn expand_by(&self, s: f64) -> Extent {
        match self.0 {
            None => Extent::UNIVERSE,
            Some(e) => Extent::from_points(&[
                Point2::new(e[0] - s, e[1] - s),
                Point2::new(e[2] + s, e[3] + s),
            ]),
        }
    }

    /// Intersection of the two extents. The universe on either side
    /// yields the other side. Extents that only touch at a boundary line
    /// do NOT intersect: the result must have positive span in both axes.
    #[must_use]
    pub fn intersect(&self, other: &Extent) -> Option<Extent> {
        if self.0.is_none() {
            return Some(*other);
        }
        if other.0.is_none() {
            return Some(*self);
        }

        let min_x = self.min_x().max(other.min_x());
        let max_x = self.max_x().min(other.max_x());
        if min_x >= max_x {
            return None;
        }
        let min_y = self.min_y().max(other.min_y());
        let max_y = self.max_y().min(other.max_y());
        if min_y >= max_y {
            return None;
        }
        Some(Extent::new(min_x, min_y, max_x, max_y))
    }

    /// Whether the extent covers the universe. True for the absent state,
    /// and also for concrete bounds exactly equal to the ±`f64::MAX`
    /// sentinels — the two are deliberately indistinguishable.
    #[must_use]
    pub fn is_universe(&self) -> bool {
        self.0.is_none()
            || (self.min_x() == -f64::MAX
                && self.max_x() == f64::MAX
                && self.min_y() == -f64::MAX
                && self.max_y() == f64::MAX)
    }
}

fn collect_points(geometry: &Geometry, out: &mut Vec<Point2>) {
    match geometry {
        Geometry::Point(pt) => out.push(*pt),
        Geometry::MultiPoint(pts) => out.extend_from_slice(pts),
        Geometry::LineString(ls) => out.extend_from_slice(&ls.0),
        Geometry::MultiLineString(lss) => {
            for ls in lss {
                out.extend_from_slice(&ls.0);
            }
        }
        Geometry::Polygon(poly) => {
            for ring in &poly.0 {
                out.extend_from_slice(ring);
            }
        }
        Geometry::MultiPolygon(mp) => {
            for poly in &mp.0 {
                for ring in &poly.0 {
                    out.extend_from_slice(ring);
                }
            }
        }
        Geometry::Collection(geoms) => {
            for g in geoms {
                collect_points(g, out);
            }
        }
    }
}

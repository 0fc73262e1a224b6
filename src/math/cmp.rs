//! Deterministic comparison predicates over points, rings and geometries.
//!
//! Points are ordered by `x` ascending with ties broken by `y` ascending.
//! Ring equality is insensitive to the starting vertex: both rings are
//! rotated to their minimal point before a pointwise walk.

use std::cmp::Ordering;

use super::{Point2, TOLERANCE};
use crate::geometry::{Extent, Geometry, LineString, MultiPolygon, Polygon};

/// Tolerance-based float equality with explicit handling of signed
/// infinities: `+∞` only equals `+∞`, `−∞` only equals `−∞`.
#[must_use]
pub fn float_eq(a: f64, b: f64, tolerance: f64) -> bool {
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= tolerance
}

/// Canonical strict order over points: `x` ascending, ties by `y`.
#[must_use]
pub fn point_less(a: Point2, b: Point2) -> bool {
    a.x < b.x || (a.x == b.x && a.y < b.y)
}

/// Total order form of [`point_less`] for use with sorts.
#[must_use]
pub fn point_cmp(a: Point2, b: Point2) -> Ordering {
    if point_less(a, b) {
        Ordering::Less
    } else if point_less(b, a) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Tolerance equality of two points.
#[must_use]
pub fn point_eq(a: Point2, b: Point2) -> bool {
    float_eq(a.x, b.x, TOLERANCE) && float_eq(a.y, b.y, TOLERANCE)
}

/// Index of the smallest point under the canonical order; ties resolve to
/// the lowest index. Returns 0 for an empty slice.
#[must_use]
pub fn find_min_point_idx(points: &[Point2]) -> usize {
    let mut min = 0;
    for (i, &pt) in points.iter().enumerate().skip(1) {
        if point_less(pt, points[min]) {
            min = i;
        }
    }
    min
}

/// Rotates the ring in place (no reversal) so traversal starts at its
/// minimal point, preserving cyclic order.
pub fn rotate_to_leftmost(ring: &mut [Point2]) {
    let idx = find_min_point_idx(ring);
    ring.rotate_left(idx);
}

/// Order-insensitive equality of two point sets.
#[must_use]
pub fn multi_point_eq(a: &[Point2], b: &[Point2]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut sa = a.to_vec();
    let mut sb = b.to_vec();
    sa.sort_by(|p, q| point_cmp(*p, *q));
    sb.sort_by(|p, q| point_cmp(*p, *q));
    sa.iter().zip(&sb).all(|(p, q)| point_eq(*p, *q))
}

/// Rotation-insensitive equality of two rings or linestrings.
#[must_use]
pub fn line_string_eq(a: &[Point2], b: &[Point2]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut ra = a.to_vec();
    let mut rb = b.to_vec();
    rotate_to_leftmost(&mut ra);
    rotate_to_leftmost(&mut rb);
    ra.iter().zip(&rb).all(|(p, q)| point_eq(*p, *q))
}

/// Order-insensitive equality of two sets of linestrings.
#[must_use]
pub fn multi_line_eq(a: &[LineString], b: &[LineString]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = vec![false; b.len()];
    for la in a {
        let matched = b.iter().enumerate().find(|(i, lb)| {
            !used[*i] && line_string_eq(&la.0, &lb.0)
        });
        match matched {
            Some((i, _)) => used[i] = true,
            None => return false,
        }
    }
    true
}

/// Stable ordering key over sub-rings: ring length first, then the
/// canonical order of the minimal point. Used to pair hole candidates.
fn ring_cmp(a: &[Point2], b: &[Point2]) -> Ordering {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {}
        ord => return ord,
    }
    if a.is_empty() {
        return Ordering::Equal;
    }
    point_cmp(a[find_min_point_idx(a)], b[find_min_point_idx(b)])
}

/// Polygon equality: the exterior ring must match positionally (after
/// rotation normalization), holes are compared as a set.
#[must_use]
pub fn polygon_eq(a: &Polygon, b: &Polygon) -> bool {
    if a.0.len() != b.0.len() {
        return false;
    }
    if a.0.is_empty() {
        return true;
    }
    if !line_string_eq(&a.0[0], &b.0[0]) {
        return false;
    }
    let mut holes_a: Vec<&Vec<Point2>> = a.0[1..].iter().collect();
    let mut holes_b: Vec<&Vec<Point2>> = b.0[1..].iter().collect();
    holes_a.sort_by(|p, q| ring_cmp(p, q));
    holes_b.sort_by(|p, q| ring_cmp(p, q));
    holes_a
        .iter()
        .zip(&holes_b)
        .all(|(p, q)| line_string_eq(p, q))
}

/// Order-insensitive set equality over polygons.
#[must_use]
pub fn multi_polygon_eq(a: &MultiPolygon, b: &MultiPolygon) -> bool {
    if a.0.len() != b.0.len() {
        return false;
    }
    let mut used = vec![false; b.0.len()];
    for pa in &a.0 {
        let matched = b
            .0
            .iter()
            .enumerate()
            .find(|(i, pb)| !used[*i] && polygon_eq(pa, pb));
        match matched {
            Some((i, _)) => used[i] = true,
            None => return false,
        }
    }
    true
}

/// Order-insensitive set equality over collection members.
#[must_use]
pub fn collection_eq(a: &[Geometry], b: &[Geometry]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = vec![false; b.len()];
    for ga in a {
        let matched = b
            .iter()
            .enumerate()
            .find(|(i, gb)| !used[*i] && geometry_eq(ga, gb));
        match matched {
            Some((i, _)) => used[i] = true,
            None => return false,
        }
    }
    true
}

/// Equality over the whole geometry variant set. Mismatched variants are
/// never equal.
#[must_use]
pub fn geometry_eq(a: &Geometry, b: &Geometry) -> bool {
    match (a, b) {
        (Geometry::Point(p), Geometry::Point(q)) => point_eq(*p, *q),
        (Geometry::MultiPoint(p), Geometry::MultiPoint(q)) => multi_point_eq(p, q),
        (Geometry::LineString(p), Geometry::LineString(q)) => line_string_eq(&p.0, &q.0),
        (Geometry::MultiLineString(p), Geometry::MultiLineString(q)) => multi_line_eq(p, q),
        (Geometry::Polygon(p), Geometry::Polygon(q)) => polygon_eq(p, q),
        (Geometry::MultiPolygon(p), Geometry::MultiPolygon(q)) => multi_polygon_eq(p, q),
        (Geometry::Collection(p), Geometry::Collection(q)) => collection_eq(p, q),
        _ => false,
    }
}

/// Equality of two extents; any two universe extents are equal.
#[must_use]
pub fn extent_eq(a: &Extent, b: &Extent) -> bool {
    if a.is_universe() || b.is_universe() {
        return a.is_universe() == b.is_universe();
    }
    float_eq(a.min_x(), b.min_x(), TOLERANCE)
        && float_eq(a.min_y(), b.min_y(), TOLERANCE)
        && float_eq(a.max_x(), b.max_x(), TOLERANCE)
        && float_eq(a.max_y(), b.max_y(), TOLERANCE)
}

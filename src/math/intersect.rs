use super::{Point2, TOLERANCE};

/// How two bounded segments meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// The segments do not meet.
    None,
    /// The segments meet in a single point (proper crossing or endpoint
    /// touch).
    Point(Point2),
    /// The segments are collinear and share a run of positive length; the
    /// two points are the endpoints of the shared run.
    Overlap(Point2, Point2),
}

/// Bounded segment-segment intersection in 2D.
///
/// Endpoint touches are included, and collinear overlaps are reported with
/// both endpoints of the shared run.
#[must_use]
pub fn segment_intersection(a0: Point2, a1: Point2, b0: Point2, b1: Point2) -> SegmentIntersection {
    let da = a1 - a0;
    let db = b1 - b0;
    let cross = da.x * db.y - da.y * db.x;

    if cross.abs() < TOLERANCE {
        return collinear_overlap(a0, a1, b0, b1);
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / cross;
    let u = (dx * da.y - dy * da.x) / cross;

    // Small epsilon to include endpoint touches.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t = t.clamp(0.0, 1.0);
        SegmentIntersection::Point(Point2::new(a0.x + da.x * t, a0.y + da.y * t))
    } else {
        SegmentIntersection::None
    }
}

/// Overlap of two parallel segments. Distinct parallel lines yield `None`;
/// collinear segments yield the shared run, or its single shared point.
fn collinear_overlap(a0: Point2, a1: Point2, b0: Point2, b1: Point2) -> SegmentIntersection {
    let da = a1 - a0;
    let len2 = da.x * da.x + da.y * da.y;
    if len2 < TOLERANCE * TOLERANCE {
        return SegmentIntersection::None;
    }

    // Not on the same line.
    let offset = (b0.x - a0.x) * da.y - (b0.y - a0.y) * da.x;
    if offset.abs() > TOLERANCE * len2.sqrt() {
        return SegmentIntersection::None;
    }

    // Project b's endpoints onto a's parameter space.
    let tb0 = ((b0.x - a0.x) * da.x + (b0.y - a0.y) * da.y) / len2;
    let tb1 = ((b1.x - a0.x) * da.x + (b1.y - a0.y) * da.y) / len2;
    let (lo, hi) = if tb0 <= tb1 { (tb0, tb1) } else { (tb1, tb0) };

    let lo = lo.max(0.0);
    let hi = hi.min(1.0);
    if hi < lo - TOLERANCE {
        return SegmentIntersection::None;
    }

    let pa = Point2::new(a0.x + da.x * lo, a0.y + da.y * lo);
    let pb = Point2::new(a0.x + da.x * hi, a0.y + da.y * hi);
    if super::cmp::point_eq(pa, pb) {
        SegmentIntersection::Point(pa)
    } else {
        SegmentIntersection::Overlap(pa, pb)
    }
}

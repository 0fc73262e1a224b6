pub mod cmp;
pub mod intersect;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Slope and intercept of the line through `a` and `b`.
///
/// Returns `(slope, intercept, defined)`; a vertical line has no defined
/// slope and reports `(0.0, 0.0, false)`.
#[must_use]
pub fn slope(a: Point2, b: Point2) -> (f64, f64, bool) {
    let dx = b.x - a.x;
    if dx == 0.0 {
        return (0.0, 0.0, false);
    }
    let m = (b.y - a.y) / dx;
    (m, a.y - m * a.x, true)
}

/// Squared Euclidean distance between two points.
#[must_use]
pub fn point_distance2(a: Point2, b: Point2) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx * dx + dy * dy
}

/// Signed area of a closed ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. The ring is
/// stored open; the closing edge is implied.
#[must_use]
pub fn signed_area(ring: &[Point2]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += ring[i].x * ring[j].y - ring[j].x * ring[i].y;
    }
    sum * 0.5
}

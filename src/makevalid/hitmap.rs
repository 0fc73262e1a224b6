//! Inside/outside classification against the original polygon rings.

use crate::geometry::{Extent, MultiPolygon};
use crate::math::Point2;

/// Which side of the filled area a point falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Inside,
    Outside,
}

/// Classifies points against a filled area.
pub trait HitMapper {
    fn label(&self, pt: Point2) -> Label;
}

struct Ring {
    points: Vec<Point2>,
    extent: Extent,
}

/// Even-odd ray-cast classifier over the rings of a multipolygon. The ring
/// structure is deliberately ignored: a point is inside when a ray from it
/// crosses the union of all ring boundaries an odd number of times, which
/// is what makes self-intersecting input usable as a classifier at all.
pub struct HitMap {
    rings: Vec<Ring>,
}

impl HitMap {
    #[must_use]
    pub fn from_multi_polygon(multipolygon: &MultiPolygon) -> Self {
        let mut rings = Vec::new();
        for poly in &multipolygon.0 {
            for ring in &poly.0 {
                if ring.len() < 3 {
                    continue;
                }
                rings.push(Ring {
                    points: ring.clone(),
                    extent: Extent::from_points(ring),
                });
            }
        }
        Self { rings }
    }

    /// Number of ring edges a rightward ray from `pt` crosses.
    fn crossings(&self, pt: Point2) -> usize {
        let mut count = 0;
        for ring in &self.rings {
            // A ring whose extent cannot reach the ray contributes nothing.
            if pt.y < ring.extent.min_y()
                || pt.y > ring.extent.max_y()
                || pt.x > ring.extent.max_x()
            {
                continue;
            }
            let n = ring.points.len();
            for i in 0..n {
                let a = ring.points[i];
                let b = ring.points[(i + 1) % n];
                if (a.y > pt.y) == (b.y > pt.y) {
                    continue;
                }
                let x = a.x + (b.x - a.x) * (pt.y - a.y) / (b.y - a.y);
                if x > pt.x {
                    count += 1;
                }
            }
        }
        count
    }
}

impl HitMapper for HitMap {
    fn label(&self, pt: Point2) -> Label {
        if self.crossings(pt) % 2 == 1 {
            Label::Inside
        } else {
            Label::Outside
        }
    }
}

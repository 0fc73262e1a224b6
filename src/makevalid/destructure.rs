//! Destructuring: flatten a multipolygon into its boundary segments,
//! pre-filtered against an optional clip extent.

use tracing::debug;

use crate::geometry::{Extent, Line, MultiPolygon};
use crate::math::Point2;

/// Flattens the multipolygon into boundary segments. With a concrete clip
/// extent that does not already cover the geometry, segments whose extents
/// do not intersect the clip are dropped and the four edges of the
/// clip ∩ geometry-extent rectangle are injected at the head of the list,
/// so later stages see where the clip boundary cuts the geometry.
///
/// An empty result means nothing of the geometry survives the clip.
#[must_use]
pub fn destructure(clipbox: &Extent, multipolygon: &MultiPolygon) -> Vec<Line> {
    let segments = multipolygon.as_segments();
    if segments.is_empty() {
        return segments;
    }

    let mut points: Vec<Point2> = Vec::new();
    for poly in &multipolygon.0 {
        for ring in &poly.0 {
            points.extend_from_slice(ring);
        }
    }
    let gext = Extent::from_points(&points);

    // A universe clip, or one already covering the geometry, changes
    // nothing.
    if clipbox.is_universe() || clipbox.contains(&gext) {
        debug!(segments = segments.len(), "destructured without clip");
        return segments;
    }

    let Some(clip) = clipbox.intersect(&gext) else {
        debug!("geometry lies wholly outside the clip extent");
        return Vec::new();
    };

    let mut out: Vec<Line> = clip.edges(None).to_vec();
    out.extend(
        segments
            .into_iter()
            .filter(|seg| seg.extent().intersect(clipbox).is_some()),
    );
    debug!(segments = out.len(), "destructured against clip");
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn unit_square(side: f64) -> MultiPolygon {
        MultiPolygon(vec![Polygon(vec![vec![
            p(0.0, 0.0),
            p(side, 0.0),
            p(side, side),
            p(0.0, side),
        ]])])
    }

    #[test]
    fn universe_clip_passes_all_segments() {
        let got = destructure(&Extent::UNIVERSE, &unit_square(10.0));
        assert_eq!(got.len(), 4);
    }

    #[test]
    fn covering_clip_passes_all_segments() {
        let clip = Extent::new(-5.0, -5.0, 20.0, 20.0);
        let got = destructure(&clip, &unit_square(10.0));
        assert_eq!(got.len(), 4);
    }

    #[test]
    fn disjoint_clip_yields_nothing() {
        let clip = Extent::new(20.0, 20.0, 30.0, 30.0);
        let got = destructure(&clip, &unit_square(10.0));
        assert!(got.is_empty());
    }

    #[test]
    fn partial_clip_injects_rectangle_edges() {
        let clip = Extent::new(5.0, 5.0, 15.0, 15.0);
        let got = destructure(&clip, &unit_square(10.0));
        // Every square edge has a degenerate overlap with the clip in one
        // axis, so only the injected clip ∩ extent rectangle remains.
        assert_eq!(got.len(), 4);
        let clipped = Extent::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(got, clipped.edges(None).to_vec());
    }

    #[test]
    fn partial_clip_keeps_overlapping_segments() {
        // Diamond centered on (5,5); every edge has a full 2D extent.
        let diamond = MultiPolygon(vec![Polygon(vec![vec![
            p(5.0, 0.0),
            p(10.0, 5.0),
            p(5.0, 10.0),
            p(0.0, 5.0),
        ]])]);
        let clip = Extent::new(-5.0, -5.0, 4.0, 4.0);
        let got = destructure(&clip, &diamond);
        // Four injected clip ∩ extent edges, then the one diamond edge
        // whose extent reaches into the clip.
        let clipped = Extent::new(0.0, 0.0, 4.0, 4.0);
        assert_eq!(&got[..4], &clipped.edges(None)[..]);
        assert_eq!(&got[4..], &[Line::new(p(0.0, 5.0), p(5.0, 0.0))]);
    }

    #[test]
    fn empty_multipolygon() {
        let got = destructure(&Extent::UNIVERSE, &MultiPolygon::default());
        assert!(got.is_empty());
    }
}

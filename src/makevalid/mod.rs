//! Repairing invalid polygonal geometry.
//!
//! A polygon or multipolygon is destructured into boundary segments,
//! split wherever segments meet, reduced to a canonical planar
//! arrangement, triangulated, and reassembled into clean polygons whose
//! interiors match the even-odd fill of the original rings. Point and
//! line geometries cannot be invalid in this sense and pass through,
//! optionally clipped.

pub mod destructure;
pub mod hitmap;
pub mod reduce;
pub mod sweep;
pub mod triangulate;
pub mod walker;

pub use hitmap::{HitMap, HitMapper, Label};
pub use sweep::{CancelToken, EventQueue};
pub use triangulate::{DelaunayTriangulator, Triangulator};
pub use walker::{RingWalker, Walker};

use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::geometry::{Extent, Geometry, MultiPolygon};

/// Clips point and line geometries to an extent.
pub trait Clipper {
    /// Clips the geometry to the extent.
    ///
    /// # Errors
    ///
    /// Fails when the geometry cannot be clipped.
    fn clip(&self, geometry: &Geometry, clipbox: &Extent) -> Result<Geometry>;
}

/// The repair pipeline with its pluggable collaborators.
pub struct MakeValid {
    /// Clips non-polygonal geometries; without one they pass through
    /// untouched.
    pub clipper: Option<Box<dyn Clipper>>,
    pub triangulator: Box<dyn Triangulator>,
    pub walker: Box<dyn Walker>,
}

impl Default for MakeValid {
    fn default() -> Self {
        Self {
            clipper: None,
            triangulator: Box::new(DelaunayTriangulator),
            walker: Box::new(RingWalker),
        }
    }
}

impl MakeValid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clipper(mut self, clipper: Box<dyn Clipper>) -> Self {
        self.clipper = Some(clipper);
        self
    }

    /// Makes the geometry valid against the clip extent.
    ///
    /// Returns the repaired geometry, or `None` when nothing of it
    /// survives, plus a flag reporting whether the geometry was actually
    /// processed: point and line geometries without a clipper pass
    /// through as-is with the flag `false`.
    ///
    /// # Errors
    ///
    /// [`GeometryError::Unsupported`] for collections, which have no
    /// single repair semantics; cancellation and collaborator failures
    /// propagate.
    pub fn make_valid(
        &self,
        cancel: &CancelToken,
        geometry: &Geometry,
        clipbox: &Extent,
    ) -> Result<(Option<Geometry>, bool)> {
        match geometry {
            Geometry::Point(_)
            | Geometry::MultiPoint(_)
            | Geometry::LineString(_)
            | Geometry::MultiLineString(_) => match &self.clipper {
                Some(clipper) => {
                    let clipped = clipper.clip(geometry, clipbox)?;
                    Ok((Some(clipped), true))
                }
                None => Ok((Some(geometry.clone()), false)),
            },
            Geometry::Polygon(poly) => {
                let mp = MultiPolygon(vec![poly.clone()]);
                self.make_valid_polygon(cancel, clipbox, &mp)
            }
            Geometry::MultiPolygon(mp) => self.make_valid_polygon(cancel, clipbox, mp),
            Geometry::Collection(_) => Err(GeometryError::Unsupported("collection").into()),
        }
    }

    fn make_valid_polygon(
        &self,
        cancel: &CancelToken,
        clipbox: &Extent,
        multipolygon: &MultiPolygon,
    ) -> Result<(Option<Geometry>, bool)> {
        let segments = destructure::destructure(clipbox, multipolygon);
        if segments.is_empty() {
            debug!("no segments survive the clip");
            return Ok((None, true));
        }

        let split = sweep::split_segments(cancel, clipbox, &segments)?;
        let arrangement = reduce::reduce(&split);
        if arrangement.is_empty() {
            return Ok((None, true));
        }

        // Classification runs against the original rings, not the
        // clipped arrangement, so holes stay holes after clipping.
        let hitmap = HitMap::from_multi_polygon(multipolygon);
        // A triangle set with no interior members still walks, yielding
        // an empty multipolygon rather than no geometry.
        let triangles = self.triangulator.triangulate(&arrangement, &hitmap)?;
        let rebuilt = self.walker.reassemble(&triangles);
        debug!(polygons = rebuilt.0.len(), "rebuilt geometry");
        Ok((Some(Geometry::MultiPolygon(rebuilt)), true))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::{PlanarisError, SweepError};
    use crate::geometry::{Line, Polygon, Triangle};
    use crate::math::cmp::multi_polygon_eq;
    use crate::math::{signed_area, Point2};

    /// Routes pipeline tracing to the test writer; filter with
    /// `RUST_LOG=planaris=trace`.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square(min: f64, max: f64) -> Polygon {
        Polygon(vec![vec![p(min, min), p(max, min), p(max, max), p(min, max)]])
    }

    fn area_of(geometry: &Geometry) -> f64 {
        match geometry {
            Geometry::MultiPolygon(mp) => mp
                .0
                .iter()
                .flat_map(|poly| poly.0.iter())
                .map(|ring| signed_area(ring))
                .sum(),
            _ => 0.0,
        }
    }

    #[test]
    fn valid_square_round_trips() {
        init_tracing();
        let mv = MakeValid::new();
        let geo = Geometry::Polygon(square(0.0, 10.0));
        let (got, repaired) = mv
            .make_valid(&CancelToken::new(), &geo, &Extent::UNIVERSE)
            .unwrap();
        assert!(repaired);
        let got = got.unwrap();
        let want = MultiPolygon(vec![square(0.0, 10.0)]);
        match got {
            Geometry::MultiPolygon(mp) => assert!(multi_polygon_eq(&mp, &want)),
            other => panic!("expected multipolygon, got {other:?}"),
        }
    }

    #[test]
    fn bowtie_splits_into_two_lobes() {
        init_tracing();
        let mv = MakeValid::new();
        let bowtie = Geometry::Polygon(Polygon(vec![vec![
            p(0.0, 0.0),
            p(10.0, 10.0),
            p(10.0, 0.0),
            p(0.0, 10.0),
        ]]));
        let (got, repaired) = mv
            .make_valid(&CancelToken::new(), &bowtie, &Extent::UNIVERSE)
            .unwrap();
        assert!(repaired);
        let got = got.unwrap();
        match &got {
            Geometry::MultiPolygon(mp) => assert_eq!(mp.0.len(), 2),
            other => panic!("expected multipolygon, got {other:?}"),
        }
        // Each lobe is a 25-area triangle.
        assert_relative_eq!(area_of(&got), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn clipping_a_square() {
        init_tracing();
        let mv = MakeValid::new();
        let geo = Geometry::Polygon(square(0.0, 10.0));
        let clip = Extent::new(5.0, 5.0, 15.0, 15.0);
        let (got, repaired) = mv.make_valid(&CancelToken::new(), &geo, &clip).unwrap();
        assert!(repaired);
        let got = got.unwrap();
        assert_eq!(got.extent(), Extent::new(5.0, 5.0, 10.0, 10.0));
        assert_relative_eq!(area_of(&got), 25.0, epsilon = 1e-9);
    }

    #[test]
    fn collinear_sliver_yields_empty_multipolygon() {
        // A zero-area ring produces a non-empty arrangement but no
        // interior triangles; the result is an empty multipolygon, not
        // an absent geometry.
        let mv = MakeValid::new();
        let sliver = Geometry::Polygon(Polygon(vec![vec![
            p(0.0, 0.0),
            p(5.0, 0.0),
            p(10.0, 0.0),
        ]]));
        let (got, repaired) = mv
            .make_valid(&CancelToken::new(), &sliver, &Extent::UNIVERSE)
            .unwrap();
        assert!(repaired);
        assert_eq!(got, Some(Geometry::MultiPolygon(MultiPolygon::default())));
    }

    #[test]
    fn geometry_outside_clip_vanishes() {
        let mv = MakeValid::new();
        let geo = Geometry::Polygon(square(0.0, 10.0));
        let clip = Extent::new(20.0, 20.0, 30.0, 30.0);
        let (got, repaired) = mv.make_valid(&CancelToken::new(), &geo, &clip).unwrap();
        assert!(repaired);
        assert!(got.is_none());
    }

    #[test]
    fn hole_survives_repair() {
        let mv = MakeValid::new();
        let geo = Geometry::Polygon(Polygon(vec![
            vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)],
            vec![p(4.0, 4.0), p(6.0, 4.0), p(6.0, 6.0), p(4.0, 6.0)],
        ]));
        let (got, _) = mv
            .make_valid(&CancelToken::new(), &geo, &Extent::UNIVERSE)
            .unwrap();
        let got = got.unwrap();
        // 100 outer minus 4 hole.
        assert_relative_eq!(area_of(&got), 96.0, epsilon = 1e-9);
        match &got {
            Geometry::MultiPolygon(mp) => {
                assert_eq!(mp.0.len(), 1);
                assert_eq!(mp.0[0].0.len(), 2);
            }
            other => panic!("expected multipolygon, got {other:?}"),
        }
    }

    #[test]
    fn line_geometry_passes_through_without_clipper() {
        let mv = MakeValid::new();
        let geo = Geometry::LineString(crate::geometry::LineString(vec![
            p(0.0, 0.0),
            p(5.0, 5.0),
        ]));
        let (got, repaired) = mv
            .make_valid(&CancelToken::new(), &geo, &Extent::new(1.0, 1.0, 2.0, 2.0))
            .unwrap();
        assert!(!repaired);
        assert_eq!(got, Some(geo));
    }

    #[test]
    fn point_geometry_uses_clipper_when_present() {
        struct DropAll;

        impl Clipper for DropAll {
            fn clip(&self, _: &Geometry, _: &Extent) -> Result<Geometry> {
                Ok(Geometry::MultiPoint(Vec::new()))
            }
        }

        let mv = MakeValid::new().with_clipper(Box::new(DropAll));
        let geo = Geometry::Point(p(3.0, 3.0));
        let (got, repaired) = mv
            .make_valid(&CancelToken::new(), &geo, &Extent::UNIVERSE)
            .unwrap();
        assert!(repaired);
        assert_eq!(got, Some(Geometry::MultiPoint(Vec::new())));
    }

    #[test]
    fn collection_is_unsupported() {
        let mv = MakeValid::new();
        let geo = Geometry::Collection(vec![Geometry::Point(p(0.0, 0.0))]);
        let got = mv.make_valid(&CancelToken::new(), &geo, &Extent::UNIVERSE);
        assert!(matches!(
            got,
            Err(PlanarisError::Geometry(GeometryError::Unsupported(_)))
        ));
    }

    #[test]
    fn cancellation_propagates() {
        let mv = MakeValid::new();
        let token = CancelToken::new();
        token.cancel();
        let geo = Geometry::Polygon(square(0.0, 10.0));
        let got = mv.make_valid(&token, &geo, &Extent::UNIVERSE);
        assert!(matches!(
            got,
            Err(PlanarisError::Sweep(SweepError::Cancelled))
        ));
    }

    #[test]
    fn collaborator_failure_reports_its_stage() {
        struct Failing;

        impl Triangulator for Failing {
            fn triangulate(&self, _: &[Line], _: &dyn HitMapper) -> Result<Vec<Triangle>> {
                Err(crate::error::CollaboratorError {
                    stage: "triangulator",
                    source: "mesh exploded".into(),
                }
                .into())
            }
        }

        let mv = MakeValid {
            triangulator: Box::new(Failing),
            ..MakeValid::new()
        };
        let geo = Geometry::Polygon(square(0.0, 10.0));
        let got = mv.make_valid(&CancelToken::new(), &geo, &Extent::UNIVERSE);
        match got {
            Err(PlanarisError::Collaborator(err)) => {
                assert_eq!(err.stage, "triangulator");
                assert_eq!(err.source.to_string(), "mesh exploded");
            }
            other => panic!("expected collaborator failure, got {other:?}"),
        }
    }

    #[test]
    fn overlapping_multipolygon_merges() {
        // Under the even-odd rule the doubly-covered overlap of two
        // squares counts as outside, so the result excludes it.
        let mv = MakeValid::new();
        let geo = Geometry::MultiPolygon(MultiPolygon(vec![
            square(0.0, 10.0),
            square(5.0, 15.0),
        ]));
        let (got, _) = mv
            .make_valid(&CancelToken::new(), &geo, &Extent::UNIVERSE)
            .unwrap();
        let got = got.unwrap();
        // Even-odd: each square is 100, the doubly-covered overlap of 25
        // drops out, leaving 150.
        assert_relative_eq!(area_of(&got), 150.0, epsilon = 1e-9);
    }
}

//! Constrained Delaunay triangulation of a planar segment arrangement.

use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};
use tracing::debug;

use crate::error::{CollaboratorError, Result};
use crate::geometry::{Line, Triangle};
use crate::makevalid::hitmap::{HitMapper, Label};
use crate::math::Point2;

/// Turns a planar arrangement of segments into interior triangles.
pub trait Triangulator {
    /// Triangulates the area spanned by the segments and keeps only the
    /// triangles the hit mapper labels inside.
    ///
    /// # Errors
    ///
    /// Fails when the segments cannot be triangulated.
    fn triangulate(&self, segments: &[Line], hitmap: &dyn HitMapper) -> Result<Vec<Triangle>>;
}

/// Constrained Delaunay triangulator. Every input segment becomes a
/// constraint edge, so triangle boundaries never cross the arrangement;
/// a triangle is interior exactly when its centroid is labeled inside.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelaunayTriangulator;

impl Triangulator for DelaunayTriangulator {
    fn triangulate(&self, segments: &[Line], hitmap: &dyn HitMapper) -> Result<Vec<Triangle>> {
        let mut cdt = ConstrainedDelaunayTriangulation::<SpadePoint2<f64>>::new();

        for seg in segments {
            let from = cdt
                .insert(SpadePoint2::new(seg.start.x, seg.start.y))
                .map_err(|e| insertion_error(*seg, e))?;
            let to = cdt
                .insert(SpadePoint2::new(seg.end.x, seg.end.y))
                .map_err(|e| insertion_error(*seg, e))?;
            if from != to {
                cdt.add_constraint(from, to);
            }
        }

        let mut triangles = Vec::new();
        for face_handle in cdt.inner_faces() {
            let verts = face_handle.vertices();
            let tri = Triangle([
                spade_point(verts[0].position()),
                spade_point(verts[1].position()),
                spade_point(verts[2].position()),
            ]);
            if hitmap.label(tri.center()) == Label::Inside {
                triangles.push(tri);
            }
        }
        debug!(
            faces = cdt.num_inner_faces(),
            interior = triangles.len(),
            "triangulated arrangement"
        );
        Ok(triangles)
    }
}

fn spade_point(pt: SpadePoint2<f64>) -> Point2 {
    Point2::new(pt.x, pt.y)
}

fn insertion_error(seg: Line, e: InsertionError) -> CollaboratorError {
    CollaboratorError {
        stage: "triangulator",
        source: format!("cannot insert endpoint of {seg:?}: {e}").into(),
    }
}

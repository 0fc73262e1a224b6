//! Reassembling interior triangles into polygons with holes.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::geometry::{MultiPolygon, Polygon, Triangle};
use crate::math::{signed_area, Point2};

/// Rebuilds polygons from a set of interior triangles.
pub trait Walker {
    fn reassemble(&self, triangles: &[Triangle]) -> MultiPolygon;
}

/// Bit-exact vertex key; triangulator output shares exact coordinates, so
/// no tolerance is needed to match edges up.
type VertexKey = (u64, u64);

/// Undirected edge key with its endpoints in a fixed order.
type EdgeKey = (VertexKey, VertexKey);

fn vertex_key(pt: Point2) -> VertexKey {
    (pt.x.to_bits(), pt.y.to_bits())
}

fn edge_key(a: Point2, b: Point2) -> EdgeKey {
    let (ka, kb) = (vertex_key(a), vertex_key(b));
    if ka <= kb {
        (ka, kb)
    } else {
        (kb, ka)
    }
}

/// Edge-adjacency walker. Triangles sharing an edge belong to the same
/// polygon; each connected component's boundary edges (the ones used by
/// exactly one triangle) are chained into rings. With every triangle
/// oriented counter-clockwise the boundary chains come out with the
/// exterior counter-clockwise and holes clockwise, and the ring with the
/// largest absolute area is the exterior.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingWalker;

impl Walker for RingWalker {
    fn reassemble(&self, triangles: &[Triangle]) -> MultiPolygon {
        let oriented: Vec<Triangle> = triangles.iter().map(|t| orient_ccw(*t)).collect();

        // Triangles sharing an undirected edge are neighbors.
        let mut by_edge: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
        for (i, tri) in oriented.iter().enumerate() {
            for (a, b) in triangle_edges(tri) {
                by_edge.entry(edge_key(a, b)).or_default().push(i);
            }
        }

        let mut component = vec![usize::MAX; oriented.len()];
        let mut count = 0;
        for start in 0..oriented.len() {
            if component[start] != usize::MAX {
                continue;
            }
            let id = count;
            count += 1;
            let mut queue = VecDeque::from([start]);
            component[start] = id;
            while let Some(i) = queue.pop_front() {
                for (a, b) in triangle_edges(&oriented[i]) {
                    for &j in &by_edge[&edge_key(a, b)] {
                        if component[j] == usize::MAX {
                            component[j] = id;
                            queue.push_back(j);
                        }
                    }
                }
            }
        }

        let mut polygons = Vec::with_capacity(count);
        for id in 0..count {
            let boundary: Vec<(Point2, Point2)> = oriented
                .iter()
                .enumerate()
                .filter(|(i, _)| component[*i] == id)
                .flat_map(|(_, tri)| triangle_edges(tri))
                .filter(|(a, b)| by_edge[&edge_key(*a, *b)].len() == 1)
                .collect();
            if let Some(poly) = chain_rings(boundary) {
                polygons.push(poly);
            }
        }
        debug!(
            triangles = triangles.len(),
            polygons = polygons.len(),
            "reassembled triangles"
        );
        MultiPolygon(polygons)
    }
}

fn orient_ccw(mut tri: Triangle) -> Triangle {
    if signed_area(&tri.0) < 0.0 {
        tri.0.swap(1, 2);
    }
    tri
}

fn triangle_edges(tri: &Triangle) -> [(Point2, Point2); 3] {
    [
        (tri.0[0], tri.0[1]),
        (tri.0[1], tri.0[2]),
        (tri.0[2], tri.0[0]),
    ]
}

/// Chains directed boundary edges into closed rings and orders them with
/// the largest-area ring (the exterior) first.
fn chain_rings(mut edges: Vec<(Point2, Point2)>) -> Option<Polygon> {
    // Deterministic ring starts regardless of triangle order.
    edges.sort_by(|a, b| {
        crate::math::cmp::point_cmp(a.0, b.0).then_with(|| crate::math::cmp::point_cmp(a.1, b.1))
    });

    let mut by_start: HashMap<VertexKey, Vec<usize>> = HashMap::new();
    for (i, (a, _)) in edges.iter().enumerate() {
        by_start.entry(vertex_key(*a)).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut rings: Vec<Vec<Point2>> = Vec::new();

    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        used[first] = true;
        let start_key = vertex_key(edges[first].0);
        let mut ring = vec![edges[first].0];
        let mut cursor = edges[first].1;

        while vertex_key(cursor) != start_key {
            ring.push(cursor);
            let Some(next) = by_start
                .get(&vertex_key(cursor))
                .and_then(|cands| cands.iter().find(|&&i| !used[i]))
            else {
                // Open chain; the input was not a closed boundary.
                return None;
            };
            used[*next] = true;
            cursor = edges[*next].1;
        }
        rings.push(ring);
    }

    if rings.is_empty() {
        return None;
    }
    let exterior = rings
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            signed_area(a)
                .abs()
                .total_cmp(&signed_area(b).abs())
        })
        .map(|(i, _)| i)?;
    rings.swap(0, exterior);
    Some(Polygon(rings))
}

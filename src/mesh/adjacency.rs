//! Triangle adjacency across shared edges.
//!
//! [`HalfEdgeMap`] precomputes, for every (triangle, local edge) pair, the
//! triangle on the other side of that edge. Local edge `e` of a triangle runs
//! from its vertex `e` to vertex `(e + 1) % 3`. Boundary edges map to no
//! sibling.
//!
//! The table is built once per mesh and is read-only afterwards, so it can be
//! shared across threads together with the mesh.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{MeshError, Result};

use super::index::{MeshIndex, TriangleId};
use super::triangle_mesh::TriangleMesh;

/// Slot of one side of an undirected edge during the build pass.
#[derive(Clone, Copy)]
struct EdgeSide {
    triangle: usize,
    edge: usize,
}

/// Precomputed triangle-to-triangle adjacency across shared edges.
///
/// # Example
///
/// ```
/// use rove::mesh::{HalfEdgeMap, TriangleId, TriangleMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
///     Point3::new(0.5, -1.0, 0.0),
/// ];
/// // Second triangle shares the (0, 1) edge of the first.
/// let triangles = vec![[0, 1, 2], [1, 0, 3]];
/// let mesh: TriangleMesh = TriangleMesh::from_triangles(&vertices, &triangles).unwrap();
///
/// let map = HalfEdgeMap::build(&mesh).unwrap();
/// assert_eq!(map.sibling(TriangleId::new(0), 0), Some(TriangleId::new(1)));
/// assert_eq!(map.sibling(TriangleId::new(0), 1), None); // boundary
/// ```
#[derive(Debug, Clone)]
pub struct HalfEdgeMap<I: MeshIndex = u32> {
    /// `siblings[3 * t + e]` is the triangle across edge `e` of triangle `t`,
    /// or the invalid sentinel for a boundary edge.
    siblings: Vec<TriangleId<I>>,
}

impl<I: MeshIndex> HalfEdgeMap<I> {
    /// Build the adjacency table for a mesh.
    ///
    /// Every undirected edge may be shared by at most two triangles; a third
    /// sharer makes the mesh non-manifold and fails the build.
    pub fn build(mesh: &TriangleMesh<I>) -> Result<Self> {
        // Group triangle edges by canonical (min, max) vertex-index key.
        let mut edges: HashMap<(usize, usize), (EdgeSide, Option<EdgeSide>)> =
            HashMap::with_capacity(mesh.num_triangles() * 3 / 2);

        for t in 0..mesh.num_triangles() {
            let tri = mesh.triangle(TriangleId::new(t));
            for e in 0..3 {
                let v0 = tri[e].index();
                let v1 = tri[(e + 1) % 3].index();
                let key = (v0.min(v1), v0.max(v1));
                let side = EdgeSide { triangle: t, edge: e };

                match edges.entry(key) {
                    std::collections::hash_map::Entry::Vacant(slot) => {
                        slot.insert((side, None));
                    }
                    std::collections::hash_map::Entry::Occupied(mut slot) => {
                        let (_, second) = slot.get_mut();
                        if second.is_some() {
                            return Err(MeshError::NonManifoldEdge { v0: key.0, v1: key.1 });
                        }
                        *second = Some(side);
                    }
                }
            }
        }

        let mut siblings = vec![TriangleId::invalid(); mesh.num_triangles() * 3];
        let mut interior = 0usize;
        for (first, second) in edges.values() {
            if let Some(second) = second {
                siblings[3 * first.triangle + first.edge] = TriangleId::new(second.triangle);
                siblings[3 * second.triangle + second.edge] = TriangleId::new(first.triangle);
                interior += 1;
            }
        }

        debug!(
            triangles = mesh.num_triangles(),
            edges = edges.len(),
            interior,
            "built half-edge map"
        );

        Ok(Self { siblings })
    }

    /// Get the triangle sharing edge `edge` of `triangle`, if any.
    ///
    /// Returns `None` for boundary edges. `edge` must be in `{0, 1, 2}`.
    #[inline]
    pub fn sibling(&self, triangle: TriangleId<I>, edge: usize) -> Option<TriangleId<I>> {
        debug_assert!(edge < 3, "local edge index {} out of range", edge);
        let s = self.siblings[3 * triangle.index() + edge];
        s.is_valid().then_some(s)
    }

    /// Check whether edge `edge` of `triangle` lies on the mesh boundary.
    #[inline]
    pub fn is_boundary(&self, triangle: TriangleId<I>, edge: usize) -> bool {
        self.sibling(triangle, edge).is_none()
    }

    /// The number of triangles this map was built for.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.siblings.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn tetrahedron() -> TriangleMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let triangles = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        TriangleMesh::from_triangles(&vertices, &triangles).unwrap()
    }

    #[test]
    fn test_two_triangles_shared_edge() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
        ];
        let triangles = vec![[0, 1, 2], [1, 0, 3]];
        let mesh: TriangleMesh = TriangleMesh::from_triangles(&vertices, &triangles).unwrap();

        let map = HalfEdgeMap::build(&mesh).unwrap();

        // Edge 0 of triangle 0 is (0, 1), shared with triangle 1
        assert_eq!(map.sibling(TriangleId::new(0), 0), Some(TriangleId::new(1)));
        assert_eq!(map.sibling(TriangleId::new(1), 0), Some(TriangleId::new(0)));

        // The remaining edges are boundary
        assert_eq!(map.sibling(TriangleId::new(0), 1), None);
        assert_eq!(map.sibling(TriangleId::new(0), 2), None);
        assert!(map.is_boundary(TriangleId::new(1), 1));
        assert!(map.is_boundary(TriangleId::new(1), 2));
    }

    #[test]
    fn test_closed_mesh_has_no_boundary() {
        let mesh = tetrahedron();
        let map = HalfEdgeMap::build(&mesh).unwrap();

        for t in mesh.triangle_ids() {
            for e in 0..3 {
                let sibling = map.sibling(t, e);
                assert!(sibling.is_some(), "edge {} of {:?} should be interior", e, t);
                assert_ne!(sibling, Some(t));
            }
        }
    }

    #[test]
    fn test_sibling_is_symmetric() {
        let mesh = tetrahedron();
        let map = HalfEdgeMap::build(&mesh).unwrap();

        for t in mesh.triangle_ids() {
            for e in 0..3 {
                let Some(s) = map.sibling(t, e) else { continue };
                // The sibling must list t across one of its own edges
                let back = (0..3).filter_map(|e2| map.sibling(s, e2)).any(|b| b == t);
                assert!(back, "{:?} -> {:?} adjacency is not symmetric", t, s);
            }
        }
    }

    #[test]
    fn test_non_manifold_edge() {
        // Three triangles fanning around the shared edge (0, 1)
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
            Point3::new(0.5, 0.0, 1.0),
        ];
        let triangles = vec![[0, 1, 2], [1, 0, 3], [0, 1, 4]];
        let mesh: TriangleMesh = TriangleMesh::from_triangles(&vertices, &triangles).unwrap();

        let result = HalfEdgeMap::build(&mesh);
        assert!(matches!(
            result,
            Err(MeshError::NonManifoldEdge { v0: 0, v1: 1 })
        ));
    }

    #[test]
    fn test_single_triangle_all_boundary() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        let mesh: TriangleMesh = TriangleMesh::from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
        let map = HalfEdgeMap::build(&mesh).unwrap();

        for e in 0..3 {
            assert!(map.is_boundary(TriangleId::new(0), e));
        }
    }
}

//! Indexed triangle mesh.
//!
//! [`TriangleMesh`] stores a vertex position array and an indexed triangle
//! list. It is deliberately minimal: walkers and samplers borrow it
//! immutably, so after construction the geometry never changes underneath
//! them and the mesh can be shared freely across threads.

use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};

use super::index::{MeshIndex, TriangleId, VertexId};

/// A point on a mesh surface together with the triangle that owns it.
///
/// Well-formed surface points keep their position on (or numerically near)
/// the plane of the owning triangle. The walker re-projects the position onto
/// that plane at the start of every call, so small drift is tolerated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint<I: MeshIndex = u32> {
    /// The 3D position of the point.
    pub position: Point3<f64>,

    /// The triangle this point lies on.
    pub triangle: TriangleId<I>,
}

impl<I: MeshIndex> SurfacePoint<I> {
    /// Create a surface point from a position and its owning triangle.
    pub fn new(position: Point3<f64>, triangle: TriangleId<I>) -> Self {
        Self { position, triangle }
    }
}

/// An indexed triangle mesh: vertex positions plus triangle index triples.
///
/// # Construction
///
/// ```
/// use rove::mesh::TriangleMesh;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let triangles = vec![[0, 1, 2]];
///
/// let mesh: TriangleMesh = TriangleMesh::from_triangles(&vertices, &triangles).unwrap();
/// assert_eq!(mesh.num_triangles(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TriangleMesh<I: MeshIndex = u32> {
    vertices: Vec<Point3<f64>>,
    triangles: Vec<[VertexId<I>; 3]>,
}

impl<I: MeshIndex> TriangleMesh<I> {
    /// Build a mesh from vertex positions and triangle index triples.
    ///
    /// Each triple `[v0, v1, v2]` indexes into `vertices`, counter-clockwise
    /// winding assumed. Out-of-range indices and repeated-vertex triangles
    /// are rejected.
    pub fn from_triangles(
        vertices: &[Point3<f64>],
        triangles: &[[usize; 3]],
    ) -> Result<Self> {
        if triangles.is_empty() {
            return Err(MeshError::EmptyMesh);
        }

        for (ti, tri) in triangles.iter().enumerate() {
            for &vi in tri {
                if vi >= vertices.len() {
                    return Err(MeshError::InvalidVertexIndex {
                        triangle: ti,
                        vertex: vi,
                    });
                }
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return Err(MeshError::DegenerateFace { triangle: ti });
            }
        }

        Ok(Self {
            vertices: vertices.to_vec(),
            triangles: triangles
                .iter()
                .map(|t| [VertexId::new(t[0]), VertexId::new(t[1]), VertexId::new(t[2])])
                .collect(),
        })
    }

    /// Build a mesh from an implicit triangle soup.
    ///
    /// Every consecutive run of three positions forms one triangle; the
    /// position count must be a multiple of three.
    pub fn from_soup(positions: &[Point3<f64>]) -> Result<Self> {
        if positions.len() % 3 != 0 {
            return Err(MeshError::invalid_param(
                "positions",
                positions.len(),
                "soup length must be a multiple of 3",
            ));
        }

        let triangles: Vec<[usize; 3]> = (0..positions.len() / 3)
            .map(|t| [3 * t, 3 * t + 1, 3 * t + 2])
            .collect();
        Self::from_triangles(positions, &triangles)
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertices[v.index()]
    }

    /// Get the three vertex ids of a triangle.
    #[inline]
    pub fn triangle(&self, t: TriangleId<I>) -> [VertexId<I>; 3] {
        self.triangles[t.index()]
    }

    /// Get the positions of the three vertices of a triangle.
    pub fn triangle_positions(&self, t: TriangleId<I>) -> [Point3<f64>; 3] {
        let [v0, v1, v2] = self.triangle(t);
        [*self.position(v0), *self.position(v1), *self.position(v2)]
    }

    /// Iterate over all vertex ids.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(|i| VertexId::new(i))
    }

    /// Iterate over all triangle ids.
    pub fn triangle_ids(&self) -> impl Iterator<Item = TriangleId<I>> + '_ {
        (0..self.triangles.len()).map(|i| TriangleId::new(i))
    }

    // ==================== Geometry ====================

    /// Compute the (unit) normal of a triangle.
    ///
    /// Returns a NaN vector for zero-area triangles; code that needs the
    /// failure surfaced should build a [`crate::walk::TriangleFrame`] instead.
    pub fn triangle_normal(&self, t: TriangleId<I>) -> Vector3<f64> {
        let [p0, p1, p2] = self.triangle_positions(t);
        let e1 = p1 - p0;
        let e2 = p2 - p0;
        e1.cross(&e2).normalize()
    }

    /// Compute the area of a triangle.
    pub fn triangle_area(&self, t: TriangleId<I>) -> f64 {
        let [p0, p1, p2] = self.triangle_positions(t);
        let e1 = p1 - p0;
        let e2 = p2 - p0;
        0.5 * e1.cross(&e2).norm()
    }

    /// Compute the centroid of a triangle.
    pub fn triangle_centroid(&self, t: TriangleId<I>) -> Point3<f64> {
        let [p0, p1, p2] = self.triangle_positions(t);
        Point3::from((p0.coords + p1.coords + p2.coords) / 3.0)
    }

    /// Compute the total surface area of the mesh.
    pub fn surface_area(&self) -> f64 {
        self.triangle_ids().map(|t| self.triangle_area(t)).sum()
    }

    /// Compute the bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        if self.vertices.is_empty() {
            return None;
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices {
            for i in 0..3 {
                min[i] = min[i].min(v[i]);
                max[i] = max[i].max(v[i]);
            }
        }

        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
        // Two triangles sharing the edge (0, 1)
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
        ];
        let triangles = vec![[0, 1, 2], [1, 0, 3]];
        (vertices, triangles)
    }

    #[test]
    fn test_from_triangles() {
        let (vertices, triangles) = two_triangles();
        let mesh: TriangleMesh = TriangleMesh::from_triangles(&vertices, &triangles).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_triangles(), 2);

        let [v0, v1, v2] = mesh.triangle(TriangleId::new(0));
        assert_eq!([v0.index(), v1.index(), v2.index()], [0, 1, 2]);
    }

    #[test]
    fn test_empty_mesh() {
        let vertices = vec![Point3::new(0.0, 0.0, 0.0)];
        let result: Result<TriangleMesh> = TriangleMesh::from_triangles(&vertices, &[]);
        assert!(matches!(result, Err(MeshError::EmptyMesh)));
    }

    #[test]
    fn test_invalid_vertex_index() {
        let vertices = vec![Point3::new(0.0, 0.0, 0.0)];
        let triangles = vec![[0, 1, 2]]; // Indices 1 and 2 are invalid

        let result: Result<TriangleMesh> = TriangleMesh::from_triangles(&vertices, &triangles);
        assert!(matches!(
            result,
            Err(MeshError::InvalidVertexIndex { triangle: 0, vertex: 1 })
        ));
    }

    #[test]
    fn test_degenerate_face() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        let triangles = vec![[0, 0, 2]]; // Degenerate: v0 == v1

        let result: Result<TriangleMesh> = TriangleMesh::from_triangles(&vertices, &triangles);
        assert!(matches!(result, Err(MeshError::DegenerateFace { triangle: 0 })));
    }

    #[test]
    fn test_from_soup() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh: TriangleMesh = TriangleMesh::from_soup(&positions).unwrap();

        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.num_vertices(), 6);

        let result: Result<TriangleMesh> = TriangleMesh::from_soup(&positions[..4]);
        assert!(result.is_err());
    }

    #[test]
    fn test_geometry() {
        let (vertices, triangles) = two_triangles();
        let mesh: TriangleMesh = TriangleMesh::from_triangles(&vertices, &triangles).unwrap();

        let t0 = TriangleId::new(0);
        assert!((mesh.triangle_area(t0) - 0.5).abs() < 1e-10);
        assert!((mesh.surface_area() - 1.0).abs() < 1e-10);

        // CCW triangle in the XY plane points +Z
        let n = mesh.triangle_normal(t0);
        assert!((n - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-10);

        let c = mesh.triangle_centroid(t0);
        assert!((c - Point3::new(0.5, 1.0 / 3.0, 0.0)).norm() < 1e-10);

        let (min, max) = mesh.bounding_box().unwrap();
        assert!((min - Point3::new(0.0, -1.0, 0.0)).norm() < 1e-10);
        assert!((max - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-10);
    }
}

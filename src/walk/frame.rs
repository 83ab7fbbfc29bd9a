//! Per-triangle tangent-plane frames.
//!
//! A [`TriangleFrame`] carries a triangle's unit normal and the rigid
//! transform between world space and the triangle's local tangent-plane
//! coordinates (x, y in the plane, z along the normal). Because the basis is
//! orthonormal the transform is an isometry and its inverse is exact, which
//! keeps repeated project/unproject round trips from accumulating scale
//! error.

use nalgebra::{Isometry3, Matrix3, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};

use crate::error::{MeshError, Result};
use crate::mesh::{MeshIndex, TriangleId, TriangleMesh};

/// Cross-product norm below which a triangle is considered zero-area.
pub(crate) const DEGENERACY_EPSILON: f64 = 1e-12;

/// Margin by which a ray origin must sit interior to an edge's half-plane
/// before that edge qualifies as an exit candidate. Keeps a point that was
/// just placed on an edge from immediately re-exiting through it.
pub(crate) const EDGE_EPSILON: f64 = 1e-10;

/// A ray's exit through one of a triangle's edges.
#[derive(Debug, Clone, Copy)]
pub struct EdgeCrossing {
    /// Local index of the crossed edge (edge `e` runs from vertex `e` to
    /// vertex `(e + 1) % 3`).
    pub edge: usize,

    /// Distance along the (unit-direction) ray to the crossing.
    pub distance: f64,

    /// World-space crossing point.
    pub point: Point3<f64>,
}

/// A triangle's local orthonormal coordinate frame.
///
/// The local basis is (tangent, bitangent, normal) with the tangent along the
/// a→b edge and the origin at `a`. The basis is right-handed; points in the
/// triangle's plane have local z = 0.
#[derive(Debug, Clone)]
pub struct TriangleFrame {
    /// First vertex.
    pub a: Point3<f64>,
    /// Second vertex.
    pub b: Point3<f64>,
    /// Third vertex.
    pub c: Point3<f64>,

    /// Unit normal of the triangle's plane.
    pub normal: Vector3<f64>,

    /// Rigid transform from local tangent-plane coordinates to world space.
    transform: Isometry3<f64>,
}

impl TriangleFrame {
    /// Build a tangent frame from three vertices.
    ///
    /// Returns `None` when the triangle has near-zero area: no plane normal
    /// exists for it and any frame would be NaN-valued.
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Option<Self> {
        let cross = (b - a).cross(&(c - a));
        if cross.norm() < DEGENERACY_EPSILON {
            return None;
        }

        let normal = cross.normalize();
        let tangent = (b - a).normalize();
        let bitangent = normal.cross(&tangent);

        let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(
            Matrix3::from_columns(&[tangent, bitangent, normal]),
        ));
        let transform = Isometry3::from_parts(Translation3::from(a.coords), rotation);

        Some(Self { a, b, c, normal, transform })
    }

    /// Build the tangent frame of triangle `t` of `mesh`.
    ///
    /// A near-zero-area triangle fails with [`MeshError::DegenerateTriangle`].
    pub fn from_triangle<I: MeshIndex>(
        mesh: &TriangleMesh<I>,
        t: TriangleId<I>,
    ) -> Result<Self> {
        let [a, b, c] = mesh.triangle_positions(t);
        Self::new(a, b, c).ok_or(MeshError::DegenerateTriangle { triangle: t.index() })
    }

    /// Snap a world point onto the triangle's plane.
    ///
    /// Expresses the point in local coordinates, zeroes the normal-axis
    /// component, and maps back. Used to cancel drift after an edge hop.
    pub fn project_point(&self, p: &Point3<f64>) -> Point3<f64> {
        let mut local = self.transform.inverse_transform_point(p);
        local.z = 0.0;
        self.transform.transform_point(&local)
    }

    /// Project a direction vector into the triangle's plane.
    ///
    /// Same as [`project_point`](Self::project_point) but without the
    /// translation; the result is not renormalized.
    pub fn project_direction(&self, d: &Vector3<f64>) -> Vector3<f64> {
        let mut local = self.transform.inverse_transform_vector(d);
        local.z = 0.0;
        self.transform.transform_vector(&local)
    }

    /// Find where a ray in the triangle's plane exits through an edge.
    ///
    /// For each of the three edges the vertical half-plane containing the
    /// edge and the normal is built; an edge is a valid exit candidate only
    /// if the ray origin lies strictly on its interior side (by more than
    /// [`EDGE_EPSILON`]). Among valid candidates the smallest non-negative
    /// intersection distance wins, ties broken by ascending edge index.
    ///
    /// `direction` is assumed unit length, so the returned distance is
    /// Euclidean. Returns `None` when no edge qualifies.
    pub fn intersect_edge(
        &self,
        origin: &Point3<f64>,
        direction: &Vector3<f64>,
    ) -> Option<EdgeCrossing> {
        let vertices = [&self.a, &self.b, &self.c];

        let mut best: Option<(usize, f64)> = None;
        for e in 0..3 {
            let v0 = vertices[e];
            let v1 = vertices[(e + 1) % 3];

            // Half-plane through the edge, spanned by the edge and the normal.
            let plane_normal = (v1 - v0).cross(&self.normal).normalize();
            let signed = plane_normal.dot(&(origin - v0));
            if signed >= -EDGE_EPSILON {
                continue;
            }

            let denom = plane_normal.dot(direction);
            if denom.abs() < f64::EPSILON {
                continue;
            }

            let t = -signed / denom;
            if t < 0.0 {
                continue;
            }

            if best.map_or(true, |(_, d)| t < d) {
                best = Some((e, t));
            }
        }

        best.map(|(edge, distance)| EdgeCrossing {
            edge,
            distance,
            point: origin + direction * distance,
        })
    }
}

//! Geodesic point movement across a triangle mesh.
//!
//! [`SurfaceWalker`] advances a [`SurfacePoint`] a given distance across the
//! surface, hopping triangle boundaries as it goes. At each crossing the
//! travel direction is rotated by the rotation carrying the old triangle's
//! normal onto the new one, which unfolds the two triangles into a common
//! plane and keeps the path locally straight (a geodesic).
//!
//! Every call works on stack-local state only, so a walker can be shared
//! across threads and independent points walked concurrently.

use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};
use rayon::prelude::*;
use tracing::trace;

use crate::error::Result;
use crate::mesh::{HalfEdgeMap, MeshIndex, SurfacePoint, TriangleId, TriangleMesh};

use super::frame::TriangleFrame;

/// Options for a traversal call.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Confine the walk to a consistent plane instead of free geodesic
    /// drift: at each crossing, the direction component along the plane
    /// normal captured before the crossing is projected out.
    pub planar: bool,

    /// Maximum number of edge crossings before the walk is reported as
    /// stuck. Defaults to the mesh triangle count, which bounds looping on
    /// degenerate or non-manifold geometry; raise it for deliberately long
    /// walks on small closed meshes.
    pub max_crossings: Option<usize>,

    /// Whether [`SurfaceWalker::walk_batch`] runs in parallel (default: true).
    pub parallel: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            planar: false,
            max_crossings: None,
            parallel: true,
        }
    }
}

impl WalkOptions {
    /// Enable planar-walk mode.
    pub fn with_planar(mut self, planar: bool) -> Self {
        self.planar = planar;
        self
    }

    /// Set the crossing cap.
    pub fn with_max_crossings(mut self, max_crossings: usize) -> Self {
        self.max_crossings = Some(max_crossings);
        self
    }

    /// Run batch walks single-threaded.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Why a traversal stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The full travel distance was consumed.
    Completed,

    /// The walk exited through a boundary edge and was clamped there.
    /// The remaining distance was not consumed and the direction was not
    /// rotated past the boundary.
    Boundary,

    /// The crossing cap was exhausted. The point sits at the last crossing
    /// and the direction is unresolved; callers should treat this as an
    /// error to surface or retry.
    Stuck,
}

/// The outcome of one traversal call.
#[derive(Debug, Clone)]
pub struct Walk<I: MeshIndex = u32> {
    /// Final position and owning triangle.
    pub point: SurfacePoint<I>,

    /// Forward travel direction for a subsequent call, scaled to the input
    /// displacement's magnitude.
    pub direction: Vector3<f64>,

    /// Unit normal of the final triangle.
    pub normal: Vector3<f64>,

    /// Number of edge crossings performed.
    pub crossings: usize,

    /// Surface distance actually consumed. Less than the requested distance
    /// exactly when the walk terminated at a boundary or got stuck.
    pub distance: f64,

    /// Why the walk stopped.
    pub termination: Termination,
}

/// Geodesic traversal engine over a mesh and its edge adjacency.
///
/// # Example
///
/// ```
/// use rove::mesh::{SurfacePoint, TriangleId, TriangleMesh};
/// use rove::walk::{SurfaceWalker, WalkOptions};
/// use nalgebra::{Point3, Vector3};
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mesh: TriangleMesh = TriangleMesh::from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
/// let walker = SurfaceWalker::new(&mesh).unwrap();
///
/// let start = SurfacePoint::new(Point3::new(0.25, 0.25, 0.0), TriangleId::new(0));
/// let walk = walker
///     .walk(&start, &Vector3::new(0.05, 0.0, 0.0), &WalkOptions::default())
///     .unwrap();
///
/// assert_eq!(walk.point.triangle, TriangleId::new(0));
/// assert!((walk.distance - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct SurfaceWalker<'m, I: MeshIndex = u32> {
    mesh: &'m TriangleMesh<I>,
    map: HalfEdgeMap<I>,
}

impl<'m, I: MeshIndex> SurfaceWalker<'m, I> {
    /// Create a walker over a mesh, building its adjacency table.
    pub fn new(mesh: &'m TriangleMesh<I>) -> Result<Self> {
        let map = HalfEdgeMap::build(mesh)?;
        Ok(Self { mesh, map })
    }

    /// Create a walker from a mesh and a prebuilt adjacency table.
    pub fn with_map(mesh: &'m TriangleMesh<I>, map: HalfEdgeMap<I>) -> Self {
        Self { mesh, map }
    }

    /// The mesh this walker traverses.
    #[inline]
    pub fn mesh(&self) -> &TriangleMesh<I> {
        self.mesh
    }

    /// The adjacency table this walker hops across.
    #[inline]
    pub fn half_edge_map(&self) -> &HalfEdgeMap<I> {
        &self.map
    }

    /// Move a surface point along the mesh.
    ///
    /// The displacement vector's length is the surface distance to travel;
    /// its direction is projected into the starting triangle's tangent
    /// plane. See [`walk_with`](Self::walk_with) for crossing callbacks.
    pub fn walk(
        &self,
        start: &SurfacePoint<I>,
        displacement: &Vector3<f64>,
        options: &WalkOptions,
    ) -> Result<Walk<I>> {
        self.walk_with(start, displacement, options, |_| {})
    }

    /// Move a surface point along the mesh, invoking `on_cross` with the
    /// world-space intersection point at every edge crossing.
    ///
    /// The callback has no influence on the traversal; it exists for
    /// callers recording the polyline of crossing events (trail rendering
    /// and the like).
    pub fn walk_with<F>(
        &self,
        start: &SurfacePoint<I>,
        displacement: &Vector3<f64>,
        options: &WalkOptions,
        mut on_cross: F,
    ) -> Result<Walk<I>>
    where
        F: FnMut(&Point3<f64>),
    {
        let magnitude = displacement.norm();

        let mut frame = TriangleFrame::from_triangle(self.mesh, start.triangle)?;
        let mut origin = frame.project_point(&start.position);
        let mut dir = frame.project_direction(displacement);

        // Nothing tangential to do: zero-length displacement, or one along
        // the triangle normal.
        if magnitude <= f64::EPSILON || dir.norm() <= magnitude * 1e-12 {
            return Ok(Walk {
                point: SurfacePoint::new(origin, start.triangle),
                direction: *displacement,
                normal: frame.normal,
                crossings: 0,
                distance: 0.0,
                termination: Termination::Completed,
            });
        }
        dir.normalize_mut();

        let cap = options.max_crossings.unwrap_or_else(|| self.mesh.num_triangles());
        let mut triangle = start.triangle;
        let mut remaining = magnitude;
        let mut consumed = 0.0;
        let mut crossings = 0usize;

        let termination = loop {
            let Some(crossing) = frame.intersect_edge(&origin, &dir) else {
                // No exit: the remaining distance stays within this triangle.
                origin += dir * remaining;
                consumed += remaining;
                break Termination::Completed;
            };

            if crossing.distance >= remaining {
                origin += dir * remaining;
                consumed += remaining;
                break Termination::Completed;
            }

            remaining -= crossing.distance;
            consumed += crossing.distance;
            origin = crossing.point;

            let Some(next) = self.map.sibling(triangle, crossing.edge) else {
                // Boundary edge: clamp at the exit, direction stays as-is.
                break Termination::Boundary;
            };

            if crossings >= cap {
                break Termination::Stuck;
            }

            let next_frame = TriangleFrame::from_triangle(self.mesh, next)?;

            // Plane the walk is confined to, captured before the unfold.
            let plane_normal = options.planar.then(|| dir.cross(&frame.normal));

            dir = unfold_rotation(&frame, &next_frame, self.edge_direction(triangle, crossing.edge))
                * dir;
            if let Some(pn) = plane_normal {
                dir -= pn * pn.dot(&dir);
            }

            // Re-project onto the new triangle's plane to cancel drift.
            origin = next_frame.project_point(&origin);
            dir = next_frame.project_direction(&dir);
            if dir.norm() <= 1e-15 {
                // The planar constraint nulled the direction (fold-back).
                break Termination::Stuck;
            }
            dir.normalize_mut();

            on_cross(&origin);
            crossings += 1;
            triangle = next;
            frame = next_frame;
        };

        trace!(?termination, crossings, consumed, "walk finished");

        Ok(Walk {
            point: SurfacePoint::new(origin, triangle),
            direction: dir * magnitude,
            normal: frame.normal,
            crossings,
            distance: consumed,
            termination,
        })
    }

    /// Walk many independent points, in parallel unless
    /// [`WalkOptions::parallel`] is unset.
    pub fn walk_batch(
        &self,
        starts: &[(SurfacePoint<I>, Vector3<f64>)],
        options: &WalkOptions,
    ) -> Result<Vec<Walk<I>>> {
        if options.parallel {
            starts
                .par_iter()
                .map(|(p, d)| self.walk(p, d, options))
                .collect()
        } else {
            starts.iter().map(|(p, d)| self.walk(p, d, options)).collect()
        }
    }

    /// World-space direction of local edge `edge` of `triangle`.
    fn edge_direction(&self, triangle: TriangleId<I>, edge: usize) -> Vector3<f64> {
        let tri = self.mesh.triangle(triangle);
        let p0 = self.mesh.position(tri[edge]);
        let p1 = self.mesh.position(tri[(edge + 1) % 3]);
        p1 - p0
    }
}

/// The rotation carrying `from`'s normal onto `to`'s normal.
///
/// For antiparallel normals (a 180-degree fold) the cross-product axis is
/// undefined; the shared edge is the unfold axis in that case.
fn unfold_rotation(
    from: &TriangleFrame,
    to: &TriangleFrame,
    shared_edge: Vector3<f64>,
) -> UnitQuaternion<f64> {
    UnitQuaternion::rotation_between(&from.normal, &to.normal).unwrap_or_else(|| {
        UnitQuaternion::from_axis_angle(&Unit::new_normalize(shared_edge), std::f64::consts::PI)
    })
}

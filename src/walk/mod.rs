//! Geodesic surface traversal.
//!
//! This module moves points across a triangle mesh by a given surface
//! distance, crossing triangle boundaries and keeping the travel direction
//! tangent to the surface:
//!
//! - [`TriangleFrame`]: a triangle's tangent-plane coordinate frame, with
//!   plane projection and edge-exit intersection.
//! - [`SurfaceWalker`]: the traversal engine, built over a mesh and its
//!   [`HalfEdgeMap`](crate::mesh::HalfEdgeMap).
//!
//! # Example
//!
//! ```
//! use rove::mesh::{SurfacePoint, TriangleId, TriangleMesh};
//! use rove::walk::{SurfaceWalker, Termination, WalkOptions};
//! use nalgebra::{Point3, Vector3};
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, -1.0, 0.0),
//! ];
//! let triangles = vec![[0, 1, 2], [1, 0, 3]];
//! let mesh: TriangleMesh = TriangleMesh::from_triangles(&vertices, &triangles).unwrap();
//!
//! let walker = SurfaceWalker::new(&mesh).unwrap();
//! let start = SurfacePoint::new(Point3::new(0.5, 0.1, 0.0), TriangleId::new(0));
//!
//! // Walk through the shared edge into the second triangle
//! let walk = walker
//!     .walk(&start, &Vector3::new(0.0, -0.4, 0.0), &WalkOptions::default())
//!     .unwrap();
//! assert_eq!(walk.point.triangle, TriangleId::new(1));
//! assert_eq!(walk.termination, Termination::Completed);
//! ```

mod frame;
mod walker;

pub use frame::{EdgeCrossing, TriangleFrame};
pub use walker::{SurfaceWalker, Termination, Walk, WalkOptions};

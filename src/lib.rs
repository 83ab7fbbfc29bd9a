//! # Rove
//!
//! Geodesic traversal and blue-noise sampling on triangle meshes.
//!
//! Rove moves points across triangulated surfaces and scatters
//! well-spaced point sets over them. It is a pure in-memory geometry
//! library: meshes come in as vertex positions plus index triples, results
//! come out as points, triangle indices, and direction/normal vectors.
//! Rendering, file formats, and scene management are the caller's business.
//!
//! ## Features
//!
//! - **Surface walking**: move a point a given distance across a mesh,
//!   hopping triangle boundaries, with the direction rotated at each shared
//!   edge so the path is a geodesic (locally straight when the triangles are
//!   unfolded into a plane).
//! - **Edge adjacency**: a precomputed half-edge map with O(1)
//!   sibling-triangle lookup and non-manifold detection.
//! - **Blue-noise sampling**: weighted sample elimination over an
//!   oversampled random pool, for visually uniform point distributions.
//! - **Type-safe indices**: vertex/triangle ids generic over `u16`, `u32`,
//!   or `u64` raw index types.
//!
//! ## Quick Start
//!
//! ```
//! use rove::prelude::*;
//! use nalgebra::{Point3, Vector3};
//!
//! // A little two-triangle mesh
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, -1.0, 0.0),
//! ];
//! let triangles = vec![[0, 1, 2], [1, 0, 3]];
//! let mesh: TriangleMesh = TriangleMesh::from_triangles(&vertices, &triangles).unwrap();
//!
//! // Walk a point 0.4 across the surface, through the shared edge
//! let walker = SurfaceWalker::new(&mesh).unwrap();
//! let start = SurfacePoint::new(Point3::new(0.5, 0.1, 0.0), TriangleId::new(0));
//! let walk = walker
//!     .walk(&start, &Vector3::new(0.0, -0.4, 0.0), &WalkOptions::default())
//!     .unwrap();
//! assert_eq!(walk.point.triangle, TriangleId::new(1));
//!
//! // Scatter 50 evenly-spaced points over the same mesh
//! let mut sampler = SurfaceSampler::with_seed(&mesh, 42).unwrap();
//! let points = blue_noise(&mut sampler, 50, &BlueNoiseOptions::default());
//! assert_eq!(points.len(), 50);
//! ```
//!
//! ## Concurrency
//!
//! Meshes, adjacency maps, and walkers are immutable after construction and
//! safe to share across threads; every `walk` call keeps its state on the
//! stack. [`SurfaceWalker::walk_batch`](walk::SurfaceWalker::walk_batch)
//! walks independent points in parallel. Blue-noise elimination is a
//! sequential batch job (each removal affects the next), but its initial
//! weight pass is parallel.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod mesh;
pub mod sample;
pub mod walk;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use rove::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        HalfEdgeMap, MeshIndex, SurfacePoint, TriangleId, TriangleMesh, VertexId,
    };
    pub use crate::sample::{blue_noise, BlueNoiseOptions, SurfaceSampler};
    pub use crate::walk::{SurfaceWalker, Termination, Walk, WalkOptions};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

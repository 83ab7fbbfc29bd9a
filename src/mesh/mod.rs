//! Core mesh data structures.
//!
//! This module provides the indexed triangle mesh representation and the
//! adjacency bookkeeping the traversal and sampling algorithms are built on.
//!
//! # Overview
//!
//! The primary type is [`TriangleMesh`]: a vertex position array plus an
//! indexed triangle list, immutable once constructed. [`HalfEdgeMap`] is the
//! companion adjacency table mapping each (triangle, local edge) pair to the
//! triangle sharing that edge, built once and queried in O(1).
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers, [`VertexId`] and
//! [`TriangleId`], generic over the underlying integer type ([`MeshIndex`]
//! trait) so that `u16`, `u32`, or `u64` can be chosen based on mesh size.
//!
//! # Construction
//!
//! ```
//! use rove::mesh::TriangleMesh;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let triangles = vec![[0, 1, 2]];
//!
//! let mesh: TriangleMesh = TriangleMesh::from_triangles(&vertices, &triangles).unwrap();
//! ```

mod adjacency;
mod index;
mod triangle_mesh;

pub use adjacency::HalfEdgeMap;
pub use index::{MeshIndex, TriangleId, VertexId};
pub use triangle_mesh::{SurfacePoint, TriangleMesh};

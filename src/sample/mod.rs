//! Random and blue-noise sampling of mesh surfaces.
//!
//! Two layers live here:
//!
//! - [`SurfaceSampler`]: uniform-area random draws of `(position, triangle)`
//!   points on a mesh, with an injectable triangle-weighting strategy.
//! - [`blue_noise`] / [`eliminate`]: weighted sample elimination, turning an
//!   oversampled random pool into a near-uniformly-spaced point set.
//!
//! [`PointIndex`] is the supporting neighbor-query structure.
//!
//! # Example
//!
//! ```
//! use rove::mesh::TriangleMesh;
//! use rove::sample::{blue_noise, BlueNoiseOptions, SurfaceSampler};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let triangles = vec![[0, 1, 2], [0, 2, 3]];
//! let mesh: TriangleMesh = TriangleMesh::from_triangles(&vertices, &triangles).unwrap();
//!
//! let mut sampler = SurfaceSampler::with_seed(&mesh, 42).unwrap();
//! let points = blue_noise(&mut sampler, 100, &BlueNoiseOptions::default());
//! assert_eq!(points.len(), 100);
//! ```

mod blue_noise;
mod spatial;
mod surface;

pub use blue_noise::{blue_noise, eliminate, target_spacing, BlueNoiseOptions};
pub use spatial::PointIndex;
pub use surface::SurfaceSampler;

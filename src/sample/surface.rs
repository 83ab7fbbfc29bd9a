//! Uniform random sampling of mesh surfaces.
//!
//! [`SurfaceSampler`] draws random points on a triangle mesh: a triangle is
//! selected by binary search over a cumulative weight table (triangle area by
//! default, so the distribution is uniform per unit area), then a uniform
//! barycentric point is drawn inside it.

use nalgebra::Point3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{MeshError, Result};
use crate::mesh::{MeshIndex, SurfacePoint, TriangleId, TriangleMesh};

/// Draws `(position, triangle)` samples from a mesh surface.
///
/// The triangle-selection strategy is a weighting function over triangles;
/// the default weights by area. Samplers are generic over the random source,
/// with seedable convenience constructors for reproducible draws.
///
/// # Example
///
/// ```
/// use rove::mesh::TriangleMesh;
/// use rove::sample::SurfaceSampler;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mesh: TriangleMesh = TriangleMesh::from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
///
/// let mut sampler = SurfaceSampler::with_seed(&mesh, 42).unwrap();
/// let point = sampler.sample();
/// assert_eq!(point.triangle.index(), 0);
/// ```
#[derive(Debug)]
pub struct SurfaceSampler<'m, I: MeshIndex = u32, R: Rng = ChaCha8Rng> {
    mesh: &'m TriangleMesh<I>,
    /// Cumulative triangle weights; the last entry is the total.
    distribution: Vec<f64>,
    rng: R,
}

impl<'m, I: MeshIndex> SurfaceSampler<'m, I, ChaCha8Rng> {
    /// Create an area-weighted sampler seeded from system entropy.
    pub fn new(mesh: &'m TriangleMesh<I>) -> Result<Self> {
        Self::with_rng(mesh, ChaCha8Rng::from_entropy())
    }

    /// Create an area-weighted sampler with a fixed seed, for reproducible
    /// draws.
    pub fn with_seed(mesh: &'m TriangleMesh<I>, seed: u64) -> Result<Self> {
        Self::with_rng(mesh, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<'m, I: MeshIndex, R: Rng> SurfaceSampler<'m, I, R> {
    /// Create an area-weighted sampler over a caller-supplied random source.
    pub fn with_rng(mesh: &'m TriangleMesh<I>, rng: R) -> Result<Self> {
        Self::with_weights(mesh, rng, |mesh, t| mesh.triangle_area(t))
    }

    /// Create a sampler with a custom triangle-selection weighting.
    ///
    /// Weights must be non-negative and sum to a positive total;
    /// zero-weighted triangles are never selected.
    pub fn with_weights<W>(mesh: &'m TriangleMesh<I>, rng: R, weight: W) -> Result<Self>
    where
        W: Fn(&TriangleMesh<I>, TriangleId<I>) -> f64,
    {
        let mut distribution = Vec::with_capacity(mesh.num_triangles());
        let mut total = 0.0;
        for t in mesh.triangle_ids() {
            let w = weight(mesh, t);
            if w < 0.0 || w.is_nan() {
                return Err(MeshError::invalid_param(
                    "weight",
                    w,
                    "triangle weights must be non-negative",
                ));
            }
            total += w;
            distribution.push(total);
        }

        if total <= 0.0 {
            return Err(MeshError::InvalidState(
                "surface distribution has zero total weight".to_string(),
            ));
        }

        Ok(Self { mesh, distribution, rng })
    }

    /// The mesh this sampler draws from.
    #[inline]
    pub fn mesh(&self) -> &TriangleMesh<I> {
        self.mesh
    }

    /// Total weight of the distribution (total surface area for the default
    /// weighting).
    #[inline]
    pub fn total_weight(&self) -> f64 {
        self.distribution.last().copied().unwrap_or(0.0)
    }

    /// Draw a triangle according to the weight distribution.
    pub fn sample_triangle(&mut self) -> TriangleId<I> {
        let target = self.rng.gen::<f64>() * self.total_weight();
        let i = self
            .distribution
            .partition_point(|&cumulative| cumulative <= target)
            .min(self.distribution.len() - 1);
        TriangleId::new(i)
    }

    /// Draw a uniform random point on the surface.
    pub fn sample(&mut self) -> SurfacePoint<I> {
        let t = self.sample_triangle();
        let [a, b, c] = self.mesh.triangle_positions(t);

        // Uniform barycentric coordinates via the fold method
        let mut u: f64 = self.rng.gen();
        let mut v: f64 = self.rng.gen();
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }

        let position: Point3<f64> = a + (b - a) * u + (c - a) * v;
        SurfacePoint::new(position, t)
    }
}
